pub mod cleaner;
pub mod etl;
pub mod instructions;
pub mod preview;
pub mod sales_update;

pub use crate::domain::model::{CleanedRecord, ImportSummary, Record};
pub use crate::domain::ports::{ConfigProvider, Storage, TableWriter};
pub use crate::utils::error::Result;
