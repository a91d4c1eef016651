pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{rest::RestTable, storage::LocalStorage, table::read_table};
pub use config::{cli::ImportArgs, settings::ImportSettings, BackendConfig, Credentials};
pub use crate::core::{
    cleaner::clean_record,
    etl::{ImportEngine, ImportOptions},
    preview::PreviewReport,
    sales_update::SalesUpdater,
};
pub use utils::error::{ImportError, Result};
