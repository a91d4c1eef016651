use crate::domain::model::{CleanedRecord, LoadResult, Row};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn table(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}

/// Row-level writes against the remote table.
#[async_trait]
pub trait TableWriter: Send + Sync {
    async fn insert_row(&self, row: &CleanedRecord) -> LoadResult<()>;

    /// Returns `None` when no row carries `id`.
    async fn update_row(&self, id: &str, changes: &Row) -> LoadResult<Option<serde_json::Value>>;
}
