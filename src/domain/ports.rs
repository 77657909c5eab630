use crate::domain::model::Record;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Bulk insert into a named remote table.
#[async_trait]
pub trait TableClient: Send + Sync {
    async fn insert(&self, table: &str, rows: &[Record]) -> Result<()>;
}
