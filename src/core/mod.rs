pub mod engine;
pub mod uploader;

pub use crate::domain::model::{Record, SeedDocument, SeedReport, UploadSummary};
pub use crate::domain::ports::{Storage, TableClient};
pub use crate::utils::error::Result;
