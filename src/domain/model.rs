use crate::domain::ports::Storage;
use crate::utils::error::{Result, SeedError};
use serde_json::{Map, Value};

/// A seed row. The field set is whatever the seed file carries; it is sent as-is.
pub type Record = Value;

/// Parsed seed file. Collections are looked up by key when they are needed,
/// so a missing key only surfaces once the loader reaches it.
#[derive(Debug, Clone)]
pub struct SeedDocument {
    fields: Map<String, Value>,
}

impl SeedDocument {
    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        tracing::debug!("Reading seed document from {}", path);
        let bytes = storage.read_file(path).await?;
        Self::from_slice(&bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(SeedError::Parse(serde::de::Error::custom(format!(
                "expected a top-level object, found {}",
                kind_of(&other)
            )))),
        }
    }

    pub fn collection(&self, field: &str) -> Result<&[Record]> {
        match self.fields.get(field) {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(SeedError::InvalidField {
                field: field.to_string(),
                found: kind_of(other).to_string(),
            }),
            None => Err(SeedError::MissingField {
                field: field.to_string(),
            }),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    pub table: String,
    pub records: usize,
    pub batches: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub intersections: UploadSummary,
    pub phases: UploadSummary,
}
