use crate::config::SupabaseCredentials;
use crate::domain::model::Record;
use crate::domain::ports::TableClient;
use crate::utils::error::{Result, SeedError};
use crate::utils::validation::validate_non_empty_string;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

const REST_PATH: [&str; 2] = ["rest", "v1"];

/// Error body returned by PostgREST on a rejected request.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
    code: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl PostgrestError {
    fn describe(&self) -> String {
        let mut text = self.message.clone();
        if let Some(code) = &self.code {
            text.push_str(&format!(" [{}]", code));
        }
        if let Some(details) = &self.details {
            text.push_str(&format!("; details: {}", details));
        }
        if let Some(hint) = &self.hint {
            text.push_str(&format!("; hint: {}", hint));
        }
        text
    }
}

/// Table client for a Supabase project's PostgREST endpoint.
///
/// Nothing is sent on construction; a bad key only shows up on the first insert.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    base_url: Url,
    endpoint_var: &'static str,
    client: Client,
}

impl SupabaseClient {
    pub fn new(credentials: &SupabaseCredentials) -> Result<Self> {
        let base_url = credentials.endpoint()?;
        validate_non_empty_string(credentials.key_var, &credentials.key)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            header_value(credentials.key_var, &credentials.key)?,
        );
        headers.insert(
            AUTHORIZATION,
            header_value(credentials.key_var, &format!("Bearer {}", credentials.key))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("prefer", HeaderValue::from_static("return=representation"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            base_url,
            endpoint_var: credentials.url_var,
            client,
        })
    }

    pub fn table_url(&self, table: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SeedError::InvalidConfigValue {
                field: self.endpoint_var.to_string(),
                value: self.base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(REST_PATH)
            .push(table);
        Ok(url)
    }
}

/// Quoted, comma-joined union of the object keys in `rows`, in first-seen
/// order. PostgREST inserts null for a listed column a row does not carry;
/// without this parameter it rejects batches whose rows have different keys.
pub fn insert_columns(rows: &[Record]) -> Option<String> {
    let mut keys: Vec<&str> = Vec::new();
    for row in rows {
        if let serde_json::Value::Object(fields) = row {
            for key in fields.keys() {
                if !keys.contains(&key.as_str()) {
                    keys.push(key);
                }
            }
        }
    }

    if keys.is_empty() {
        return None;
    }

    let quoted: Vec<String> = keys.iter().map(|key| format!("\"{}\"", key)).collect();
    Some(quoted.join(","))
}

fn header_value(field: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| SeedError::InvalidConfigValue {
        field: field.to_string(),
        value: "<redacted>".to_string(),
        reason: format!("not a valid HTTP header value: {}", e),
    })
}

#[async_trait::async_trait]
impl TableClient for SupabaseClient {
    async fn insert(&self, table: &str, rows: &[Record]) -> Result<()> {
        let mut url = self.table_url(table)?;
        if let Some(columns) = insert_columns(rows) {
            url.query_pairs_mut().append_pair("columns", &columns);
        }

        tracing::debug!("POST {} ({} rows)", url, rows.len());
        let response = self.client.post(url).json(rows).send().await?;
        let status = response.status();
        tracing::debug!("Insert response status: {}", status);

        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<PostgrestError>(&body) {
                Ok(err) => err.describe(),
                Err(_) => body,
            };
            return Err(SeedError::Remote {
                table: table.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        if let Ok(serde_json::Value::Array(inserted)) =
            serde_json::from_str::<serde_json::Value>(&body)
        {
            tracing::debug!("{} rows returned by {}", inserted.len(), table);
        }

        Ok(())
    }
}
