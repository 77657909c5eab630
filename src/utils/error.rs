use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Missing Supabase credentials. Set {endpoint_vars} and {key_vars}")]
    MissingCredentials {
        endpoint_vars: String,
        key_vars: String,
    },

    #[error("Invalid value for {field}: {reason} (got '{value}')")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Seed document has no '{field}' field")]
    MissingField { field: String },

    #[error("Seed field '{field}' is not an array (found {found})")]
    InvalidField { field: String, found: String },

    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Insert into '{table}' rejected with status {status}: {message}")]
    Remote {
        table: String,
        status: u16,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Remote,
}

impl SeedError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SeedError::MissingCredentials { .. } | SeedError::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
            SeedError::Io(_)
            | SeedError::Parse(_)
            | SeedError::MissingField { .. }
            | SeedError::InvalidField { .. } => ErrorCategory::Input,
            SeedError::Http(_) | SeedError::Remote { .. } => ErrorCategory::Remote,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Could not read seed data: {}", self),
            ErrorCategory::Remote => format!("Upload aborted: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SeedError::MissingCredentials { .. } => {
                "Export the project URL and a service role key from the Supabase dashboard (Project Settings -> API)"
            }
            SeedError::InvalidConfigValue { .. } => {
                "Check that the Supabase URL includes the http(s) scheme"
            }
            SeedError::Io(_) => "Run from the directory containing final_seed_data.json",
            SeedError::Parse(_) | SeedError::MissingField { .. } | SeedError::InvalidField { .. } => {
                "Regenerate the seed file; it needs top-level 'intersections' and 'phases' arrays"
            }
            SeedError::Http(_) => "Check network connectivity to the Supabase project",
            SeedError::Remote { status, .. } if *status == 401 || *status == 403 => {
                "Use the service role key, or allow inserts for this key in the table's RLS policies"
            }
            SeedError::Remote { .. } => {
                "Batches already uploaded stay committed; clear the tables before re-running"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let missing = SeedError::MissingField {
            field: "phases".to_string(),
        };
        assert_eq!(missing.category(), ErrorCategory::Input);

        let remote = SeedError::Remote {
            table: "intersections".to_string(),
            status: 401,
            message: "Invalid API key".to_string(),
        };
        assert_eq!(remote.category(), ErrorCategory::Remote);
        assert!(remote.recovery_suggestion().contains("RLS"));
        assert!(remote.user_friendly_message().starts_with("Upload aborted"));
    }
}
