use crate::utils::error::{Result, SeedError};
use crate::utils::validation::validate_url;
use std::fmt;
use url::Url;

/// Endpoint variables, highest priority first.
pub const ENDPOINT_VARS: &[&str] = &["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"];

/// Key variables, highest priority first. The service role key bypasses RLS,
/// the anon key only works when the table policies allow inserts.
pub const KEY_VARS: &[&str] = &[
    "SUPABASE_SERVICE_ROLE_KEY",
    "SUPABASE_KEY",
    "NEXT_PUBLIC_SUPABASE_ANON_KEY",
];

/// Returns the first name among `names` with a non-empty value, with that value.
pub fn resolve_first<'a, F>(names: &[&'a str], lookup: F) -> Option<(&'a str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    names.iter().find_map(|name| {
        lookup(*name)
            .filter(|value| !value.is_empty())
            .map(|value| (*name, value))
    })
}

#[derive(Clone)]
pub struct SupabaseCredentials {
    pub url: String,
    /// Variable the endpoint was read from.
    pub url_var: &'static str,
    pub key: String,
    pub key_var: &'static str,
}

impl SupabaseCredentials {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = resolve_first(ENDPOINT_VARS, &lookup);
        let key = resolve_first(KEY_VARS, &lookup);

        match (url, key) {
            (Some((url_var, url)), Some((key_var, key))) => {
                tracing::debug!("Resolved Supabase endpoint from {}: {}", url_var, url);
                Ok(Self {
                    url,
                    url_var,
                    key,
                    key_var,
                })
            }
            _ => Err(SeedError::MissingCredentials {
                endpoint_vars: alternatives(ENDPOINT_VARS),
                key_vars: alternatives(KEY_VARS),
            }),
        }
    }

    /// Parses the endpoint as an http(s) URL, reporting errors against the
    /// variable it came from.
    pub fn endpoint(&self) -> Result<Url> {
        validate_url(self.url_var, &self.url)
    }
}

fn alternatives(names: &[&str]) -> String {
    match names.split_first() {
        Some((first, [])) => first.to_string(),
        Some((first, rest)) => format!("{} (or {})", first, rest.join(", ")),
        None => String::new(),
    }
}

impl fmt::Debug for SupabaseCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.key.chars().take(6).collect();
        f.debug_struct("SupabaseCredentials")
            .field("url", &self.url)
            .field("url_var", &self.url_var)
            .field("key", &format!("{}***", visible))
            .field("key_var", &self.key_var)
            .finish()
    }
}
