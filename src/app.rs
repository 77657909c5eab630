use crate::adapters::supabase::SupabaseClient;
use crate::config::SupabaseCredentials;
use crate::core::engine::SeedEngine;
use crate::domain::model::SeedReport;
use crate::domain::ports::Storage;
use crate::utils::error::Result;

/// Resolves credentials, builds the Supabase client and runs the seed engine.
///
/// Credentials are resolved and the endpoint parsed before `storage` is
/// touched or any request is made.
pub async fn run_seed<F, S>(lookup: F, storage: &S) -> Result<SeedReport>
where
    F: Fn(&str) -> Option<String>,
    S: Storage,
{
    let credentials = SupabaseCredentials::from_lookup(lookup)?;
    tracing::debug!("Using credentials: {:?}", credentials);

    let client = SupabaseClient::new(&credentials)?;
    let engine = SeedEngine::new(client);

    engine.run(storage).await
}
