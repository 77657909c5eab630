pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{storage::LocalStorage, supabase::SupabaseClient};
pub use app::run_seed;
pub use config::SupabaseCredentials;
pub use core::{engine::SeedEngine, uploader::BatchUploader};
pub use utils::error::{Result, SeedError};
