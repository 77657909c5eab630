use crate::core::uploader::BatchUploader;
use crate::domain::model::{SeedDocument, SeedReport};
use crate::domain::ports::{Storage, TableClient};
use crate::utils::error::Result;
use std::io::Write;

/// Seed file read from the working directory.
pub const SEED_FILE: &str = "final_seed_data.json";

pub const INTERSECTIONS_FIELD: &str = "intersections";
pub const INTERSECTIONS_TABLE: &str = "intersections";
pub const PHASES_FIELD: &str = "phases";
pub const PHASES_TABLE: &str = "signal_phases";

pub struct SeedEngine<C: TableClient> {
    uploader: BatchUploader<C>,
    seed_path: String,
}

impl<C: TableClient> SeedEngine<C> {
    pub fn new(client: C) -> Self {
        Self::with_seed_path(client, SEED_FILE)
    }

    pub fn with_seed_path(client: C, seed_path: impl Into<String>) -> Self {
        Self {
            uploader: BatchUploader::new(client),
            seed_path: seed_path.into(),
        }
    }

    /// Uploads intersections, then signal phases, with progress on stdout.
    /// A failure in either stops the run; rows from batches that already
    /// succeeded stay in the tables.
    pub async fn run<S: Storage>(&self, storage: &S) -> Result<SeedReport> {
        self.run_with_output(storage, &mut std::io::stdout()).await
    }

    pub async fn run_with_output<S: Storage, W: Write>(
        &self,
        storage: &S,
        out: &mut W,
    ) -> Result<SeedReport> {
        let document = SeedDocument::load(storage, &self.seed_path).await?;
        tracing::debug!("Seed document {} loaded", self.seed_path);

        writeln!(out, "Starting upload...")?;

        let intersections = self
            .uploader
            .upload(
                INTERSECTIONS_TABLE,
                "intersections",
                document.collection(INTERSECTIONS_FIELD)?,
                out,
            )
            .await?;

        let phases = self
            .uploader
            .upload(
                PHASES_TABLE,
                "signal phases",
                document.collection(PHASES_FIELD)?,
                out,
            )
            .await?;

        writeln!(out, "Upload Complete! Check your Supabase Table Editor.")?;

        Ok(SeedReport {
            intersections,
            phases,
        })
    }
}
