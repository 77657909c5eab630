use crate::domain::model::{Record, UploadSummary};
use crate::domain::ports::TableClient;
use crate::utils::error::Result;
use std::io::Write;

/// Rows per insert request.
pub const BATCH_SIZE: usize = 100;

/// Progress line for the batch starting at `start`. The end is always
/// `start + BATCH_SIZE`, including for a shorter final batch.
pub fn progress_line(start: usize) -> String {
    format!("Uploaded batch {} - {}", start, start + BATCH_SIZE)
}

pub struct BatchUploader<C: TableClient> {
    client: C,
}

impl<C: TableClient> BatchUploader<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Inserts `records` into `table` one batch at a time, writing a progress
    /// line to `out` after each accepted batch. The first failed batch is
    /// returned as the error and nothing after it is sent.
    pub async fn upload<W: Write>(
        &self,
        table: &str,
        label: &str,
        records: &[Record],
        out: &mut W,
    ) -> Result<UploadSummary> {
        writeln!(out, "Uploading {} {}...", records.len(), label)?;

        let mut batches = 0;
        for (index, batch) in records.chunks(BATCH_SIZE).enumerate() {
            let start = index * BATCH_SIZE;
            tracing::debug!(
                "Inserting {} rows into {} from index {}",
                batch.len(),
                table,
                start
            );

            self.client.insert(table, batch).await?;

            writeln!(out, "{}", progress_line(start))?;
            batches += 1;
        }

        tracing::info!(
            "{} rows inserted into {} in {} batches",
            records.len(),
            table,
            batches
        );

        Ok(UploadSummary {
            table: table.to_string(),
            records: records.len(),
            batches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SeedError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingClient {
        calls: Arc<Mutex<Vec<(String, Vec<Record>)>>>,
        fail_on_call: Option<usize>,
    }

    #[async_trait]
    impl TableClient for RecordingClient {
        async fn insert(&self, table: &str, rows: &[Record]) -> Result<()> {
            let mut calls = self.calls.lock().unwrap();
            if self.fail_on_call == Some(calls.len()) {
                return Err(SeedError::Remote {
                    table: table.to_string(),
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            calls.push((table.to_string(), rows.to_vec()));
            Ok(())
        }
    }

    fn records(n: usize) -> Vec<Record> {
        (0..n).map(|i| json!({"id": i})).collect()
    }

    #[test]
    fn test_progress_line_uses_nominal_end() {
        assert_eq!(progress_line(0), "Uploaded batch 0 - 100");
        assert_eq!(progress_line(200), "Uploaded batch 200 - 300");
    }

    #[tokio::test]
    async fn test_batches_cover_input_in_order() {
        let client = RecordingClient::default();
        let uploader = BatchUploader::new(client.clone());
        let input = records(250);

        let mut out = Vec::new();

        let summary = uploader
            .upload("intersections", "intersections", &input, &mut out)
            .await
            .unwrap();

        assert_eq!(summary.batches, 3);
        assert_eq!(summary.records, 250);

        let calls = client.calls.lock().unwrap();
        let sizes: Vec<usize> = calls.iter().map(|(_, rows)| rows.len()).collect();
        assert_eq!(sizes, vec![100, 100, 50]);

        let rebuilt: Vec<Record> = calls.iter().flat_map(|(_, rows)| rows.clone()).collect();
        assert_eq!(rebuilt, input);
        assert!(calls.iter().all(|(table, _)| table == "intersections"));

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Uploading 250 intersections...\n\
             Uploaded batch 0 - 100\n\
             Uploaded batch 100 - 200\n\
             Uploaded batch 200 - 300\n"
        );
    }

    #[tokio::test]
    async fn test_exact_multiple_and_empty() {
        let client = RecordingClient::default();
        let uploader = BatchUploader::new(client.clone());

        let mut out = std::io::sink();

        let summary = uploader
            .upload("t", "rows", &records(200), &mut out)
            .await
            .unwrap();
        assert_eq!(summary.batches, 2);

        let mut out = Vec::new();
        let summary = uploader.upload("t", "rows", &[], &mut out).await.unwrap();
        assert_eq!(summary.batches, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "Uploading 0 rows...\n");
        assert_eq!(client.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_stops_at_first_failed_batch() {
        let client = RecordingClient {
            fail_on_call: Some(1),
            ..Default::default()
        };
        let uploader = BatchUploader::new(client.clone());
        let mut out = Vec::new();

        let err = uploader
            .upload("signal_phases", "signal phases", &records(450), &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, SeedError::Remote { status: 500, .. }));
        // only batch 0 went through; batches 2..4 were never attempted
        assert_eq!(client.calls.lock().unwrap().len(), 1);
        // no progress line for the rejected batch
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Uploading 450 signal phases...\nUploaded batch 0 - 100\n"
        );
    }
}
