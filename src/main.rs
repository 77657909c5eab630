use greenwave_seed::utils::logger;
use greenwave_seed::{run_seed, LocalStorage};

#[tokio::main]
async fn main() {
    logger::init_cli_logger();

    tracing::info!("Starting greenwave-seed");

    let storage = LocalStorage::new(".");

    match run_seed(|name| std::env::var(name).ok(), &storage).await {
        Ok(report) => {
            tracing::info!(
                "✅ Seeded {} intersections ({} batches) and {} signal phases ({} batches)",
                report.intersections.records,
                report.intersections.batches,
                report.phases.records,
                report.phases.batches
            );
        }
        Err(e) => {
            tracing::error!("❌ Seeding failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(1);
        }
    }
}
