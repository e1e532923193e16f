//! Offline stock reconciliation
//!
//! Recomputes every equipment's counters from the production and movement
//! journals and overwrites the ones that drifted. Run it while the server
//! is stopped.

use anyhow::Context;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mix_production_server::{
    config::AppConfig,
    repository::Repository,
    services::reconciliation::{ReconciliationReport, ReconciliationService},
};

#[derive(Parser)]
#[command(name = "reconcile")]
#[command(about = "Recompute equipment stock counters from the production journal")]
struct Args {
    /// Report discrepancies without writing anything
    #[arg(long)]
    verify: bool,

    /// Database URL (defaults to the configured one)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "mix_production_server={},reconcile={}",
            config.logging.level, config.logging.level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let url = args.database_url.unwrap_or(config.database.url);
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let service = ReconciliationService::new(Repository::new(pool));
    let report = if args.verify {
        service.verify().await?
    } else {
        service.repair().await?
    };

    println!(
        "{} production records ({} resets), {} manual movements, {} equipment",
        report.production_records,
        report.reset_records,
        report.manual_movements,
        report.equipment.len()
    );
    for item in &report.equipment {
        let marker = if item.is_consistent() { "ok" } else if args.verify { "DRIFT" } else { "FIXED" };
        println!(
            "  [{:>5}] {}: stock {} -> {}, resets {} -> {}",
            marker,
            item.model_name,
            item.stored.current_stock,
            item.expected.current_stock,
            item.stored.total_resets,
            item.expected.total_resets
        );
    }

    finish(&report, args.verify)
}

/// Summarise the run; drift found in verify mode is an error (exit 1)
fn finish(report: &ReconciliationReport, verify: bool) -> anyhow::Result<()> {
    let drifted = report.discrepancies().count();
    if drifted == 0 {
        println!("All counters consistent");
    } else if verify {
        anyhow::bail!("{} equipment need repair; run without --verify to fix", drifted);
    } else {
        println!("{} equipment repaired", drifted);
    }
    Ok(())
}
