// Entry point invoked by the scheduler: one reconciliation pass per process.

use anyhow::{Context, Result};
use race_watch::{
    run, CalendarExtractor, Config, NatsClientPublisher, NatsNotifier, PostgresStore, RunError,
};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit code for configuration or startup failures.
const EXIT_STARTUP: u8 = 4;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,race_watch=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env().context("Failed to load configuration") {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{:#}", e);
            return ExitCode::from(EXIT_STARTUP);
        }
    };

    match run_once(config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(EXIT_STARTUP)
        }
    }
}

async fn run_once(config: Config) -> Result<ExitCode> {
    tracing::info!(
        calendar = %config.calendar_url,
        policy = %config.persistence_policy,
        "Starting race calendar check"
    );

    let extractor = CalendarExtractor::new(&config.calendar_url, config.http_timeout)
        .context("Failed to create HTTP client")?;

    let store = match PostgresStore::connect(config.database_url.expose()).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            return Ok(ExitCode::from(RunError::Store(e).exit_code()));
        }
    };

    let publisher = NatsClientPublisher::connect(
        &config.nats_url,
        config.nats_token.as_ref().map(|token| token.expose()),
    )
    .await
    .context("Failed to connect to NATS")?;
    let notifier = NatsNotifier::new(publisher, &config.notify_subject);

    match run(&extractor, &store, &notifier, config.persistence_policy).await {
        Ok(report) => {
            tracing::info!(
                stored = report.stored_races,
                scraped = report.scraped_races,
                changes = report.changes,
                written = report.snapshot_written,
                races_written = report.races_written,
                sent = report.notifications_sent,
                failed = report.notifications_failed,
                "Race calendar check complete"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!(error = %e, "Race calendar check failed");
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
