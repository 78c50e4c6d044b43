use std::sync::Arc;

use tokio::sync::watch;

use pagewatch_common::MonitorConfig;
use pagewatch_fetcher::{HttpPageClient, PageFetcher, RetryPolicy, build_http_client};
use pagewatch_monitor::{Monitor, logging};
use pagewatch_notifier::Notifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing (stdout + log file); the guard flushes the file on exit
    let _log_guard = logging::init(&logging::log_path_from_env())?;

    tracing::info!("PageWatch starting...");

    // Load configuration; an invalid config never reaches the loop
    let config = match MonitorConfig::load() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    config.log_redacted();

    // One connection pool shared by page fetches and webhook posts
    let http = build_http_client(config.request_timeout)?;

    let fetcher = PageFetcher::new(
        Arc::new(HttpPageClient::new(http.clone())),
        RetryPolicy::from_config(&config),
    );
    let notifier = Notifier::from_config(&config.notification, http);
    let monitor = Monitor::new(Arc::clone(&config), fetcher, notifier);

    // Flip the shutdown flag on Ctrl+C. If the handler cannot be installed the
    // default signal disposition still terminates the process.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Received shutdown signal, stopping gracefully...");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
        }
    });

    monitor.run(shutdown_rx).await;

    tracing::info!("PageWatch stopped.");
    Ok(())
}
