//! Monitor control loop.
//!
//! Each cycle fans out one fetch task per configured URL, joins them all,
//! notifies for every URL whose keyword was not found, then idles for a
//! jittered interval. A cycle never overlaps the next one.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::watch;

use pagewatch_common::{FetchOutcome, MonitorConfig, NotificationMessage};
use pagewatch_fetcher::PageFetcher;
use pagewatch_notifier::Notifier;

use crate::jitter::jittered_interval;

pub struct Monitor {
    config: Arc<MonitorConfig>,
    fetcher: Arc<PageFetcher>,
    notifier: Notifier,
}

impl Monitor {
    pub fn new(config: Arc<MonitorConfig>, fetcher: PageFetcher, notifier: Notifier) -> Self {
        Self {
            config,
            fetcher: Arc::new(fetcher),
            notifier,
        }
    }

    /// Run cycles until `shutdown` becomes `true`.
    ///
    /// The signal is checked between cycles and raced against both the
    /// in-flight cycle and the idle sleep; whatever is pending is abandoned.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            urls = self.config.urls.len(),
            keyword = %self.config.keyword,
            "Monitor started"
        );

        let mut cycle: u64 = 0;
        loop {
            if *shutdown.borrow() {
                break;
            }
            cycle += 1;

            let outcomes = tokio::select! {
                outcomes = self.run_cycle() => outcomes,
                _ = shutdown_requested(&mut shutdown) => break,
            };

            let misses = outcomes.iter().filter(|o| !o.keyword_found).count();
            let pause = jittered_interval(self.config.check_interval, &mut rand::rng());
            tracing::info!(
                cycle,
                urls = outcomes.len(),
                misses,
                sleep_ms = pause.as_millis() as u64,
                "Cycle complete"
            );

            tokio::select! {
                _ = tokio::time::sleep(pause) => {}
                _ = shutdown_requested(&mut shutdown) => break,
            }
        }

        tracing::info!(cycles = cycle, "Monitoring stopped");
    }

    /// Fetch every URL concurrently, then notify for each miss.
    ///
    /// Returns one outcome per configured URL in configuration order. A fetch
    /// task that panics is reported as unreachable for its URL only.
    pub async fn run_cycle(&self) -> Vec<FetchOutcome> {
        let tasks: Vec<_> = self
            .config
            .urls
            .iter()
            .map(|url| {
                let fetcher = Arc::clone(&self.fetcher);
                let url = url.clone();
                let keyword = self.config.keyword.clone();
                tokio::spawn(async move { fetcher.fetch(&url, &keyword).await })
            })
            .collect();

        let outcomes: Vec<FetchOutcome> = join_all(tasks)
            .await
            .into_iter()
            .zip(&self.config.urls)
            .map(|(joined, url)| match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!(url = %url, error = %e, "Fetch task failed");
                    FetchOutcome::unreachable(url.as_str())
                }
            })
            .collect();

        self.dispatch(&outcomes).await;
        outcomes
    }

    /// Send one notification per outcome whose keyword was not found.
    async fn dispatch(&self, outcomes: &[FetchOutcome]) {
        let messages: Vec<String> = outcomes
            .iter()
            .filter(|o| !o.keyword_found)
            .map(|o| NotificationMessage::from_outcome(o, &self.config.keyword).to_string())
            .collect();

        join_all(messages.iter().map(|m| self.notifier.notify(m))).await;
    }
}

/// Resolves once shutdown is signalled. A dropped sender can never signal,
/// so in that case this never resolves.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    let sender_dropped = shutdown.wait_for(|stop| *stop).await.is_err();
    if sender_dropped {
        std::future::pending::<()>().await;
    }
}
