use std::sync::Arc;

use pagewatch_common::FetchOutcome;

use crate::checker;
use crate::client::PageClient;
use crate::retry::RetryPolicy;

/// Fetches one page with retry/backoff and checks it for the keyword.
pub struct PageFetcher {
    client: Arc<dyn PageClient>,
    policy: RetryPolicy,
}

impl PageFetcher {
    pub fn new(client: Arc<dyn PageClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetch `url` and test it for `keyword`.
    ///
    /// Any response ends the attempt loop, whether or not the keyword is
    /// present. If every attempt fails the outcome is "not found" with empty
    /// content, the same signal callers get for a page missing the keyword.
    pub async fn fetch(&self, url: &str, keyword: &str) -> FetchOutcome {
        for attempt in 0..self.policy.attempts {
            match self.client.get(url).await {
                Ok(body) => {
                    return if checker::contains_keyword(&body, keyword) {
                        tracing::info!(url, keyword, "Keyword found");
                        FetchOutcome::found(url, body)
                    } else {
                        tracing::info!(url, keyword, "Keyword not found");
                        FetchOutcome::missing(url, body)
                    };
                }
                Err(e) => {
                    tracing::error!(
                        url,
                        attempt = attempt + 1,
                        attempts = self.policy.attempts,
                        error = %e,
                        "Error checking website"
                    );

                    if !self.policy.is_last(attempt) {
                        let delay = self.policy.delay_for(attempt);
                        tracing::debug!(
                            url,
                            delay_ms = delay.as_millis() as u64,
                            "Backing off before next attempt"
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        tracing::warn!(url, attempts = self.policy.attempts, "All fetch attempts failed");
        FetchOutcome::unreachable(url)
    }
}
