use async_trait::async_trait;
use serde_json::json;

use crate::backend::NotifySink;
use crate::error::NotifyError;

/// Slack-style incoming webhook: POSTs `{"text": message}` as JSON.
pub struct SlackWebhook {
    webhook_url: Option<String>,
    http: reqwest::Client,
}

impl SlackWebhook {
    pub fn new(webhook_url: Option<String>, http: reqwest::Client) -> Self {
        Self { webhook_url, http }
    }

    async fn post(&self, url: &str, payload: serde_json::Value) -> Result<(), NotifyError> {
        let resp = self.http.post(url).json(&payload).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Slack webhook returned non-success");
            return Err(NotifyError::Status {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl NotifySink for SlackWebhook {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let Some(url) = self.webhook_url.as_deref() else {
            return Err(NotifyError::MissingDestination { sink: self.name() });
        };

        self.post(url, json!({ "text": text })).await
    }
}
