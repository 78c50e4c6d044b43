use pagewatch_common::{SinkConfig, SinkKind};

use crate::backend::NotifySink;
use crate::slack::SlackWebhook;

/// Build the sink described by `config`.
pub fn build_sink(config: &SinkConfig, http: reqwest::Client) -> Box<dyn NotifySink> {
    match config.kind {
        SinkKind::Slack => Box::new(SlackWebhook::new(config.url.clone(), http)),
    }
}

/// Best-effort message delivery to a single sink.
pub struct Notifier {
    sink: Box<dyn NotifySink>,
}

impl Notifier {
    pub fn new(sink: Box<dyn NotifySink>) -> Self {
        Self { sink }
    }

    pub fn from_config(config: &SinkConfig, http: reqwest::Client) -> Self {
        Self::new(build_sink(config, http))
    }

    /// Deliver `message`. Never fails: errors are logged and dropped.
    pub async fn notify(&self, message: &str) {
        match self.sink.send(message).await {
            Ok(()) => tracing::info!(sink = self.sink.name(), "Notification sent successfully"),
            Err(e) => tracing::error!(
                sink = self.sink.name(),
                error = %e,
                "Error sending notification"
            ),
        }
    }
}
