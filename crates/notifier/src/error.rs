use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("No notification destination configured for {sink}")]
    MissingDestination { sink: &'static str },

    #[error("Notification request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Notification endpoint returned {status}")]
    Status { status: u16 },
}
