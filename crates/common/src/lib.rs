pub mod config;
pub mod error;
pub mod types;

pub use config::{MonitorConfig, SinkConfig};
pub use error::ConfigError;
pub use types::{FetchOutcome, NotificationMessage, SinkKind};
