//! Notification delivery for keyword misses.
//!
//! A `Notifier` wraps exactly one `NotifySink`. Delivery is best effort:
//! failures are logged and never reach the monitor loop, and nothing is
//! retried.

pub mod backend;
pub mod error;
pub mod notifier;
pub mod slack;

pub use backend::NotifySink;
pub use error::NotifyError;
pub use notifier::{Notifier, build_sink};
pub use slack::SlackWebhook;
