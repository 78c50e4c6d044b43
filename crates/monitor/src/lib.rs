pub mod jitter;
pub mod logging;
pub mod scheduler;

pub use scheduler::Monitor;
