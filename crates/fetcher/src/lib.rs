pub mod checker;
pub mod client;
pub mod error;
pub mod fetcher;
pub mod retry;

pub use client::{HttpPageClient, PageClient, build_http_client};
pub use error::FetchError;
pub use fetcher::PageFetcher;
pub use retry::RetryPolicy;
