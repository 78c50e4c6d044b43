use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;

/// Source of page bodies. One call is one attempt; retrying is the caller's job.
#[async_trait]
pub trait PageClient: Send + Sync {
    /// GET `url` and return the body text of a 2xx response.
    async fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// Build the shared HTTP client used for page fetches and webhook posts.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("pagewatch/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// `PageClient` backed by reqwest.
pub struct HttpPageClient {
    http: reqwest::Client,
}

impl HttpPageClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PageClient for HttpPageClient {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(FetchError::Body)
    }
}
