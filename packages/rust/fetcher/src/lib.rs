//! Logo retrieval over HTTP.
//!
//! [`LogoFetcher::fetch`] returns the raw bytes of a logo image, or `None`
//! when retrieval fails for any reason. Failures are logged at the boundary
//! and never propagate — a bad logo must not be able to abort a batch.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use tokentint_shared::{FetchConfig, Result, TokenTintError};

/// User-Agent string for logo requests.
const USER_AGENT: &str = concat!("tokentint/", env!("CARGO_PKG_VERSION"));

/// Sequential HTTP fetcher for logo images.
pub struct LogoFetcher {
    client: Client,
}

impl LogoFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                TokenTintError::Network(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client })
    }

    /// Fetch the raw bytes behind a logo URI.
    ///
    /// Returns `None` on any failure: malformed URL, unsupported scheme,
    /// connect error, non-2xx status, timeout, or body read error. The
    /// cause is logged; callers only see the absent sentinel. No retries.
    pub async fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        match self.fetch_inner(url).await {
            Ok(bytes) => {
                debug!(%url, len = bytes.len(), "logo fetched");
                Some(bytes)
            }
            Err(e) => {
                warn!(%url, error = %e, "logo fetch failed");
                None
            }
        }
    }

    async fn fetch_inner(&self, url: &str) -> Result<Vec<u8>> {
        let parsed = Url::parse(url)
            .map_err(|e| TokenTintError::Network(format!("{url}: invalid URL: {e}")))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(TokenTintError::Network(format!(
                "{url}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| TokenTintError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TokenTintError::Network(format!("{url}: HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TokenTintError::Network(format!("{url}: body read failed: {e}")))?;

        Ok(bytes.to_vec())
    }
}
