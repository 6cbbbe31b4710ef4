use std::time::Duration;
use tracing::warn;
use url::Url;

use sift_core::{Result, SiftError};

/// Sentinel returned when an allow-listed endpoint cannot be reached.
/// Callers render an unavailability notice instead of failing the run.
pub const REALTIME_UNAVAILABLE: &str = "realtime_unavailable";

/// HTTP GET tool restricted to a configured domain allow-list.
///
/// The allow-list is process-wide configuration loaded at startup.
/// A host outside the list is a [`SiftError::ToolValidation`] — that is
/// a caller bug, not a network condition — while connection and timeout
/// failures fold into the [`REALTIME_UNAVAILABLE`] sentinel.
pub struct RealtimeFetcher {
    client: reqwest::Client,
    allowed_domains: Vec<String>,
}

impl RealtimeFetcher {
    pub fn new(allowed_domains: Vec<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            allowed_domains,
        }
    }

    /// Whether a host suffix-matches an allow-list entry.
    /// `status.tips.example.org` matches the entry `tips.example.org`,
    /// but `eviltips.example.org.attacker.io` does not.
    fn host_allowed(&self, host: &str) -> bool {
        self.allowed_domains.iter().any(|allowed| {
            host == allowed || host.ends_with(&format!(".{allowed}"))
        })
    }

    /// Fetch a URL. Returns the body text, or [`REALTIME_UNAVAILABLE`]
    /// when the endpoint cannot be reached in time.
    pub async fn fetch(&self, raw_url: &str) -> Result<String> {
        let url = Url::parse(raw_url)
            .map_err(|e| SiftError::ToolValidation(format!("invalid url {raw_url}: {e}")))?;
        let host = url
            .host_str()
            .ok_or_else(|| SiftError::ToolValidation(format!("url has no host: {raw_url}")))?;

        if !self.host_allowed(host) {
            return Err(SiftError::ToolValidation(host.to_string()));
        }

        match self.client.get(url).send().await {
            Ok(resp) if resp.status().is_success() => {
                Ok(resp.text().await.unwrap_or_else(|_| REALTIME_UNAVAILABLE.to_string()))
            }
            Ok(resp) => {
                warn!(url = raw_url, status = %resp.status(), "realtime endpoint returned error status");
                Ok(REALTIME_UNAVAILABLE.to_string())
            }
            Err(e) => {
                warn!(url = raw_url, error = %e, "realtime endpoint unreachable");
                Ok(REALTIME_UNAVAILABLE.to_string())
            }
        }
    }
}
