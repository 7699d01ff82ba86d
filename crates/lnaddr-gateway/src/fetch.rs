//! Outbound discovery fetches.
//!
//! [`DiscoveryFetcher`] is the seam between the resolver and the network;
//! [`HttpFetcher`] is the reqwest implementation used by the server.

use std::future::Future;

use serde_json::Value;

use crate::error::FetchError;

/// Status codes at or above this are upstream failures (redirects included).
pub const FAILURE_STATUS_THRESHOLD: u16 = 300;

/// Fetches a URL and decodes its body as JSON.
pub trait DiscoveryFetcher: Send + Sync {
    /// GET `url`, returning the decoded document and the upstream status.
    fn fetch_json(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<(Value, u16), FetchError>> + Send;
}

/// Plain GET over a shared reqwest client.
///
/// No request timeout is set and redirects are not followed, so a 3xx
/// answer surfaces as [`FetchError::FailureStatus`].
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("lnaddr-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl DiscoveryFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<(Value, u16), FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Unreachable {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status >= FAILURE_STATUS_THRESHOLD {
            return Err(FetchError::FailureStatus {
                url: url.to_string(),
                status,
            });
        }

        // A body that cannot be read is reported the same as one that does not parse.
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::InvalidJson {
                url: url.to_string(),
                status,
                reason: e.to_string(),
            })?;

        let value = serde_json::from_slice(&body).map_err(|e| FetchError::InvalidJson {
            url: url.to_string(),
            status,
            reason: e.to_string(),
        })?;

        Ok((value, status))
    }
}
