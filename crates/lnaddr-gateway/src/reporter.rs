//! Error tracking sink.
//!
//! Events are POSTed as JSON to an optional collector endpoint. The reporter is
//! built once in `main` and handed to whoever needs it.

use std::time::Duration;

use serde::Serialize;

const SERVICE_NAME: &str = "lnaddr-gateway";
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Serialize)]
pub struct ErrorEvent {
    pub service: &'static str,
    pub level: &'static str,
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub timestamp: String,
}

impl ErrorEvent {
    pub fn error(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            service: SERVICE_NAME,
            level: "error",
            kind: kind.into(),
            message: message.into(),
            url: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

#[derive(Clone)]
pub struct ErrorReporter {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl ErrorReporter {
    pub fn new(client: reqwest::Client, endpoint: Option<String>) -> Self {
        if let Some(ref url) = endpoint {
            if !url.starts_with("https://") {
                tracing::warn!(
                    url = %url,
                    "error tracking endpoint does not use HTTPS, events will be sent in cleartext"
                );
            }
        }
        Self { client, endpoint }
    }

    /// A reporter that drops every event.
    pub fn disabled() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Fire-and-forget delivery. Must be called from within a Tokio runtime
    /// when the reporter is enabled.
    pub fn capture(&self, event: ErrorEvent) {
        let Some(ref endpoint) = self.endpoint else {
            return;
        };

        let body = match serde_json::to_vec(&event) {
            Ok(b) => b,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize error event");
                return;
            }
        };

        let client = self.client.clone();
        let endpoint = endpoint.clone();
        tokio::spawn(async move {
            let result = client
                .post(&endpoint)
                .header("content-type", "application/json")
                .timeout(DELIVERY_TIMEOUT)
                .body(body)
                .send()
                .await;
            match result {
                Ok(resp) => {
                    tracing::debug!(url = %endpoint, status = %resp.status(), "error event delivered")
                }
                Err(e) => tracing::warn!(url = %endpoint, error = %e, "error event delivery failed"),
            }
        });
    }
}

impl std::fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorReporter")
            .field("endpoint", &self.endpoint.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
