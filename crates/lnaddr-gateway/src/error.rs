use thiserror::Error;

/// Why a single discovery fetch did not yield a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No response was received (DNS, TLS, connect or transport failure).
    #[error("no details: {url}: {reason}")]
    Unreachable { url: String, reason: String },

    /// The endpoint answered with a status of 300 or above.
    #[error("no details: {url}: upstream returned {status}")]
    FailureStatus { url: String, status: u16 },

    /// The endpoint answered successfully but the body is not JSON.
    #[error("invalid JSON from {url} (status {status}): {reason}")]
    InvalidJson {
        url: String,
        status: u16,
        reason: String,
    },
}

impl FetchError {
    /// Label used for metrics and error events.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Unreachable { .. } => "unreachable",
            FetchError::FailureStatus { .. } => "failure_status",
            FetchError::InvalidJson { .. } => "invalid_json",
        }
    }
}

/// Errors that end a resolution before any upstream is contacted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("invalid lightning address {0}")]
    InvalidAddress(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_kinds() {
        let unreachable = FetchError::Unreachable {
            url: "https://a".to_string(),
            reason: "dns".to_string(),
        };
        let status = FetchError::FailureStatus {
            url: "https://a".to_string(),
            status: 404,
        };
        let json = FetchError::InvalidJson {
            url: "https://a".to_string(),
            status: 200,
            reason: "eof".to_string(),
        };
        assert_eq!(unreachable.kind(), "unreachable");
        assert_eq!(status.kind(), "failure_status");
        assert_eq!(json.kind(), "invalid_json");
        assert_eq!(status.to_string(), "no details: https://a: upstream returned 404");
    }

    #[test]
    fn test_invalid_address_message() {
        let err = ResolveError::InvalidAddress("nope".to_string());
        assert_eq!(err.to_string(), "invalid lightning address nope");
    }
}
