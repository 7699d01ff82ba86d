use std::env;
use url::Url;

const DEFAULT_PORT: u16 = 3000;

#[derive(Clone)]
pub struct GatewayConfig {
    /// Server port
    pub port: u16,
    /// Append logs to this file in addition to stdout
    pub log_file_path: Option<String>,
    /// Collector endpoint for error events (None = error tracking off)
    pub error_tracking_url: Option<String>,
    /// CORS allowed origins ("*" = any)
    pub allowed_origins: Vec<String>,
    /// Per-IP requests per minute (None = no rate limiting)
    pub rate_limit_rpm: Option<u32>,
    /// Bearer token required for /metrics endpoint (None = public)
    pub metrics_token: Option<String>,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("port", &self.port)
            .field("log_file_path", &self.log_file_path)
            .field(
                "error_tracking_url",
                &self.error_tracking_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("allowed_origins", &self.allowed_origins)
            .field("rate_limit_rpm", &self.rate_limit_rpm)
            .field(
                "metrics_token",
                &self.metrics_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            log_file_path: None,
            error_tracking_url: None,
            allowed_origins: vec!["*".to_string()],
            rate_limit_rpm: None,
            metrics_token: None,
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        // Optional: port
        let port = match var("PORT") {
            Some(s) => s
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("PORT", s))?,
            None => DEFAULT_PORT,
        };

        // Optional: log file
        let log_file_path = var("LOG_FILE_PATH");

        // Optional: error tracking collector
        let error_tracking_url = var("ERROR_TRACKING_URL");
        if let Some(ref url) = error_tracking_url {
            Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.clone()))?;
        }

        // Optional: allowed origins
        let allowed_origins: Vec<String> = var("ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec!["*".to_string()]);

        // Optional: rate limit, 0 disables
        let rate_limit_rpm = match var("RATE_LIMIT_RPM") {
            Some(s) => {
                let rpm: u32 = s
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("RATE_LIMIT_RPM", s))?;
                Some(rpm).filter(|&r| r > 0)
            }
            None => None,
        };

        // Optional: metrics token
        let metrics_token = var("METRICS_TOKEN");

        Ok(Self {
            port,
            log_file_path,
            error_tracking_url,
            allowed_origins,
            rate_limit_rpm,
            metrics_token,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<GatewayConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GatewayConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.allowed_origins, vec!["*"]);
        assert!(config.log_file_path.is_none());
        assert!(config.error_tracking_url.is_none());
        assert!(config.rate_limit_rpm.is_none());
        assert!(config.metrics_token.is_none());
    }

    #[test]
    fn test_reads_all_values() {
        let config = load(&[
            ("PORT", "8080"),
            ("LOG_FILE_PATH", "/var/log/lnaddr.log"),
            ("ERROR_TRACKING_URL", "https://errors.example.com/ingest"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("RATE_LIMIT_RPM", "120"),
            ("METRICS_TOKEN", "s3cret"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_file_path.as_deref(), Some("/var/log/lnaddr.log"));
        assert_eq!(
            config.error_tracking_url.as_deref(),
            Some("https://errors.example.com/ingest")
        );
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.rate_limit_rpm, Some(120));
        assert_eq!(config.metrics_token.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        assert!(matches!(
            load(&[("PORT", "http")]),
            Err(ConfigError::InvalidValue("PORT", _))
        ));
        assert!(load(&[("PORT", "70000")]).is_err());
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = load(&[("PORT", ""), ("METRICS_TOKEN", "  ")]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.metrics_token.is_none());
    }

    #[test]
    fn test_invalid_error_tracking_url() {
        assert!(matches!(
            load(&[("ERROR_TRACKING_URL", "not a url")]),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_zero_rate_limit_disables() {
        let config = load(&[("RATE_LIMIT_RPM", "0")]).unwrap();
        assert!(config.rate_limit_rpm.is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = load(&[
            ("METRICS_TOKEN", "s3cret"),
            ("ERROR_TRACKING_URL", "https://key@errors.example.com/1"),
        ])
        .unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("s3cret"));
        assert!(!debug.contains("key@"));
    }
}
