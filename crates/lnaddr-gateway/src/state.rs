use crate::config::GatewayConfig;
use crate::fetch::{DiscoveryFetcher, HttpFetcher};
use crate::reporter::ErrorReporter;
use crate::resolver::Resolver;
use std::sync::Arc;

/// Shared application state
pub struct AppState<F = HttpFetcher> {
    pub config: Arc<GatewayConfig>,
    pub resolver: Resolver<F>,
}

impl AppState<HttpFetcher> {
    /// Production state: one pooled HTTP client shared by fetcher and reporter.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let fetcher = HttpFetcher::new()?;
        let reporter = ErrorReporter::new(
            fetcher.client().clone(),
            config.error_tracking_url.clone(),
        );
        Ok(Self::with_fetcher(config, fetcher, reporter))
    }
}

impl<F: DiscoveryFetcher> AppState<F> {
    pub fn with_fetcher(config: GatewayConfig, fetcher: F, reporter: ErrorReporter) -> Self {
        Self {
            config: Arc::new(config),
            resolver: Resolver::new(fetcher, reporter),
        }
    }
}
