use std::io;

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{
    middleware::{from_fn, Condition, Logger},
    web, App, HttpServer,
};

use lnaddr_gateway::{
    config::GatewayConfig, cors::build_cors, fetch::HttpFetcher, logging,
    metrics::register_metrics, middleware::request_id, routes, state::AppState,
};

/// Seconds given to in-flight lookups after SIGINT/SIGTERM.
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

const ACCESS_LOG_FORMAT: &str = r#"%{x-request-id}o %a "%r" %s %b %T"#;

#[tokio::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Configuration first: it names the log file
    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading environment variables: {e}");
            std::process::exit(1);
        }
    };

    logging::init(config.log_file_path.as_deref())?;

    let port = config.port;
    let allowed_origins = config.allowed_origins.clone();
    let rate_limit_rpm = config.rate_limit_rpm;

    tracing::info!("Starting lnaddr-gateway on port {}", port);
    if let Some(ref path) = config.log_file_path {
        tracing::info!("Logging to file: {}", path);
    }
    tracing::info!(
        "Error tracking: {}",
        if config.error_tracking_url.is_some() {
            "enabled"
        } else {
            "disabled"
        }
    );
    match rate_limit_rpm {
        Some(rpm) => tracing::info!("Rate limit: {} req/min per IP", rpm),
        None => tracing::info!("Rate limit: disabled"),
    }
    if config.metrics_token.is_none() {
        tracing::warn!("METRICS_TOKEN not set, /metrics is open to anyone");
    }

    // Register Prometheus metrics
    register_metrics().map_err(io::Error::other)?;

    // Create shared state
    let state = AppState::new(config).map_err(io::Error::other)?;
    let config_data = web::Data::from(state.config.clone());
    let state_data = web::Data::new(state);

    // Configure rate limiter; only mounted when a limit is configured
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_minute(u64::from(rate_limit_rpm.unwrap_or(60)))
        .finish()
        .ok_or_else(|| io::Error::other("failed to create rate limiter config"))?;

    HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .app_data(config_data.clone())
            .wrap(from_fn(request_id))
            .wrap(Logger::new(ACCESS_LOG_FORMAT))
            .wrap(build_cors(&allowed_origins))
            .wrap(Condition::new(
                rate_limit_rpm.is_some(),
                Governor::new(&governor_conf),
            ))
            .configure(routes::health::configure)
            .configure(routes::lookup::configure::<HttpFetcher>)
    })
    .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
    .bind(("0.0.0.0", port))?
    .run()
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}
