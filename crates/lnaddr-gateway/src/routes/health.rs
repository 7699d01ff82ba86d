use actix_web::{http::header, web, HttpRequest, HttpResponse};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::config::GatewayConfig;
use crate::metrics;

/// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "lnaddr-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Compares SHA-256 digests so neither content nor length leaks through timing.
fn token_matches(presented: &str, expected: &str) -> bool {
    Sha256::digest(presented.as_bytes())
        .ct_eq(&Sha256::digest(expected.as_bytes()))
        .into()
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// GET /metrics, gated by `METRICS_TOKEN` when one is configured.
pub async fn metrics(req: HttpRequest, config: web::Data<GatewayConfig>) -> HttpResponse {
    if let Some(ref expected) = config.metrics_token {
        let allowed = bearer_token(&req).is_some_and(|token| token_matches(token, expected));
        if !allowed {
            return HttpResponse::Unauthorized()
                .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
                .json(serde_json::json!({ "error": "metrics token missing or wrong" }));
        }
    }

    match metrics::render() {
        Ok(text) => HttpResponse::Ok()
            .content_type(metrics::CONTENT_TYPE)
            .body(text),
        Err(e) => {
            tracing::error!(error = %e, "metrics rendering failed");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/metrics", web::get().to(metrics));
}
