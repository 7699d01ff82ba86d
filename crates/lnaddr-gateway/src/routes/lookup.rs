use std::time::Instant;

use actix_web::{http::StatusCode, web, HttpResponse};
use tracing::Instrument;

use crate::fetch::DiscoveryFetcher;
use crate::metrics::{LOOKUPS_TOTAL, LOOKUP_LATENCY};
use crate::middleware::RequestId;
use crate::resolver::Resolution;
use crate::state::AppState;

/// First `ln` value of the query string, or empty when absent.
///
/// Repeated keys are allowed; later values are ignored.
pub fn address_param(query: &[(String, String)]) -> &str {
    query
        .iter()
        .find(|(key, _)| key == "ln")
        .map(|(_, value)| value.as_str())
        .unwrap_or("")
}

/// Render a resolution: pretty JSON on success paths, compact on 400s.
pub fn render(resolution: &Resolution) -> HttpResponse {
    let status = StatusCode::from_u16(resolution.status()).unwrap_or(StatusCode::BAD_GATEWAY);
    let body = if resolution.verdict.pretty() {
        serde_json::to_string_pretty(&resolution.details)
    } else {
        serde_json::to_string(&resolution.details)
    };

    match body {
        Ok(body) => HttpResponse::build(status)
            .content_type("application/json")
            .body(body),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize lookup response");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "internal_error",
                "message": "An internal error occurred"
            }))
        }
    }
}

/// GET /lightning-address-details?ln=user@domain
pub async fn lightning_address_details<F: DiscoveryFetcher + 'static>(
    state: web::Data<AppState<F>>,
    query: web::Query<Vec<(String, String)>>,
    request_id: Option<web::ReqData<RequestId>>,
) -> HttpResponse {
    let span = tracing::info_span!(
        "lookup",
        request_id = request_id.as_ref().map(|id| id.0.as_str()).unwrap_or("-")
    );

    let started = Instant::now();
    let resolution = state
        .resolver
        .resolve(address_param(&query))
        .instrument(span)
        .await;
    LOOKUP_LATENCY.observe(started.elapsed().as_secs_f64());
    let status = resolution.status().to_string();
    LOOKUPS_TOTAL.with_label_values(&[status.as_str()]).inc();
    render(&resolution)
}

pub fn configure<F: DiscoveryFetcher + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/lightning-address-details",
        web::get().to(lightning_address_details::<F>),
    );
}
