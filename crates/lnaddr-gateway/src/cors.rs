//! CORS configuration.

use actix_cors::Cors;

/// Build the CORS middleware from allowed origins.
///
/// A `*` entry admits any origin. The lookup API is read-only, so only `GET`
/// and preflight requests are allowed.
pub fn build_cors(allowed_origins: &[String]) -> Cors {
    let allowed = allowed_origins.to_vec();
    Cors::default()
        .allowed_origin_fn(move |origin, _req_head| {
            let origin_str = origin.to_str().unwrap_or("");
            allowed.iter().any(|a| a == "*" || a == origin_str)
        })
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::ACCEPT,
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![actix_web::http::header::HeaderName::from_static(
            "x-request-id",
        )])
        .max_age(3600)
}
