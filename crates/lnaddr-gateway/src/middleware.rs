use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
    middleware::Next,
    HttpMessage,
};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request identifier, available to handlers through request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Longest inbound id that is echoed back instead of replaced.
const MAX_REQUEST_ID_LEN: usize = 128;

fn inbound_request_id(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    let value = value.trim();
    if value.is_empty()
        || value.len() > MAX_REQUEST_ID_LEN
        || !value.chars().all(|c| c.is_ascii_graphic())
    {
        return None;
    }
    Some(value.to_string())
}

/// Tag every request with an `x-request-id`, reusing a sane inbound one.
///
/// Use with [`actix_web::middleware::from_fn`].
pub async fn request_id(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let id = inbound_request_id(&req).unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.call(req).await?;
    if let Ok(value) = HeaderValue::from_str(&id) {
        res.headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    Ok(res)
}
