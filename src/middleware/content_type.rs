use axum::{
    extract::Request,
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE, TRANSFER_ENCODING},
        HeaderMap,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Media types a request body may be sent as.
pub const ALLOWED_CONTENT_TYPES: [&str; 2] = ["application/json", "text/xml"];

/// Reject requests whose body is not one of [`ALLOWED_CONTENT_TYPES`] with 415.
///
/// Requests without a body pass through untouched.
pub async fn require_content_type(req: Request, next: Next) -> Response {
    if !has_body(req.headers()) {
        return next.run(req).await;
    }

    let media = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(media_type)
        .unwrap_or_default();

    if ALLOWED_CONTENT_TYPES.contains(&media.as_str()) {
        next.run(req).await
    } else {
        tracing::debug!(content_type = %media, "rejected request content type");
        ApiError::unsupported_media_type(format!("content type {:?} is not supported", media))
            .into_response()
    }
}

fn has_body(headers: &HeaderMap) -> bool {
    match headers.get(CONTENT_LENGTH) {
        Some(len) => len.to_str().ok().and_then(|v| v.trim().parse::<u64>().ok()) != Some(0),
        None => headers.contains_key(TRANSFER_ENCODING),
    }
}

/// `Application/JSON; charset=utf-8` -> `application/json`
pub fn media_type(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
