use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_LENGTH,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::state::AppState;

/// JSON request body limited to `api.max_request_size_bytes` and to a single JSON value.
///
/// The `Content-Type` header is left to [`require_content_type`](super::require_content_type),
/// and every rejection is an [`ApiError`] envelope.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T> FromRequest<AppState> for JsonBody<T>
where
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let limit = state.api.max_request_size_bytes;

        let declared = req
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<usize>().ok());
        if declared.is_some_and(|len| len > limit) {
            return Err(too_large(limit));
        }

        let bytes = axum::body::to_bytes(req.into_body(), limit)
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read request body: {}", e)))?;

        decode_single(&bytes).map(JsonBody)
    }
}

fn too_large(limit: usize) -> ApiError {
    ApiError::bad_request(format!("request body must not be larger than {} bytes", limit))
}

/// Decode exactly one JSON value; anything but whitespace after it is rejected.
pub fn decode_single<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let value = T::deserialize(&mut de).map_err(|e| ApiError::invalid_json(e.to_string()))?;
    de.end()
        .map_err(|_| ApiError::invalid_json("body must have only a single JSON value"))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn accepts_one_value_with_surrounding_whitespace() {
        let v: Value = decode_single(b"  {\"a\": 1}\n").unwrap();
        assert_eq!(v["a"], 1);
    }

    #[test]
    fn rejects_trailing_value() {
        let err = decode_single::<Value>(b"{\"a\": 1}{\"b\": 2}").unwrap_err();
        assert_eq!(err.message(), "body must have only a single JSON value");
    }

    #[test]
    fn rejects_empty_and_malformed_bodies() {
        assert!(matches!(decode_single::<Value>(b""), Err(ApiError::InvalidJson(_))));
        assert!(matches!(decode_single::<Value>(b"{\"a\":"), Err(ApiError::InvalidJson(_))));
    }
}
