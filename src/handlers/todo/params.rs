use std::collections::HashMap;

use crate::error::ApiError;

/// Query parameters as sent; values are parsed per handler so failures carry the parameter name.
pub type QueryParams = HashMap<String, String>;

/// A parameter that must be present and parse as a non-negative integer.
pub fn required_id(params: &QueryParams, name: &str) -> Result<i64, ApiError> {
    match params.get(name) {
        Some(raw) if !raw.is_empty() => parse_non_negative(name, raw),
        _ => Err(ApiError::bad_request(format!("{} must be supplied", name))),
    }
}

/// A non-negative integer parameter that falls back to `default` when absent.
pub fn optional_count(params: &QueryParams, name: &str, default: i64) -> Result<i64, ApiError> {
    match params.get(name) {
        Some(raw) if !raw.is_empty() => parse_non_negative(name, raw),
        _ => Ok(default),
    }
}

fn parse_non_negative(name: &str, raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .ok()
        .filter(|v| *v >= 0)
        .ok_or_else(|| ApiError::bad_request(format!("{} must be a non-negative integer", name)))
}
