use axum::{
    body::Bytes,
    http::{header, HeaderMap},
};
use serde_json::Value;
use tracing::error;

use crate::errors::ApiError;

/// Content type every mutating request must carry.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Checks that the media type is correct. Runs before the body is touched;
/// a missing or mismatched header is rejected outright.
pub fn check_content_type(headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        error!("No Content-Type specified");
        return Err(unsupported_media_type());
    };

    let matches = value
        .to_str()
        .map(|raw| raw.trim().eq_ignore_ascii_case(JSON_CONTENT_TYPE))
        .unwrap_or(false);
    if matches {
        Ok(())
    } else {
        error!("Invalid Content-Type: {:?}", value);
        Err(unsupported_media_type())
    }
}

fn unsupported_media_type() -> ApiError {
    ApiError::UnsupportedMediaType(format!("Content-Type must be {JSON_CONTENT_TYPE}"))
}

/// Parses the raw request body as JSON. Unparseable bodies are a client
/// error, not a server fault.
pub fn parse_json_body(body: &Bytes) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|err| {
        ApiError::BadRequest(format!("body of request contained bad or no data: {err}"))
    })
}
