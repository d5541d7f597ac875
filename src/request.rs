use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Decode a JSON request body. An empty body reads as `{}`; anything that does
/// not decode is a 400.
pub fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
	let raw: &[u8] = if body.iter().all(u8::is_ascii_whitespace) { b"{}" } else { &body[..] };
	serde_json::from_slice(raw).map_err(|e| {
		log::debug!("rejecting request body: {e}");
		ApiError::bad_request()
	})
}
