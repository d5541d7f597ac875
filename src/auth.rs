use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use hyper::{header::AUTHORIZATION, HeaderMap};

use crate::{
	error::ApiError,
	tokens::{self, Claims, ADMIN_ROLE},
	AppState,
};

/// Credential from an `Authorization: Bearer <token>` header. The scheme is
/// matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
	let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
	let (scheme, token) = value.trim_start().split_once(char::is_whitespace)?;
	if !scheme.eq_ignore_ascii_case("bearer") {
		return None;
	}
	let token = token.trim();
	(!token.is_empty()).then_some(token)
}

/// Admin gate: a missing signing secret is a server fault (500), every other
/// failure is 401.
pub fn authorize(headers: &HeaderMap, signing_secret: Option<&str>) -> Result<Claims, ApiError> {
	let Some(secret) = signing_secret else {
		return Err(ApiError::NotConfigured("ADMIN_JWT_SECRET"));
	};
	let claims = bearer_token(headers)
		.and_then(|token| tokens::verify(token, secret))
		.ok_or(ApiError::Unauthorized)?;
	if claims.role != ADMIN_ROLE {
		return Err(ApiError::Unauthorized);
	}
	Ok(claims)
}

/// Extractor for admin-only handlers. Runs before the body is read.
#[derive(Debug, Clone)]
pub struct AdminClaims(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AdminClaims {
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
		authorize(&parts.headers, state.config.admin.signing_secret.as_deref()).map(AdminClaims)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Utc;
	use hyper::{header::HeaderValue, StatusCode};

	const SECRET: &str = "gate-secret";

	fn headers(value: &str) -> HeaderMap {
		let mut headers = HeaderMap::new();
		headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
		headers
	}

	fn token(role: &str, exp: i64) -> String {
		tokens::issue(&Claims::new(role, Some(exp)), SECRET).unwrap()
	}

	fn in_one_hour() -> i64 {
		Utc::now().timestamp_millis() + 3_600_000
	}

	#[test]
	fn test_bearer_token_parsing() {
		assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
		assert_eq!(bearer_token(&headers("bearer abc.def")), Some("abc.def"));
		assert_eq!(bearer_token(&headers("BEARER   abc.def")), Some("abc.def"));
		assert_eq!(bearer_token(&headers("Basic abc.def")), None);
		assert_eq!(bearer_token(&headers("Bearer")), None);
		assert_eq!(bearer_token(&headers("Bearer ")), None);
		assert_eq!(bearer_token(&HeaderMap::new()), None);
	}

	#[test]
	fn test_header_name_is_case_insensitive() {
		let mut headers = HeaderMap::new();
		let value = format!("Bearer {}", token("admin", in_one_hour()));
		headers.insert(
			hyper::header::HeaderName::from_bytes(b"AUTHORIZATION").unwrap(),
			HeaderValue::from_str(&value).unwrap(),
		);
		assert!(authorize(&headers, Some(SECRET)).is_ok());
	}

	#[test]
	fn test_admin_token_is_accepted() {
		let claims = authorize(&headers(&format!("Bearer {}", token("admin", in_one_hour()))), Some(SECRET)).unwrap();
		assert_eq!(claims.role, "admin");
	}

	#[test]
	fn test_missing_secret_is_server_error() {
		let err = authorize(&headers(&format!("Bearer {}", token("admin", in_one_hour()))), None).unwrap_err();
		assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[test]
	fn test_rejections_are_unauthorized() {
		let cases = [
			HeaderMap::new(),
			headers(&format!("Bearer {}", token("viewer", in_one_hour()))),
			headers(&format!("Bearer {}", token("admin", 1_000))),
			headers("Bearer not-a-token"),
			headers(&format!("Token {}", token("admin", in_one_hour()))),
		];
		for h in cases {
			let err = authorize(&h, Some(SECRET)).unwrap_err();
			assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
		}
	}
}
