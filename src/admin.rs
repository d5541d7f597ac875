use axum::{body::Bytes, extract::State, Json};
use chrono::Utc;

use crate::{
	error::ApiError,
	request::parse_json,
	storage::models::lenient,
	tokens::{self, Claims, ADMIN_ROLE},
	AppState,
};

#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
pub struct Logins {
	#[serde(default, deserialize_with = "lenient::text")]
	pub password: Option<String>,
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
	pub token: String,
	/// Epoch milliseconds.
	pub expires_at: i64,
}

pub async fn admin_login(State(state): State<AppState>, body: Bytes) -> Result<Json<LoginResponse>, ApiError> {
	let admin = &state.config.admin;
	let (Some(expected), Some(secret)) = (admin.password.as_deref(), admin.signing_secret.as_deref()) else {
		return Err(ApiError::NotConfigured("ADMIN_PASSWORD/ADMIN_JWT_SECRET"));
	};

	let logins: Logins = parse_json(&body)?;
	let password = logins.password.unwrap_or_default();
	if password.is_empty() || !tokens::secrets_match(&password, expected, secret) {
		log::warn!("admin login rejected");
		return Err(ApiError::InvalidPassword);
	}

	let expires_at = Utc::now()
		.checked_add_signed(admin.token_ttl)
		.ok_or(ApiError::NotConfigured("ADMIN_TOKEN_TTL_HOURS"))?
		.timestamp_millis();
	let token = tokens::issue(&Claims::new(ADMIN_ROLE, Some(expires_at)), secret)?;
	log::info!("admin login accepted, token valid until {expires_at}");
	Ok(Json(LoginResponse { token, expires_at }))
}
