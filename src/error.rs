use axum::{
	response::{IntoResponse, Response},
	Json,
};
use hyper::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::storage::StoreError;

/// Handler error. Responses carry a flat `{"error": "<label>"}` body and never
/// the underlying cause; the cause goes to the log.
#[derive(Debug, Error)]
pub enum ApiError {
	#[error("Server not configured")]
	NotConfigured(&'static str),
	#[error("Unauthorized")]
	Unauthorized,
	#[error("Invalid password")]
	InvalidPassword,
	#[error("{0}")]
	BadRequest(&'static str),
	#[error("Method not allowed")]
	MethodNotAllowed,
	#[error("DB error")]
	Store(#[from] StoreError),
	#[error("Token error")]
	Token(#[from] serde_json::Error),
}

impl ApiError {
	pub fn bad_request() -> Self {
		ApiError::BadRequest("Bad request")
	}

	pub fn status(&self) -> StatusCode {
		match self {
			ApiError::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
			ApiError::Unauthorized | ApiError::InvalidPassword => StatusCode::UNAUTHORIZED,
			ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
			ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
			ApiError::Store(_) | ApiError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn label(&self) -> String {
		match self {
			ApiError::Store(StoreError::NotConfigured) => "Server not configured".to_string(),
			other => other.to_string(),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let status = self.status();
		match &self {
			ApiError::NotConfigured(what) => log::error!("missing configuration: {what}"),
			ApiError::Store(e) => log::error!("store failure: {e}"),
			ApiError::Token(e) => log::error!("token encoding failure: {e}"),
			_ => {}
		}
		(status, Json(json!({ "error": self.label() }))).into_response()
	}
}

pub async fn method_not_allowed() -> ApiError {
	ApiError::MethodNotAllowed
}
