use axum::{body::Bytes, extract::State, Json};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::{
	error::ApiError,
	request::parse_json,
	storage::{models::ContactMessageInput, ContactMessage},
	AppState,
};

impl ContactMessage {
	pub fn from_input(input: ContactMessageInput, now: DateTime<Utc>) -> Self {
		Self {
			submitted_at: super::submitted_at(input.submitted_at.as_ref(), now),
			vorname: input.vorname,
			nachname: input.nachname,
			email: input.email,
			telefon: input.telefon,
			nachricht: input.nachricht,
		}
	}
}

pub async fn post_message(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, ApiError> {
	let input: ContactMessageInput = parse_json(&body)?;
	let message = ContactMessage::from_input(input, Utc::now());
	state.store.insert_message(&message).await?;
	log::info!("contact message stored");
	Ok(Json(json!({ "ok": true })))
}
