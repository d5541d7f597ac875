use axum::{body::Bytes, extract::State, Json};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::{
	error::ApiError,
	request::parse_json,
	storage::{models::ValuationInput, ValuationRequest},
	AppState,
};

impl ValuationRequest {
	pub fn from_input(input: ValuationInput, now: DateTime<Utc>) -> Self {
		Self {
			submitted_at: super::submitted_at(input.submitted_at.as_ref(), now),
			marke: input.marke,
			modell: input.modell,
			jahr: input.jahr,
			km: input.km,
			kraftstoff: input.kraftstoff,
			zustand: input.zustand,
			kontakt: input.kontakt,
			anmerkung: input.anmerkung,
		}
	}
}

pub async fn post_valuation(State(state): State<AppState>, body: Bytes) -> Result<Json<Value>, ApiError> {
	let input: ValuationInput = parse_json(&body)?;
	let request = ValuationRequest::from_input(input, Utc::now());
	state.store.insert_valuation(&request).await?;
	log::info!("valuation request stored");
	Ok(Json(json!({ "ok": true })))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_fields_are_copied_verbatim() {
		let input: ValuationInput = serde_json::from_value(json!({
			"marke": "VW",
			"modell": "Golf 7",
			"jahr": "2016",
			"km": 98000,
			"zustand": "gut",
			"kontakt": "0664 1234567",
		}))
		.unwrap();
		let now = Utc::now();
		let request = ValuationRequest::from_input(input, now);

		assert_eq!(request.marke.as_deref(), Some("VW"));
		assert_eq!(request.modell.as_deref(), Some("Golf 7"));
		assert_eq!(request.jahr, Some(2016));
		assert_eq!(request.km, Some(98_000));
		assert_eq!(request.kraftstoff, None);
		assert_eq!(request.anmerkung, None);
		assert_eq!(request.submitted_at, now);
	}
}
