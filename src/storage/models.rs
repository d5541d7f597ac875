use chrono::{DateTime, Utc};
use postgres_from_row::FromRow;
use serde_json::Value;
use uuid::Uuid;

/// Inventory entry as stored.
#[derive(serde::Deserialize, serde::Serialize, FromRow, Debug, Clone, PartialEq)]
pub struct Vehicle {
	pub id: Uuid,
	pub make: String,
	pub model: String,
	pub year: Option<i32>,
	pub km: Option<i64>,
	pub fuel: Option<String>,
	pub gearbox: Option<String>,
	pub price: Option<f64>,
	pub status: String,
	pub image_url: Option<String>,
	pub description: Option<String>,
	pub willhaben_url: Option<String>,
	pub created_at: DateTime<Utc>,
}

impl Vehicle {
	/// Public listing status, `None` for anything that must not be shown (sold, drafts, ...).
	pub fn public_status(&self) -> Option<VehicleStatus> {
		VehicleStatus::parse_public(&self.status)
	}
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleStatus {
	#[default]
	#[serde(rename = "verkauf")]
	ForSale,
	#[serde(rename = "reserviert")]
	Reserved,
}

impl VehicleStatus {
	/// Anything but `reserviert` (any case) is for sale.
	pub fn normalize(raw: Option<&str>) -> Self {
		match raw {
			Some(s) if s.eq_ignore_ascii_case("reserviert") => VehicleStatus::Reserved,
			_ => VehicleStatus::ForSale,
		}
	}

	pub fn parse_public(raw: &str) -> Option<Self> {
		if raw.eq_ignore_ascii_case("verkauf") {
			Some(VehicleStatus::ForSale)
		} else if raw.eq_ignore_ascii_case("reserviert") {
			Some(VehicleStatus::Reserved)
		} else {
			None
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			VehicleStatus::ForSale => "verkauf",
			VehicleStatus::Reserved => "reserviert",
		}
	}
}

/// Vehicle payload as sent by the admin editor. Everything is optional on the
/// wire; [`VehicleInput::into_fields`] enforces what must be present.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default, PartialEq)]
pub struct VehicleInput {
	#[serde(default, deserialize_with = "lenient::text")]
	pub make: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub model: Option<String>,
	#[serde(default, deserialize_with = "lenient::number")]
	pub year: Option<i32>,
	#[serde(default, deserialize_with = "lenient::number")]
	pub km: Option<i64>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub fuel: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub gearbox: Option<String>,
	#[serde(default, deserialize_with = "lenient::number")]
	pub price: Option<f64>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub status: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub image_url: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub description: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub willhaben_url: Option<String>,
}

/// A validated vehicle row, ready to be inserted or written over an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleFields {
	pub make: String,
	pub model: String,
	pub year: Option<i32>,
	pub km: Option<i64>,
	pub fuel: Option<String>,
	pub gearbox: Option<String>,
	pub price: Option<f64>,
	pub status: VehicleStatus,
	pub image_url: Option<String>,
	pub description: Option<String>,
	pub willhaben_url: Option<String>,
}

impl VehicleInput {
	/// Trim make and model and normalize the status. `None` when make or model is blank.
	pub fn into_fields(self) -> Option<VehicleFields> {
		let make = self.make.as_deref().map(str::trim).unwrap_or_default().to_string();
		let model = self.model.as_deref().map(str::trim).unwrap_or_default().to_string();
		if make.is_empty() || model.is_empty() {
			return None;
		}
		Some(VehicleFields {
			make,
			model,
			year: self.year,
			km: self.km,
			fuel: self.fuel,
			gearbox: self.gearbox,
			price: self.price,
			status: VehicleStatus::normalize(self.status.as_deref()),
			image_url: self.image_url,
			description: self.description,
			willhaben_url: self.willhaben_url,
		})
	}
}

impl From<&Vehicle> for VehicleInput {
	fn from(vehicle: &Vehicle) -> Self {
		Self {
			make: Some(vehicle.make.clone()),
			model: Some(vehicle.model.clone()),
			year: vehicle.year,
			km: vehicle.km,
			fuel: vehicle.fuel.clone(),
			gearbox: vehicle.gearbox.clone(),
			price: vehicle.price,
			status: Some(VehicleStatus::normalize(Some(&vehicle.status)).as_str().to_string()),
			image_url: vehicle.image_url.clone(),
			description: vehicle.description.clone(),
			willhaben_url: vehicle.willhaben_url.clone(),
		}
	}
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default, PartialEq)]
pub struct ContactMessageInput {
	#[serde(default, deserialize_with = "lenient::text")]
	pub vorname: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub nachname: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub email: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub telefon: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub nachricht: Option<String>,
	/// RFC 3339 string or epoch milliseconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub submitted_at: Option<Value>,
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct ContactMessage {
	pub vorname: Option<String>,
	pub nachname: Option<String>,
	pub email: Option<String>,
	pub telefon: Option<String>,
	pub nachricht: Option<String>,
	pub submitted_at: DateTime<Utc>,
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default, PartialEq)]
pub struct ValuationInput {
	#[serde(default, deserialize_with = "lenient::text")]
	pub marke: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub modell: Option<String>,
	#[serde(default, deserialize_with = "lenient::number")]
	pub jahr: Option<i32>,
	#[serde(default, deserialize_with = "lenient::number")]
	pub km: Option<i64>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub kraftstoff: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub zustand: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub kontakt: Option<String>,
	#[serde(default, deserialize_with = "lenient::text")]
	pub anmerkung: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub submitted_at: Option<Value>,
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct ValuationRequest {
	pub marke: Option<String>,
	pub modell: Option<String>,
	pub jahr: Option<i32>,
	pub km: Option<i64>,
	pub kraftstoff: Option<String>,
	pub zustand: Option<String>,
	pub kontakt: Option<String>,
	pub anmerkung: Option<String>,
	pub submitted_at: DateTime<Utc>,
}

/// Form fields arrive as whatever the browser produced: numbers as strings,
/// empty inputs as `""`.
pub mod lenient {
	use std::{fmt::Display, str::FromStr};

	use serde::{de::Error, Deserialize, Deserializer};
	use serde_json::Value;

	pub fn number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
	where
		D: Deserializer<'de>,
		T: FromStr,
		T::Err: Display,
	{
		let raw = match Option::<Value>::deserialize(deserializer)? {
			None | Some(Value::Null) => return Ok(None),
			Some(Value::Number(n)) => n.to_string(),
			Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
			Some(Value::String(s)) => s.trim().to_string(),
			Some(other) => return Err(D::Error::custom(format!("expected a number, got {other}"))),
		};
		raw.parse().map(Some).map_err(D::Error::custom)
	}

	pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
	where
		D: Deserializer<'de>,
	{
		match Option::<Value>::deserialize(deserializer)? {
			None | Some(Value::Null) => Ok(None),
			Some(Value::String(s)) => Ok(Some(s)),
			Some(Value::Number(n)) => Ok(Some(n.to_string())),
			Some(Value::Bool(b)) => Ok(Some(b.to_string())),
			Some(other) => Err(D::Error::custom(format!("expected text, got {other}"))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_status_normalization() {
		assert_eq!(VehicleStatus::normalize(Some("reserviert")), VehicleStatus::Reserved);
		assert_eq!(VehicleStatus::normalize(Some("RESERVIERT")), VehicleStatus::Reserved);
		assert_eq!(VehicleStatus::normalize(Some("Reserviert")), VehicleStatus::Reserved);
		assert_eq!(VehicleStatus::normalize(Some("verkauf")), VehicleStatus::ForSale);
		assert_eq!(VehicleStatus::normalize(Some("verkauft")), VehicleStatus::ForSale);
		assert_eq!(VehicleStatus::normalize(Some(" reserviert")), VehicleStatus::ForSale);
		assert_eq!(VehicleStatus::normalize(Some("")), VehicleStatus::ForSale);
		assert_eq!(VehicleStatus::normalize(None), VehicleStatus::ForSale);
	}

	#[test]
	fn test_public_status() {
		assert_eq!(VehicleStatus::parse_public("Verkauf"), Some(VehicleStatus::ForSale));
		assert_eq!(VehicleStatus::parse_public("reserviert"), Some(VehicleStatus::Reserved));
		assert_eq!(VehicleStatus::parse_public("verkauft"), None);
		assert_eq!(VehicleStatus::parse_public(""), None);
	}

	#[test]
	fn test_status_serializes_to_wire_names() {
		assert_eq!(serde_json::to_value(VehicleStatus::Reserved).unwrap(), json!("reserviert"));
		assert_eq!(VehicleStatus::ForSale.as_str(), "verkauf");
	}

	#[test]
	fn test_input_defaults_absent_fields() {
		let input: VehicleInput = serde_json::from_value(json!({"make": " Audi ", "model": "A4"})).unwrap();
		let fields = input.into_fields().unwrap();
		assert_eq!(fields.make, "Audi");
		assert_eq!(fields.model, "A4");
		assert_eq!(fields.year, None);
		assert_eq!(fields.price, None);
		assert_eq!(fields.willhaben_url, None);
		assert_eq!(fields.status, VehicleStatus::ForSale);
	}

	#[test]
	fn test_input_requires_make_and_model() {
		for body in [json!({"make": "Audi"}), json!({"make": "  ", "model": "A4"}), json!({})] {
			let input: VehicleInput = serde_json::from_value(body.clone()).unwrap();
			assert!(input.into_fields().is_none(), "{body}");
		}
	}

	#[test]
	fn test_lenient_numbers() {
		let input: VehicleInput = serde_json::from_value(json!({
			"year": "2015",
			"km": 125000,
			"price": "12900.50",
		}))
		.unwrap();
		assert_eq!(input.year, Some(2015));
		assert_eq!(input.km, Some(125_000));
		assert_eq!(input.price, Some(12_900.5));

		let input: VehicleInput = serde_json::from_value(json!({"year": "", "km": null})).unwrap();
		assert_eq!(input.year, None);
		assert_eq!(input.km, None);

		assert!(serde_json::from_value::<VehicleInput>(json!({"year": "neu"})).is_err());
		assert!(serde_json::from_value::<VehicleInput>(json!({"km": [1]})).is_err());
	}

	#[test]
	fn test_lenient_text_keeps_scalars() {
		let input: ContactMessageInput = serde_json::from_value(json!({
			"telefon": 436641234567u64,
			"email": "not-an-email",
		}))
		.unwrap();
		assert_eq!(input.telefon.as_deref(), Some("436641234567"));
		assert_eq!(input.email.as_deref(), Some("not-an-email"));
		assert_eq!(input.vorname, None);
	}
}
