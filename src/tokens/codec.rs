//! Compact signed credentials: `<payload>.<signature>`.
//!
//! The payload is the base64url (unpadded) JSON of [`Claims`], the signature is
//! the base64url HMAC-SHA256 of the payload segment.

use base64::{
	alphabet,
	engine::{self, general_purpose, DecodePaddingMode},
	Engine,
};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// base64url without padding, both ways. Padded segments are rejected so each
/// credential has exactly one string form.
pub const BASE64URL: engine::GeneralPurpose = engine::GeneralPurpose::new(
	&alphabet::URL_SAFE,
	general_purpose::NO_PAD.with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

const DELIMITER: char = '.';

#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct Claims {
	#[serde(default)]
	pub role: String,
	/// Absolute expiry, epoch milliseconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub exp: Option<i64>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Claims {
	pub fn new(role: impl Into<String>, exp: Option<i64>) -> Self {
		Self {
			role: role.into(),
			exp,
			extra: Map::new(),
		}
	}

	pub fn is_expired_at(&self, now_ms: i64) -> bool {
		matches!(self.exp, Some(exp) if now_ms > exp)
	}
}

fn mac_for(secret: &str) -> HmacSha256 {
	// HMAC accepts keys of any length, including empty ones.
	HmacSha256::new_from_slice(secret.as_bytes()).unwrap_or_else(|_| unreachable!("hmac takes any key length"))
}

fn sign(payload: &str, secret: &str) -> String {
	let mut mac = mac_for(secret);
	mac.update(payload.as_bytes());
	BASE64URL.encode(mac.finalize().into_bytes())
}

/// Serialize and sign `claims`.
pub fn issue(claims: &Claims, secret: &str) -> Result<String, serde_json::Error> {
	let json = serde_json::to_vec(claims)?;
	let payload = BASE64URL.encode(json);
	let signature = sign(&payload, secret);
	Ok(format!("{payload}{DELIMITER}{signature}"))
}

/// Check `token` against `secret` and the current clock.
pub fn verify(token: &str, secret: &str) -> Option<Claims> {
	verify_at(token, secret, Utc::now().timestamp_millis())
}

/// Same as [`verify`] with an explicit clock (epoch milliseconds).
///
/// Every failure collapses into `None`.
pub fn verify_at(token: &str, secret: &str, now_ms: i64) -> Option<Claims> {
	let mut segments = token.split(DELIMITER);
	let (Some(payload), Some(signature), None) = (segments.next(), segments.next(), segments.next()) else {
		return None;
	};

	let signature = BASE64URL.decode(signature).ok()?;
	let mut mac = mac_for(secret);
	mac.update(payload.as_bytes());
	mac.verify_slice(&signature).ok()?;

	let json = BASE64URL.decode(payload).ok()?;
	let claims: Claims = serde_json::from_slice(&json).ok()?;
	if claims.is_expired_at(now_ms) {
		return None;
	}
	Some(claims)
}

/// Constant-time equality of two secrets.
///
/// Both sides are run through HMAC under `key` so the comparison time does not
/// depend on where the inputs first differ, nor on their lengths.
pub fn secrets_match(candidate: &str, expected: &str, key: &str) -> bool {
	let mut reference = mac_for(key);
	reference.update(expected.as_bytes());
	let reference = reference.finalize().into_bytes();

	let mut mac = mac_for(key);
	mac.update(candidate.as_bytes());
	mac.verify_slice(&reference).is_ok()
}
