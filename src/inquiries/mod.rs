//! Public, append-only submissions: contact messages and valuation requests.

pub mod messages;
pub mod valuations;

use chrono::{DateTime, Utc};
use serde_json::Value;

pub use messages::post_message;
pub use valuations::post_valuation;

/// Submission time as sent by the browser when it parses (RFC 3339 or epoch
/// milliseconds), otherwise `now`.
pub fn submitted_at(raw: Option<&Value>, now: DateTime<Utc>) -> DateTime<Utc> {
	let parsed = match raw {
		Some(Value::String(s)) => DateTime::parse_from_rfc3339(s.trim()).ok().map(|t| t.with_timezone(&Utc)),
		Some(Value::Number(n)) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
		_ => None,
	};
	parsed.unwrap_or(now)
}
