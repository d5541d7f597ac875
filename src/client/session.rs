use chrono::{DateTime, Utc};

use crate::admin::LoginResponse;

/// Admin credential held by a client for the lifetime of a browsing session.
///
/// Passed explicitly to every admin action; dropping it is logging out.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminSession {
	token: String,
	expires_at: Option<DateTime<Utc>>,
}

impl AdminSession {
	/// `expires_at_ms` is epoch milliseconds; `0` means no known expiry.
	pub fn new(token: impl Into<String>, expires_at_ms: i64) -> Self {
		let expires_at = if expires_at_ms == 0 {
			None
		} else {
			DateTime::<Utc>::from_timestamp_millis(expires_at_ms)
		};
		Self {
			token: token.into(),
			expires_at,
		}
	}

	pub fn token(&self) -> &str {
		&self.token
	}

	pub fn expires_at(&self) -> Option<DateTime<Utc>> {
		self.expires_at
	}

	pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
		!self.token.is_empty() && self.expires_at.map_or(true, |exp| now < exp)
	}

	pub fn is_active(&self) -> bool {
		self.is_active_at(Utc::now())
	}
}

impl From<LoginResponse> for AdminSession {
	fn from(login: LoginResponse) -> Self {
		Self::new(login.token, login.expires_at)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Duration;

	#[test]
	fn test_session_expiry() {
		let now = Utc::now();
		let session = AdminSession::new("tok", (now + Duration::hours(1)).timestamp_millis());
		assert!(session.is_active_at(now));
		assert!(!session.is_active_at(now + Duration::hours(2)));
	}

	#[test]
	fn test_session_without_expiry_stays_active() {
		let session = AdminSession::new("tok", 0);
		assert_eq!(session.expires_at(), None);
		assert!(session.is_active_at(Utc::now() + Duration::days(365)));
	}

	#[test]
	fn test_empty_token_is_never_active() {
		assert!(!AdminSession::new("", 0).is_active());
	}

	#[test]
	fn test_from_login_response() {
		let session = AdminSession::from(LoginResponse {
			token: "abc.def".to_string(),
			expires_at: 1_800_000_000_000,
		});
		assert_eq!(session.token(), "abc.def");
		assert_eq!(session.expires_at().unwrap().timestamp_millis(), 1_800_000_000_000);
	}
}
