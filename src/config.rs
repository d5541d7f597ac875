use std::net::SocketAddr;

use chrono::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("Invalid configuration: {0}")]
	ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
	pub admin: AdminConfig,
	pub bind_address: SocketAddr,
	/// `None` when no database is configured; store calls then fail with a configuration error.
	pub store: Option<StoreConfig>,
}

#[derive(Debug, Clone)]
pub struct AdminConfig {
	pub password: Option<String>,
	pub signing_secret: Option<String>,
	pub token_ttl: Duration,
}

/// Where the backing store lives and how to authenticate against it.
#[derive(Clone)]
pub struct StoreConfig {
	/// A `postgres://` URL or a `key=value` connection string.
	pub url: String,
	/// Service credential, used as the connection password when present.
	pub service_key: Option<String>,
}

impl std::fmt::Debug for StoreConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("StoreConfig")
			.field("url", &self.url)
			.field("service_key", &self.service_key.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}

impl Default for AdminConfig {
	fn default() -> Self {
		Self {
			password: None,
			signing_secret: None,
			token_ttl: Duration::days(7),
		}
	}
}

/// Upper bound for admin token lifetimes.
pub const MAX_TOKEN_TTL: Duration = Duration::days(365);

fn parse_ttl_hours(raw: &str) -> Result<Duration, ConfigError> {
	let hours: i64 = raw
		.trim()
		.parse()
		.map_err(|e| ConfigError::ValidationError(format!("ADMIN_TOKEN_TTL_HOURS: {e}")))?;
	Duration::try_hours(hours)
		.ok_or_else(|| ConfigError::ValidationError(format!("ADMIN_TOKEN_TTL_HOURS out of range: {hours}")))
}

fn non_empty_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
	/// Load configuration from environment variables.
	///
	/// Missing secrets are not an error here: the handlers answer 500 for them.
	pub fn load() -> Result<Self, ConfigError> {
		let bind_address = non_empty_var("BIND_ADDRESS")
			.unwrap_or_else(|| "0.0.0.0:4000".to_string())
			.trim()
			.parse()
			.map_err(|e| ConfigError::ValidationError(format!("BIND_ADDRESS: {e}")))?;

		let token_ttl = match non_empty_var("ADMIN_TOKEN_TTL_HOURS") {
			Some(hours) => parse_ttl_hours(&hours)?,
			None => AdminConfig::default().token_ttl,
		};

		let store = non_empty_var("DATABASE_URL").map(|url| StoreConfig {
			url,
			service_key: non_empty_var("DATABASE_SERVICE_KEY"),
		});

		let config = Config {
			admin: AdminConfig {
				password: non_empty_var("ADMIN_PASSWORD"),
				signing_secret: non_empty_var("ADMIN_JWT_SECRET"),
				token_ttl,
			},
			bind_address,
			store,
		};

		config.validate()?;
		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.admin.token_ttl <= Duration::zero() {
			return Err(ConfigError::ValidationError(
				"ADMIN_TOKEN_TTL_HOURS must be positive".to_string(),
			));
		}
		if self.admin.token_ttl > MAX_TOKEN_TTL {
			return Err(ConfigError::ValidationError(format!(
				"ADMIN_TOKEN_TTL_HOURS must be at most {} hours",
				MAX_TOKEN_TTL.num_hours()
			)));
		}
		if self.admin.password.is_none() || self.admin.signing_secret.is_none() {
			log::warn!("ADMIN_PASSWORD or ADMIN_JWT_SECRET is not set; admin endpoints will answer 500");
		}
		if self.store.is_none() {
			log::warn!("DATABASE_URL is not set; inventory and form endpoints will answer 500");
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_store_config_debug_hides_key() {
		let store = StoreConfig {
			url: "postgres://db.internal/site".to_string(),
			service_key: Some("service-role-key".to_string()),
		};
		let printed = format!("{store:?}");
		assert!(printed.contains("db.internal"));
		assert!(!printed.contains("service-role-key"));
	}

	#[test]
	fn test_default_token_ttl_is_seven_days() {
		assert_eq!(AdminConfig::default().token_ttl, Duration::hours(168));
	}

	#[test]
	fn test_non_positive_ttl_is_rejected() {
		let config = Config {
			admin: AdminConfig {
				token_ttl: Duration::zero(),
				..Default::default()
			},
			bind_address: "127.0.0.1:4000".parse().unwrap(),
			store: None,
		};
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_ttl_above_a_year_is_rejected() {
		let mut config = Config {
			admin: AdminConfig {
				token_ttl: MAX_TOKEN_TTL,
				..Default::default()
			},
			bind_address: "127.0.0.1:4000".parse().unwrap(),
			store: None,
		};
		assert!(config.validate().is_ok());

		config.admin.token_ttl = MAX_TOKEN_TTL + Duration::hours(1);
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_parse_ttl_hours() {
		assert_eq!(parse_ttl_hours(" 24 ").unwrap(), Duration::hours(24));
		assert!(parse_ttl_hours("a week").is_err());
		assert!(parse_ttl_hours(&(i64::MAX / 1000).to_string()).is_err());
		assert!(parse_ttl_hours(&i64::MAX.to_string()).is_err());
	}
}
