//! Typed client for the site's endpoints, plus the state a page keeps between
//! actions: the inventory view and an explicit admin session.

pub mod api;
pub mod controller;
pub mod format;
pub mod inventory;
pub mod session;

use thiserror::Error;

pub use api::SiteClient;
pub use controller::{Notice, NoticeKind, SiteController};
pub use inventory::{Inventory, StatusFilter, VehicleCard};
pub use session::AdminSession;

#[derive(Debug, Error)]
pub enum ClientError {
	#[error(transparent)]
	Http(#[from] reqwest::Error),
	#[error("server answered {status}: {message}")]
	Status {
		status: reqwest::StatusCode,
		message: String,
	},
	#[error("admin session is missing or expired")]
	NotAdmin,
}
