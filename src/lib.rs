//! Dealership site backend: public inventory, contact and valuation forms, and
//! a single admin role authenticated with stateless signed tokens.

pub mod admin;
pub mod auth;
pub mod cars;
pub mod client;
pub mod config;
pub mod db_client;
pub mod error;
pub mod inquiries;
pub mod request;
pub mod storage;
pub mod tokens;

use std::sync::Arc;

use axum::{
	routing::{any, get, post, put},
	Router,
};
use tower_http::cors::CorsLayer;

use config::Config;
use error::method_not_allowed;
use storage::Store;

/// Shared application state. Immutable apart from whatever the store holds.
#[derive(Clone)]
pub struct AppState {
	pub config: Arc<Config>,
	pub store: Arc<dyn Store>,
}

impl AppState {
	pub fn new(config: Config, store: Arc<dyn Store>) -> Self {
		Self {
			config: Arc::new(config),
			store,
		}
	}
}

fn routes() -> Router<AppState> {
	Router::new()
		.route("/cars", get(cars::get_cars).post(cars::create_car).fallback(method_not_allowed))
		.route("/cars/", any(cars::missing_car_id))
		.route("/cars/:id", put(cars::update_car).delete(cars::delete_car).fallback(method_not_allowed))
		.route("/messages", post(inquiries::post_message).fallback(method_not_allowed))
		.route("/valuations", post(inquiries::post_valuation).fallback(method_not_allowed))
		.route("/admin-login", post(admin::admin_login).fallback(method_not_allowed))
}

/// The site's HTTP surface, served both at the root and under `/api`.
pub fn create_router(state: AppState) -> Router {
	Router::new()
		.merge(routes())
		.nest("/api", routes())
		.layer(CorsLayer::permissive())
		.with_state(state)
}
