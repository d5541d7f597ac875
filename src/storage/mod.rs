pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use models::{ContactMessage, ValuationRequest, Vehicle, VehicleFields, VehicleStatus};
pub use postgres::PostgresStore;

#[derive(Debug, Error)]
pub enum StoreError {
	#[error("store credentials are not configured")]
	NotConfigured,
	#[error("no matching row")]
	NotFound,
	#[error("store is unavailable")]
	Unavailable,
	#[error(transparent)]
	Postgres(#[from] tokio_postgres::Error),
}

/// Backing store for the site. Each call is independent; there are no
/// multi-row transactions.
#[async_trait]
pub trait Store: Send + Sync {
	/// All vehicles, newest first by creation time. No status filtering.
	async fn list_vehicles(&self) -> Result<Vec<Vehicle>, StoreError>;

	async fn insert_vehicle(&self, fields: &VehicleFields) -> Result<Vehicle, StoreError>;

	/// Overwrite every writable column of `id`. [`StoreError::NotFound`] if no row matched.
	async fn update_vehicle(&self, id: Uuid, fields: &VehicleFields) -> Result<Vehicle, StoreError>;

	/// Deleting an unknown id is not an error.
	async fn delete_vehicle(&self, id: Uuid) -> Result<(), StoreError>;

	async fn insert_message(&self, message: &ContactMessage) -> Result<(), StoreError>;

	async fn insert_valuation(&self, request: &ValuationRequest) -> Result<(), StoreError>;
}
