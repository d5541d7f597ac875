use async_trait::async_trait;
use postgres_from_row::FromRow;
use tokio_postgres::Client;
use uuid::Uuid;

use super::{ContactMessage, Store, StoreError, ValuationRequest, Vehicle, VehicleFields};
use crate::{config::StoreConfig, db_client::db_client};

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS cars (
	id uuid PRIMARY KEY DEFAULT gen_random_uuid(),
	make text NOT NULL,
	model text NOT NULL,
	year integer,
	km bigint,
	fuel text,
	gearbox text,
	price double precision,
	status text NOT NULL DEFAULT 'verkauf',
	image_url text,
	description text,
	willhaben_url text,
	created_at timestamptz NOT NULL DEFAULT now()
);
CREATE INDEX IF NOT EXISTS cars_created_at_idx ON cars (created_at DESC);

CREATE TABLE IF NOT EXISTS contact_messages (
	id bigserial PRIMARY KEY,
	vorname text,
	nachname text,
	email text,
	telefon text,
	nachricht text,
	submitted_at timestamptz NOT NULL
);

CREATE TABLE IF NOT EXISTS valuation_requests (
	id bigserial PRIMARY KEY,
	marke text,
	modell text,
	jahr integer,
	km bigint,
	kraftstoff text,
	zustand text,
	kontakt text,
	anmerkung text,
	submitted_at timestamptz NOT NULL
);
";

const VEHICLE_COLUMNS: &str =
	"id, make, model, year, km, fuel, gearbox, price, status, image_url, description, willhaben_url, created_at";

/// PostgreSQL-backed store. Every operation opens its own connection.
#[derive(Debug, Clone)]
pub struct PostgresStore {
	config: Option<StoreConfig>,
}

impl PostgresStore {
	pub fn new(config: Option<StoreConfig>) -> Self {
		Self { config }
	}

	async fn client(&self) -> Result<Client, StoreError> {
		db_client(self.config.as_ref()).await
	}

	/// Create the tables if they do not exist yet.
	pub async fn ensure_schema(&self) -> Result<(), StoreError> {
		self.client().await?.batch_execute(SCHEMA).await?;
		Ok(())
	}
}

#[async_trait]
impl Store for PostgresStore {
	async fn list_vehicles(&self) -> Result<Vec<Vehicle>, StoreError> {
		let db = self.client().await?;
		let q = format!("SELECT {VEHICLE_COLUMNS} FROM cars ORDER BY created_at DESC");
		let rows = db.query(q.as_str(), &[]).await?;
		let cars = rows.iter().map(Vehicle::try_from_row).collect::<Result<Vec<_>, _>>()?;
		Ok(cars)
	}

	async fn insert_vehicle(&self, fields: &VehicleFields) -> Result<Vehicle, StoreError> {
		let db = self.client().await?;
		let statement = format!(
			"INSERT INTO cars
			(make, model, year, km, fuel, gearbox, price, status, image_url, description, willhaben_url)
			VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
			RETURNING {VEHICLE_COLUMNS}"
		);
		let row = db
			.query_one(
				statement.as_str(),
				&[
					&fields.make,
					&fields.model,
					&fields.year,
					&fields.km,
					&fields.fuel,
					&fields.gearbox,
					&fields.price,
					&fields.status.as_str(),
					&fields.image_url,
					&fields.description,
					&fields.willhaben_url,
				],
			)
			.await?;
		Ok(Vehicle::try_from_row(&row)?)
	}

	async fn update_vehicle(&self, id: Uuid, fields: &VehicleFields) -> Result<Vehicle, StoreError> {
		let db = self.client().await?;
		let statement = format!(
			"UPDATE cars SET make=$2, model=$3, year=$4, km=$5, fuel=$6, gearbox=$7, price=$8, status=$9,
			image_url=$10, description=$11, willhaben_url=$12
			WHERE id=$1
			RETURNING {VEHICLE_COLUMNS}"
		);
		let Some(row) = db
			.query_opt(
				statement.as_str(),
				&[
					&id,
					&fields.make,
					&fields.model,
					&fields.year,
					&fields.km,
					&fields.fuel,
					&fields.gearbox,
					&fields.price,
					&fields.status.as_str(),
					&fields.image_url,
					&fields.description,
					&fields.willhaben_url,
				],
			)
			.await?
		else {
			return Err(StoreError::NotFound);
		};
		Ok(Vehicle::try_from_row(&row)?)
	}

	async fn delete_vehicle(&self, id: Uuid) -> Result<(), StoreError> {
		let db = self.client().await?;
		let deleted = db.execute("DELETE FROM cars WHERE id=$1", &[&id]).await?;
		log::debug!("deleted {deleted} row(s) for car {id}");
		Ok(())
	}

	async fn insert_message(&self, message: &ContactMessage) -> Result<(), StoreError> {
		let db = self.client().await?;
		let statement = "INSERT INTO contact_messages (vorname, nachname, email, telefon, nachricht, submitted_at)
			VALUES ($1, $2, $3, $4, $5, $6)";
		db.execute(
			statement,
			&[
				&message.vorname,
				&message.nachname,
				&message.email,
				&message.telefon,
				&message.nachricht,
				&message.submitted_at,
			],
		)
		.await?;
		Ok(())
	}

	async fn insert_valuation(&self, request: &ValuationRequest) -> Result<(), StoreError> {
		let db = self.client().await?;
		let statement = "INSERT INTO valuation_requests
			(marke, modell, jahr, km, kraftstoff, zustand, kontakt, anmerkung, submitted_at)
			VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)";
		db.execute(
			statement,
			&[
				&request.marke,
				&request.modell,
				&request.jahr,
				&request.km,
				&request.kraftstoff,
				&request.zustand,
				&request.kontakt,
				&request.anmerkung,
				&request.submitted_at,
			],
		)
		.await?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_unconfigured_store_reports_configuration_error() {
		let store = PostgresStore::new(None);
		assert!(matches!(store.list_vehicles().await, Err(StoreError::NotConfigured)));
		assert!(matches!(store.delete_vehicle(Uuid::new_v4()).await, Err(StoreError::NotConfigured)));
	}

	#[tokio::test]
	async fn test_malformed_url_is_a_store_error() {
		let store = PostgresStore::new(Some(StoreConfig {
			url: "postgres://user@host:notaport/db".to_string(),
			service_key: None,
		}));
		assert!(matches!(store.list_vehicles().await, Err(StoreError::Postgres(_))));
	}

	#[test]
	fn test_schema_covers_every_vehicle_column() {
		for column in VEHICLE_COLUMNS.split(", ") {
			assert!(SCHEMA.contains(&format!("\t{column} ")), "{column}");
		}
	}
}
