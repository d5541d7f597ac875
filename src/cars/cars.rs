use axum::{
	async_trait,
	body::Bytes,
	extract::{FromRequestParts, Path, State},
	http::request::Parts,
	Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
	auth::AdminClaims,
	error::ApiError,
	request::parse_json,
	storage::{models::VehicleInput, Vehicle, VehicleFields},
	AppState,
};

fn vehicle_fields(body: &Bytes) -> Result<VehicleFields, ApiError> {
	let input: VehicleInput = parse_json(body)?;
	input.into_fields().ok_or(ApiError::BadRequest("Missing make/model"))
}

fn car_id(raw: &str) -> Result<Uuid, ApiError> {
	let raw = raw.trim();
	if raw.is_empty() {
		return Err(ApiError::BadRequest("Missing id"));
	}
	Uuid::parse_str(raw).map_err(|_| ApiError::bad_request())
}

/// Identifier from `/cars/{id}`, checked before the admin gate runs.
pub struct CarId(pub Uuid);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CarId {
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
		let Path(raw) = Path::<String>::from_request_parts(parts, state)
			.await
			.map_err(|_| ApiError::BadRequest("Missing id"))?;
		car_id(&raw).map(CarId)
	}
}

/// Public inventory: only cars listed as for sale or reserved, newest first.
pub async fn get_cars(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, ApiError> {
	let cars = state.store.list_vehicles().await?;
	let cars = cars.into_iter().filter(|c| c.public_status().is_some()).collect();
	Ok(Json(cars))
}

pub async fn create_car(
	State(state): State<AppState>,
	_admin: AdminClaims,
	body: Bytes,
) -> Result<Json<Vehicle>, ApiError> {
	let fields = vehicle_fields(&body)?;
	let car = state.store.insert_vehicle(&fields).await?;
	log::info!("created car {} ({} {})", car.id, car.make, car.model);
	Ok(Json(car))
}

pub async fn missing_car_id() -> ApiError {
	ApiError::BadRequest("Missing id")
}

pub async fn update_car(
	State(state): State<AppState>,
	CarId(id): CarId,
	_admin: AdminClaims,
	body: Bytes,
) -> Result<Json<Vehicle>, ApiError> {
	let fields = vehicle_fields(&body)?;
	let car = state.store.update_vehicle(id, &fields).await?;
	log::info!("updated car {}", car.id);
	Ok(Json(car))
}

pub async fn delete_car(
	State(state): State<AppState>,
	CarId(id): CarId,
	_admin: AdminClaims,
) -> Result<Json<Value>, ApiError> {
	state.store.delete_vehicle(id).await?;
	log::info!("deleted car {id}");
	Ok(Json(json!({ "ok": true })))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_car_id() {
		let id = Uuid::new_v4();
		assert_eq!(car_id(&id.to_string()).unwrap(), id);
		assert!(matches!(car_id("  "), Err(ApiError::BadRequest("Missing id"))));
		assert!(matches!(car_id("42"), Err(ApiError::BadRequest("Bad request"))));
	}

	#[test]
	fn test_vehicle_fields_requires_make_and_model() {
		let err = vehicle_fields(&Bytes::from_static(br#"{"make":"Audi","model":""}"#)).unwrap_err();
		assert!(matches!(err, ApiError::BadRequest("Missing make/model")));

		let err = vehicle_fields(&Bytes::from_static(b"{oops")).unwrap_err();
		assert!(matches!(err, ApiError::BadRequest("Bad request")));
	}
}
