use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ContactMessage, Store, StoreError, ValuationRequest, Vehicle, VehicleFields};

/// In-process store for tests and local runs. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
	cars: RwLock<Vec<Vehicle>>,
	messages: RwLock<Vec<ContactMessage>>,
	valuations: RwLock<Vec<ValuationRequest>>,
	unavailable: AtomicBool,
}

fn apply(vehicle: &mut Vehicle, fields: &VehicleFields) {
	vehicle.make = fields.make.clone();
	vehicle.model = fields.model.clone();
	vehicle.year = fields.year;
	vehicle.km = fields.km;
	vehicle.fuel = fields.fuel.clone();
	vehicle.gearbox = fields.gearbox.clone();
	vehicle.price = fields.price;
	vehicle.status = fields.status.as_str().to_string();
	vehicle.image_url = fields.image_url.clone();
	vehicle.description = fields.description.clone();
	vehicle.willhaben_url = fields.willhaben_url.clone();
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Start with rows already in place, e.g. ones whose status is not public.
	pub fn with_vehicles(cars: Vec<Vehicle>) -> Self {
		Self {
			cars: RwLock::new(cars),
			..Default::default()
		}
	}

	/// While set, every operation fails with [`StoreError::Unavailable`].
	pub fn set_unavailable(&self, unavailable: bool) {
		self.unavailable.store(unavailable, Ordering::SeqCst);
	}

	fn check(&self) -> Result<(), StoreError> {
		if self.unavailable.load(Ordering::SeqCst) {
			return Err(StoreError::Unavailable);
		}
		Ok(())
	}

	pub async fn vehicle_count(&self) -> usize {
		self.cars.read().await.len()
	}

	pub async fn messages(&self) -> Vec<ContactMessage> {
		self.messages.read().await.clone()
	}

	pub async fn valuations(&self) -> Vec<ValuationRequest> {
		self.valuations.read().await.clone()
	}
}

#[async_trait]
impl Store for MemoryStore {
	async fn list_vehicles(&self) -> Result<Vec<Vehicle>, StoreError> {
		self.check()?;
		let mut cars = self.cars.read().await.clone();
		// ties go to the later insert
		cars.reverse();
		cars.sort_by(|a, b| b.created_at.cmp(&a.created_at));
		Ok(cars)
	}

	async fn insert_vehicle(&self, fields: &VehicleFields) -> Result<Vehicle, StoreError> {
		self.check()?;
		let mut vehicle = Vehicle {
			id: Uuid::new_v4(),
			make: String::new(),
			model: String::new(),
			year: None,
			km: None,
			fuel: None,
			gearbox: None,
			price: None,
			status: String::new(),
			image_url: None,
			description: None,
			willhaben_url: None,
			created_at: Utc::now(),
		};
		apply(&mut vehicle, fields);
		self.cars.write().await.push(vehicle.clone());
		Ok(vehicle)
	}

	async fn update_vehicle(&self, id: Uuid, fields: &VehicleFields) -> Result<Vehicle, StoreError> {
		self.check()?;
		let mut cars = self.cars.write().await;
		let vehicle = cars.iter_mut().find(|c| c.id == id).ok_or(StoreError::NotFound)?;
		apply(vehicle, fields);
		Ok(vehicle.clone())
	}

	async fn delete_vehicle(&self, id: Uuid) -> Result<(), StoreError> {
		self.check()?;
		self.cars.write().await.retain(|c| c.id != id);
		Ok(())
	}

	async fn insert_message(&self, message: &ContactMessage) -> Result<(), StoreError> {
		self.check()?;
		self.messages.write().await.push(message.clone());
		Ok(())
	}

	async fn insert_valuation(&self, request: &ValuationRequest) -> Result<(), StoreError> {
		self.check()?;
		self.valuations.write().await.push(request.clone());
		Ok(())
	}
}
