use uuid::Uuid;

use super::format::{format_km, format_price, or_missing, MISSING};
use crate::storage::{Vehicle, VehicleStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
	#[default]
	All,
	Only(VehicleStatus),
}

impl StatusFilter {
	fn admits(&self, vehicle: &Vehicle) -> bool {
		match self {
			StatusFilter::All => true,
			StatusFilter::Only(status) => VehicleStatus::normalize(Some(&vehicle.status)) == *status,
		}
	}
}

/// Everything a listing card shows, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleCard {
	pub id: Uuid,
	pub badge: &'static str,
	pub reserved: bool,
	pub title: String,
	pub make: String,
	pub model: String,
	pub year: String,
	pub km: String,
	pub fuel: String,
	pub gearbox: String,
	pub price: String,
	pub image_url: Option<String>,
	pub description: Option<String>,
	pub listing_url: Option<String>,
}

impl From<&Vehicle> for VehicleCard {
	fn from(car: &Vehicle) -> Self {
		let status = VehicleStatus::normalize(Some(&car.status));
		let title = format!("{} {}", car.make.trim(), car.model.trim()).trim().to_string();
		Self {
			id: car.id,
			badge: match status {
				VehicleStatus::Reserved => "Reserviert",
				VehicleStatus::ForSale => "Zum Verkauf",
			},
			reserved: status == VehicleStatus::Reserved,
			title: if title.is_empty() { "Fahrzeugdetails".to_string() } else { title },
			make: or_missing(Some(&car.make)),
			model: or_missing(Some(&car.model)),
			year: car.year.map_or_else(|| MISSING.to_string(), |y| y.to_string()),
			km: format_km(car.km),
			fuel: or_missing(car.fuel.as_deref()),
			gearbox: or_missing(car.gearbox.as_deref()),
			price: format_price(car.price),
			image_url: car.image_url.clone().filter(|u| !u.trim().is_empty()),
			description: car.description.clone(),
			listing_url: car.willhaben_url.clone().filter(|u| !u.trim().is_empty()),
		}
	}
}

/// The page's copy of the public inventory.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
	cars: Vec<Vehicle>,
	filter: StatusFilter,
}

impl Inventory {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn replace(&mut self, cars: Vec<Vehicle>) {
		self.cars = cars;
	}

	pub fn set_filter(&mut self, filter: StatusFilter) {
		self.filter = filter;
	}

	pub fn filter(&self) -> StatusFilter {
		self.filter
	}

	/// Number of listed vehicles, ignoring the filter.
	pub fn len(&self) -> usize {
		self.cars.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cars.is_empty()
	}

	pub fn cars(&self) -> &[Vehicle] {
		&self.cars
	}

	pub fn find(&self, id: Uuid) -> Option<&Vehicle> {
		self.cars.iter().find(|c| c.id == id)
	}

	pub fn visible(&self) -> impl Iterator<Item = &Vehicle> {
		self.cars.iter().filter(move |c| self.filter.admits(c))
	}

	pub fn cards(&self) -> Vec<VehicleCard> {
		self.visible().map(VehicleCard::from).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::Utc;

	fn car(make: &str, model: &str, status: &str) -> Vehicle {
		Vehicle {
			id: Uuid::new_v4(),
			make: make.to_string(),
			model: model.to_string(),
			year: Some(2018),
			km: Some(76_400),
			fuel: Some("Benzin".to_string()),
			gearbox: None,
			price: Some(14_990.0),
			status: status.to_string(),
			image_url: Some(String::new()),
			description: None,
			willhaben_url: Some("https://www.willhaben.at/iad/123".to_string()),
			created_at: Utc::now(),
		}
	}

	#[test]
	fn test_filter() {
		let mut inventory = Inventory::new();
		inventory.replace(vec![car("Audi", "A4", "verkauf"), car("BMW", "118i", "Reserviert")]);
		assert_eq!(inventory.visible().count(), 2);

		inventory.set_filter(StatusFilter::Only(VehicleStatus::Reserved));
		let visible: Vec<_> = inventory.visible().map(|c| c.make.as_str()).collect();
		assert_eq!(visible, ["BMW"]);

		inventory.set_filter(StatusFilter::Only(VehicleStatus::ForSale));
		assert_eq!(inventory.cards()[0].make, "Audi");
		assert_eq!(inventory.len(), 2);
	}

	#[test]
	fn test_card_formatting() {
		let vehicle = car("Audi", "A4 Avant", "reserviert");
		let card = VehicleCard::from(&vehicle);
		assert_eq!(card.badge, "Reserviert");
		assert!(card.reserved);
		assert_eq!(card.title, "Audi A4 Avant");
		assert_eq!(card.year, "2018");
		assert_eq!(card.km, "76.400 km");
		assert_eq!(card.price, "14.990 €");
		assert_eq!(card.gearbox, "—");
		assert_eq!(card.image_url, None);
		assert!(card.listing_url.is_some());
	}

	#[test]
	fn test_find() {
		let vehicle = car("Seat", "Leon", "verkauf");
		let id = vehicle.id;
		let mut inventory = Inventory::new();
		inventory.replace(vec![vehicle]);
		assert_eq!(inventory.find(id).map(|c| c.model.as_str()), Some("Leon"));
		assert!(inventory.find(Uuid::new_v4()).is_none());
	}
}
