use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::{api::SiteClient, inventory::Inventory, session::AdminSession, ClientError};
use crate::storage::models::{ContactMessageInput, ValuationInput, VehicleInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
	Success,
	Failure,
}

/// Short message for the user after an action, the page's toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
	pub kind: NoticeKind,
	pub text: &'static str,
}

impl Notice {
	fn success(text: &'static str) -> Self {
		Self {
			kind: NoticeKind::Success,
			text,
		}
	}

	fn failure(text: &'static str) -> Self {
		Self {
			kind: NoticeKind::Failure,
			text,
		}
	}

	pub fn is_success(&self) -> bool {
		self.kind == NoticeKind::Success
	}
}

/// Page-level state and actions. A failed call reports a notice and leaves the
/// inventory and session as they were.
#[derive(Debug)]
pub struct SiteController {
	client: SiteClient,
	inventory: Inventory,
	session: Option<AdminSession>,
}

impl SiteController {
	pub fn new(client: SiteClient) -> Self {
		Self::with_session(client, None)
	}

	/// Resume with a session kept from earlier in the same browsing session.
	pub fn with_session(client: SiteClient, session: Option<AdminSession>) -> Self {
		Self {
			client,
			inventory: Inventory::new(),
			session,
		}
	}

	pub fn inventory(&self) -> &Inventory {
		&self.inventory
	}

	pub fn inventory_mut(&mut self) -> &mut Inventory {
		&mut self.inventory
	}

	pub fn session(&self) -> Option<&AdminSession> {
		self.session.as_ref()
	}

	pub fn is_admin(&self) -> bool {
		self.session.as_ref().is_some_and(AdminSession::is_active)
	}

	fn active_session(&self) -> Result<&AdminSession, ClientError> {
		self.session.as_ref().filter(|s| s.is_active()).ok_or(ClientError::NotAdmin)
	}

	pub async fn refresh(&mut self) -> Result<(), ClientError> {
		let cars = self.client.cars().await?;
		self.inventory.replace(cars);
		Ok(())
	}

	/// Initial page load.
	pub async fn load(&mut self) -> Option<Notice> {
		match self.refresh().await {
			Ok(()) => None,
			Err(e) => {
				log::warn!("loading inventory failed: {e}");
				Some(Notice::failure("⚠ Fahrzeuge konnten nicht geladen werden"))
			}
		}
	}

	pub async fn login(&mut self, password: &str) -> Notice {
		match self.client.admin_login(password).await {
			Ok(Some(session)) => {
				self.session = Some(session);
				Notice::success("✓ Admin aktiv")
			}
			Ok(None) => Notice::failure("Falsches Passwort."),
			Err(e) => {
				log::warn!("admin login failed: {e}");
				Notice::failure("Login fehlgeschlagen.")
			}
		}
	}

	pub fn logout(&mut self) -> Notice {
		self.session = None;
		Notice::success("Admin abgemeldet")
	}

	/// Editor contents for an existing vehicle.
	pub fn edit_form(&self, id: Uuid) -> Option<VehicleInput> {
		if !self.is_admin() {
			return None;
		}
		self.inventory.find(id).map(VehicleInput::from)
	}

	/// Create (`editing == None`) or update a vehicle, then reload the inventory.
	pub async fn save_vehicle(&mut self, editing: Option<Uuid>, input: &VehicleInput) -> Notice {
		let Ok(session) = self.active_session() else {
			return Notice::failure("Admin Login nötig");
		};
		let result = match editing {
			Some(id) => self.client.update_car(session, id, input).await.map(|_| "✓ Fahrzeug aktualisiert"),
			None => self.client.create_car(session, input).await.map(|_| "✓ Fahrzeug hinzugefügt"),
		};
		match result {
			Ok(text) => {
				self.reload_after_write().await;
				Notice::success(text)
			}
			Err(e) => {
				log::warn!("saving vehicle failed: {e}");
				Notice::failure("⚠ Speichern fehlgeschlagen")
			}
		}
	}

	pub async fn delete_vehicle(&mut self, id: Uuid) -> Notice {
		let Ok(session) = self.active_session() else {
			return Notice::failure("Admin Login nötig");
		};
		match self.client.delete_car(session, id).await {
			Ok(()) => {
				self.reload_after_write().await;
				Notice::success("✓ Fahrzeug gelöscht")
			}
			Err(e) => {
				log::warn!("deleting vehicle failed: {e}");
				Notice::failure("⚠ Löschen fehlgeschlagen")
			}
		}
	}

	async fn reload_after_write(&mut self) {
		if let Err(e) = self.refresh().await {
			log::warn!("reloading inventory failed: {e}");
		}
	}

	pub async fn send_message(&self, mut message: ContactMessageInput) -> Notice {
		message.submitted_at.get_or_insert_with(now_stamp);
		match self.client.submit_message(&message).await {
			Ok(()) => Notice::success("✓ Nachricht gesendet!"),
			Err(e) => {
				log::warn!("sending contact message failed: {e}");
				Notice::failure("⚠ Senden fehlgeschlagen")
			}
		}
	}

	pub async fn send_valuation(&self, mut request: ValuationInput) -> Notice {
		request.submitted_at.get_or_insert_with(now_stamp);
		match self.client.submit_valuation(&request).await {
			Ok(()) => Notice::success("✓ Bewertungsanfrage eingegangen!"),
			Err(e) => {
				log::warn!("sending valuation request failed: {e}");
				Notice::failure("⚠ Senden fehlgeschlagen")
			}
		}
	}
}

fn now_stamp() -> Value {
	Value::String(Utc::now().to_rfc3339())
}
