use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::{session::AdminSession, ClientError};
use crate::{
	admin::LoginResponse,
	storage::{
		models::{ContactMessageInput, ValuationInput, VehicleInput},
		Vehicle,
	},
};

/// One method per site endpoint. `base_url` is where the routes are mounted,
/// e.g. `https://example.at/api`.
#[derive(Debug, Clone)]
pub struct SiteClient {
	http: Client,
	base_url: String,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
	error: String,
}

async fn checked(response: Response) -> Result<Response, ClientError> {
	let status = response.status();
	if status.is_success() {
		return Ok(response);
	}
	let message = match response.json::<ErrorBody>().await {
		Ok(body) => body.error,
		Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
	};
	Err(ClientError::Status { status, message })
}

impl SiteClient {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self::with_client(Client::new(), base_url)
	}

	pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
		let base_url = base_url.into().trim_end_matches('/').to_string();
		Self { http, base_url }
	}

	fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	fn admin(&self, builder: RequestBuilder, session: &AdminSession) -> Result<RequestBuilder, ClientError> {
		if !session.is_active() {
			return Err(ClientError::NotAdmin);
		}
		Ok(builder.bearer_auth(session.token()))
	}

	async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
		let response = checked(builder.send().await?).await?;
		Ok(response.json().await?)
	}

	pub async fn cars(&self) -> Result<Vec<Vehicle>, ClientError> {
		self.send(self.http.get(self.url("/cars")).header("Accept", "application/json")).await
	}

	pub async fn create_car(&self, session: &AdminSession, input: &VehicleInput) -> Result<Vehicle, ClientError> {
		let builder = self.admin(self.http.post(self.url("/cars")), session)?;
		self.send(builder.json(input)).await
	}

	pub async fn update_car(
		&self,
		session: &AdminSession,
		id: Uuid,
		input: &VehicleInput,
	) -> Result<Vehicle, ClientError> {
		let builder = self.admin(self.http.put(self.url(&format!("/cars/{id}"))), session)?;
		self.send(builder.json(input)).await
	}

	pub async fn delete_car(&self, session: &AdminSession, id: Uuid) -> Result<(), ClientError> {
		let builder = self.admin(self.http.delete(self.url(&format!("/cars/{id}"))), session)?;
		self.send::<serde_json::Value>(builder).await?;
		Ok(())
	}

	pub async fn submit_message(&self, message: &ContactMessageInput) -> Result<(), ClientError> {
		self.send::<serde_json::Value>(self.http.post(self.url("/messages")).json(message)).await?;
		Ok(())
	}

	pub async fn submit_valuation(&self, request: &ValuationInput) -> Result<(), ClientError> {
		self.send::<serde_json::Value>(self.http.post(self.url("/valuations")).json(request)).await?;
		Ok(())
	}

	/// `Ok(None)` when the server refuses the password (or answers with any other error status).
	pub async fn admin_login(&self, password: &str) -> Result<Option<AdminSession>, ClientError> {
		let body = serde_json::json!({ "password": password });
		let response = self.http.post(self.url("/admin-login")).json(&body).send().await?;
		if !response.status().is_success() {
			return Ok(None);
		}
		let login: LoginResponse = response.json().await?;
		Ok(Some(AdminSession::from(login)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_base_url_trailing_slash() {
		let client = SiteClient::new("http://localhost:4000/api/");
		assert_eq!(client.url("/cars"), "http://localhost:4000/api/cars");
	}

	#[tokio::test]
	async fn test_admin_calls_need_active_session() {
		let client = SiteClient::new("http://127.0.0.1:9");
		let expired = AdminSession::new("tok", 1);
		let result = client.delete_car(&expired, Uuid::new_v4()).await;
		assert!(matches!(result, Err(ClientError::NotAdmin)));
	}
}
