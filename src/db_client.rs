use tokio_postgres::{Client, NoTls};

use crate::{config::StoreConfig, storage::StoreError};

/// Open a fresh connection with the configured credentials.
///
/// The connection task is driven in the background and ends when the returned
/// client is dropped.
pub async fn db_client(config: Option<&StoreConfig>) -> Result<Client, StoreError> {
	let Some(config) = config else {
		return Err(StoreError::NotConfigured);
	};

	let mut pg_config: tokio_postgres::Config = config.url.parse()?;
	if let Some(key) = &config.service_key {
		pg_config.password(key);
	}
	pg_config.application_name("autoparadies-server");

	let (client, connection) = pg_config.connect(NoTls).await?;

	tokio::spawn(async move {
		if let Err(e) = connection.await {
			log::error!("Connection error: {}", e);
		}
	});

	Ok(client)
}
