use std::sync::Arc;

use autoparadies_server::{config::Config, create_router, storage::PostgresStore, AppState};
use log::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	info!("autoparadies-server {} starting", env!("CARGO_PKG_VERSION"));

	let config = Config::load()?;

	let store = PostgresStore::new(config.store.clone());
	if config.store.is_some() {
		match store.ensure_schema().await {
			Ok(()) => info!("database schema ready"),
			Err(e) => warn!("could not prepare database schema: {e}"),
		}
	}

	let addr = config.bind_address;
	let app = create_router(AppState::new(config, Arc::new(store)));
	let listener = tokio::net::TcpListener::bind(addr).await?;
	info!("Listening on: {addr}");

	axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

	info!("Shutdown complete");
	Ok(())
}

async fn shutdown_signal() {
	let ctrl_c = async {
		tokio::signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
	};

	#[cfg(unix)]
	let terminate = async {
		tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
			.expect("Failed to install SIGTERM handler")
			.recv()
			.await;
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}

	info!("Shutdown signal received, draining connections");
}
