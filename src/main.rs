use std::path::Path;
use std::sync::Arc;

use api_rest::AppState;
use pms_core::config::{flag_from_env_value, store_path_from_env_value};
use pms_core::{CoreConfig, JsonFileStore, PatientService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the patient management service
///
/// Serves the REST API on the configured address (default: 0.0.0.0:3000) over the JSON
/// patient store.
///
/// # Environment Variables
/// - `PMS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PATIENT_STORE_PATH`: JSON store file (default: "patients.json")
/// - `PMS_CREATE_STORE`: create an empty store if the file is missing (default: false)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the store file is missing and `PMS_CREATE_STORE` is not set,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pms_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("pms_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("PMS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::new(
        store_path_from_env_value(std::env::var("PATIENT_STORE_PATH").ok()),
        flag_from_env_value(std::env::var("PMS_CREATE_STORE").ok()),
    )?;

    let storage = JsonFileStore::new(cfg.store_path());
    if cfg.create_store_if_missing() {
        storage.initialise()?;
    }
    ensure_store_exists(cfg.store_path())?;

    tracing::info!("++ Patient store at {}", cfg.store_path().display());
    tracing::info!("++ Starting patient management REST API on {}", addr);

    let app = api_rest::router(AppState {
        patient_service: PatientService::new(Arc::new(storage)),
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Server stopped");
    Ok(())
}

fn ensure_store_exists(path: &Path) -> anyhow::Result<()> {
    if !path.is_file() {
        anyhow::bail!(
            "Patient store does not exist: {} (set PMS_CREATE_STORE=true or run `pms init`)",
            path.display()
        );
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
