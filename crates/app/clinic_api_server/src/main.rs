//! Clinic booking API server binary.
//!
//! Reads its configuration from the environment (see
//! [`clinic_api::config::ApiConfig::from_env`]); flags cover the settings
//! that only make sense on the command line.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use clinic_api::config::ApiConfig;
use clinic_core::models::NewTreatment;
use clinic_core::store::{ClinicStore, MemoryStore, PgStore};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "clinic_api_server", about = "Clinic booking API server")]
struct Args {
    /// Port to listen on; overrides `BIND_ADDR` and `PORT`.
    #[arg(long)]
    port: Option<u16>,

    /// Use the in-memory store even when a database URL is configured.
    #[arg(long, default_value_t = false)]
    in_memory: bool,

    /// Maximum number of database connections in the pool.
    #[arg(long, env = "MAX_CONNECTIONS", default_value_t = 5)]
    max_connections: u32,

    /// Upper bound, in seconds, on a single store call.
    #[arg(long, env = "STORE_TIMEOUT_SECS", default_value_t = 10)]
    store_timeout_secs: u64,

    /// JSON file with treatment options (`[{"name", "slots", "price"}]`)
    /// to upsert into the catalog at startup.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,clinic_api=debug,clinic_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env()?;
    if let Some(port) = args.port {
        config.bind_addr = format!("0.0.0.0:{port}");
    }

    let store = open_store(&args, &config).await?;

    if let Some(path) = &args.catalog {
        seed_catalog(store.as_ref(), path).await?;
    }

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let state = clinic_api::AppState::new(store, config);
    let app = clinic_api::router(state);

    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn open_store(
    args: &Args,
    config: &ApiConfig,
) -> Result<Arc<dyn ClinicStore>, Box<dyn std::error::Error>> {
    let database_url = match (&config.database_url, args.in_memory) {
        (Some(url), false) => url,
        (Some(_), true) => {
            info!("--in-memory set, ignoring configured database");
            return Ok(Arc::new(MemoryStore::new()));
        }
        (None, _) => {
            warn!("no DATABASE_URL configured, records are kept in memory only");
            return Ok(Arc::new(MemoryStore::new()));
        }
    };

    info!(max_connections = args.max_connections, "configuring connection pool");
    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(database_url)
        .await?;

    info!("running database migrations");
    clinic_api::migrate(&pool).await?;

    Ok(Arc::new(PgStore::with_timeout(
        pool,
        Duration::from_secs(args.store_timeout_secs),
    )))
}

async fn seed_catalog(store: &dyn ClinicStore, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let raw = tokio::fs::read_to_string(path).await?;
    let entries: Vec<NewTreatment> = serde_json::from_str(&raw)?;
    let count = entries.len();
    for entry in entries {
        store.upsert_treatment(entry.into_option()?).await?;
    }
    info!(path = %path.display(), count, "catalog seeded");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
