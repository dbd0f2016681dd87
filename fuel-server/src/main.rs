use fuel_server::config::ServerConfig;
use fuel_server::store::{DocumentStore, MongoStore};
use fuel_server::web::{AppState, create_router};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the environment may already be set
    let _ = dotenvy::dotenv();
    init_logging();

    if let Err(e) = run().await {
        error!("{e}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // Connect once; without a store the data endpoints answer 500 and /test says why
    let state = match config.database() {
        Some((url, name)) => match MongoStore::connect(url, name).await {
            Ok(store) => {
                info!(database = store.database_name(), "Connected to database");
                AppState::new(store, config.clone())
            }
            Err(e) => {
                error!(database = name, error = %e, "Failed to connect to database");
                AppState::disconnected(config.clone())
            }
        },
        None => {
            warn!("DATABASE_URL or DATABASE_NAME not set; running without a database");
            AppState::disconnected(config.clone())
        }
    };

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Gas Station Info API listening on http://{addr}");
    info!("  POST /api/stations              - Create a station");
    info!("  GET  /api/stations              - List stations (city, state, fuel_type, limit)");
    info!("  POST /api/prices                - Report a price");
    info!("  GET  /api/prices/{{station_id}}   - Prices for a station (limit)");
    info!("  GET  /test                      - Database diagnostics");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
