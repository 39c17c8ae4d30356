use std::net::SocketAddr;
use std::sync::Arc;

use dramadex::config::AppConfig;
use dramadex::store::{DocumentStore, MemoryStore, PgDocumentStore};
use dramadex::{db, routes, AppState};
use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dramadex=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env().expect("Failed to load configuration");

    let host: std::net::IpAddr = config.host.parse()?;
    let addr = SocketAddr::from((host, config.port));

    let app = match connect_store(&config).await {
        Ok(store) => routes::router(AppState::new(store, config.clone())),
        Err(e) => {
            tracing::error!(error = %e, "Database connection failed, serving degraded mode");
            routes::database_down_router()
        }
    };

    tracing::info!(host = %addr, base_uri = %config.base_uri, "Starting Dramadex API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn connect_store(config: &AppConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, documents are kept in memory only");
        return Ok(Arc::new(MemoryStore::new()));
    };

    let pool = db::create_pool(database_url, config.database_max_connections).await?;
    db::run_migrations(&pool).await?;
    tracing::info!("Connected to PostgreSQL document store");
    Ok(Arc::new(PgDocumentStore::new(pool)))
}
