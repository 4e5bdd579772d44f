use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::{AppConfig, StoreBackend};
use service::id_scheme::{OpaqueScheme, SequentialScheme};
use service::store::memory::MemStore;
use service::store::mongo::MongoStore;
use service::store::seaorm::SeaOrmStore;
use service::{RecordApi, RecordService};

use crate::routes::{self, ServerState};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

// Browser front-ends are served from other origins; every verb plus the
// OPTIONS preflight must be allowed.
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    let host = env::var("SERVER_HOST").unwrap_or_else(|_| cfg.server.host.clone());
    let port = env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(cfg.server.port);
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Connect the configured backend and pin the matching identifier scheme.
/// Connectivity failure here is fatal; the process never starts serving
/// against an unreachable store.
async fn connect_backend(cfg: &AppConfig) -> anyhow::Result<Arc<dyn RecordApi>> {
    let db_cfg = &cfg.database;
    match db_cfg.backend {
        StoreBackend::Postgres => {
            let db = models::db::connect(db_cfg).await?;
            migration::Migrator::up(&db, None).await?;
            info!(backend = "postgres", "store connected and migrated");
            Ok(Arc::new(RecordService::<SequentialScheme, _>::new(SeaOrmStore::new(db))))
        }
        StoreBackend::Mongodb => {
            let store =
                MongoStore::connect(&db_cfg.url, &db_cfg.mongo_database, &db_cfg.mongo_collection)
                    .await?;
            info!(backend = "mongodb", "store connected");
            Ok(Arc::new(RecordService::<OpaqueScheme, _>::new(store)))
        }
        StoreBackend::Memory => {
            info!(backend = "memory", "using non-durable in-process store");
            Ok(Arc::new(RecordService::<SequentialScheme, _>::new(MemStore::new())))
        }
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = AppConfig::load_and_validate()?;

    let records = connect_backend(&cfg).await?;
    let state = ServerState { records };

    let cors = build_cors();
    let app: Router = routes::build_router(state, cors);

    let addr = load_bind_addr(&cfg)?;
    info!(%addr, "starting list API server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
