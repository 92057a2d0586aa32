use std::{future::Future, net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use configs::{AppConfig, StoreBackend};
use migration::MigratorTrait;
use service::contacts::{ContactStore, FileContactStore, SeaOrmContactStore};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = format!("{}:{}", cfg.server.host, cfg.server.port);
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {raw}: {e}")))
}

/// Open the configured store once; the handle is shared by every request.
pub async fn build_store(cfg: &AppConfig) -> Result<Arc<dyn ContactStore>, StartupError> {
    match cfg.store.backend {
        StoreBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(|e| StartupError::Store(e.to_string()))?;
            if cfg.database.auto_migrate {
                migration::Migrator::up(&db, None)
                    .await
                    .map_err(|e| StartupError::Store(format!("migrate up: {e}")))?;
                info!("database migrations applied");
            }
            info!(backend = "postgres", "contact store ready");
            Ok(Arc::new(SeaOrmContactStore::new(db)))
        }
        StoreBackend::File => {
            let path = Path::new(&cfg.store.file_path);
            common::env::ensure_parent_dir(path).await?;
            let store = FileContactStore::open(path)
                .await
                .map_err(|e| StartupError::Store(e.to_string()))?;
            info!(backend = "file", path = %path.display(), "contact store ready");
            Ok(Arc::new(store))
        }
    }
}

/// Router over an already-built store.
pub fn build_app(store: Arc<dyn ContactStore>) -> Router {
    routes::build_router(AppState::new(store), build_cors())
}

/// Build the app from `cfg` and serve until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    common::env::warn_if_blank(&["SERVER_HOST", "SERVER_PORT", "DATABASE_URL", "CONTACTS_FILE"]);
    let addr = bind_addr(&cfg)?;

    let store = build_store(&cfg).await?;
    let app = build_app(store);

    info!(%addr, "contacts api listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("contacts api stopped");
    Ok(())
}
