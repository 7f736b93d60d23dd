use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tracing::info;

use service::records::RecordStore;
use service::storage::csv_record_store::CsvRecordStore;

use crate::routes;
use crate::state::AppState;

/// Open the record file named in config, creating it header-only if absent.
pub async fn init_store(cfg: &AppConfig) -> anyhow::Result<Arc<dyn RecordStore>> {
    let store = CsvRecordStore::new(&cfg.storage.data_file);
    store.ensure_initialized().await?;
    info!(path = %store.path().display(), "record store ready");
    Ok(store)
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let store = init_store(&cfg).await?;
    let app: Router = routes::build_router(AppState::new(store));

    let addr: SocketAddr = cfg.bind_addr().parse()?;
    info!(%addr, "starting record server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
