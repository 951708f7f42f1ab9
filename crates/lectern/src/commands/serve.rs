use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use quire_core::DocumentStore;
use quire_gateway::{start_server, AppState};

use crate::config::{self, Config};

pub async fn execute(host: Option<String>, port: Option<u16>, config: &Config) -> Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info!(host = %host, port, "Starting gateway server");

    let store = Arc::new(DocumentStore::open(config::store_path(config))?);
    let llm = config::build_llm_client(config)?;

    let state = AppState {
        store,
        llm,
        allowed_origins: config.server.allowed_origins.clone(),
    };

    start_server(state, &host, port).await?;

    Ok(())
}
