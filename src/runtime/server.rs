//! Server mode
//!
//! Connects the backend, builds the link store and starts the HTTP server.

use actix_web::{App, HttpServer, middleware::DefaultHeaders, web};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::api::middleware::{AccessLogMiddleware, RequestIdMiddleware};
use crate::api::services::{LinkSettings, configure_routes};
use crate::config::StaticConfig;
use crate::storage::{LinkStore, create_backend};

/// 创建请求体上限
const MAX_PAYLOAD_BYTES: usize = 1024 * 1024;

/// Run the HTTP server until it is stopped by a signal.
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: StaticConfig) -> Result<()> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let backend = create_backend(&config.backend)
        .await
        .context("Failed to create storage backend")?;
    let store = web::Data::new(LinkStore::new(backend));
    info!("Link store ready on {} backend", store.backend_name());
    let settings = web::Data::new(LinkSettings::from_config(&config));

    if config.auth.writes_enabled() {
        info!("Link creation enabled at /links/create and /create");
    } else {
        warn!("Link creation is disabled (auth.auth_code not set)");
    }
    info!("Short URLs use base: {}", config.server.base_url);

    let workers = config.server.workers.clamp(1, 32);
    let bind_address = config.bind_address();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(AccessLogMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .app_data(store.clone())
            .app_data(settings.clone())
            .app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?;

    warn!(
        "Starting server at http://{} with {} workers",
        bind_address, workers
    );
    server.run().await?;

    info!("Server stopped");
    Ok(())
}
