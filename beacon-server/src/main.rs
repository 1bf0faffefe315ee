//! Beacon Server
//!
//! Serves a CI status dashboard for one organization's repositories.
//!
//! Architecture:
//! - Configuration: CLI flags and environment variables (clap)
//! - Clients: HTTP communication with the hosting API and the CI service
//! - Services: repository fetching, branch probing, page rendering
//! - Scheduler: two periodic refresh loops feeding snapshot caches
//! - API: axum routes reading the last-published page
//!
//! Startup runs one fetch pass and one render pass before the listener
//! is bound, so the first request already sees a complete page. After
//! that, refresh failures keep the last-good snapshots in place.

mod api;
mod config;
mod scheduler;
mod service;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::service::fetch::refresh_buckets;
use crate::service::probe::{CiStatusSource, StatusSource};
use crate::service::render::Renderer;
use crate::state::Dashboard;
use beacon_client::{CiClient, SourceControlClient};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Beacon server on :{}", config.listen);

    let source = SourceControlClient::new(&config.source_api_url, &config.token);
    let ci = CiClient::new(&config.ci_url);
    let dashboard = Arc::new(Dashboard::new());

    // One fetch and one render pass must succeed before serving starts.
    refresh_buckets(&source, &config, &dashboard)
        .await
        .context("Initial repository fetch failed")?;

    let status_source: Arc<dyn StatusSource> =
        Arc::new(CiStatusSource::new(ci.clone(), config.org.clone()));
    let renderer = Arc::new(Renderer::new(
        config.org.clone(),
        config.branches.clone(),
        status_source,
        ci,
        Arc::clone(&dashboard),
    ));
    renderer
        .render()
        .await
        .context("Initial render failed")?;

    scheduler::spawn_refresh_loops(
        config.clone(),
        source,
        Arc::clone(&renderer),
        Arc::clone(&dashboard),
    );

    let app = api::create_router(Arc::clone(&dashboard), &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Listening on {}", addr);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    shutdown_signal().await;
    info!("Signal received, draining in-flight requests");
    let _ = shutdown_tx.send(());

    match tokio::time::timeout(config.shutdown_timeout(), server).await {
        Ok(joined) => {
            joined
                .context("Server task panicked")?
                .context("Server error")?;
            info!("Server stopped");
        }
        Err(_) => {
            warn!(
                "Connections still open after {:?}, exiting anyway",
                config.shutdown_timeout()
            );
        }
    }

    Ok(())
}

/// Completes when the process receives SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
