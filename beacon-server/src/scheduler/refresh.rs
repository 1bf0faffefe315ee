//! Periodic refresh loops
//!
//! Both loops run for the lifetime of the process and are abandoned at
//! shutdown. A failed pass is logged and the last-good snapshot stays
//! published; the next tick tries again.

use std::sync::Arc;

use tokio::time;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::service::fetch::refresh_buckets;
use crate::service::render::Renderer;
use crate::state::Dashboard;
use beacon_client::SourceControlClient;

/// Spawns the organization and status refresh loops.
///
/// The caller has already run one pass of each before the server
/// started, so both loops skip the interval's immediate first tick.
pub fn spawn_refresh_loops(
    config: Config,
    source: SourceControlClient,
    renderer: Arc<Renderer>,
    dashboard: Arc<Dashboard>,
) {
    info!(
        "Starting refresh loops (organization every {:?}, status every {:?})",
        config.org_refresh_interval(),
        config.status_refresh_interval()
    );

    let status_interval = config.status_refresh_interval();

    tokio::spawn(async move {
        let mut interval = time::interval(config.org_refresh_interval());
        interval.tick().await;

        loop {
            interval.tick().await;
            debug!("Refreshing organization repositories");

            match refresh_buckets(&source, &config, &dashboard).await {
                Ok(()) => debug!("Repository refresh complete"),
                Err(e) => error!("Repository refresh failed, keeping last snapshot: {:#}", e),
            }
        }
    });

    tokio::spawn(async move {
        let mut interval = time::interval(status_interval);
        interval.tick().await;

        loop {
            interval.tick().await;
            debug!("Re-rendering dashboard page");

            match renderer.render().await {
                Ok(()) => debug!("Render pass complete"),
                Err(e) => error!("Render pass failed, keeping last page: {:#}", e),
            }
        }
    });
}
