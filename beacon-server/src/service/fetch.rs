//! Repository fetcher
//!
//! Lists the organization's repositories and publishes a fresh bucket
//! snapshot. Partial state is never published: on any error the previous
//! snapshot stays in place.

use anyhow::{Context, Result};
use beacon_core::domain::repo::partition_by_provider;
use tracing::info;

use crate::config::Config;
use crate::state::Dashboard;
use beacon_client::SourceControlClient;

/// Runs one fetch pass: list, partition, publish.
pub async fn refresh_buckets(
    source: &SourceControlClient,
    config: &Config,
    dashboard: &Dashboard,
) -> Result<()> {
    let repositories = source
        .list_repositories(&config.org)
        .await
        .context("Failed to list organization repositories")?;

    info!(
        "Fetched {} repositories for {}",
        repositories.len(),
        config.org
    );

    let buckets = partition_by_provider(&repositories, &config.prefix, &config.providers)
        .context("Failed to build provider patterns")?;

    let classified: usize = buckets.iter().map(|b| b.repositories.len()).sum();
    info!(
        "Classified {} repositories into {} provider buckets",
        classified,
        buckets.len()
    );

    dashboard.publish_buckets(buckets).await;
    Ok(())
}
