//! Build-status prober
//!
//! Probes every configured branch of one repository concurrently and
//! returns results in canonical branch order. Completion order is
//! nondeterministic, so each task reports its branch index and the
//! results are written into an indexed slot array before returning.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use beacon_core::domain::build::{BuildResult, BuildStatus};

use beacon_client::CiClient;

/// Source of per-branch build status
///
/// Seam for the renderer: production probes the CI service, tests plug
/// in fakes with controlled completion order.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetches the build status of one branch of one repository
    async fn branch_status(&self, repo: &str, branch: &str) -> Result<BuildStatus>;
}

/// Production status source backed by the CI client
pub struct CiStatusSource {
    client: CiClient,
    org: String,
}

impl CiStatusSource {
    /// Creates a status source for one organization
    pub fn new(client: CiClient, org: impl Into<String>) -> Self {
        Self {
            client,
            org: org.into(),
        }
    }
}

#[async_trait]
impl StatusSource for CiStatusSource {
    async fn branch_status(&self, repo: &str, branch: &str) -> Result<BuildStatus> {
        let status = self
            .client
            .branch_status(&self.org, repo, branch)
            .await
            .with_context(|| format!("Failed to probe {}/{}", repo, branch))?;
        Ok(status)
    }
}

/// Probes every branch of one repository.
///
/// Launches one task per branch and joins them all; the returned list
/// always has exactly the length and order of `branches`.
pub async fn probe_repository(
    source: Arc<dyn StatusSource>,
    repo: &str,
    branches: &[String],
) -> Result<Vec<BuildResult>> {
    let mut handles = Vec::with_capacity(branches.len());

    for (index, branch) in branches.iter().enumerate() {
        let source = Arc::clone(&source);
        let repo = repo.to_string();
        let branch = branch.clone();

        handles.push(tokio::spawn(async move {
            let status = source.branch_status(&repo, &branch).await;
            (index, branch, status)
        }));
    }

    let mut slots: Vec<Option<BuildResult>> = (0..branches.len()).map(|_| None).collect();

    for handle in handles {
        let (index, branch, status) = handle.await.context("Branch probe task panicked")?;
        slots[index] = Some(BuildResult {
            branch,
            status: status?,
        });
    }

    // Every index was filled exactly once above.
    Ok(slots.into_iter().flatten().collect())
}
