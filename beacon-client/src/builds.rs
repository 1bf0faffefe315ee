//! CI service client
//!
//! Reads the plain-text build status endpoint and builds badge/job URLs
//! for the rendered page. Branch names inside a CI job path have to be
//! URL-escaped twice: the CI router decodes the path once before the job
//! lookup decodes it again.

use beacon_core::domain::build::BuildStatus;
use reqwest::Client;
use tracing::debug;

use crate::error::Result;

/// Client for the CI service
#[derive(Debug, Clone)]
pub struct CiClient {
    /// Base URL of the CI service
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl CiClient {
    /// Create a new CI client
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new CI client with a custom HTTP client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the CI service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch and classify the build status of one branch
    ///
    /// A non-success HTTP status means the job has never run and is
    /// reported as [`BuildStatus::NotRun`]; only transport failures are
    /// errors.
    pub async fn branch_status(&self, org: &str, repo: &str, branch: &str) -> Result<BuildStatus> {
        let url = self.status_url(org, repo, branch);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!("CI returned {} for {}/{}, treating as not run", status, repo, branch);
            return Ok(BuildStatus::NotRun);
        }

        let body = response.text().await?;
        Ok(BuildStatus::classify(&body))
    }

    /// URL of the plain-text status endpoint for one branch
    pub fn status_url(&self, org: &str, repo: &str, branch: &str) -> String {
        format!(
            "{}/buildStatus/text?job={}/{}/{}",
            self.base_url,
            org,
            repo,
            double_escape(branch)
        )
    }

    /// URL of the CI job page for one branch, used as the badge link
    pub fn job_url(&self, org: &str, repo: &str, branch: &str) -> String {
        format!(
            "{}/job/{}/job/{}/job/{}/",
            self.base_url,
            org,
            repo,
            double_escape(branch)
        )
    }
}

/// URL-escapes a branch name twice for embedding in a CI job path.
///
/// "support/0.2.x" becomes "support%252F0.2.x".
pub fn double_escape(branch: &str) -> String {
    let once = urlencoding::encode(branch).into_owned();
    urlencoding::encode(&once).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_escape_slash() {
        assert_eq!(double_escape("support/0.2.x"), "support%252F0.2.x");
        assert_eq!(double_escape("support/0.1.x"), "support%252F0.1.x");
    }

    #[test]
    fn test_double_escape_plain_branch_unchanged() {
        assert_eq!(double_escape("master"), "master");
    }

    #[test]
    fn test_status_url() {
        let ci = CiClient::new("https://ci.example.com/");
        assert_eq!(
            ci.status_url("dcos-terraform", "terraform-aws-cluster", "support/0.2.x"),
            "https://ci.example.com/buildStatus/text?job=dcos-terraform/terraform-aws-cluster/support%252F0.2.x"
        );
    }

    #[test]
    fn test_job_url() {
        let ci = CiClient::new("https://ci.example.com");
        assert_eq!(
            ci.job_url("dcos-terraform", "terraform-aws-cluster", "master"),
            "https://ci.example.com/job/dcos-terraform/job/terraform-aws-cluster/job/master/"
        );
    }
}
