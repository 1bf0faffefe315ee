//! Source-control hosting API client

use beacon_core::domain::repo::Repository;
use beacon_core::dto::repo::RepositoryPage;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Repositories requested per listing page. The hosting API caps the
/// page size at 100.
const PER_PAGE: usize = 100;

/// Client for the source-control hosting API
///
/// Lists the repositories of an organization through the paginated
/// search endpoint, authenticated with a bearer credential.
#[derive(Debug, Clone)]
pub struct SourceControlClient {
    /// Base URL of the hosting API (e.g. "https://api.github.com")
    base_url: String,
    /// Bearer credential for the listing endpoint
    token: String,
    /// HTTP client instance
    client: Client,
}

impl SourceControlClient {
    /// Create a new client for the hosting API
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Create a new client with a custom HTTP client
    ///
    /// Allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, token: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    /// Get the base URL of the hosting API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List all repositories of an organization
    ///
    /// Walks every page of the search endpoint and accumulates the
    /// results before returning; a page shorter than the requested page
    /// size marks the end of the listing. Archived repositories are
    /// returned as-is, filtering is the caller's concern.
    pub async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>> {
        let mut repositories = Vec::new();
        let mut page = 1u32;

        loop {
            let batch = self.fetch_page(org, page).await?;
            let fetched = batch.items.len();

            debug!(
                "Listing page {} for {}: {} repositories (total {})",
                page, org, fetched, batch.total_count
            );

            repositories.extend(batch.items.into_iter().map(Repository::from));

            if fetched < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(repositories)
    }

    /// Fetch one page of the repository search results
    async fn fetch_page(&self, org: &str, page: u32) -> Result<RepositoryPage> {
        let url = format!("{}/search/repositories", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", format!("org:{org}")),
                ("order", "desc".to_string()),
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ])
            .bearer_auth(&self.token)
            .header(USER_AGENT, concat!("beacon/", env!("CARGO_PKG_VERSION")))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the
    /// request failed, or deserializes the response body if successful.
    async fn handle_response(&self, response: reqwest::Response) -> Result<RepositoryPage> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
