//! Content renderer
//!
//! Walks the current bucket snapshot, probes every repository, and
//! publishes the finished HTML page. The page is built as markdown
//! first (one section per provider, one table row per repository, one
//! column per branch) and converted to HTML in one pass.

use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::Result;
use beacon_core::domain::repo::Bucket;
use chrono::{DateTime, Utc};
use pulldown_cmark::{Options, Parser, html};
use tracing::{debug, info};

use crate::service::probe::{StatusSource, probe_repository};
use crate::state::Dashboard;
use beacon_client::CiClient;

/// Fixed page title
const PAGE_TITLE: &str = "CI Status";

/// Renders the dashboard page from the current bucket snapshot
pub struct Renderer {
    org: String,
    branches: Vec<String>,
    source: Arc<dyn StatusSource>,
    links: CiClient,
    dashboard: Arc<Dashboard>,
}

impl Renderer {
    /// Creates a renderer
    pub fn new(
        org: impl Into<String>,
        branches: Vec<String>,
        source: Arc<dyn StatusSource>,
        links: CiClient,
        dashboard: Arc<Dashboard>,
    ) -> Self {
        Self {
            org: org.into(),
            branches,
            source,
            links,
            dashboard,
        }
    }

    /// Runs one render pass: probe, build, publish.
    ///
    /// Reads whatever bucket snapshot is currently published; an
    /// in-flight fetch pass does not block rendering.
    pub async fn render(&self) -> Result<()> {
        let buckets = self.dashboard.buckets().await;
        let markdown = self.build_markdown(&buckets).await?;
        let page = page_html(&markdown_to_html(&markdown), Utc::now());

        let repositories: usize = buckets.iter().map(|b| b.repositories.len()).sum();
        info!(
            "Rendered {} provider sections, {} repositories",
            buckets.len(),
            repositories
        );

        self.dashboard.publish_page(page).await;
        Ok(())
    }

    /// Builds the markdown document for all buckets
    async fn build_markdown(&self, buckets: &[Bucket]) -> Result<String> {
        let mut md = String::new();
        let _ = writeln!(md, "# {} CI status", self.org);

        for bucket in buckets {
            self.push_bucket_section(&mut md, bucket).await?;
        }

        Ok(md)
    }

    /// Emits one provider section: heading, table header, one row per
    /// repository. An empty bucket keeps the heading and header.
    async fn push_bucket_section(&self, md: &mut String, bucket: &Bucket) -> Result<()> {
        let _ = writeln!(md, "\n## {}\n", bucket.provider);

        let _ = write!(md, "| {} |", bucket.provider);
        for branch in &self.branches {
            let _ = write!(md, " {} |", branch);
        }
        md.push('\n');

        let _ = write!(md, "| --- |");
        for _ in &self.branches {
            let _ = write!(md, " --- |");
        }
        md.push('\n');

        for repo in &bucket.repositories {
            debug!("Probing {} branches of {}", self.branches.len(), repo.name);

            let results =
                probe_repository(Arc::clone(&self.source), &repo.name, &self.branches).await?;

            let _ = write!(md, "| {} |", repo.name);
            for result in &results {
                let badge = format!(
                    "[![{}](/static/icons/{})]({})",
                    result.status.label(),
                    result.status.icon(),
                    self.links.job_url(&self.org, &repo.name, &result.branch)
                );
                let _ = write!(md, " {} |", badge);
            }
            md.push('\n');
        }

        Ok(())
    }
}

/// Converts the markdown document to an HTML fragment
fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Wraps the rendered fragment into a self-contained page
fn page_html(body: &str, generated_at: DateTime<Utc>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<meta name="generator" content="beacon-server {version}">
<link rel="stylesheet" href="/static/style.css">
<link rel="icon" href="/favicon.ico">
</head>
<body>
{body}<footer><p>Generated at {generated}</p></footer>
</body>
</html>
"#,
        title = PAGE_TITLE,
        version = env!("CARGO_PKG_VERSION"),
        body = body,
        generated = generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}
