//! Beacon HTTP Clients
//!
//! Typed HTTP clients for the two external services the dashboard reads:
//! the source-control hosting API (repository listings) and the CI
//! service (per-branch plain-text build status).
//!
//! # Example
//!
//! ```no_run
//! use beacon_client::{CiClient, SourceControlClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let source = SourceControlClient::new("https://api.github.com", "token");
//!     let repos = source.list_repositories("dcos-terraform").await?;
//!
//!     let ci = CiClient::new("https://ci.example.com");
//!     let status = ci
//!         .branch_status("dcos-terraform", &repos[0].name, "master")
//!         .await?;
//!     println!("master is {}", status);
//!     Ok(())
//! }
//! ```

pub mod error;
mod builds;
mod repos;

pub use builds::{CiClient, double_escape};
pub use error::{ClientError, Result};
pub use repos::SourceControlClient;
