//! Server configuration
//!
//! All options can be given as CLI flags or environment variables.
//! Listen port, credential, organization, and the CI base URL are
//! required; everything else has defaults tuned for the public hosting
//! API and a small organization.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// CI status dashboard for an organization's repositories
#[derive(Debug, Clone, Parser)]
#[command(name = "beacon-server")]
#[command(about = "Serves a CI status dashboard for an organization's repositories")]
pub struct Config {
    /// Port the HTTP server listens on
    #[arg(short = 'p', long, env = "LISTEN_PORT")]
    pub listen: u16,

    /// Bearer credential for the source-control hosting API
    #[arg(long, env = "SOURCE_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Organization whose repositories are tracked
    #[arg(long, env = "ORGANIZATION")]
    pub org: String,

    /// Base URL of the CI service
    #[arg(long, env = "CI_URL")]
    pub ci_url: String,

    /// Base URL of the source-control hosting API
    #[arg(long, env = "SOURCE_API_URL", default_value = "https://api.github.com")]
    pub source_api_url: String,

    /// Repository name prefix for provider matching
    #[arg(long, env = "REPO_PREFIX", default_value = "terraform-")]
    pub prefix: String,

    /// Provider keys used to bucket repositories, in display order
    #[arg(
        long,
        env = "PROVIDERS",
        value_delimiter = ',',
        default_value = "aws,azurerm,gcp"
    )]
    pub providers: Vec<String>,

    /// Branches probed for build status, in display order
    #[arg(
        long,
        env = "BRANCHES",
        value_delimiter = ',',
        default_value = "master,support/0.2.x,support/0.1.x"
    )]
    pub branches: Vec<String>,

    /// Seconds between repository listing refreshes
    #[arg(long, env = "ORG_REFRESH_SECS", default_value_t = 3600)]
    pub org_refresh_secs: u64,

    /// Seconds between build status refreshes
    #[arg(long, env = "STATUS_REFRESH_SECS", default_value_t = 180)]
    pub status_refresh_secs: u64,

    /// Seconds the server waits for in-flight requests on shutdown
    #[arg(long, env = "SHUTDOWN_TIMEOUT_SECS", default_value_t = 15)]
    pub shutdown_timeout_secs: u64,

    /// Directory served under /static
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Be verbose (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// Interval between repository listing refreshes
    pub fn org_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.org_refresh_secs)
    }

    /// Interval between build status refreshes
    pub fn status_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.status_refresh_secs)
    }

    /// Grace period for in-flight requests during shutdown
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    /// Default tracing filter for the configured verbosity
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "beacon_server=info,tower_http=info",
            1 => "beacon_server=debug,beacon_client=debug,tower_http=debug",
            _ => "beacon_server=trace,beacon_client=trace,tower_http=trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 9] = [
        "beacon-server",
        "--listen",
        "8080",
        "--token",
        "tok",
        "--org",
        "dcos-terraform",
        "--ci-url",
        "https://ci.example.com",
    ];

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(REQUIRED).unwrap();
        assert_eq!(config.listen, 8080);
        assert_eq!(config.prefix, "terraform-");
        assert_eq!(config.providers, vec!["aws", "azurerm", "gcp"]);
        assert_eq!(
            config.branches,
            vec!["master", "support/0.2.x", "support/0.1.x"]
        );
        assert_eq!(config.org_refresh_interval(), Duration::from_secs(3600));
        assert_eq!(config.status_refresh_interval(), Duration::from_secs(180));
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(15));
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn test_listen_port_is_required() {
        let result = Config::try_parse_from([
            "beacon-server",
            "--token",
            "tok",
            "--org",
            "dcos-terraform",
            "--ci-url",
            "https://ci.example.com",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_branch_list_is_comma_separated() {
        let mut args: Vec<&str> = REQUIRED.to_vec();
        args.extend(["--branches", "main,release/1.x"]);

        let config = Config::try_parse_from(args).unwrap();
        assert_eq!(config.branches, vec!["main", "release/1.x"]);
    }

    #[test]
    fn test_verbosity_raises_log_filter() {
        let config = Config::try_parse_from(REQUIRED).unwrap();
        assert!(config.log_filter().contains("info"));

        let mut args: Vec<&str> = REQUIRED.to_vec();
        args.push("-vv");
        let config = Config::try_parse_from(args).unwrap();
        assert!(config.log_filter().contains("trace"));
    }
}
