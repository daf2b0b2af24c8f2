//! # Configuration
//!
//! Layered configuration: built-in defaults, then an optional TOML file,
//! then `UINJKT_API__*` environment variables, then CLI overrides.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Prefix for environment variable overrides, e.g. `UINJKT_API__SERVER__PORT`
pub const ENV_PREFIX: &str = "UINJKT_API";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub repository: RepositoryConfig,
    pub fetch: FetchConfig,
    pub search: SearchConfig,
    pub server: ServerConfig,
}

/// Location of the upstream DSpace site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Scheme and host of the repository, e.g. `https://repository.uinjkt.ac.id`
    pub base_url: String,
    /// Path of the landing page carrying the featured carousel
    pub landing_path: String,
    /// Path prefix under which record handles live
    pub handle_path: String,
    /// Path of the simple-search page
    pub search_path: String,
    /// Results per search page, fixed upstream at 10
    pub items_per_page: u32,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://repository.uinjkt.ac.id".to_string(),
            landing_path: "/dspace/".to_string(),
            handle_path: "/dspace/handle/123456789/".to_string(),
            search_path: "/dspace/simple-search".to_string(),
            items_per_page: 10,
        }
    }
}

/// Which fetch strategy backs the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FetchStrategy {
    /// Plain HTTP GET and HTML parse
    #[default]
    Static,
    /// Headless Chromium render, requires the `browser` feature
    Rendered,
}

/// Fetch strategy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub strategy: FetchStrategy,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    /// Upper bound on each independent element wait in the rendered strategy
    pub element_wait_ms: u64,
    /// Chromium binary to launch; auto-detected when unset
    pub browser_executable: Option<PathBuf>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            strategy: FetchStrategy::Static,
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: concat!("uinjkt-repository-api/", env!("CARGO_PKG_VERSION")).to_string(),
            element_wait_ms: 1000,
            browser_executable: None,
        }
    }
}

impl FetchConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    #[must_use]
    pub const fn element_wait(&self) -> Duration {
        Duration::from_millis(self.element_wait_ms)
    }
}

/// What to do when the caller asks for a page past the last one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeyondLastPagePolicy {
    /// Return the rendered page and flag the condition in the message
    #[default]
    Soft,
    /// Fail the request as a bad request
    Strict,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub beyond_last_page: BeyondLastPagePolicy,
}

/// HTTP boundary settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Budget for one engine operation, including the upstream fetch
    pub request_timeout_secs: u64,
    pub graceful_shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            request_timeout_secs: 60,
            graceful_shutdown_timeout_secs: 5,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Command-line overrides applied on top of file and environment sources
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub strategy: Option<FetchStrategy>,
    pub base_url: Option<String>,
}

impl Config {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default())?;
        let mut builder = config::Config::builder().add_source(defaults);

        match path {
            Some(path) => {
                debug!("Loading configuration file {}", path.display());
                builder = builder.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                if let Some(default_path) = Self::default_path() {
                    debug!("Looking for configuration file {}", default_path.display());
                    builder = builder.add_source(config::File::from(default_path).required(false));
                }
            }
        }

        let config: Self = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        info!(
            base_url = %config.repository.base_url,
            strategy = ?config.fetch.strategy,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// `<config dir>/uinjkt-repository-api/config.toml`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("uinjkt-repository-api").join("config.toml"))
    }

    /// Apply CLI overrides and re-validate
    pub fn apply_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self> {
        if let Some(host) = &overrides.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(strategy) = overrides.strategy {
            self.fetch.strategy = strategy;
        }
        if let Some(base_url) = &overrides.base_url {
            self.repository.base_url.clone_from(base_url);
        }
        self.validate()?;
        Ok(self)
    }

    /// Parsed repository base URL
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.repository.base_url).map_err(|e| Error::InvalidInput {
            field: "repository.base_url".to_string(),
            reason: e.to_string(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        let base = self.base_url()?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid("repository.base_url", "scheme must be http or https"));
        }
        if base.cannot_be_a_base() || base.host_str().is_none() {
            return Err(invalid("repository.base_url", "must be an absolute URL with a host"));
        }

        for (field, path) in [
            ("repository.landing_path", &self.repository.landing_path),
            ("repository.search_path", &self.repository.search_path),
        ] {
            if !path.starts_with('/') {
                return Err(invalid(field, "must start with '/'"));
            }
        }

        let handle_path = &self.repository.handle_path;
        if handle_path.len() < 2 || !handle_path.starts_with('/') || !handle_path.ends_with('/') {
            return Err(invalid("repository.handle_path", "must start and end with '/'"));
        }

        if self.repository.items_per_page == 0 {
            return Err(invalid("repository.items_per_page", "must be greater than 0"));
        }
        if self.fetch.timeout_secs == 0 || self.fetch.connect_timeout_secs == 0 {
            return Err(invalid("fetch.timeout_secs", "timeouts must be greater than 0"));
        }
        if self.fetch.element_wait_ms == 0 {
            return Err(invalid("fetch.element_wait_ms", "must be greater than 0"));
        }
        if self.server.port == 0 {
            return Err(invalid("server.port", "must be greater than 0"));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(invalid("server.request_timeout_secs", "must be greater than 0"));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> Error {
    Error::InvalidInput {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
