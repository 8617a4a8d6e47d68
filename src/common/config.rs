//! Configuration for infotree
//!
//! Values come from, in increasing priority: built-in defaults, a TOML file
//! (`--config`, or `infotree.toml` in the working directory when present),
//! `INFOTREE_*` environment variables, and finally command-line flags which
//! the binary applies on top of the loaded [`Config`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::common::utils::parse_duration;
use crate::common::{Error, Result};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "infotree";

/// Prefix for environment overrides, e.g. `INFOTREE_AUTH`.
pub const ENV_PREFIX: &str = "INFOTREE";

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Shared credential sent with `AUTH` to every node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,

    /// Seed file; stdin is read when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seeds: Option<PathBuf>,

    /// Per-fetch timeout, e.g. "500ms" or "5s"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// What to do when a node cannot be queried
    #[serde(default)]
    pub on_failure: FailurePolicy,

    /// Logging level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth: None,
            seeds: None,
            timeout: None,
            on_failure: FailurePolicy::default(),
            log_level: default_log_level(),
        }
    }
}

/// Failure handling for per-node fetches during discovery and walks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Any node failure aborts the whole command.
    #[default]
    Abort,
    /// Failed nodes are kept in the output and marked unreachable.
    Inline,
}

/// Command-line values that take priority over file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub auth: Option<String>,
    pub seeds: Option<PathBuf>,
    pub timeout: Option<String>,
    pub keep_going: bool,
}

impl Config {
    /// Load configuration from `path` (required to exist) or from the
    /// optional default file, layered with environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Apply command-line overrides; unset flags leave values untouched.
    pub fn apply(&mut self, overrides: Overrides) {
        if overrides.auth.is_some() {
            self.auth = overrides.auth;
        }
        if overrides.seeds.is_some() {
            self.seeds = overrides.seeds;
        }
        if overrides.timeout.is_some() {
            self.timeout = overrides.timeout;
        }
        if overrides.keep_going {
            self.on_failure = FailurePolicy::Inline;
        }
    }

    /// Parsed fetch timeout, if one is configured. Zero is rejected since
    /// it would fail every fetch.
    pub fn fetch_timeout(&self) -> Result<Option<Duration>> {
        match self.timeout.as_deref().map(parse_duration).transpose()? {
            Some(timeout) if timeout.is_zero() => Err(Error::InvalidConfig(
                "timeout must be greater than zero".into(),
            )),
            timeout => Ok(timeout),
        }
    }
}
