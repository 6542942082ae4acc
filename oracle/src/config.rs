//! Consumer configuration for annotation runs.
//!
//! Defines the YAML-serializable mapping from CLI name to oracle binary
//! path and optional documentation base URL.
//!
//! # Example YAML
//!
//! ```yaml
//! clis:
//!   git:
//!     path: /usr/local/bin/git-oracle
//!     baseUrl: https://docs.example.com/git
//!   ssh:
//!     path: /usr/local/bin/ssh-oracle
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One configured CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    /// Filesystem path of the oracle binary.
    pub path: PathBuf,
    /// Base URL for keyword links; omitted means keywords carry no links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Top-level annotation configuration.
///
/// `BTreeMap` keeps serialization deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotateConfig {
    /// CLI name (a command line's leading word) to oracle configuration.
    pub clis: BTreeMap<String, CliConfig>,
}

/// Loads configuration from a YAML file.
///
/// # Examples
///
/// ```no_run
/// use cmd_annotate_oracle::load_config;
///
/// let config = load_config("annotate.yaml").unwrap();
/// for (name, cli) in &config.clis {
///     println!("{name} -> {}", cli.path.display());
/// }
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AnnotateConfig, ConfigError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&raw)?)
}
