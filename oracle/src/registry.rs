//! Explicit oracle registry.
//!
//! Maps a command line's leading word (the configured CLI name) to the
//! oracle that understands it, plus the optional documentation base URL
//! used for keyword link resolution. The registry is an explicit object
//! passed to the pipeline by its caller — there is deliberately no implicit
//! per-process registry keyed by binary path, so tests can inject isolated
//! in-memory fakes without state leaking between them.

use std::collections::HashMap;
use std::sync::Arc;

use url::Url;

use crate::client::Oracle;
use crate::config::AnnotateConfig;
use crate::error::ConfigError;
use crate::process::ProcessOracle;

/// One registered CLI: its oracle and optional documentation base URL.
#[derive(Clone)]
pub struct OracleEntry {
    pub oracle: Arc<dyn Oracle>,
    pub base_url: Option<Url>,
}

/// Registry of oracles addressed by CLI name.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use cmd_annotate_oracle::{OracleRegistry, StaticOracle};
///
/// let mut registry = OracleRegistry::new();
/// registry.insert("git", Arc::new(StaticOracle::new(Vec::new())), None);
/// assert!(registry.get("git").is_some());
/// assert!(registry.get("docker").is_none());
/// ```
#[derive(Default, Clone)]
pub struct OracleRegistry {
    entries: HashMap<String, OracleEntry>,
}

impl OracleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an oracle under `name`.
    pub fn insert(&mut self, name: &str, oracle: Arc<dyn Oracle>, base_url: Option<Url>) {
        self.entries
            .insert(name.to_string(), OracleEntry { oracle, base_url });
    }

    /// Looks up the oracle addressed by a line's leading word.
    pub fn get(&self, name: &str) -> Option<&OracleEntry> {
        self.entries.get(name)
    }

    /// Iterates over `(name, entry)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OracleEntry)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
    }

    /// Number of registered oracles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no oracles.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a registry of process oracles from consumer configuration.
    ///
    /// Fails fast on the structural problems the setup phase must surface:
    /// a binary path that does not resolve or a base URL that does not
    /// parse.
    pub fn from_config(config: &AnnotateConfig) -> Result<Self, ConfigError> {
        let mut registry = Self::new();

        for (name, cli) in &config.clis {
            let oracle = ProcessOracle::new(&cli.path).map_err(|_| {
                ConfigError::MissingOraclePath {
                    name: name.clone(),
                    path: cli.path.clone(),
                }
            })?;

            let base_url = cli
                .base_url
                .as_deref()
                .map(Url::parse)
                .transpose()
                .map_err(|source| ConfigError::InvalidBaseUrl {
                    name: name.clone(),
                    source,
                })?;

            registry.insert(name, Arc::new(oracle), base_url);
        }

        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::StaticOracle;

    #[test]
    fn test_registry_lookup_by_leading_word() {
        let mut registry = OracleRegistry::new();
        registry.insert("git", Arc::new(StaticOracle::new(Vec::new())), None);
        registry.insert(
            "ssh",
            Arc::new(StaticOracle::new(Vec::new())),
            Some(Url::parse("https://docs.example.com/ssh").unwrap()),
        );

        assert_eq!(registry.len(), 2);
        assert!(registry.get("git").unwrap().base_url.is_none());
        assert_eq!(
            registry.get("ssh").unwrap().base_url.as_ref().unwrap().as_str(),
            "https://docs.example.com/ssh"
        );
        assert!(registry.get("docker").is_none());
    }

    #[test]
    fn test_isolated_registries_do_not_share_state() {
        let mut first = OracleRegistry::new();
        first.insert("git", Arc::new(StaticOracle::new(Vec::new())), None);

        let second = OracleRegistry::new();
        assert!(second.is_empty());
        assert!(second.get("git").is_none());
        assert!(first.get("git").is_some());
    }
}
