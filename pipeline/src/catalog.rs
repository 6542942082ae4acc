//! Command catalog extraction for documentation collections.
//!
//! Flattens every registered oracle's command list into addressable entries,
//! one per command, for content-collection style consumers (search indexes,
//! reference pages). Hidden components stay in the spec; whether to show
//! them is a rendering decision, not a catalog one.

use cmd_annotate_core::CommandSpec;
use cmd_annotate_oracle::OracleRegistry;
use serde::Serialize;
use tracing::warn;

/// One catalog entry: a single command of a single registered CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Stable identifier: the CLI name and the primary path joined by `/`
    /// (e.g. `git/remote/add`).
    pub id: String,
    /// The registered CLI name the command belongs to.
    pub binary_name: String,
    /// The full command specification as the oracle reported it.
    pub spec: CommandSpec,
}

/// Collects catalog entries from every oracle in the registry.
///
/// Entries are sorted by id so output is stable across runs. An oracle that
/// fails to enumerate is logged and skipped; one broken binary must not
/// empty the whole catalog.
pub fn catalog_entries(registry: &OracleRegistry) -> Vec<CatalogEntry> {
    let mut entries = Vec::new();

    for (name, entry) in registry.iter() {
        let specs = match entry.oracle.list_commands() {
            Ok(specs) => specs,
            Err(error) => {
                warn!(cli = %name, %error, "skipping catalog entries for unreachable oracle");
                continue;
            }
        };

        for spec in specs.iter() {
            entries.push(CatalogEntry {
                id: format!("{name}/{}", spec.primary_path.join("/")),
                binary_name: name.to_string(),
                spec: spec.clone(),
            });
        }
    }

    entries.sort_by(|a, b| a.id.cmp(&b.id));
    entries
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cmd_annotate_oracle::StaticOracle;

    use super::*;

    #[test]
    fn test_entries_are_sorted_by_id() {
        let mut registry = OracleRegistry::new();
        registry.insert(
            "git",
            Arc::new(StaticOracle::new(vec![
                CommandSpec::new(["status"]),
                CommandSpec::new(["commit"]),
                CommandSpec::new(["remote", "add"]),
            ])),
            None,
        );

        let ids: Vec<String> = catalog_entries(&registry)
            .into_iter()
            .map(|entry| entry.id)
            .collect();
        assert_eq!(ids, vec!["git/commit", "git/remote/add", "git/status"]);
    }

    #[test]
    fn test_entry_shape() {
        let mut registry = OracleRegistry::new();
        registry.insert(
            "git",
            Arc::new(StaticOracle::new(vec![
                CommandSpec::new(["commit"]).with_description("Record changes."),
            ])),
            None,
        );

        let entries = catalog_entries(&registry);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "git/commit");
        assert_eq!(entries[0].binary_name, "git");
        assert_eq!(entries[0].spec.description.as_deref(), Some("Record changes."));

        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["binaryName"], "git");
        assert_eq!(json["spec"]["primaryPath"][0], "commit");
    }
}
