//! The oracle capability interface and its in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use cmd_annotate_core::{CommandSpec, DescribeResult};

use crate::error::OracleError;

/// A description oracle: something that understands one CLI's grammar.
///
/// Exactly two operations, per the capability shape of the system: enumerate
/// the command specifications the CLI defines, and describe one concrete
/// argument vector. The transport (spawned process, socket, in-process
/// table) is an implementation detail behind this trait, which is what lets
/// tests run against a pure in-memory [`StaticOracle`].
///
/// Implementations must be safe to call concurrently: no `describe` call may
/// observe another call's in-flight argument vector.
pub trait Oracle: Send + Sync {
    /// Enumerates the command specifications the CLI defines.
    ///
    /// Results may be cached; the returned `Arc` snapshot is immutable, so
    /// a concurrent invalidation can never produce a torn read.
    fn list_commands(&self) -> Result<Arc<Vec<CommandSpec>>, OracleError>;

    /// Describes a concrete argument vector.
    ///
    /// Returns `Ok(None)` when the vector does not resolve to any known
    /// command; callers treat the line as plain text.
    fn describe(&self, argv: &[String]) -> Result<Option<DescribeResult>, OracleError>;
}

/// In-memory oracle backed by fixed responses.
///
/// Used by tests (and any embedder that already has specs in hand) in place
/// of a subprocess transport.
///
/// # Examples
///
/// ```
/// use cmd_annotate_core::{CommandSpec, DescribeResult};
/// use cmd_annotate_oracle::{Oracle, StaticOracle};
///
/// let oracle = StaticOracle::new(vec![CommandSpec::new(["commit"])])
///     .with_response(
///         ["commit"],
///         DescribeResult {
///             command: vec!["commit".to_string()],
///             tokens: Vec::new(),
///             annotations: Vec::new(),
///         },
///     );
///
/// let specs = oracle.list_commands().unwrap();
/// assert_eq!(specs.len(), 1);
///
/// let argv = vec!["commit".to_string()];
/// assert!(oracle.describe(&argv).unwrap().is_some());
/// assert!(oracle.describe(&["unknown".to_string()]).unwrap().is_none());
/// ```
#[derive(Debug, Default)]
pub struct StaticOracle {
    specs: Arc<Vec<CommandSpec>>,
    responses: HashMap<Vec<String>, DescribeResult>,
}

impl StaticOracle {
    /// Creates an oracle serving the given specs and no describe responses.
    pub fn new(specs: Vec<CommandSpec>) -> Self {
        Self {
            specs: Arc::new(specs),
            responses: HashMap::new(),
        }
    }

    /// Registers the describe response for one argument vector.
    pub fn with_response<A, S>(mut self, argv: A, result: DescribeResult) -> Self
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.responses
            .insert(argv.into_iter().map(Into::into).collect(), result);
        self
    }
}

impl Oracle for StaticOracle {
    fn list_commands(&self) -> Result<Arc<Vec<CommandSpec>>, OracleError> {
        Ok(Arc::clone(&self.specs))
    }

    fn describe(&self, argv: &[String]) -> Result<Option<DescribeResult>, OracleError> {
        Ok(self.responses.get(argv).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmd_annotate_core::{Annotation, AnnotationKind, ArgCursor};

    #[test]
    fn test_static_oracle_unknown_vector_is_none() {
        let oracle = StaticOracle::new(Vec::new());
        let argv = vec!["nope".to_string()];
        assert!(oracle.describe(&argv).unwrap().is_none());
    }

    #[test]
    fn test_static_oracle_returns_registered_response() {
        let response = DescribeResult {
            command: vec!["commit".to_string()],
            tokens: Vec::new(),
            annotations: vec![Annotation {
                kind: AnnotationKind::Keyword,
                start: ArgCursor {
                    arg_index: 0,
                    offset: 0,
                },
                end: ArgCursor {
                    arg_index: 0,
                    offset: 6,
                },
                description: None,
            }],
        };
        let oracle = StaticOracle::new(Vec::new()).with_response(["commit"], response.clone());
        let argv = vec!["commit".to_string()];
        assert_eq!(oracle.describe(&argv).unwrap(), Some(response));
    }

    #[test]
    fn test_list_commands_snapshot_is_shared() {
        let oracle = StaticOracle::new(vec![CommandSpec::new(["status"])]);
        let first = oracle.list_commands().unwrap();
        let second = oracle.list_commands().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
