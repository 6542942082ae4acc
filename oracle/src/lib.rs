//! Description-oracle clients for command-line annotation.
//!
//! An oracle is the external component that, given a concrete CLI
//! invocation, reports which parts of it correspond to which grammar
//! elements. This crate provides:
//!
//! - [`Oracle`] — the two-operation capability trait (`list_commands`,
//!   `describe`).
//! - [`ProcessOracle`] — subprocess transport wrapping an introspection
//!   binary, with a lazily-cached, invalidatable spec set.
//! - [`StaticOracle`] — pure in-memory implementation for tests and
//!   embedders.
//! - [`OracleRegistry`] — explicit name-to-oracle mapping handed to the
//!   annotation pipeline.
//! - [`AnnotateConfig`]/[`load_config`] — the YAML consumer configuration.
//! - [`watch_oracle`] — binary-change watching that drives cache
//!   invalidation in long-lived watch mode.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cmd_annotate_core::CommandSpec;
//! use cmd_annotate_oracle::{Oracle, OracleRegistry, StaticOracle};
//!
//! let oracle = StaticOracle::new(vec![CommandSpec::new(["commit"])]);
//! let mut registry = OracleRegistry::new();
//! registry.insert("git", Arc::new(oracle), None);
//!
//! let entry = registry.get("git").unwrap();
//! assert_eq!(entry.oracle.list_commands().unwrap().len(), 1);
//! ```

mod client;
mod config;
mod error;
mod process;
mod registry;
mod watch;

pub use client::{Oracle, StaticOracle};
pub use config::{AnnotateConfig, CliConfig, load_config};
pub use error::{ConfigError, OracleError};
pub use process::ProcessOracle;
pub use registry::{OracleEntry, OracleRegistry};
pub use watch::{WatcherHandle, watch_oracle};
