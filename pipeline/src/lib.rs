//! Annotation pipeline over tokenized command lines.
//!
//! Stitches the pieces together: tokenize a line, address a description
//! oracle by the leading word, remap the oracle's argument-relative
//! annotations to line byte offsets, and splice renderer markup through the
//! compositor. Blocks of lines annotate in parallel with input order
//! preserved.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use cmd_annotate_core::{
//!     Annotation, AnnotationKind, ArgCursor, CommandSpec, DescribeResult,
//! };
//! use cmd_annotate_oracle::{OracleRegistry, StaticOracle};
//! use cmd_annotate_pipeline::{HtmlRenderer, annotate_line};
//!
//! let oracle = StaticOracle::new(vec![CommandSpec::new(["status"])]).with_response(
//!     ["status"],
//!     DescribeResult {
//!         command: vec!["status".to_string()],
//!         tokens: Vec::new(),
//!         annotations: vec![Annotation {
//!             kind: AnnotationKind::Keyword,
//!             start: ArgCursor { arg_index: 0, offset: 0 },
//!             end: ArgCursor { arg_index: 0, offset: 6 },
//!             description: None,
//!         }],
//!     },
//! );
//!
//! let mut registry = OracleRegistry::new();
//! registry.insert("git", Arc::new(oracle), None);
//!
//! let out = annotate_line("git status", &registry, &HtmlRenderer);
//! assert_eq!(
//!     out,
//!     r#"git <span style="color: var(--cli-color-block-keyword);">status</span>"#,
//! );
//! ```

mod annotate;
mod block;
mod catalog;
mod markup;

pub use annotate::{LineOutcome, annotate_line, annotate_line_with_outcome};
pub use block::{annotate_block, annotate_text};
pub use catalog::{CatalogEntry, catalog_entries};
pub use markup::{HtmlRenderer, MarkupRenderer, ResolvedSpan};
