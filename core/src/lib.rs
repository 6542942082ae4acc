//! Core types and algorithms for command-line annotation.
//!
//! This crate defines the foundational pieces for rendering shell command
//! lines in documentation as semantically annotated text:
//!
//! - [`CommandSpec`], [`Component`], [`DescribeResult`], [`Token`],
//!   [`Annotation`] — the data model exchanged with a description oracle.
//! - [`tokenize`] — splits a line into positionally-addressed [`Word`]s,
//!   respecting quoted runs.
//! - [`compose`] — splices [`Directive`] markup into a line while keeping
//!   every other span's byte offsets intact.
//!
//! Validation ([`validate_spec`], [`validate_describe`]) catches structural
//! contract violations in oracle responses before they reach the
//! compositor.
//!
//! # Example
//!
//! ```
//! use cmd_annotate_core::{Directive, compose, tokenize};
//!
//! let line = "ssh -p 80 localhost";
//! let words = tokenize(line);
//! assert_eq!(words[0].text, "ssh");
//!
//! // Wrap the keyword word using its recorded byte offset.
//! let out = compose(
//!     line,
//!     vec![Directive {
//!         start: words[0].byte_offset,
//!         end: words[0].byte_offset + words[0].text.len(),
//!         prefix: "<span>".to_string(),
//!         suffix: "</span>".to_string(),
//!     }],
//! );
//! assert_eq!(out, "<span>ssh</span> -p 80 localhost");
//! ```

mod compose;
mod types;
mod validate;
mod words;

pub use compose::{Directive, compose};
pub use types::*;
pub use validate::{ValidationError, validate_describe, validate_spec};
pub use words::{Word, tokenize};
