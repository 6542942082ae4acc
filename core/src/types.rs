//! Wire-facing type definitions for the oracle protocol.
//!
//! This module defines the data model exchanged with a description oracle:
//! [`CommandSpec`] (the static grammar of one command), [`DescribeResult`]
//! (the oracle's answer for one concrete argument vector), and the
//! [`Token`]/[`Annotation`] spans inside it. All types serialize with
//! [`serde`] using camelCase field names and lowercase tag values so they
//! round-trip through the oracle's JSON protocol unchanged.

use serde::{Deserialize, Serialize};

/// One usage example attached to a [`CommandSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// The example command line, verbatim.
    pub command: String,
    /// Optional human-readable explanation.
    pub description: Option<String>,
}

/// One grammar element of a [`CommandSpec`]: a positional rule or an option.
///
/// Closed sum type; consumers are expected to match exhaustively so a new
/// variant cannot be silently dropped.
///
/// On the wire the variant is tagged by `type` (`"positional"` or
/// `"option"`), with positional rules carrying a secondary `positionalType`
/// tag (`"keyword"` or `"dynamic"`).
///
/// # Examples
///
/// ```
/// use cmd_annotate_core::Component;
///
/// let json = r#"{"type":"positional","positionalType":"keyword","expected":"commit"}"#;
/// let component: Component = serde_json::from_str(json).unwrap();
/// assert!(matches!(component, Component::Positional(_)));
/// assert!(!component.is_option());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Component {
    /// A positional rule (keyword literal or free-form run).
    Positional(Positional),
    /// A named option, possibly taking values.
    Option(OptionComponent),
}

impl Component {
    /// Returns `true` for [`Component::Option`].
    pub fn is_option(&self) -> bool {
        match self {
            Component::Positional(_) => false,
            Component::Option(_) => true,
        }
    }
}

/// Positional grammar element, tagged by `positionalType` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "positionalType", rename_all = "lowercase")]
pub enum Positional {
    /// Matches exactly one fixed literal token.
    #[serde(rename_all = "camelCase")]
    Keyword {
        /// The literal token this rule matches.
        expected: String,
    },
    /// Matches a run of free-form tokens.
    #[serde(rename_all = "camelCase")]
    Dynamic {
        /// Display name of the positional (e.g. `host`, `pathspec`).
        name: String,
        /// Description from the command definition.
        description: Option<String>,
        /// Minimum number of tokens consumed.
        min_len: u32,
        /// Additional tokens beyond `min_len`; `None` means unbounded.
        extra_len: Option<u32>,
        /// Whether the run may appear before the command path.
        is_prefix: bool,
        /// Whether the rule proxies all remaining tokens through.
        is_proxy: bool,
    },
}

/// A named option grammar element (`-p`, `--message`, ...).
///
/// # Examples
///
/// ```
/// use cmd_annotate_core::OptionComponent;
///
/// let opt = OptionComponent::flag("--verbose").with_alias("-v");
/// assert!(opt.matches("-v"));
/// assert!(opt.matches("--verbose"));
/// assert!(!opt.matches("--quiet"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionComponent {
    /// Canonical name (e.g. `--message`).
    pub primary_name: String,
    /// Alternative spellings (e.g. `-m`).
    pub aliases: Vec<String>,
    /// Description from the command definition.
    pub description: Option<String>,
    /// Minimum number of values the option consumes.
    pub min_len: u32,
    /// Additional values beyond `min_len`; `None` means unbounded.
    pub extra_len: Option<u32>,
    /// Whether `--opt=value` binding syntax is accepted.
    pub allow_binding: bool,
    /// Whether the option can be used as a bare boolean.
    pub allow_boolean: bool,
    /// Hidden from generated documentation.
    pub is_hidden: bool,
    /// Must be present for the command to resolve.
    pub is_required: bool,
}

impl OptionComponent {
    /// Creates a boolean flag taking no values.
    pub fn flag(primary_name: &str) -> Self {
        Self {
            primary_name: primary_name.to_string(),
            aliases: Vec::new(),
            description: None,
            min_len: 0,
            extra_len: Some(0),
            allow_binding: false,
            allow_boolean: true,
            is_hidden: false,
            is_required: false,
        }
    }

    /// Creates an option consuming exactly `arity` value tokens.
    pub fn with_arity(primary_name: &str, arity: u32) -> Self {
        Self {
            primary_name: primary_name.to_string(),
            aliases: Vec::new(),
            description: None,
            min_len: arity,
            extra_len: Some(0),
            allow_binding: arity == 1,
            allow_boolean: false,
            is_hidden: false,
            is_required: false,
        }
    }

    /// Adds an alias spelling.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Checks whether `name` is the primary name or any alias.
    pub fn matches(&self, name: &str) -> bool {
        self.primary_name == name || self.aliases.iter().any(|alias| alias == name)
    }
}

/// Static description of one CLI command, as enumerated by the oracle.
///
/// Cached per oracle connection and invalidated on an explicit "updated"
/// signal; never mutated in place.
///
/// # Examples
///
/// ```
/// use cmd_annotate_core::{CommandSpec, Component, OptionComponent, Positional};
///
/// let spec = CommandSpec::new(["commit"])
///     .with_component(Component::Option(
///         OptionComponent::with_arity("--message", 1).with_alias("-m"),
///     ));
/// assert_eq!(spec.primary_path, vec!["commit"]);
/// assert_eq!(spec.components.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSpec {
    /// Primary command path (e.g. `["remote", "add"]`).
    pub primary_path: Vec<String>,
    /// Alternative command paths.
    pub aliases: Vec<Vec<String>>,
    /// Documentation category, if any.
    pub category: Option<String>,
    /// Short description.
    pub description: Option<String>,
    /// Long-form details.
    pub details: Option<String>,
    /// Usage examples.
    pub examples: Vec<Example>,
    /// Grammar elements in declaration order.
    pub components: Vec<Component>,
    /// Indices into `components` of options that must be present.
    ///
    /// Invariant: every index must reference a [`Component::Option`]; see
    /// [`validate_spec`](crate::validate_spec).
    pub required_options: Vec<usize>,
}

impl CommandSpec {
    /// Creates a spec with the given primary path and no components.
    pub fn new<P, S>(primary_path: P) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            primary_path: primary_path.into_iter().map(Into::into).collect(),
            aliases: Vec::new(),
            category: None,
            description: None,
            details: None,
            examples: Vec::new(),
            components: Vec::new(),
            required_options: Vec::new(),
        }
    }

    /// Adds a grammar component.
    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Adds a short description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Low-level classification of a slice of one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// A command-path keyword.
    Keyword,
    /// An option name.
    Option,
    /// A value consumed by an option.
    Value,
    /// A positional argument.
    Positional,
    /// Unclassified text.
    Unknown,
}

/// Byte range within one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    pub start: usize,
    pub end: usize,
}

/// Classification of one slice of one argument, independent of any
/// human-facing description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Kind of grammar element this slice belongs to.
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Index of the argument this token lives in.
    pub arg_index: usize,
    /// Byte range within that argument.
    pub slice: Slice,
    /// Index of the matching [`Component`], when known.
    pub component_id: Option<usize>,
}

/// Semantic span kinds exposed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    /// Command-path keyword; the only kind eligible for link resolution.
    Keyword,
    /// Option name plus any bound values.
    Option,
    /// Positional argument run.
    Positional,
}

impl AnnotationKind {
    /// Lowercase label as used in markup (CSS variable suffixes).
    pub fn label(&self) -> &'static str {
        match self {
            AnnotationKind::Keyword => "keyword",
            AnnotationKind::Option => "option",
            AnnotationKind::Positional => "positional",
        }
    }
}

/// Argument-relative position: which argument, plus a byte offset inside it.
///
/// Ordered lexicographically over `(arg_index, offset)` so span bounds can
/// be compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgCursor {
    pub arg_index: usize,
    pub offset: usize,
}

/// Human-facing semantic span over one or more arguments.
///
/// Coordinates are argument-relative; the pipeline remaps them to line byte
/// offsets through the tokenized [`Word`](crate::Word) sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Semantic kind of the span.
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    /// Inclusive start position.
    pub start: ArgCursor,
    /// Exclusive end position.
    pub end: ArgCursor,
    /// Tooltip text, if the command definition provides one.
    pub description: Option<String>,
}

/// Oracle answer for one concrete argument vector.
///
/// The oracle returns JSON `null` instead when the vector does not resolve
/// to any known command; clients surface that as `Option::None` and callers
/// treat the line as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeResult {
    /// Resolved command path (e.g. `["commit"]`).
    pub command: Vec<String>,
    /// Low-level token classification.
    pub tokens: Vec<Token>,
    /// Semantic spans for rendering.
    pub annotations: Vec<Annotation>,
}
