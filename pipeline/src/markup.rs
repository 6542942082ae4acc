//! Markup rendering for resolved annotation spans.
//!
//! The pipeline resolves oracle annotations into line-relative
//! [`ResolvedSpan`]s; a [`MarkupRenderer`] turns each span into the
//! [`Directive`] the compositor splices. The renderer is the only place the
//! output format lives, so embedders can swap HTML for terminal escapes or
//! anything else without touching the pipeline.

use cmd_annotate_core::{AnnotationKind, Directive};
use url::Url;

/// One annotation span after coordinate remapping and link resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan {
    /// Semantic kind of the span.
    pub kind: AnnotationKind,
    /// Line-relative byte offset of the span start.
    pub start: usize,
    /// Line-relative byte offset of the span end (exclusive).
    pub end: usize,
    /// Tooltip text from the command definition.
    pub description: Option<String>,
    /// Documentation link; only keyword spans ever carry one.
    pub href: Option<Url>,
}

/// Turns resolved spans into splice directives.
pub trait MarkupRenderer: Sync {
    /// Builds the markup directive for one span.
    fn directive(&self, span: &ResolvedSpan) -> Directive;
}

/// Default HTML renderer.
///
/// Emits a `<span>` per annotation, colored through a
/// `--cli-color-block-{kind}` CSS variable, with the description as a
/// `data-tooltip` attribute. Keyword spans carrying a documentation link
/// become `<a … target="_blank">` instead.
///
/// # Examples
///
/// ```
/// use cmd_annotate_core::AnnotationKind;
/// use cmd_annotate_pipeline::{HtmlRenderer, MarkupRenderer, ResolvedSpan};
///
/// let renderer = HtmlRenderer;
/// let directive = renderer.directive(&ResolvedSpan {
///     kind: AnnotationKind::Option,
///     start: 4,
///     end: 9,
///     description: Some("Port to connect to.".to_string()),
///     href: None,
/// });
/// assert_eq!(
///     directive.prefix,
///     r#"<span style="color: var(--cli-color-block-option);" data-tooltip="Port to connect to.">"#,
/// );
/// assert_eq!(directive.suffix, "</span>");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

impl MarkupRenderer for HtmlRenderer {
    fn directive(&self, span: &ResolvedSpan) -> Directive {
        let tag = if span.href.is_some() { "a" } else { "span" };

        let mut prefix = format!(
            r#"<{tag} style="color: var(--cli-color-block-{});""#,
            span.kind.label()
        );
        if let Some(description) = &span.description {
            prefix.push_str(&format!(r#" data-tooltip="{}""#, escape_attr(description)));
        }
        if let Some(href) = &span.href {
            prefix.push_str(&format!(r#" href="{}" target="_blank""#, href));
        }
        prefix.push('>');

        Directive {
            start: span.start,
            end: span.end,
            prefix,
            suffix: format!("</{tag}>"),
        }
    }
}
