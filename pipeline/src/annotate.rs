//! The per-line annotation pipeline.
//!
//! One line goes through four stages: tokenize into words, address an oracle
//! by the leading word, describe the remaining words as an argument vector,
//! then remap the returned argument-relative annotations to line byte
//! offsets and splice the renderer's markup. Every failure mode past setup
//! degrades to passing the line through unchanged; a narration suddenly full
//! of holes is worse than one with fewer tooltips.

use cmd_annotate_core::{Annotation, AnnotationKind, Word, compose, tokenize};
use cmd_annotate_oracle::{OracleError, OracleRegistry};
use tracing::{debug, warn};
use url::Url;

use crate::markup::{MarkupRenderer, ResolvedSpan};

/// What happened to one line.
///
/// Callers that only want the text use [`annotate_line`]; the outcome exists
/// for diagnostics and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line was annotated with this many spans.
    Annotated { spans: usize },
    /// The line had no words; passed through.
    NoWords,
    /// No oracle is registered for the leading word; passed through.
    NoOracle,
    /// The oracle did not recognize the argument vector; passed through.
    Unresolved,
    /// The oracle could not be reached; passed through.
    OracleUnavailable,
    /// The oracle answered with a malformed payload; passed through.
    MalformedResponse,
}

/// Annotates one line, returning the (possibly unchanged) text.
pub fn annotate_line(
    line: &str,
    registry: &OracleRegistry,
    renderer: &dyn MarkupRenderer,
) -> String {
    annotate_line_with_outcome(line, registry, renderer).0
}

/// Annotates one line and reports what happened to it.
pub fn annotate_line_with_outcome(
    line: &str,
    registry: &OracleRegistry,
    renderer: &dyn MarkupRenderer,
) -> (String, LineOutcome) {
    let words = tokenize(line);
    let Some(leading) = words.first() else {
        return (line.to_string(), LineOutcome::NoWords);
    };

    let Some(entry) = registry.get(&leading.text) else {
        return (line.to_string(), LineOutcome::NoOracle);
    };

    let argv: Vec<String> = words[1..].iter().map(|word| word.text.clone()).collect();

    let result = match entry.oracle.describe(&argv) {
        Ok(Some(result)) => result,
        Ok(None) => {
            debug!(cli = %leading.text, ?argv, "argument vector did not resolve");
            return (line.to_string(), LineOutcome::Unresolved);
        }
        Err(OracleError::MalformedResponse(reason)) => {
            warn!(cli = %leading.text, %reason, "oracle response rejected");
            return (line.to_string(), LineOutcome::MalformedResponse);
        }
        Err(
            error @ (OracleError::BinaryNotFound(_)
            | OracleError::Unavailable(_)
            | OracleError::Io(_)),
        ) => {
            warn!(cli = %leading.text, %error, "oracle unavailable, passing line through");
            return (line.to_string(), LineOutcome::OracleUnavailable);
        }
    };

    let spans = resolve_spans(
        line,
        &words,
        &result.annotations,
        &result.command,
        entry.base_url.as_ref(),
    );

    let directives = spans.iter().map(|span| renderer.directive(span)).collect();
    (
        compose(line, directives),
        LineOutcome::Annotated { spans: spans.len() },
    )
}

/// Remaps argument-relative annotations to line byte offsets.
///
/// The argument vector excludes the leading binary word, so argument `i`
/// lives in `words[1 + i]`. Annotations addressing arguments beyond the
/// word sequence, or whose remapped byte offsets do not fit the line (past
/// its end, inverted, or off a char boundary), are dropped rather than
/// panicking; a validated oracle response never produces them, but spans
/// come from outside the process.
fn resolve_spans(
    line: &str,
    words: &[Word],
    annotations: &[Annotation],
    command: &[String],
    base_url: Option<&Url>,
) -> Vec<ResolvedSpan> {
    let mut spans = Vec::with_capacity(annotations.len());

    for annotation in annotations {
        let (Some(start_word), Some(end_word)) = (
            words.get(1 + annotation.start.arg_index),
            words.get(1 + annotation.end.arg_index),
        ) else {
            debug!(?annotation, "annotation addresses argument beyond the line");
            continue;
        };

        let start = start_word.byte_offset + annotation.start.offset;
        let end = end_word.byte_offset + annotation.end.offset;
        if start > end || !line.is_char_boundary(start) || !line.is_char_boundary(end) {
            debug!(?annotation, "annotation span does not fit the line");
            continue;
        }

        let href = if annotation.kind == AnnotationKind::Keyword {
            base_url.map(|base| command_href(base, command))
        } else {
            None
        };

        spans.push(ResolvedSpan {
            kind: annotation.kind,
            start,
            end,
            description: annotation.description.clone(),
            href,
        });
    }

    spans
}

/// Appends one path segment per resolved command path element to the base
/// URL's path. The segments are appended verbatim with a `/` each, so a base
/// URL whose path is `/` yields a doubled slash (`https://example.com` +
/// `commit` → `https://example.com//commit`); downstream documentation
/// routers accept that shape and existing links depend on it.
fn command_href(base: &Url, command: &[String]) -> Url {
    let mut href = base.clone();
    let mut path = href.path().to_string();
    for segment in command {
        path.push('/');
        path.push_str(segment);
    }
    href.set_path(&path);
    href
}
