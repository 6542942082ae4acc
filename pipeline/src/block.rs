//! Parallel annotation of multi-line blocks.
//!
//! Lines are independent, so a block fans out over rayon's thread pool.
//! Indexed parallel iteration collects results in input order: a slow oracle
//! call on line 2 never reorders it after line 9.

use rayon::prelude::*;

use cmd_annotate_oracle::OracleRegistry;

use crate::annotate::annotate_line;
use crate::markup::MarkupRenderer;

/// Annotates each line of a block, preserving input order.
pub fn annotate_block<S>(
    lines: &[S],
    registry: &OracleRegistry,
    renderer: &dyn MarkupRenderer,
) -> Vec<String>
where
    S: AsRef<str> + Sync,
{
    lines
        .par_iter()
        .map(|line| annotate_line(line.as_ref(), registry, renderer))
        .collect()
}

/// Annotates a whole text, splitting on `\n` and rejoining.
///
/// The split keeps empty segments, so leading, trailing, and doubled
/// newlines survive the round trip.
pub fn annotate_text(
    text: &str,
    registry: &OracleRegistry,
    renderer: &dyn MarkupRenderer,
) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    annotate_block(&lines, registry, renderer).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::HtmlRenderer;

    #[test]
    fn test_empty_block() {
        let registry = OracleRegistry::new();
        let lines: Vec<String> = Vec::new();
        assert!(annotate_block(&lines, &registry, &HtmlRenderer).is_empty());
    }

    #[test]
    fn test_unregistered_lines_pass_through_in_order() {
        let registry = OracleRegistry::new();
        let lines = vec!["first", "second", "", "fourth"];
        assert_eq!(
            annotate_block(&lines, &registry, &HtmlRenderer),
            vec!["first", "second", "", "fourth"]
        );
    }

    #[test]
    fn test_annotate_text_preserves_newline_shape() {
        let registry = OracleRegistry::new();
        let text = "\nssh localhost\n\nls -la\n";
        assert_eq!(annotate_text(text, &registry, &HtmlRenderer), text);
    }
}
