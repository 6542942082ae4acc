//! Markup splicing over a line without disturbing other spans.
//!
//! The compositor takes a line plus a flat set of [`Directive`]s in
//! line-relative byte offsets and splices each directive's prefix/suffix
//! markup into the text. Directives sharing a start offset are grouped and
//! nested LIFO; groups are applied right-to-left so that each splice leaves
//! the offsets of every not-yet-applied group untouched.

/// A line-relative splice instruction.
///
/// `start`/`end` are byte offsets into the original line; `prefix` is
/// inserted before `start` and `suffix` after `end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub start: usize,
    pub end: usize,
    pub prefix: String,
    pub suffix: String,
}

/// Splices directive markup into `line`.
///
/// Directives sharing an identical `start` are grouped in order of first
/// appearance; the group's effective `end` is the `end` of its first member
/// (members with a different `end` collapse onto that boundary — inherited
/// behavior, see the boundary-case test). Within a group, prefixes open in
/// insertion order and suffixes close in reverse insertion order, so nesting
/// is strictly LIFO. Groups are applied in descending `start` order: every
/// splice only grows the line at or after its own start, which keeps the
/// offsets of unapplied groups valid.
///
/// Crossing (partially overlapping, non-nested) spans are a caller contract
/// violation and are not detected here.
///
/// # Examples
///
/// ```
/// use cmd_annotate_core::{Directive, compose};
///
/// let out = compose(
///     "git commit",
///     vec![Directive {
///         start: 4,
///         end: 10,
///         prefix: "<b>".to_string(),
///         suffix: "</b>".to_string(),
///     }],
/// );
/// assert_eq!(out, "git <b>commit</b>");
/// ```
pub fn compose(line: &str, directives: Vec<Directive>) -> String {
    let mut groups: Vec<(usize, Vec<Directive>)> = Vec::new();

    for directive in directives {
        match groups.iter_mut().find(|(start, _)| *start == directive.start) {
            Some((_, group)) => group.push(directive),
            None => groups.push((directive.start, vec![directive])),
        }
    }

    // Descending start order; each splice only inserts at or after its own
    // start, so earlier (leftward) offsets stay valid.
    groups.sort_by(|(a, _), (b, _)| b.cmp(a));

    let mut out = line.to_string();

    for (start, group) in groups {
        let end = group[0].end;

        let mut prefix = String::new();
        let mut suffix = String::new();

        for directive in &group {
            prefix.push_str(&directive.prefix);
            suffix.insert_str(0, &directive.suffix);
        }

        let left = &out[..start];
        let middle = &out[start..end];
        let right = &out[end..];

        out = format!("{left}{prefix}{middle}{suffix}{right}");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive(start: usize, end: usize, prefix: &str, suffix: &str) -> Directive {
        Directive {
            start,
            end,
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }

    #[test]
    fn test_identity_on_zero_directives() {
        let line = "ssh -p 80 localhost";
        assert_eq!(compose(line, Vec::new()), line);
    }

    #[test]
    fn test_single_span() {
        let out = compose(
            "ssh -p 80 localhost",
            vec![directive(0, 3, "<span>", "</span>")],
        );
        assert_eq!(out, "<span>ssh</span> -p 80 localhost");
    }

    #[test]
    fn test_disjoint_spans_keep_interstitial_text() {
        // keyword "ssh", option "-p 80", positional "localhost"
        let out = compose(
            "ssh -p 80 localhost",
            vec![
                directive(0, 3, "<k>", "</k>"),
                directive(4, 9, "<o>", "</o>"),
                directive(10, 19, "<p>", "</p>"),
            ],
        );
        assert_eq!(out, "<k>ssh</k> <o>-p 80</o> <p>localhost</p>");
    }

    #[test]
    fn test_input_order_does_not_matter_for_disjoint_spans() {
        let forward = compose(
            "git commit -m msg",
            vec![directive(4, 10, "<a>", "</a>"), directive(11, 17, "<b>", "</b>")],
        );
        let backward = compose(
            "git commit -m msg",
            vec![directive(11, 17, "<b>", "</b>"), directive(4, 10, "<a>", "</a>")],
        );
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_length_invariant() {
        let line = "git commit -m msg";
        let directives = vec![
            directive(0, 3, "<span class=\"k\">", "</span>"),
            directive(4, 10, "<a href=\"x\">", "</a>"),
            directive(11, 17, "<span>", "</span>"),
        ];
        let added: usize = directives
            .iter()
            .map(|d| d.prefix.len() + d.suffix.len())
            .sum();
        let out = compose(line, directives);
        assert_eq!(out.len(), line.len() + added);
    }

    #[test]
    fn test_lifo_nesting_for_shared_start() {
        // A inserted first opens outermost; B closes first.
        let out = compose(
            "commit",
            vec![directive(0, 6, "<A>", "</A>"), directive(0, 6, "<B>", "</B>")],
        );
        assert_eq!(out, "<A><B>commit</B></A>");
    }

    #[test]
    fn test_shared_start_differing_ends_collapse_onto_first() {
        // Known boundary case: the second directive's end (3) is discarded
        // and both close at the first member's end (6). Documents the
        // inherited collapsing behavior rather than a corrected outcome.
        let out = compose(
            "commit",
            vec![directive(0, 6, "<A>", "</A>"), directive(0, 3, "<B>", "</B>")],
        );
        assert_eq!(out, "<A><B>commit</B></A>");
    }

    #[test]
    fn test_three_member_group_nests_lifo() {
        let out = compose(
            "commit",
            vec![
                directive(0, 6, "<A>", "</A>"),
                directive(0, 6, "<B>", "</B>"),
                directive(0, 6, "<C>", "</C>"),
            ],
        );
        assert_eq!(out, "<A><B><C>commit</C></B></A>");
    }

    #[test]
    fn test_multibyte_safe_offsets() {
        // Offsets are byte offsets; "héllo" is 6 bytes.
        let line = "héllo world";
        let out = compose(line, vec![directive(7, 12, "<w>", "</w>")]);
        assert_eq!(out, "héllo <w>world</w>");
    }
}
