//! Whitespace word tokenizer with quoted-run support.
//!
//! Splits a command line into positionally-addressed words: every
//! non-whitespace run becomes one [`Word`], where a run may be a single- or
//! double-quoted string whose contents include internal whitespace (the
//! quote characters are retained in the word text). Each word records the
//! byte offset of its first character in the original line, and those
//! offsets stay valid for the whole annotation pass because the line itself
//! is never mutated.
//!
//! No escaping beyond quote-delimited literal runs is supported.

use std::sync::OnceLock;

use regex::Regex;

/// One word of a command line with its position in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// The word text, quotes included for quoted runs.
    pub text: String,
    /// Byte offset of the first character in the original line.
    pub byte_offset: usize,
}

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Quoted alternatives first so a quoted run is consumed whole
        // instead of being split at its internal whitespace.
        Regex::new(r#""[^"]+"|'[^']+'|\S+"#).expect("word pattern is valid")
    })
}

/// Tokenizes a line into its [`Word`] sequence.
///
/// Empty or all-whitespace lines produce an empty vec.
///
/// # Examples
///
/// ```
/// use cmd_annotate_core::tokenize;
///
/// let words = tokenize(r#"git commit -m "fix: update tests""#);
/// assert_eq!(words.len(), 4);
/// assert_eq!(words[3].text, r#""fix: update tests""#);
/// assert_eq!(words[1].byte_offset, 4);
/// ```
pub fn tokenize(line: &str) -> Vec<Word> {
    word_pattern()
        .find_iter(line)
        .map(|found| Word {
            text: found.as_str().to_string(),
            byte_offset: found.start(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_split() {
        let words = tokenize("ssh -p 80 localhost");
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["ssh", "-p", "80", "localhost"]);
        let offsets: Vec<usize> = words.iter().map(|w| w.byte_offset).collect();
        assert_eq!(offsets, vec![0, 4, 7, 10]);
    }

    #[test]
    fn test_empty_and_whitespace_lines() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t  ").is_empty());
    }

    #[test]
    fn test_double_quoted_run_keeps_quotes_and_spaces() {
        let words = tokenize(r#"git commit -m "fix: update tests""#);
        assert_eq!(words[3].text, r#""fix: update tests""#);
        assert_eq!(words[3].byte_offset, 14);
    }

    #[test]
    fn test_single_quoted_run() {
        let words = tokenize("echo 'hello world' done");
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["echo", "'hello world'", "done"]);
    }

    #[test]
    fn test_leading_and_repeated_whitespace() {
        let words = tokenize("  ls   -la ");
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].byte_offset, 2);
        assert_eq!(words[1].byte_offset, 7);
    }

    #[test]
    fn test_offsets_index_back_into_line() {
        let line = r#"docker run --rm -it "my image" bash"#;
        for word in tokenize(line) {
            let slice = &line[word.byte_offset..word.byte_offset + word.text.len()];
            assert_eq!(slice, word.text);
        }
    }
}
