//! Shape validation for oracle responses.
//!
//! Validates structural invariants of [`CommandSpec`] and [`DescribeResult`]
//! values after deserialization, catching errors such as required-option
//! indices that point at positionals, inverted slices, and out-of-order
//! annotation cursors before they reach the compositor. Oracle clients run
//! these checks so a response that parses as JSON but violates the contract
//! is rejected as malformed rather than producing corrupt markup.

use thiserror::Error;

use crate::{Annotation, CommandSpec, DescribeResult, Token};

/// Structural problems found in an oracle response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Spec has an empty primary path.
    #[error("command spec primary path cannot be empty")]
    EmptyPrimaryPath,
    /// `required_options` index is out of bounds.
    #[error("required option index {0} out of bounds ({1} components)")]
    RequiredOptionOutOfBounds(usize, usize),
    /// `required_options` index references a positional component.
    #[error("required option index {0} references a positional component")]
    RequiredOptionNotAnOption(usize),
    /// Token slice has `start` after `end`.
    #[error("token {0} has inverted slice ({1}..{2})")]
    InvertedTokenSlice(usize, usize, usize),
    /// Annotation has `start` after `end`.
    #[error("annotation {0} has start after end")]
    InvertedAnnotation(usize),
    /// Token or annotation references an argument past the vector length.
    #[error("span {0} references argument {1} beyond argv length {2}")]
    ArgIndexOutOfBounds(usize, usize, usize),
    /// Token or annotation offset reaches past the addressed argument.
    #[error("span {0} offset {1} exceeds argument length {2}")]
    OffsetOutOfBounds(usize, usize, usize),
}

/// Validates a single command spec.
///
/// Returns all violations found; an empty vec means the spec is well-formed.
///
/// # Examples
///
/// ```
/// use cmd_annotate_core::*;
///
/// let mut spec = CommandSpec::new(["commit"])
///     .with_component(Component::Option(OptionComponent::flag("--amend")));
/// spec.required_options.push(0);
/// assert!(validate_spec(&spec).is_empty());
///
/// // Index pointing at a positional is a violation.
/// let mut bad = CommandSpec::new(["push"]).with_component(Component::Positional(
///     Positional::Keyword { expected: "push".into() },
/// ));
/// bad.required_options.push(0);
/// assert!(!validate_spec(&bad).is_empty());
/// ```
pub fn validate_spec(spec: &CommandSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if spec.primary_path.is_empty() {
        errors.push(ValidationError::EmptyPrimaryPath);
    }

    for &index in &spec.required_options {
        match spec.components.get(index) {
            None => errors.push(ValidationError::RequiredOptionOutOfBounds(
                index,
                spec.components.len(),
            )),
            Some(component) if !component.is_option() => {
                errors.push(ValidationError::RequiredOptionNotAnOption(index));
            }
            Some(_) => {}
        }
    }

    errors
}

/// Validates a describe result against the argument vector it was computed
/// for.
///
/// `argv` is the vector passed to the oracle; every token and annotation
/// must address arguments within it, with offsets no larger than the
/// addressed argument's byte length.
pub fn validate_describe(result: &DescribeResult, argv: &[String]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (index, token) in result.tokens.iter().enumerate() {
        validate_token(index, token, argv, &mut errors);
    }
    for (index, annotation) in result.annotations.iter().enumerate() {
        validate_annotation(index, annotation, argv, &mut errors);
    }

    errors
}

fn validate_token(index: usize, token: &Token, argv: &[String], errors: &mut Vec<ValidationError>) {
    if token.slice.start > token.slice.end {
        errors.push(ValidationError::InvertedTokenSlice(
            index,
            token.slice.start,
            token.slice.end,
        ));
    }
    match argv.get(token.arg_index) {
        None => errors.push(ValidationError::ArgIndexOutOfBounds(
            index,
            token.arg_index,
            argv.len(),
        )),
        Some(arg) if token.slice.end > arg.len() => {
            errors.push(ValidationError::OffsetOutOfBounds(
                index,
                token.slice.end,
                arg.len(),
            ));
        }
        Some(_) => {}
    }
}

fn validate_annotation(
    index: usize,
    annotation: &Annotation,
    argv: &[String],
    errors: &mut Vec<ValidationError>,
) {
    if annotation.start > annotation.end {
        errors.push(ValidationError::InvertedAnnotation(index));
    }
    for cursor in [annotation.start, annotation.end] {
        match argv.get(cursor.arg_index) {
            None => {
                errors.push(ValidationError::ArgIndexOutOfBounds(
                    index,
                    cursor.arg_index,
                    argv.len(),
                ));
                return;
            }
            Some(arg) if cursor.offset > arg.len() => {
                errors.push(ValidationError::OffsetOutOfBounds(
                    index,
                    cursor.offset,
                    arg.len(),
                ));
                return;
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AnnotationKind, ArgCursor, Component, OptionComponent, Positional, Slice, Token, TokenKind,
    };

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn describe_with_annotation(start: ArgCursor, end: ArgCursor) -> DescribeResult {
        DescribeResult {
            command: vec!["commit".to_string()],
            tokens: Vec::new(),
            annotations: vec![Annotation {
                kind: AnnotationKind::Keyword,
                start,
                end,
                description: None,
            }],
        }
    }

    #[test]
    fn test_required_option_must_reference_option() {
        let mut spec = CommandSpec::new(["push"]).with_component(Component::Positional(
            Positional::Keyword {
                expected: "push".to_string(),
            },
        ));
        spec.required_options.push(0);
        let errors = validate_spec(&spec);
        assert_eq!(
            errors,
            vec![ValidationError::RequiredOptionNotAnOption(0)]
        );
    }

    #[test]
    fn test_required_option_out_of_bounds() {
        let mut spec =
            CommandSpec::new(["commit"]).with_component(Component::Option(OptionComponent::flag(
                "--amend",
            )));
        spec.required_options.push(3);
        let errors = validate_spec(&spec);
        assert!(matches!(
            errors[0],
            ValidationError::RequiredOptionOutOfBounds(3, 1)
        ));
    }

    #[test]
    fn test_empty_primary_path_rejected() {
        let spec = CommandSpec::new(Vec::<String>::new());
        assert!(
            validate_spec(&spec)
                .iter()
                .any(|e| matches!(e, ValidationError::EmptyPrimaryPath))
        );
    }

    #[test]
    fn test_inverted_token_slice() {
        let result = DescribeResult {
            command: vec!["commit".to_string()],
            tokens: vec![Token {
                kind: TokenKind::Keyword,
                arg_index: 0,
                slice: Slice { start: 6, end: 0 },
                component_id: None,
            }],
            annotations: Vec::new(),
        };
        let errors = validate_describe(&result, &argv(&["commit"]));
        assert!(matches!(
            errors[0],
            ValidationError::InvertedTokenSlice(0, 6, 0)
        ));
    }

    #[test]
    fn test_token_slice_bounded_by_argument_length() {
        let result = DescribeResult {
            command: vec!["commit".to_string()],
            tokens: vec![Token {
                kind: TokenKind::Keyword,
                arg_index: 0,
                slice: Slice { start: 0, end: 40 },
                component_id: None,
            }],
            annotations: Vec::new(),
        };
        let errors = validate_describe(&result, &argv(&["commit"]));
        assert!(matches!(
            errors[0],
            ValidationError::OffsetOutOfBounds(0, 40, 6)
        ));
    }

    #[test]
    fn test_annotation_arg_index_bounds() {
        let result = describe_with_annotation(
            ArgCursor {
                arg_index: 2,
                offset: 0,
            },
            ArgCursor {
                arg_index: 2,
                offset: 4,
            },
        );
        let errors = validate_describe(&result, &argv(&["commit", "-m"]));
        assert!(matches!(
            errors[0],
            ValidationError::ArgIndexOutOfBounds(0, 2, 2)
        ));
    }

    #[test]
    fn test_annotation_offset_bounded_by_argument_length() {
        let result = describe_with_annotation(
            ArgCursor {
                arg_index: 0,
                offset: 0,
            },
            ArgCursor {
                arg_index: 0,
                offset: 999,
            },
        );
        let errors = validate_describe(&result, &argv(&["commit"]));
        assert!(matches!(
            errors[0],
            ValidationError::OffsetOutOfBounds(0, 999, 6)
        ));
    }

    #[test]
    fn test_well_formed_describe_passes() {
        let result = describe_with_annotation(
            ArgCursor {
                arg_index: 0,
                offset: 0,
            },
            ArgCursor {
                arg_index: 0,
                offset: 6,
            },
        );
        assert!(validate_describe(&result, &argv(&["commit"])).is_empty());
    }
}
