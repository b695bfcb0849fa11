//! Single-pass `{key}` placeholder substitution.
//!
//! The scanner walks the text once: placeholders whose key appears in the
//! substitution list are replaced, `{{` and `}}` become literal braces, and
//! everything else — unmatched placeholders included — is copied verbatim.
//! Replacement values are inserted literally and never re-scanned, so a value
//! containing `{other}` cannot trigger a second substitution.
//!
//! Substitution lists are expected to be tiny; duplicate detection and lookup
//! are linear over a stack-allocated buffer rather than a hash map.

use std::borrow::Cow;

use smallvec::SmallVec;

use crate::convert::ConvertError;

/// Replaces `{key}` placeholders in `text` with the paired values.
///
/// # Errors
///
/// [`ConvertError::InvalidArgument`] when `substitutions` contains the same
/// key twice.
///
/// # Examples
///
/// ```rust
/// use valtext::value::expand_placeholders;
///
/// let expanded = expand_placeholders(
///     "Hello {name}, you are {age}",
///     &[("name", "Ann"), ("age", "30")],
/// )?;
/// assert_eq!(expanded, "Hello Ann, you are 30");
///
/// assert_eq!(expand_placeholders("{{literal}}", &[])?, "{literal}");
/// assert_eq!(expand_placeholders("{unknown}", &[])?, "{unknown}");
/// # Ok::<(), valtext::ConvertError>(())
/// ```
pub fn expand_placeholders(
    text: &str,
    substitutions: &[(&str, &str)],
) -> Result<String, ConvertError> {
    let mut seen: SmallVec<[&str; 8]> = SmallVec::new();
    for (key, _) in substitutions.iter().copied() {
        if seen.contains(&key) {
            return Err(ConvertError::InvalidArgument(Cow::Owned(format!(
                "duplicate substitution key `{key}`"
            ))));
        }
        seen.push(key);
    }

    let lookup = |key: &str| {
        substitutions
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| *value)
    };

    let mut result = String::with_capacity(text.len());
    let mut remainder = text;
    loop {
        let Some(index) = remainder.find(['{', '}']) else {
            result.push_str(remainder);
            break;
        };
        result.push_str(&remainder[..index]);
        let tail = &remainder[index..];

        if let Some(rest) = tail.strip_prefix("{{") {
            result.push('{');
            remainder = rest;
            continue;
        }
        if let Some(rest) = tail.strip_prefix("}}") {
            result.push('}');
            remainder = rest;
            continue;
        }
        if let Some(rest) = tail.strip_prefix('}') {
            // A lone closing brace is literal text.
            result.push('}');
            remainder = rest;
            continue;
        }

        match tail.find('}') {
            None => {
                // Unterminated placeholder; copy through verbatim.
                result.push_str(tail);
                break;
            }
            Some(close) => {
                let key = &tail[1..close];
                match lookup(key) {
                    Some(value) => result.push_str(value),
                    None => result.push_str(&tail[..=close]),
                }
                remainder = &tail[close + 1..];
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_basic_substitution() {
        let expanded = expand_placeholders(
            "Hello {name}, you are {age}",
            &[("name", "Ann"), ("age", "30")],
        )
        .unwrap();
        assert_eq!(expanded, "Hello Ann, you are 30");
    }

    #[rstest]
    fn test_duplicate_key_is_invalid_argument() {
        let error =
            expand_placeholders("{a}", &[("a", "1"), ("b", "2"), ("a", "3")]).unwrap_err();
        assert!(error.is_invalid_argument());
        assert!(format!("{error}").contains("duplicate substitution key `a`"));
    }

    #[rstest]
    #[case("{{x}}", "{x}")]
    #[case("a }} b {{ c", "a } b { c")]
    #[case("}", "}")]
    #[case("{open", "{open")]
    fn test_braces_and_edges(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(expand_placeholders(input, &[]).unwrap(), expected);
    }

    #[rstest]
    fn test_unknown_placeholder_left_verbatim() {
        let expanded = expand_placeholders("{known} and {unknown}", &[("known", "v")]).unwrap();
        assert_eq!(expanded, "v and {unknown}");
    }

    #[rstest]
    fn test_replacement_values_are_not_rescanned() {
        let expanded =
            expand_placeholders("{a}", &[("a", "{b}"), ("b", "never")]).unwrap();
        assert_eq!(expanded, "{b}");
    }

    #[rstest]
    fn test_empty_substitution_list_passes_through() {
        assert_eq!(expand_placeholders("plain text", &[]).unwrap(), "plain text");
    }
}
