//! Escaping literal text for use in an expression.

use serde_json::Value;

use crate::TransformError;
use crate::error::kind_of;

/// Escapes every character with a special meaning in an expression.
///
/// A plain backslash escape is used where it is always valid; `-` becomes
/// `\x2d` so the result is also safe inside a character class.
pub fn escape_string_regexp(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '|' | '\\' | '{' | '}' | '(' | ')' | '[' | ']' | '^' | '$' | '+' | '*' | '?' | '.' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '-' => escaped.push_str(r"\x2d"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes a JSON value, which must be a string.
pub fn escape_value(value: &Value) -> Result<String, TransformError> {
    match value {
        Value::String(s) => Ok(escape_string_regexp(s)),
        other => Err(TransformError::InvalidFind(kind_of(other).to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::plain("hello", "hello")]
    #[case::dot("a.b", r"a\.b")]
    #[case::groups("(x)[y]{z}", r"\(x\)\[y\]\{z\}")]
    #[case::anchors("^$", r"\^\$")]
    #[case::quantifiers("+*?", r"\+\*\?")]
    #[case::alternation_and_backslash(r"a|\b", r"a\|\\b")]
    #[case::dash("a-b", r"a\x2db")]
    fn test_escape(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_string_regexp(input), expected);
    }

    #[rstest]
    #[case("[a-z]+ (1.0)?")]
    #[case(r"C:\path\to|file$")]
    #[case("price: $5.00 ^_^")]
    fn test_escaped_matches_itself_only(#[case] input: &str) {
        let re = Regex::new(&escape_string_regexp(input)).unwrap();
        assert!(re.is_match(input));
        assert_eq!(re.find(input).map(|m| m.as_str()), Some(input));
        assert!(!re.is_match("unrelated"));
    }

    #[test]
    fn test_escape_value_rejects_non_strings() {
        assert_eq!(escape_value(&json!("a.b")).unwrap(), r"a\.b");

        let err = escape_value(&json!(42)).unwrap_err();
        assert_eq!(err.to_string(), "Expected a string, got number");
    }
}
