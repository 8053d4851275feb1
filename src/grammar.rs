//! The JSON-flavored value grammar, expressed purely as combinator
//! compositions over [`JsonValue`].
//!
//! Deliberate subset limitations: numbers are unsigned integers only (no
//! sign, fraction, or exponent), and a structural delimiter swallows at
//! most one trailing whitespace character rather than arbitrary whitespace.

use crate::error::{found_in, ParseError};
use crate::parser::{
    attempt, choice, left, literal, many, many1, map, or_else, pair, right, satisfy, sep_by1,
    Parser,
};
use crate::value::JsonValue;

/// Matches exactly `c`, naming it in the error on a mismatch.
fn just<'a>(c: char) -> impl Parser<'a, char> {
    move |input: &'a str| match satisfy(move |x| x == c).parse(input) {
        Ok(success) => Ok(success),
        Err((rest, _)) => Err((rest, ParseError::new(format!("'{c}'"), found_in(rest)))),
    }
}

/// Matches `c` and then at most one trailing whitespace character.
fn symbol<'a>(c: char) -> impl Parser<'a, char> {
    let one_space = move |input: &'a str| -> crate::parser::ParseResult<'a, ()> {
        match satisfy(char::is_whitespace).parse(input) {
            Ok((rest, _)) => Ok((rest, ())),
            Err((rest, _)) => Ok((rest, ())),
        }
    };
    left(just(c), one_space)
}

/// One character of string content: an escape sequence or any character
/// other than the closing quote.
fn string_char<'a>() -> impl Parser<'a, char> {
    choice(
        "a string character",
        vec![
            literal("\\n").map(|_| '\n'),
            literal("\\t").map(|_| '\t'),
            literal("\\\"").map(|_| '"'),
            literal("\\\\").map(|_| '\\'),
            satisfy(|c| c != '"').boxed(),
        ],
    )
}

/// `string ::= '"' string_char* '"'`, unescaped into an owned `String`.
fn string_literal<'a>() -> impl Parser<'a, String> {
    map(
        right(just('"'), left(many(string_char()), just('"'))),
        |chars| chars.into_iter().collect(),
    )
}

/// `number ::= digit+` — unsigned, non-fractional integers only.
fn number<'a>() -> impl Parser<'a, JsonValue> {
    map(many1(satisfy(|c: char| c.is_ascii_digit())), |digits| {
        let n = digits
            .into_iter()
            .fold(0.0, |acc, c| acc * 10.0 + f64::from(c.to_digit(10).unwrap_or(0)));
        JsonValue::Number(n)
    })
}

fn boolean<'a>() -> impl Parser<'a, JsonValue> {
    choice(
        "a boolean",
        vec![
            literal("true").map(|_| JsonValue::Bool(true)),
            literal("false").map(|_| JsonValue::Bool(false)),
        ],
    )
}

fn null<'a>() -> impl Parser<'a, JsonValue> {
    map(literal("null"), |_| JsonValue::Null)
}

/// A deferred reference to [`json_value`], so that `object` and `array` can
/// recurse into the value rule without the rule constructors recursing into
/// each other at construction time.
fn value_ref<'a>() -> impl Parser<'a, JsonValue> {
    move |input: &'a str| json_value().parse(input)
}

/// `array ::= '[' (value (',' value)*)? ']'`.
///
/// The closing delimiter is tried first so that an empty array parses, while
/// a malformed element still fails the whole rule instead of being mistaken
/// for emptiness.
pub fn array<'a>() -> impl Parser<'a, JsonValue> {
    let items = or_else(
        attempt(map(symbol(']'), |_| Vec::new())),
        left(sep_by1(value_ref(), symbol(',')), symbol(']')),
    );
    map(right(symbol('['), items), JsonValue::Array)
}

/// `entry ::= string ':' value`.
fn entry<'a>() -> impl Parser<'a, (String, JsonValue)> {
    pair(left(string_literal(), symbol(':')), value_ref())
}

/// `object ::= '{' (entry (',' entry)*)? '}'`, same shape as [`array`] but
/// over key-value entries.
pub fn object<'a>() -> impl Parser<'a, JsonValue> {
    let entries = or_else(
        attempt(map(symbol('}'), |_| Vec::new())),
        left(sep_by1(entry(), symbol(',')), symbol('}')),
    );
    map(right(symbol('{'), entries), |entries| {
        JsonValue::Object(entries.into_iter().collect())
    })
}

/// The top-level value rule: `value ::= object | array | string | number |
/// bool | null`, tried in that order. Every alternative backtracks to the
/// rule's entry position on failure, so the error reported when nothing
/// matches is the fallback `expected a value`.
pub fn json_value<'a>() -> impl Parser<'a, JsonValue> {
    choice(
        "a value",
        vec![
            attempt(object()).boxed(),
            attempt(array()).boxed(),
            attempt(string_literal().map(JsonValue::String)).boxed(),
            attempt(number()).boxed(),
            attempt(boolean()).boxed(),
            attempt(null()).boxed(),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn obj(entries: Vec<(&str, JsonValue)>) -> JsonValue {
        JsonValue::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn parses_scalars() {
        assert_eq!(boolean().parse("true"), Ok(("", JsonValue::Bool(true))));
        assert_eq!(boolean().parse("false"), Ok(("", JsonValue::Bool(false))));
        assert_eq!(null().parse("null"), Ok(("", JsonValue::Null)));
        assert_eq!(number().parse("42"), Ok(("", JsonValue::Number(42.0))));
        assert_eq!(number().parse("007"), Ok(("", JsonValue::Number(7.0))));
    }

    #[test]
    fn rejects_signed_and_fractional_numbers() {
        assert!(number().parse("-1").is_err());
        // only the integer part is consumed; the fraction is left over
        assert_eq!(
            number().parse("1.5"),
            Ok((".5", JsonValue::Number(1.0)))
        );
    }

    #[test]
    fn parses_strings_with_escapes() {
        assert_eq!(
            string_literal().parse(r#""hello""#),
            Ok(("", String::from("hello")))
        );
        assert_eq!(string_literal().parse(r#""""#), Ok(("", String::new())));
        assert_eq!(
            string_literal().parse(r#""a\nb\tc\"d\\e""#),
            Ok(("", String::from("a\nb\tc\"d\\e")))
        );
        // unterminated: the rule fails rather than consuming to end of input
        assert!(string_literal().parse(r#""oops"#).is_err());
    }

    #[test]
    fn parses_arrays() {
        assert_eq!(array().parse("[]"), Ok(("", JsonValue::Array(vec![]))));
        assert_eq!(
            array().parse("[1,2,3]"),
            Ok((
                "",
                JsonValue::Array(vec![
                    JsonValue::Number(1.0),
                    JsonValue::Number(2.0),
                    JsonValue::Number(3.0),
                ])
            ))
        );
        assert_eq!(
            array().parse("[[true],null]"),
            Ok((
                "",
                JsonValue::Array(vec![
                    JsonValue::Array(vec![JsonValue::Bool(true)]),
                    JsonValue::Null,
                ])
            ))
        );
    }

    #[test]
    fn parses_objects() {
        assert_eq!(object().parse("{}"), Ok(("", obj(vec![]))));
        assert_eq!(
            object().parse(r#"{"a":1,"b":[true,null]}"#),
            Ok((
                "",
                obj(vec![
                    ("a", JsonValue::Number(1.0)),
                    (
                        "b",
                        JsonValue::Array(vec![JsonValue::Bool(true), JsonValue::Null])
                    ),
                ])
            ))
        );
    }

    #[test]
    fn symbol_allows_one_trailing_space() {
        assert_eq!(
            object().parse(r#"{"a": 1,"b": 2}"#),
            Ok((
                "",
                obj(vec![
                    ("a", JsonValue::Number(1.0)),
                    ("b", JsonValue::Number(2.0)),
                ])
            ))
        );
        // two spaces exceed what a symbol consumes
        assert!(object().parse(r#"{"a":  1}"#).is_err());
    }

    #[test]
    fn missing_value_fails_at_the_gap() {
        let failure = object().parse(r#"{"a":}"#).unwrap_err();
        assert_eq!(failure, ("}", ParseError::new("a value", "no match")));
    }

    #[test]
    fn choice_order_and_backtracking() {
        // "nul" partially matches the null literal but must not consume
        assert_eq!(
            json_value().parse("nul"),
            Err(("nul", ParseError::new("a value", "no match")))
        );
        assert_eq!(
            json_value().parse("true rest"),
            Ok((" rest", JsonValue::Bool(true)))
        );
    }

    #[test]
    fn value_rule_covers_every_variant() {
        assert_eq!(
            json_value().parse(r#""s""#),
            Ok(("", JsonValue::String(String::from("s"))))
        );
        assert_eq!(json_value().parse("12"), Ok(("", JsonValue::Number(12.0))));
        assert_eq!(json_value().parse("null"), Ok(("", JsonValue::Null)));
        assert_eq!(
            json_value().parse(r#"{"k":[0]}"#),
            Ok((
                "",
                obj(vec![("k", JsonValue::Array(vec![JsonValue::Number(0.0)]))])
            ))
        );
    }
}
