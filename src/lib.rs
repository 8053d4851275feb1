//! A minimal parser-combinator library, demonstrated with a JSON-flavored
//! value grammar.
//!
//! The [`parser`] module is the product: a small algebra of composable
//! parsing primitives (sequencing, alternation, repetition, separation,
//! backtracking) over `&str` input. The [`grammar`] module builds a
//! recursive-descent parser for a JSON subset on top of it, producing a
//! [`JsonValue`].
//!
//! # Example
//! ```
//! use parsnip::{parse, JsonValue};
//!
//! let input = r#"{"name": "parsnip", "tasty": true}"#;
//! match parse(input) {
//!     Ok(JsonValue::Object(fields)) => {
//!         assert_eq!(fields["tasty"], JsonValue::Bool(true));
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```
//!
//! The grammar recognizes a deliberate subset of JSON: numbers are unsigned
//! integers, and at most one whitespace character may follow a structural
//! delimiter. See [`grammar`] for details.

mod error;
pub mod grammar;
pub mod parser;
mod value;

use parser::Parser;

pub use error::ParseError;
pub use parser::{BoxedParser, ParseResult};
pub use value::JsonValue;

/// Parses a JSON-flavored string into a [`JsonValue`].
///
/// Runs the top-level value rule and discards any unconsumed trailing
/// input; use [`grammar::json_value`] directly with
/// [`parser::end_of_input`] to insist on full consumption.
pub fn parse(input: &str) -> Result<JsonValue, ParseError> {
    match grammar::json_value().parse(input) {
        Ok((_, value)) => Ok(value),
        Err((_, error)) => Err(error),
    }
}
