use std::collections::HashMap;

/// The abstract value produced by the JSON-flavored grammar.
///
/// Numbers are stored as `f64` even though the grammar only recognizes
/// unsigned integers. Object keys are unique by map construction; when the
/// input repeats a key, the later entry wins.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(HashMap<String, JsonValue>),
}
