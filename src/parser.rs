//! The parser core and combinator algebra.
//!
//! A [`Parser`] is a pure transformation from an input slice to a
//! [`ParseResult`]: either `(remainder, value)` or `(remainder, error)`.
//! Backtracking contract: a parser that fails must report the exact input it
//! was invoked with as its failure remainder. Primitives uphold this on their
//! own; composite parsers that can fail after partial consumption must be
//! wrapped in [`attempt`] before taking part in alternation.

use crate::error::{found_in, ParseError};

pub type ParseResult<'a, Output> = Result<(&'a str, Output), (&'a str, ParseError)>;

pub struct BoxedParser<'a, Output> {
    parser: Box<dyn Parser<'a, Output> + 'a>,
}

pub trait Parser<'a, Output> {
    fn parse(&self, input: &'a str) -> ParseResult<'a, Output>;

    fn map<F, NewOutput>(self, map_fn: F) -> BoxedParser<'a, NewOutput>
    where
        Self: Sized + 'a,
        Output: 'a,
        NewOutput: 'a,
        F: Fn(Output) -> NewOutput + 'a,
    {
        BoxedParser::new(map(self, map_fn))
    }

    fn and_then<F, NextParser, NewOutput>(self, f: F) -> BoxedParser<'a, NewOutput>
    where
        Self: Sized + 'a,
        Output: 'a,
        NewOutput: 'a,
        NextParser: Parser<'a, NewOutput> + 'a,
        F: Fn(Output) -> NextParser + 'a,
    {
        BoxedParser::new(and_then(self, f))
    }

    fn boxed(self) -> BoxedParser<'a, Output>
    where
        Self: Sized + 'a,
    {
        BoxedParser::new(self)
    }
}

impl<'a, F, Output> Parser<'a, Output> for F
where
    F: Fn(&'a str) -> ParseResult<'a, Output>,
{
    fn parse(&self, input: &'a str) -> ParseResult<'a, Output> {
        self(input)
    }
}

impl<'a, Output> BoxedParser<'a, Output> {
    pub fn new<P>(parser: P) -> Self
    where
        P: Parser<'a, Output> + 'a,
    {
        BoxedParser {
            parser: Box::new(parser),
        }
    }
}

impl<'a, Output> Parser<'a, Output> for BoxedParser<'a, Output> {
    fn parse(&self, input: &'a str) -> ParseResult<'a, Output> {
        self.parser.parse(input)
    }
}

/// Transforms the value of a successful parse; failures pass through.
pub fn map<'a, P, F, A, B>(parser: P, map_fn: F) -> impl Parser<'a, B>
where
    P: Parser<'a, A>,
    F: Fn(A) -> B,
{
    move |input| {
        parser
            .parse(input)
            .map(|(next_input, result)| (next_input, map_fn(result)))
    }
}

/// Always succeeds with a clone of `value`, consuming nothing.
pub fn pure<'a, A>(value: A) -> impl Parser<'a, A>
where
    A: Clone,
{
    move |input: &'a str| -> ParseResult<'a, A> { Ok((input, value.clone())) }
}

/// Monadic sequencing: on success of `parser`, `f` picks the parser to run
/// on the remainder; on failure, the failure propagates untouched.
pub fn and_then<'a, P, F, A, B, NextP>(parser: P, f: F) -> impl Parser<'a, B>
where
    P: Parser<'a, A>,
    NextP: Parser<'a, B>,
    F: Fn(A) -> NextP,
{
    move |input| match parser.parse(input) {
        Ok((next_input, result)) => f(result).parse(next_input),
        Err(failure) => Err(failure),
    }
}

/// Runs two parsers in sequence, keeping both results.
pub fn pair<'a, P1, P2, R1, R2>(parser1: P1, parser2: P2) -> impl Parser<'a, (R1, R2)>
where
    P1: Parser<'a, R1>,
    P2: Parser<'a, R2>,
{
    move |input| {
        parser1.parse(input).and_then(|(next_input, result1)| {
            parser2
                .parse(next_input)
                .map(|(last_input, result2)| (last_input, (result1, result2)))
        })
    }
}

pub fn left<'a, P1, P2, R1, R2>(parser1: P1, parser2: P2) -> impl Parser<'a, R1>
where
    P1: Parser<'a, R1>,
    P2: Parser<'a, R2>,
{
    map(pair(parser1, parser2), |(left, _right)| left)
}

pub fn right<'a, P1, P2, R1, R2>(parser1: P1, parser2: P2) -> impl Parser<'a, R2>
where
    P1: Parser<'a, R1>,
    P2: Parser<'a, R2>,
{
    map(pair(parser1, parser2), |(_left, right)| right)
}

/// Consumes one character, whatever it is. Fails only at end of input.
pub fn any_char(input: &str) -> ParseResult<'_, char> {
    match input.chars().next() {
        Some(next) => Ok((&input[next.len_utf8()..], next)),
        None => Err((input, ParseError::new("any character", "end of input"))),
    }
}

/// Consumes one character accepted by `predicate`. On rejection the failure
/// remainder is the original input, not the post-consumption one.
pub fn satisfy<'a, F>(predicate: F) -> impl Parser<'a, char>
where
    F: Fn(char) -> bool,
{
    move |input: &'a str| match any_char.parse(input) {
        Ok((next_input, c)) if predicate(c) => Ok((next_input, c)),
        Ok((_, c)) => Err((
            input,
            ParseError::new("a matching character", format!("'{c}'")),
        )),
        Err(failure) => Err(failure),
    }
}

/// Matches `expected` character by character. A mid-literal mismatch rewinds
/// to the start of the literal, so `literal` is safe inside alternation
/// without an extra [`attempt`].
pub fn literal<'a>(expected: &'static str) -> impl Parser<'a, &'static str> {
    attempt(move |input: &'a str| {
        let mut rest = input;
        for want in expected.chars() {
            match satisfy(move |c| c == want).parse(rest) {
                Ok((next_input, _)) => rest = next_input,
                Err((at, _)) => {
                    return Err((at, ParseError::new(format!("\"{expected}\""), found_in(at))))
                }
            }
        }
        Ok((rest, expected))
    })
}

/// Succeeds only when nothing remains to be consumed.
pub fn end_of_input(input: &str) -> ParseResult<'_, ()> {
    if input.is_empty() {
        Ok((input, ()))
    } else {
        Err((input, ParseError::new("end of input", found_in(input))))
    }
}

/// Fails immediately with the given description, consuming nothing.
pub fn fail<'a, A>(expected: impl Into<String>, found: impl Into<String>) -> impl Parser<'a, A> {
    let error = ParseError::new(expected, found);
    move |input: &'a str| -> ParseResult<'a, A> { Err((input, error.clone())) }
}

/// Runs `parser`; on failure, discards whatever remainder it reported and
/// restores the input `attempt` was given. This is what lets a composite
/// parser take part in alternation without leaking partial consumption.
pub fn attempt<'a, P, A>(parser: P) -> impl Parser<'a, A>
where
    P: Parser<'a, A>,
{
    move |input: &'a str| parser.parse(input).map_err(|(_, error)| (input, error))
}

/// Alternation: on failure of `parser1`, runs `parser2` on the remainder the
/// failure reported. Composite alternatives must be [`attempt`]-wrapped or
/// `parser2` will resume from the wrong position.
pub fn or_else<'a, P1, P2, A>(parser1: P1, parser2: P2) -> impl Parser<'a, A>
where
    P1: Parser<'a, A>,
    P2: Parser<'a, A>,
{
    move |input| match parser1.parse(input) {
        Ok(success) => Ok(success),
        Err((next_input, _)) => parser2.parse(next_input),
    }
}

/// Ordered alternation over a list: the first success wins, no longest-match
/// disambiguation. When every alternative fails (or the list is empty) the
/// reported error is `expected = description, found = "no match"` — earlier
/// branches' errors are not kept.
pub fn choice<'a, A>(
    description: &'static str,
    parsers: Vec<BoxedParser<'a, A>>,
) -> impl Parser<'a, A> {
    move |input: &'a str| {
        let mut rest = input;
        for parser in &parsers {
            match parser.parse(rest) {
                Ok(success) => return Ok(success),
                Err((next_input, _)) => rest = next_input,
            }
        }
        Err((rest, ParseError::new(description, "no match")))
    }
}

/// Greedy one-or-more repetition. The first application must succeed; later
/// failures end the run with the remainder of the last success. An iteration
/// that succeeds without consuming anything also ends the run, so a
/// zero-width parser cannot loop forever.
pub fn many1<'a, P, A>(parser: P) -> impl Parser<'a, Vec<A>>
where
    P: Parser<'a, A>,
{
    move |input: &'a str| -> ParseResult<'a, Vec<A>> {
        let (next_input, first) = parser.parse(input)?;
        let mut results = vec![first];
        let mut progressed = next_input.len() < input.len();
        let mut rest = next_input;
        while progressed {
            match parser.parse(rest) {
                Ok((next_input, item)) => {
                    progressed = next_input.len() < rest.len();
                    rest = next_input;
                    results.push(item);
                }
                Err(_) => break,
            }
        }
        Ok((rest, results))
    }
}

/// Greedy zero-or-more repetition; never fails.
pub fn many<'a, P, A>(parser: P) -> impl Parser<'a, Vec<A>>
where
    P: Parser<'a, A>,
{
    move |input: &'a str| -> ParseResult<'a, Vec<A>> {
        let mut rest = input;
        let mut results = Vec::new();
        while let Ok((next_input, item)) = parser.parse(rest) {
            let progressed = next_input.len() < rest.len();
            rest = next_input;
            results.push(item);
            if !progressed {
                break;
            }
        }
        Ok((rest, results))
    }
}

/// One or more `parser` results separated by `separator`, separators
/// discarded. The repeated `separator`-then-`parser` step backtracks as a
/// unit: a separator followed by a failing element leaves the remainder at
/// the last complete element.
pub fn sep_by1<'a, P, S, A, B>(parser: P, separator: S) -> impl Parser<'a, Vec<A>>
where
    P: Parser<'a, A>,
    S: Parser<'a, B>,
{
    move |input: &'a str| -> ParseResult<'a, Vec<A>> {
        let (next_input, first) = parser.parse(input)?;
        let mut results = vec![first];
        let mut rest = next_input;
        loop {
            let step = separator
                .parse(rest)
                .and_then(|(after_sep, _)| parser.parse(after_sep));
            match step {
                Ok((next_input, item)) => {
                    let progressed = next_input.len() < rest.len();
                    rest = next_input;
                    results.push(item);
                    if !progressed {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
        Ok((rest, results))
    }
}

/// Zero or more `parser` results separated by `separator`.
pub fn sep_by<'a, P, S, A, B>(parser: P, separator: S) -> impl Parser<'a, Vec<A>>
where
    P: Parser<'a, A>,
    S: Parser<'a, B>,
{
    let inner = sep_by1(parser, separator);
    move |input: &'a str| -> ParseResult<'a, Vec<A>> {
        match inner.parse(input) {
            Ok(success) => Ok(success),
            Err((next_input, _)) => Ok((next_input, Vec::new())),
        }
    }
}
