//! # dandy parser
//! Parsers for the DFA/NFA file format and for regular expressions.
//!
//! ## Format for DFAs and NFAs
//! A DFA or NFA file is a UTF-8 text file of numeric header lines followed by transitions:
//! - `Q`, the highest state number used (states are numbered `0..=Q`)
//! - for an NFA: `|I|` then a line of `|I|` whitespace-separated initial state numbers;
//!   for a DFA: a single `q0` line
//! - `|F|` then a line of `|F|` whitespace-separated accepting state numbers
//! - the alphabet line: every symbol is a single byte in `[38, 122]`, written with no
//!   separators; an NFA's alphabet must include `&` for ε
//! - zero or more `q c q'` transition lines
//!
//! Here is a DFA accepting binary strings with an even number of `1`s:
//! ```text
//! 1
//! 0
//! 1
//! 0
//! 01
//! 0 0 0
//! 0 1 1
//! 1 0 0
//! 1 1 1
//! ```
//!
//! ## Format for regular expressions
//! A regex is a single line built from character literals over `a-z`, `A-Z` and `0-9`
//! (the fixed 62-symbol working alphabet), the union operator `+`, the concatenation
//! operator `.` (also implicit between adjacent atoms), the Kleene star `*`, and
//! parenthesis for grouping, in precedence order `+` < `.` < `*`. `ab*` matches `"a"`
//! followed by zero or more `"b"`s; `(a.b)+c` matches `"ab"` or `"c"`.

mod fa;

pub use fa::{ParsedDfa, ParsedNfa};

use crate::regex::{Regex, RegexError};
use nom::{combinator::all_consuming, error::Error, Finish};

/// Parses a DFA according to the format above. The whole string must be parsable, otherwise this function errors.
/// Note that the result is a [ParsedDfa], which is not guaranteed to be a valid [crate::dfa::Dfa]. Use
/// [TryInto::try_into] to convert a [ParsedDfa] to a [crate::dfa::Dfa].
pub fn dfa(input: &str) -> Result<ParsedDfa, Error<&str>> {
    all_consuming(fa::full_dfa)(input)
        .finish()
        .map(|(_, dfa)| dfa)
}

/// Parses a NFA according to the format above. The whole string must be parsable, otherwise this function errors.
/// Note that the result is a [ParsedNfa], which is not guaranteed to be a valid [crate::nfa::Nfa]. Use
/// [TryInto::try_into] to convert a [ParsedNfa] to a [crate::nfa::Nfa].
pub fn nfa(input: &str) -> Result<ParsedNfa, Error<&str>> {
    all_consuming(fa::full_nfa)(input)
        .finish()
        .map(|(_, nfa)| nfa)
}

/// Parses a regular expression according to the format above, reporting lex and syntax
/// errors with a caret pointing at the offending byte.
pub fn regex(input: &str) -> Result<Regex, RegexError> {
    crate::regex::parse(input)
}
