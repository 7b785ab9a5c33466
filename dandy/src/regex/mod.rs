//! # Regular expressions
//!
//! A regex is built over a fixed 62-symbol working alphabet (`a-z`, `A-Z`, `0-9`) with
//! three operators: `+` for union, `.` for concatenation (also implicit between adjacent
//! atoms), and `*` for Kleene star, in that precedence order, plus parenthesis for
//! grouping.
//!
//! ```
//! use dandy::parser;
//! let regex = parser::regex("c(a+b)*c").unwrap();
//! let nfa = regex.to_nfa();
//! assert!(nfa.recognize(b"cc"));
//! assert!(nfa.recognize(b"cabbac"));
//! assert!(!nfa.recognize(b"ca"));
//! ```

pub mod lexer;

use crate::diagnostics::SourceContext;
use crate::nfa::{Nfa, NfaError};
use crate::regex::lexer::{Lexeme, TokenKind};
use thiserror::Error;

/// Every byte accepted as a regex character literal: `a-z`, `A-Z`, `0-9`.
pub const WORKING_ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegexError {
    #[error("lexical-error: unsupported character {:?}", *.1 as char)]
    Lex(usize, u8),
    #[error("syntax-error: expected ')'")]
    UnclosedGroup(usize),
    #[error("syntax-error: expected symbol")]
    ExpectedSymbol(usize),
    #[error("syntax-error: trailing characters")]
    TrailingCharacters(usize),
    #[error(transparent)]
    Nfa(#[from] NfaError),
}

impl RegexError {
    /// The byte offset in the source this error should be reported at; `None` when it
    /// points past the end of input (nothing left to point a caret at).
    fn source_index(&self, len: usize) -> usize {
        match *self {
            RegexError::Lex(i, _) => i,
            RegexError::UnclosedGroup(i)
            | RegexError::ExpectedSymbol(i)
            | RegexError::TrailingCharacters(i) => i.min(len.saturating_sub(1)),
            RegexError::Nfa(_) => 0,
        }
    }

    /// Renders this error as a `line:col: message` diagnostic with a caret under the
    /// offending byte of `source`.
    pub fn render(&self, source: &str) -> String {
        let ctx = SourceContext::new(source);
        let idx = self.source_index(source.len());
        format!("{}: {}\n{}", ctx.resolve(idx), self, ctx.caret_at(idx, 1))
    }
}

/// A compiled regular expression, ready to be turned into an NFA.
#[derive(Debug, Clone)]
pub struct Regex {
    nfa: Nfa,
}

impl Regex {
    /// Converts this regular expression into its Thompson-construction NFA. This is the
    /// only operation exposed on a compiled regex; simulate the resulting NFA directly,
    /// or convert it to a DFA first for repeated matching.
    pub fn to_nfa(self) -> Nfa {
        self.nfa
    }
}

/// Lexes and parses `source` into a [`Regex`], ready for [`Regex::to_nfa`].
#[tracing::instrument(level = "debug", skip(source), fields(len = source.len()))]
pub fn parse(source: &str) -> Result<Regex, RegexError> {
    let tokens = lexer::lex(source).map_err(|lexer::LexError::UnsupportedByte(b, i)| {
        RegexError::Lex(i, b)
    })?;
    tracing::trace!(tokens = tokens.len(), "lexed regex");
    let mut cursor = Cursor {
        tokens: &tokens,
        pos: 0,
        end: source.len(),
    };
    let nfa = parse_expr(&mut cursor)?;
    if cursor.pos != tokens.len() {
        return Err(RegexError::TrailingCharacters(cursor.peek_index()));
    }
    tracing::debug!(states = nfa.max_state() + 1, "compiled regex to nfa");
    Ok(Regex { nfa })
}

struct Cursor<'a> {
    tokens: &'a [Lexeme],
    pos: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<Lexeme> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_index(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|l| l.source_index)
            .unwrap_or(self.end)
    }

    fn bump(&mut self) -> Option<Lexeme> {
        let lex = self.peek();
        if lex.is_some() {
            self.pos += 1;
        }
        lex
    }
}

fn is_atom_start(lex: Lexeme) -> bool {
    matches!(lex.kind, TokenKind::Character) || (lex.kind == TokenKind::Parenthesis && lex.value == b'(')
}

// Expr ::= UnionVal UnionOp
fn parse_expr(c: &mut Cursor) -> Result<Nfa, RegexError> {
    let left = parse_union_val(c)?;
    parse_union_op(c, left)
}

// UnionOp ::= '+' UnionVal UnionOp | ε
fn parse_union_op(c: &mut Cursor, left: Nfa) -> Result<Nfa, RegexError> {
    match c.peek() {
        Some(lex) if lex.kind == TokenKind::Operator && lex.value == b'+' => {
            c.bump();
            let right = parse_union_val(c)?;
            let combined = Nfa::union(left, right)?;
            parse_union_op(c, combined)
        }
        _ => Ok(left),
    }
}

// UnionVal ::= ConcatVal ConcatOp
fn parse_union_val(c: &mut Cursor) -> Result<Nfa, RegexError> {
    let left = parse_concat_val(c)?;
    parse_concat_op(c, left)
}

// ConcatOp ::= ('.' | implicit) ConcatVal ConcatOp | ε
fn parse_concat_op(c: &mut Cursor, left: Nfa) -> Result<Nfa, RegexError> {
    match c.peek() {
        Some(lex) if lex.kind == TokenKind::Operator && lex.value == b'.' => {
            c.bump();
            let right = parse_concat_val(c)?;
            let combined = Nfa::concat(left, right)?;
            parse_concat_op(c, combined)
        }
        Some(lex) if is_atom_start(lex) => {
            let right = parse_concat_val(c)?;
            let combined = Nfa::concat(left, right)?;
            parse_concat_op(c, combined)
        }
        _ => Ok(left),
    }
}

// ConcatVal ::= KleeneVal KleeneOp
fn parse_concat_val(c: &mut Cursor) -> Result<Nfa, RegexError> {
    let left = parse_kleene_val(c)?;
    parse_kleene_op(c, left)
}

// KleeneOp ::= '*' KleeneOp | ε
fn parse_kleene_op(c: &mut Cursor, left: Nfa) -> Result<Nfa, RegexError> {
    match c.peek() {
        Some(lex) if lex.kind == TokenKind::Operator && lex.value == b'*' => {
            c.bump();
            let repeated = Nfa::kleene(left)?;
            parse_kleene_op(c, repeated)
        }
        _ => Ok(left),
    }
}

// KleeneVal ::= '(' Expr ')' | Character
fn parse_kleene_val(c: &mut Cursor) -> Result<Nfa, RegexError> {
    match c.bump() {
        Some(lex) if lex.kind == TokenKind::Parenthesis && lex.value == b'(' => {
            let inner = parse_expr(c)?;
            match c.bump() {
                Some(close) if close.kind == TokenKind::Parenthesis && close.value == b')' => {
                    Ok(inner)
                }
                _ => Err(RegexError::UnclosedGroup(c.peek_index())),
            }
        }
        Some(lex) if lex.kind == TokenKind::Character => {
            Ok(Nfa::from_char(lex.value, WORKING_ALPHABET)?)
        }
        Some(lex) => Err(RegexError::ExpectedSymbol(lex.source_index)),
        None => Err(RegexError::ExpectedSymbol(c.end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nfa(src: &str) -> Nfa {
        parse(src).unwrap().to_nfa()
    }

    #[test]
    fn single_char() {
        let n = nfa("a");
        assert!(!n.recognize(b""));
        assert!(n.recognize(b"a"));
    }

    #[test]
    fn union() {
        let n = nfa("a+b");
        assert!(n.recognize(b"a"));
        assert!(n.recognize(b"b"));
        assert!(!n.recognize(b"ab"));
    }

    #[test]
    fn explicit_and_implicit_concat_agree() {
        assert!(nfa("a.b").recognize(b"ab"));
        assert!(nfa("ab").recognize(b"ab"));
        assert!(!nfa("ab").recognize(b"a"));
    }

    #[test]
    fn kleene_star() {
        let n = nfa("a*");
        assert!(n.recognize(b""));
        assert!(n.recognize(b"aaaa"));
    }

    #[test]
    fn grouped_union_kleene() {
        let n = nfa("(a+b)*");
        assert!(n.recognize(b"abba"));
        assert!(n.recognize(b""));
    }

    #[test]
    fn grouped_concat_kleene() {
        let n = nfa("(a.b)*");
        assert!(n.recognize(b"abab"));
        assert!(!n.recognize(b"aba"));
    }

    #[test]
    fn double_star_is_idempotent() {
        assert!(nfa("a**").recognize(b"aa"));
    }

    #[test]
    fn union_then_concat() {
        let n = nfa("(a+b).c");
        assert!(n.recognize(b"ac"));
        assert!(n.recognize(b"bc"));
        assert!(!n.recognize(b"c"));
    }

    #[test]
    fn empty_regex_is_a_syntax_error() {
        assert_eq!(parse(""), Err(RegexError::ExpectedSymbol(0)));
    }

    #[test]
    fn unclosed_group_is_an_error() {
        assert!(matches!(parse("(a"), Err(RegexError::UnclosedGroup(_))));
    }

    #[test]
    fn trailing_characters_are_an_error() {
        assert!(matches!(parse("a)"), Err(RegexError::TrailingCharacters(_))));
    }

    #[test]
    fn unsupported_byte_is_a_lex_error() {
        assert!(matches!(parse("a|b"), Err(RegexError::Lex(1, b'|'))));
    }

    #[test]
    fn rendered_diagnostic_has_a_caret() {
        let err = parse("a|b").unwrap_err();
        let rendered = err.render("a|b");
        assert!(rendered.contains('^'));
    }
}
