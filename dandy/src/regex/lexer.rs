//! Tokenizer for the regex grammar: splits a source line into characters, operators and
//! parenthesis, skipping whitespace, and tracking each token's byte offset for caret
//! diagnostics.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Character,
    Operator,
    Parenthesis,
}

/// A single lexed token: its kind, the source byte it came from, and that byte's offset
/// in the original source (used only for caret-pointing diagnostics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: TokenKind,
    pub value: u8,
    pub source_index: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("unsupported character {:?}", *.0 as char)]
    UnsupportedByte(u8, usize),
}

impl LexError {
    pub fn source_index(&self) -> usize {
        match self {
            LexError::UnsupportedByte(_, i) => *i,
        }
    }
}

fn is_operator(b: u8) -> bool {
    matches!(b, b'+' | b'.' | b'*')
}

fn is_parenthesis(b: u8) -> bool {
    matches!(b, b'(' | b')')
}

/// Lexes `source` into a sequence of [`Lexeme`]s. Whitespace bytes are skipped; any other
/// byte outside the fixed working alphabet (`a-z`, `A-Z`, `0-9`) or the operator/
/// parenthesis set is a [`LexError`].
pub fn lex(source: &str) -> Result<Vec<Lexeme>, LexError> {
    let mut out = Vec::new();
    for (i, b) in source.bytes().enumerate() {
        if b.is_ascii_whitespace() {
            continue;
        }
        let kind = if b.is_ascii_alphanumeric() {
            TokenKind::Character
        } else if is_operator(b) {
            TokenKind::Operator
        } else if is_parenthesis(b) {
            TokenKind::Parenthesis
        } else {
            return Err(LexError::UnsupportedByte(b, i));
        };
        out.push(Lexeme {
            kind,
            value: b,
            source_index: i,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_whitespace() {
        let lexemes = lex(" a + b ").unwrap();
        assert_eq!(lexemes.len(), 3);
        assert_eq!(lexemes[0].value, b'a');
        assert_eq!(lexemes[1].value, b'+');
        assert_eq!(lexemes[2].value, b'b');
    }

    #[test]
    fn records_source_index() {
        let lexemes = lex("a*").unwrap();
        assert_eq!(lexemes[1].source_index, 1);
    }

    #[test]
    fn rejects_unsupported_byte() {
        let err = lex("a|b").unwrap_err();
        assert_eq!(err, LexError::UnsupportedByte(b'|', 1));
    }
}
