//! Turns a [`ParsedNfa`] (the raw numeric fields read off disk) into a validated [`Nfa`],
//! reporting the source line a malformed field came from.

use crate::diagnostics::{Diagnostic, SourcePos};
use crate::nfa::{Nfa, NfaError};
use crate::parser::ParsedNfa;
use thiserror::Error;

/// `Q`, `|I|`, the `I` line, `|F|`, the `F` line and the alphabet line occupy the first
/// six lines; transitions start on line seven.
const FIRST_TRANSITION_LINE: usize = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NfaLoadError {
    #[error("{source}")]
    Invalid {
        line: usize,
        #[source]
        source: NfaError,
    },
    #[error("transition references state {1}, which is greater than Q={2}")]
    TransitionStateOutOfRange(usize, usize, usize),
}

impl NfaLoadError {
    fn line(&self) -> usize {
        match self {
            NfaLoadError::Invalid { line, .. } => *line,
            NfaLoadError::TransitionStateOutOfRange(line, ..) => *line,
        }
    }

    /// Renders this error as a `path:line:col: reason` diagnostic (§4.8/§7), `col` being 1
    /// since every field malformed here spans a whole line of the file.
    pub fn to_diagnostic(&self, path: impl Into<String>) -> Diagnostic {
        Diagnostic {
            path: Some(path.into()),
            pos: SourcePos {
                line: self.line(),
                column: 1,
            },
            message: self.to_string(),
            caret: None,
        }
    }
}

/// The header field a given [`NfaError`] can only have come from, per the fixed line
/// layout of the `.nfa` format.
fn header_line(source: &NfaError) -> usize {
    match source {
        NfaError::EmptyInitialSet | NfaError::InitialStateOutOfRange(..) => 3,
        NfaError::EmptyAcceptingSet | NfaError::AcceptingStateOutOfRange(..) => 5,
        NfaError::EmptyAlphabet | NfaError::Alphabet(_) => 6,
        NfaError::StateOutOfRange(..)
        | NfaError::SymbolNotInAlphabet(_)
        | NfaError::AlphabetMismatch => FIRST_TRANSITION_LINE,
    }
}

impl TryFrom<ParsedNfa> for Nfa {
    type Error = NfaLoadError;

    fn try_from(value: ParsedNfa) -> Result<Self, Self::Error> {
        let ParsedNfa {
            max_state,
            initial,
            accepting,
            alphabet,
            transitions,
        } = value;

        let mut nfa = Nfa::new(max_state, &initial, &accepting, &alphabet).map_err(|source| {
            NfaLoadError::Invalid {
                line: header_line(&source),
                source,
            }
        })?;
        tracing::debug!(states = max_state + 1, "validated nfa header");

        for (i, (q1, c, q2)) in transitions.into_iter().enumerate() {
            if q1 > max_state || q2 > max_state {
                return Err(NfaLoadError::TransitionStateOutOfRange(
                    FIRST_TRANSITION_LINE + i,
                    q1.max(q2),
                    max_state,
                ));
            }
            nfa.add_transition(q1, c, q2).map_err(|source| NfaLoadError::Invalid {
                line: FIRST_TRANSITION_LINE + i,
                source,
            })?;
        }

        Ok(nfa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_nfa_with_epsilon_moves() {
        let parsed = crate::parser::nfa("2\n1\n0\n1\n2\n&ab\n0 & 1\n1 a 2\n2 b 2\n").unwrap();
        let nfa: Nfa = parsed.try_into().unwrap();
        assert!(nfa.recognize(b"ab"));
        assert!(!nfa.recognize(b"a"));
    }

    #[test]
    fn out_of_range_transition_is_rejected() {
        let parsed = ParsedNfa {
            max_state: 1,
            initial: vec![0],
            accepting: vec![1],
            alphabet: b"&a".to_vec(),
            transitions: vec![(0, b'a', 9)],
        };
        let err: NfaLoadError = Nfa::try_from(parsed).unwrap_err();
        assert_eq!(err, NfaLoadError::TransitionStateOutOfRange(7, 9, 1));
    }

    #[test]
    fn diagnostic_reports_path_line_and_column() {
        let parsed = ParsedNfa {
            max_state: 1,
            initial: vec![],
            accepting: vec![0],
            alphabet: b"&a".to_vec(),
            transitions: vec![],
        };
        let err: NfaLoadError = Nfa::try_from(parsed).unwrap_err();
        let rendered = err.to_diagnostic("states.nfa").to_string();
        assert_eq!(rendered, "states.nfa:3:1: initial state set must be non-empty\n");
    }
}
