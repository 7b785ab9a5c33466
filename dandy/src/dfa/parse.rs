//! Turns a [`ParsedDfa`] (the raw numeric fields read off disk) into a validated [`Dfa`],
//! reporting the source line a malformed field came from.

use crate::diagnostics::{Diagnostic, SourcePos};
use crate::dfa::{Dfa, DfaError};
use crate::parser::ParsedDfa;
use thiserror::Error;

/// Line numbers are fixed by the file format: `Q`, `q0`, `|F|`, the `F` line and the
/// alphabet line occupy the first five lines; transitions start on line six.
const FIRST_TRANSITION_LINE: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DfaLoadError {
    #[error("{source}")]
    Invalid {
        line: usize,
        #[source]
        source: DfaError,
    },
    #[error("transition references state {1}, which is greater than Q={2}")]
    TransitionStateOutOfRange(usize, usize, usize),
}

impl DfaLoadError {
    fn line(&self) -> usize {
        match self {
            DfaLoadError::Invalid { line, .. } => *line,
            DfaLoadError::TransitionStateOutOfRange(line, ..) => *line,
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

/// The header field a given [`DfaError`] can only have come from, per the fixed line
/// layout of the `.dfa` format.
fn header_line(source: &DfaError) -> usize {
    match source {
        DfaError::InitialStateOutOfRange(..) => 2,
        DfaError::EmptyAcceptingSet | DfaError::AcceptingStateOutOfRange(..) => 4,
        DfaError::EmptyAlphabet | DfaError::Alphabet(_) => 5,
        DfaError::StateOutOfRange(..) | DfaError::SymbolNotInAlphabet(_) => FIRST_TRANSITION_LINE,
    }
}

impl TryFrom<ParsedDfa> for Dfa {
    type Error = DfaLoadError;

    fn try_from(value: ParsedDfa) -> Result<Self, Self::Error> {
        let ParsedDfa {
            max_state,
            initial_state,
            accepting,
            alphabet,
            transitions,
        } = value;

        let mut dfa = Dfa::new(max_state, initial_state, &accepting, &alphabet).map_err(|source| {
            DfaLoadError::Invalid {
                line: header_line(&source),
                source,
            }
        })?;
        tracing::debug!(states = max_state + 1, "validated dfa header");

        for (i, (q1, c, q2)) in transitions.into_iter().enumerate() {
            if q1 > max_state || q2 > max_state {
                return Err(DfaLoadError::TransitionStateOutOfRange(
                    FIRST_TRANSITION_LINE + i,
                    q1.max(q2),
                    max_state,
                ));
            }
            dfa.add_transition(q1, c, q2).map_err(|source| DfaLoadError::Invalid {
                line: FIRST_TRANSITION_LINE + i,
                source,
            })?;
        }

        Ok(dfa)
    }
}
