//! Step-by-step DFA evaluation, exposed for the `dandy` CLI's inspection subcommand and
//! for callers who want to observe intermediate states rather than a single boolean
//! verdict from [`Dfa::recognize`](crate::dfa::Dfa::recognize).

use crate::dfa::Dfa;

/// A cursor over a [`Dfa`], advanced one byte at a time.
#[derive(Debug, Clone)]
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    current_state: Option<usize>,
}

impl<'a> DfaEvaluator<'a> {
    pub fn new(dfa: &'a Dfa) -> Self {
        Self {
            dfa,
            current_state: Some(dfa.initial_state()),
        }
    }

    /// `None` once a byte outside the alphabet or a missing transition has been seen;
    /// from then on every further step stays `None` (mirroring [`Dfa::recognize`]'s
    /// immediate rejection).
    pub fn current_state(&self) -> Option<usize> {
        self.current_state
    }

    pub fn is_accepting(&self) -> bool {
        self.current_state
            .is_some_and(|q| self.dfa.is_accepting(q))
    }

    /// Advances by one byte, returning the new state (or `None` on rejection).
    pub fn step(&mut self, c: u8) -> Option<usize> {
        let q = self.current_state?;
        self.current_state = self.dfa.step(q, c);
        self.current_state
    }

    pub fn step_all(&mut self, w: &[u8]) -> Option<usize> {
        for &c in w {
            self.step(c)?;
        }
        self.current_state
    }
}

impl<'a> From<&'a Dfa> for DfaEvaluator<'a> {
    fn from(dfa: &'a Dfa) -> Self {
        Self::new(dfa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_by_step_matches_recognize() {
        let mut dfa = Dfa::new(1, 0, &[0], b"01").unwrap();
        dfa.add_transition(0, b'0', 0).unwrap();
        dfa.add_transition(0, b'1', 1).unwrap();
        dfa.add_transition(1, b'0', 0).unwrap();
        dfa.add_transition(1, b'1', 1).unwrap();

        let mut eval = DfaEvaluator::new(&dfa);
        assert!(eval.is_accepting());
        eval.step(b'1');
        assert!(!eval.is_accepting());
        eval.step(b'0');
        assert!(eval.is_accepting());
        assert_eq!(eval.step_all(b"1101010"), Some(dfa.initial_state()));
    }

    #[test]
    fn unknown_byte_sticks_at_none() {
        let dfa = Dfa::new(0, 0, &[0], b"a").unwrap();
        let mut eval = DfaEvaluator::new(&dfa);
        assert_eq!(eval.step(b'z'), None);
        assert_eq!(eval.step(b'a'), None);
    }
}
