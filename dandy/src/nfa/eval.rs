//! Step-by-step NFA evaluation, exposed for the `dandy` CLI's inspection subcommand.
//! Mirrors [`crate::dfa::eval::DfaEvaluator`], but tracks a whole ε-closed subset of
//! states instead of a single one.

use crate::alphabet;
use crate::nfa::Nfa;
use crate::set::OrderedSet;

/// A cursor over an [`Nfa`], advanced one byte at a time.
#[derive(Debug, Clone)]
pub struct NfaEvaluator<'a> {
    nfa: &'a Nfa,
    current: OrderedSet,
}

impl<'a> NfaEvaluator<'a> {
    pub fn new(nfa: &'a Nfa) -> Self {
        let initial = OrderedSet::from_iter_sorted(nfa.initial_states().iter().copied());
        Self {
            current: nfa.epsilon_closure(&initial),
            nfa,
        }
    }

    pub fn current_states(&self) -> &[usize] {
        self.current.as_slice()
    }

    pub fn is_accepting(&self) -> bool {
        let accepting = OrderedSet::from_iter_sorted(self.nfa.accepting_states().iter().copied());
        OrderedSet::intersects(&self.current, &accepting)
    }

    /// Advances by one byte. Rejects (empties the current set) on ε or an
    /// out-of-alphabet byte, exactly as [`Nfa::recognize`] does per-byte.
    pub fn step(&mut self, c: u8) {
        if c == alphabet::EPSILON {
            self.current = OrderedSet::new();
            return;
        }
        let Some(idx) = self.nfa.alphabet().iter().position(|&a| a == c) else {
            self.current = OrderedSet::new();
            return;
        };
        let mut next = OrderedSet::new();
        for q in self.current.iter() {
            next.union_in_place(&self.nfa.transitions_from(q, idx));
        }
        self.current = self.nfa.epsilon_closure(&next);
    }

    pub fn step_all(&mut self, w: &[u8]) {
        for &c in w {
            self.step(c);
        }
    }
}

impl<'a> From<&'a Nfa> for NfaEvaluator<'a> {
    fn from(nfa: &'a Nfa) -> Self {
        Self::new(nfa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_by_step_matches_recognize() {
        let nfa = Nfa::kleene(Nfa::from_char(b'a', b"ab").unwrap()).unwrap();
        let mut eval = NfaEvaluator::new(&nfa);
        assert!(eval.is_accepting());
        eval.step_all(b"aaaa");
        assert_eq!(eval.is_accepting(), nfa.recognize(b"aaaa"));
        eval.step(b'b');
        assert!(!eval.is_accepting());
    }
}
