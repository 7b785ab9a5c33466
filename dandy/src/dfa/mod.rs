//! Deterministic finite automata: `(Q, q0, F, Σ, δ)` with `δ` a total-looking function
//! that may hold unset ("invalid") entries (§4.3 of the design).
//!
//! Building, mutating (via [`Dfa::add_transition`]) and recognizing are the only
//! operations the core regex pipeline needs from this module — it never produces a
//! `Dfa` itself (that's the NFA's job). Everything else here (product construction,
//! minimization, equivalence, table rendering) is ambient tooling reachable from the
//! `dandy` CLI subcommand, not exercised by `mygrep`/`mydot`.

pub mod eval;
pub mod parse;

use crate::alphabet::{AlphabetError, SymbolIndex};
use crate::nfa::Nfa;
use crate::table::Table;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DfaError {
    #[error("initial state {0} is out of range [0, {1}]")]
    InitialStateOutOfRange(usize, usize),
    #[error("accepting set must be non-empty")]
    EmptyAcceptingSet,
    #[error("accepting state {0} is out of range [0, {1}]")]
    AcceptingStateOutOfRange(usize, usize),
    #[error("alphabet must be non-empty")]
    EmptyAlphabet,
    #[error(transparent)]
    Alphabet(#[from] AlphabetError),
    #[error("state {0} is out of range [0, {1}]")]
    StateOutOfRange(usize, usize),
    #[error("symbol '{0}' ({0}) is not part of this DFA's alphabet", *.0 as char)]
    SymbolNotInAlphabet(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DfaState {
    pub(crate) accepting: bool,
    /// Indexed by alphabet position; `None` is the unset/"invalid" transition.
    pub(crate) transitions: Vec<Option<usize>>,
}

/// A deterministic finite automaton over a fixed byte alphabet drawn from
/// `[alphabet::FIRST, alphabet::LAST]`.
#[derive(Debug, Clone)]
pub struct Dfa {
    alphabet: Rc<[u8]>,
    symbol_index: SymbolIndex,
    states: Vec<DfaState>,
    initial_state: usize,
}

impl PartialEq for Dfa {
    fn eq(&self, other: &Self) -> bool {
        self.alphabet == other.alphabet
            && self.initial_state == other.initial_state
            && self.states == other.states
    }
}

impl Dfa {
    /// Builds a new DFA with `q + 1` states `{0, ..., q}`, all transitions initially
    /// unset.
    pub fn new(q: usize, q0: usize, f: &[usize], alphabet: &[u8]) -> Result<Self, DfaError> {
        if q0 > q {
            return Err(DfaError::InitialStateOutOfRange(q0, q));
        }
        if f.is_empty() {
            return Err(DfaError::EmptyAcceptingSet);
        }
        if alphabet.is_empty() {
            return Err(DfaError::EmptyAlphabet);
        }
        let symbol_index = SymbolIndex::build(alphabet)?;

        let mut states = vec![
            DfaState {
                accepting: false,
                transitions: vec![None; alphabet.len()],
            };
            q + 1
        ];
        for &accepting in f {
            if accepting > q {
                return Err(DfaError::AcceptingStateOutOfRange(accepting, q));
            }
            states[accepting].accepting = true;
        }

        Ok(Self {
            alphabet: Rc::from(alphabet),
            symbol_index,
            states,
            initial_state: q0,
        })
    }

    pub fn add_transition(&mut self, q1: usize, c: u8, q2: usize) -> Result<(), DfaError> {
        let max = self.states.len() - 1;
        if q1 > max {
            return Err(DfaError::StateOutOfRange(q1, max));
        }
        if q2 > max {
            return Err(DfaError::StateOutOfRange(q2, max));
        }
        let idx = self
            .symbol_index
            .lookup(c)
            .ok_or(DfaError::SymbolNotInAlphabet(c))?;
        self.states[q1].transitions[idx] = Some(q2);
        Ok(())
    }

    /// Decides whether `w` is accepted. Rejects immediately on any byte outside the
    /// alphabet or on a missing transition; the empty word is accepted iff the initial
    /// state is accepting.
    pub fn recognize(&self, w: &[u8]) -> bool {
        let mut q = self.initial_state;
        for &c in w {
            let Some(idx) = self.symbol_index.lookup(c) else {
                return false;
            };
            match self.states[q].transitions[idx] {
                Some(next) => q = next,
                None => return false,
            }
        }
        self.states[q].accepting
    }

    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn initial_state(&self) -> usize {
        self.initial_state
    }

    pub fn is_accepting(&self, state: usize) -> bool {
        self.states[state].accepting
    }

    /// Single-step transition used by [`eval::DfaEvaluator`]: `None` on an out-of-alphabet
    /// byte or a missing transition, exactly [`Dfa::recognize`]'s per-byte rejection rule.
    pub(crate) fn step(&self, q: usize, c: u8) -> Option<usize> {
        let idx = self.symbol_index.lookup(c)?;
        self.states[q].transitions[idx]
    }

    /// Converts this DFA into an equivalent general NFA (every DFA already is one,
    /// modulo representation): a single initial state and singleton transition cells.
    pub fn to_nfa(&self) -> Nfa {
        let accepting: Vec<usize> = (0..self.states.len())
            .filter(|&q| self.states[q].accepting)
            .collect();
        let mut nfa = Nfa::new(
            self.states.len() - 1,
            &[self.initial_state],
            &accepting,
            &self.alphabet,
        )
        .expect("a valid Dfa converts to a valid Nfa");

        for (q, state) in self.states.iter().enumerate() {
            for (idx, &target) in state.transitions.iter().enumerate() {
                if let Some(target) = target {
                    nfa.add_transition(q, self.alphabet[idx], target)
                        .expect("transition byte is part of the shared alphabet");
                }
            }
        }
        nfa
    }

    /// Builds a `Dfa` directly from already-validated parts, skipping the public
    /// constructor's precondition checks. Used by [`crate::nfa::Nfa::to_dfa`]'s subset
    /// construction, which already guarantees a non-empty alphabet and in-range states.
    pub(crate) fn from_raw_parts(alphabet: Vec<u8>, states: Vec<DfaState>, initial_state: usize) -> Self {
        let symbol_index = SymbolIndex::build(&alphabet).expect("subset construction reuses a validated alphabet");
        Self {
            alphabet: Rc::from(alphabet),
            symbol_index,
            states,
            initial_state,
        }
    }

    /// Renders the transition table as plain ASCII, one row per state, columns ordered
    /// per the alphabet; re-parseable by [`parse`].
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", self.states.len() - 1));
        out.push_str(&format!("{}\n", self.initial_state));
        let finals: Vec<_> = (0..self.states.len())
            .filter(|&q| self.states[q].accepting)
            .collect();
        out.push_str(&format!("{}\n", finals.len()));
        out.push_str(
            &finals
                .iter()
                .map(|q| q.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        );
        out.push('\n');
        out.push_str(&String::from_utf8_lossy(&self.alphabet));
        out.push('\n');
        for (q, state) in self.states.iter().enumerate() {
            for (idx, &target) in state.transitions.iter().enumerate() {
                if let Some(target) = target {
                    out.push_str(&format!("{q} {} {target}\n", self.alphabet[idx] as char));
                }
            }
        }
        out
    }

    /// Renders an aligned, human-facing ASCII grid (not re-parseable), for inspection.
    pub fn ascii_table(&self) -> String {
        let mut t = Table::new();
        let mut header = vec![String::from("δ")];
        header.extend(self.alphabet.iter().map(|&c| (c as char).to_string()));
        t.push_row(header);
        for (q, state) in self.states.iter().enumerate() {
            let mut row = vec![format!(
                "{}{}{q}",
                if q == self.initial_state { "->" } else { "" },
                if state.accepting { "*" } else { "" },
            )];
            row.extend(state.transitions.iter().map(|t| match t {
                Some(q) => q.to_string(),
                None => String::from("-"),
            }));
            t.push_row(row);
        }
        t.render(" ")
    }

    fn reachable_states(&self) -> Vec<usize> {
        let mut seen = vec![false; self.states.len()];
        let mut worklist = VecDeque::from([self.initial_state]);
        seen[self.initial_state] = true;
        let mut order = Vec::new();
        while let Some(q) = worklist.pop_front() {
            order.push(q);
            for &target in self.states[q].transitions.iter().flatten() {
                if !seen[target] {
                    seen[target] = true;
                    worklist.push_back(target);
                }
            }
        }
        order
    }

    /// Drops every state unreachable from the initial state, renumbering the rest.
    pub fn remove_unreachable_states(&mut self) {
        let reachable = self.reachable_states();
        let mut remap = vec![None; self.states.len()];
        for (new_idx, &old_idx) in reachable.iter().enumerate() {
            remap[old_idx] = Some(new_idx);
        }
        let mut sorted_reachable = reachable.clone();
        sorted_reachable.sort_unstable();

        let mut new_states = Vec::with_capacity(sorted_reachable.len());
        for &old_idx in &sorted_reachable {
            let old = &self.states[old_idx];
            let transitions = old
                .transitions
                .iter()
                .map(|t| t.and_then(|target| remap[target]))
                .collect();
            new_states.push(DfaState {
                accepting: old.accepting,
                transitions,
            });
        }
        self.initial_state = remap[self.initial_state].expect("initial state is reachable");
        self.states = new_states;
    }

    /// Computes the coarsest partition of states that is consistent with acceptance and
    /// transition behavior (Moore's partition-refinement algorithm), returning each
    /// state's equivalence-class id.
    fn state_equivalence_classes(&self) -> Vec<usize> {
        let n = self.states.len();
        let mut classes: Vec<usize> = self
            .states
            .iter()
            .map(|s| if s.accepting { 1 } else { 0 })
            .collect();

        loop {
            let signatures: Vec<Vec<usize>> = (0..n)
                .map(|q| {
                    let mut sig = vec![classes[q]];
                    sig.extend(self.states[q].transitions.iter().map(|t| match t {
                        Some(target) => classes[*target] + 1,
                        None => 0,
                    }));
                    sig
                })
                .collect();

            let mut seen: HashMap<Vec<usize>, usize> = HashMap::new();
            let mut new_classes = vec![0; n];
            for q in 0..n {
                let next_id = seen.len();
                let id = *seen.entry(signatures[q].clone()).or_insert(next_id);
                new_classes[q] = id;
            }

            if new_classes == classes {
                return classes;
            }
            classes = new_classes;
        }
    }

    /// Merges non-distinguishable states, without first removing unreachable ones.
    pub fn merge_nondistinguishable_states(&mut self) {
        let classes = self.state_equivalence_classes();
        let class_count = classes.iter().copied().max().map_or(0, |m| m + 1);

        let mut representative = vec![None; class_count];
        for (q, &class) in classes.iter().enumerate() {
            representative[class].get_or_insert(q);
        }

        let mut new_states = Vec::with_capacity(class_count);
        for class in 0..class_count {
            let rep = representative[class].unwrap();
            let old = &self.states[rep];
            let transitions = old
                .transitions
                .iter()
                .map(|t| t.map(|target| classes[target]))
                .collect();
            new_states.push(DfaState {
                accepting: old.accepting,
                transitions,
            });
        }
        self.initial_state = classes[self.initial_state];
        self.states = new_states;
    }

    /// Minimizes this DFA in place: drops unreachable states, then merges
    /// non-distinguishable ones.
    pub fn minimize(&mut self) {
        self.remove_unreachable_states();
        self.merge_nondistinguishable_states();
    }

    fn product_construction(
        &self,
        other: &Self,
        accept: impl Fn(bool, bool) -> bool,
    ) -> Option<Self> {
        if self.alphabet != other.alphabet {
            return None;
        }

        let mut pair_to_idx: HashMap<(usize, usize), usize> = HashMap::new();
        let mut states = Vec::new();
        let mut worklist = VecDeque::new();

        let start = (self.initial_state, other.initial_state);
        pair_to_idx.insert(start, 0);
        worklist.push_back(start);
        states.push(DfaState {
            accepting: false,
            transitions: vec![None; self.alphabet.len()],
        });

        while let Some((a, b)) = worklist.pop_front() {
            let idx = pair_to_idx[&(a, b)];
            states[idx].accepting = accept(self.states[a].accepting, other.states[b].accepting);
            for sym in 0..self.alphabet.len() {
                let (ta, tb) = (
                    self.states[a].transitions[sym],
                    other.states[b].transitions[sym],
                );
                if let (Some(ta), Some(tb)) = (ta, tb) {
                    let next_idx = *pair_to_idx.entry((ta, tb)).or_insert_with(|| {
                        states.push(DfaState {
                            accepting: false,
                            transitions: vec![None; self.alphabet.len()],
                        });
                        worklist.push_back((ta, tb));
                        states.len() - 1
                    });
                    states[idx].transitions[sym] = Some(next_idx);
                }
            }
        }

        Some(Self {
            alphabet: self.alphabet.clone(),
            symbol_index: self.symbol_index.clone(),
            states,
            initial_state: 0,
        })
    }

    pub fn union(&self, other: &Self) -> Option<Self> {
        self.product_construction(other, |a, b| a || b)
    }

    pub fn intersection(&self, other: &Self) -> Option<Self> {
        self.product_construction(other, |a, b| a && b)
    }

    pub fn difference(&self, other: &Self) -> Option<Self> {
        self.product_construction(other, |a, b| a && !b)
    }

    pub fn symmetric_difference(&self, other: &Self) -> Option<Self> {
        self.product_construction(other, |a, b| a != b)
    }

    /// Complements this DFA in place (flips every state's acceptance). Only meaningful
    /// if this DFA is total over its alphabet; a missing transition still rejects.
    pub fn invert(&mut self) {
        for state in &mut self.states {
            state.accepting = !state.accepting;
        }
    }

    /// Structural language equivalence, decided by exploring the product automaton's
    /// reachable state pairs and failing fast on any accepting-status mismatch.
    pub fn equivalent_to(&self, other: &Self) -> bool {
        if self.alphabet != other.alphabet {
            return false;
        }
        let mut seen = std::collections::HashSet::new();
        let mut worklist = VecDeque::from([(self.initial_state, other.initial_state)]);
        seen.insert((self.initial_state, other.initial_state));

        while let Some((a, b)) = worklist.pop_front() {
            if self.states[a].accepting != other.states[b].accepting {
                return false;
            }
            for sym in 0..self.alphabet.len() {
                let (ta, tb) = (
                    self.states[a].transitions[sym],
                    other.states[b].transitions[sym],
                );
                match (ta, tb) {
                    (None, None) => {}
                    (Some(ta), Some(tb)) => {
                        if seen.insert((ta, tb)) {
                            worklist.push_back((ta, tb));
                        }
                    }
                    _ => return false,
                }
            }
        }
        true
    }
}

impl std::fmt::Display for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ascii_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Σ = {0,1}, accepts binary numbers divisible by two (§8 scenario).
    fn divisible_by_two() -> Dfa {
        let mut dfa = Dfa::new(1, 0, &[0], b"01").unwrap();
        dfa.add_transition(0, b'0', 0).unwrap();
        dfa.add_transition(0, b'1', 1).unwrap();
        dfa.add_transition(1, b'0', 0).unwrap();
        dfa.add_transition(1, b'1', 1).unwrap();
        dfa
    }

    #[test]
    fn recognizes_binary_numbers_divisible_by_two() {
        let dfa = divisible_by_two();
        assert!(!dfa.recognize(b""));
        assert!(dfa.recognize(b"0"));
        assert!(!dfa.recognize(b"1"));
        assert!(dfa.recognize(b"00"));
        assert!(dfa.recognize(b"10"));
        assert!(!dfa.recognize(b"01"));
        assert!(!dfa.recognize(b"101"));
        assert!(dfa.recognize(b"1101010"));
    }

    #[test]
    fn rejects_out_of_alphabet_bytes() {
        let dfa = divisible_by_two();
        assert!(!dfa.recognize(b"012"));
    }

    #[test]
    fn missing_transition_rejects_rather_than_errors() {
        let mut dfa = Dfa::new(1, 0, &[1], b"ab").unwrap();
        dfa.add_transition(0, b'a', 1).unwrap();
        // no transition for 'b' from state 0
        assert!(!dfa.recognize(b"b"));
    }

    #[test]
    fn minimize_preserves_language() {
        let mut dfa = divisible_by_two();
        let before = dfa.clone();
        dfa.minimize();
        assert!(dfa.equivalent_to(&before));
    }

    #[test]
    fn union_is_language_union() {
        let a = {
            let mut d = Dfa::new(1, 0, &[1], b"ab").unwrap();
            d.add_transition(0, b'a', 1).unwrap();
            d.add_transition(0, b'b', 0).unwrap();
            d.add_transition(1, b'a', 1).unwrap();
            d.add_transition(1, b'b', 1).unwrap();
            d
        };
        let b = {
            let mut d = Dfa::new(1, 0, &[1], b"ab").unwrap();
            d.add_transition(0, b'a', 0).unwrap();
            d.add_transition(0, b'b', 1).unwrap();
            d.add_transition(1, b'a', 1).unwrap();
            d.add_transition(1, b'b', 1).unwrap();
            d
        };
        let union = a.union(&b).unwrap();
        assert!(union.recognize(b"a"));
        assert!(union.recognize(b"b"));
        assert!(!union.recognize(b""));
    }

    #[test]
    fn different_alphabets_cannot_be_combined() {
        let a = Dfa::new(0, 0, &[0], b"a").unwrap();
        let b = Dfa::new(0, 0, &[0], b"b").unwrap();
        assert!(a.union(&b).is_none());
    }
}
