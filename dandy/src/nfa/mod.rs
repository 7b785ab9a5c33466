//! Nondeterministic finite automata over the fixed byte alphabet, with the distinguished
//! ε symbol (§4.4 of the design) and the Thompson-construction combinators (§4.5) that
//! the regex compiler drives to build one from a parsed regular expression.
//!
//! An [`Nfa`] permits multiple initial and final states in general (needed by the file
//! loader, [`parse`]), but every combinator in this module is called with, and always
//! produces, a single-initial/single-final instance along the regex-compilation path —
//! the stronger invariant is a convention of the combinators, not a separate type.

pub mod parse;
pub mod eval;

use crate::alphabet::{self, AlphabetError, SymbolIndex};
use crate::dfa::{Dfa, DfaState};
use crate::set::{OrderedSet, Stack};
use crate::table::Table;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NfaError {
    #[error("initial state set must be non-empty")]
    EmptyInitialSet,
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
    #[error("symbol '{0}' ({0}) is not part of this NFA's alphabet", *.0 as char)]
    SymbolNotInAlphabet(u8),
    #[error("operand automata have different alphabets")]
    AlphabetMismatch,
}

/// A deterministic finite automaton's non-deterministic cousin: `(Q, I, F, Σ, Δ)`.
#[derive(Debug, Clone)]
pub struct Nfa {
    alphabet: Rc<[u8]>,
    symbol_index: SymbolIndex,
    /// `transitions[state][symbol index]` is the (possibly empty) set of successor states.
    transitions: Vec<Vec<OrderedSet>>,
    initial: OrderedSet,
    accepting: OrderedSet,
}

impl PartialEq for Nfa {
    fn eq(&self, other: &Self) -> bool {
        self.alphabet == other.alphabet
            && self.initial == other.initial
            && self.accepting == other.accepting
            && self.transitions == other.transitions
    }
}
impl Eq for Nfa {}

impl Nfa {
    /// Builds a new NFA with `q + 1` states `{0, ..., q}`, no transitions yet. If `ε`
    /// isn't part of `alphabet`, it's prepended (§3: "Σ is taken to always contain ε
    /// after construction").
    pub fn new(q: usize, i: &[usize], f: &[usize], alphabet: &[u8]) -> Result<Self, NfaError> {
        if i.is_empty() {
            return Err(NfaError::EmptyInitialSet);
        }
        if f.is_empty() {
            return Err(NfaError::EmptyAcceptingSet);
        }
        if alphabet.is_empty() {
            return Err(NfaError::EmptyAlphabet);
        }

        let full_alphabet: Vec<u8> = if alphabet.contains(&alphabet::EPSILON) {
            alphabet.to_vec()
        } else {
            let mut v = Vec::with_capacity(alphabet.len() + 1);
            v.push(alphabet::EPSILON);
            v.extend_from_slice(alphabet);
            v
        };
        let symbol_index = SymbolIndex::build(&full_alphabet)?;

        let transitions = vec![vec![OrderedSet::new(); full_alphabet.len()]; q + 1];

        let mut initial = OrderedSet::new();
        for &s in i {
            if s > q {
                return Err(NfaError::InitialStateOutOfRange(s, q));
            }
            initial.push(s);
        }

        let mut accepting = OrderedSet::new();
        for &s in f {
            if s > q {
                return Err(NfaError::AcceptingStateOutOfRange(s, q));
            }
            accepting.push(s);
        }

        Ok(Self {
            alphabet: Rc::from(full_alphabet),
            symbol_index,
            transitions,
            initial,
            accepting,
        })
    }

    /// Adds `q2` to `Δ(q1, c)`, keeping the target set sorted and duplicate-free.
    pub fn add_transition(&mut self, q1: usize, c: u8, q2: usize) -> Result<(), NfaError> {
        let max = self.max_state();
        if q1 > max {
            return Err(NfaError::StateOutOfRange(q1, max));
        }
        if q2 > max {
            return Err(NfaError::StateOutOfRange(q2, max));
        }
        let idx = self
            .symbol_index
            .lookup(c)
            .ok_or(NfaError::SymbolNotInAlphabet(c))?;
        self.transitions[q1][idx].push(q2);
        Ok(())
    }

    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    pub fn max_state(&self) -> usize {
        self.transitions.len() - 1
    }

    pub fn initial_states(&self) -> &[usize] {
        self.initial.as_slice()
    }

    pub fn accepting_states(&self) -> &[usize] {
        self.accepting.as_slice()
    }

    /// The successor set for `state` on the symbol at alphabet position `sym_idx`.
    pub(crate) fn transitions_from(&self, state: usize, sym_idx: usize) -> OrderedSet {
        self.transitions[state][sym_idx].clone()
    }

    fn epsilon_idx(&self) -> usize {
        self.symbol_index
            .lookup(alphabet::EPSILON)
            .expect("ε is always present in an Nfa's alphabet")
    }

    /// The least set `R* ⊇ R` closed under ε-transitions, computed with the worklist
    /// algorithm of §4.4: seed the worklist with `R`, and whenever a state is newly
    /// added to the result, push it too so its own ε-successors get explored.
    pub fn epsilon_closure(&self, r: &OrderedSet) -> OrderedSet {
        let eps = self.epsilon_idx();
        let mut closure = r.clone();
        let mut worklist = Stack::from_iter(r.iter());
        while !worklist.is_empty() {
            let q = worklist.pop();
            for q2 in self.transitions[q][eps].iter() {
                if closure.push(q2) {
                    worklist.push(q2);
                }
            }
        }
        closure
    }

    /// Decides whether `w` is accepted, by subset-style traversal: start at the
    /// ε-closure of the initial states, and for each byte move to the ε-closure of the
    /// union of successors (§4.4).
    pub fn recognize(&self, w: &[u8]) -> bool {
        tracing::trace!(len = w.len(), "simulating nfa");
        let mut r = self.epsilon_closure(&self.initial);
        let eps = self.epsilon_idx();
        for &c in w {
            if c == alphabet::EPSILON {
                return false;
            }
            let Some(idx) = self.symbol_index.lookup(c) else {
                return false;
            };
            if idx == eps {
                return false;
            }
            let mut next = OrderedSet::new();
            for q in r.iter() {
                next.union_in_place(&self.transitions[q][idx]);
            }
            r = self.epsilon_closure(&next);
        }
        OrderedSet::intersects(&r, &self.accepting)
    }

    /// Copies every transition of `src` into `self`, each state offset by `offset`.
    /// Both automata must share the same alphabet (checked by the caller), so symbol
    /// indices line up one-to-one; this is the "graft" helper of §4.5/§9, replacing the
    /// reference implementation's deep-copy-with-offset.
    fn graft(&mut self, src: &Nfa, offset: usize) {
        for (q, row) in src.transitions.iter().enumerate() {
            for (sym, targets) in row.iter().enumerate() {
                for target in targets.iter() {
                    self.transitions[q + offset][sym].push(target + offset);
                }
            }
        }
    }

    fn require_same_alphabet(a: &Nfa, b: &Nfa) -> Result<(), NfaError> {
        if a.alphabet == b.alphabet {
            Ok(())
        } else {
            Err(NfaError::AlphabetMismatch)
        }
    }

    /// Thompson construction for a single character: states `{0, 1}`, `I = {0}`,
    /// `F = {1}`, transition `0 --c--> 1`.
    pub fn from_char(c: u8, alphabet: &[u8]) -> Result<Self, NfaError> {
        let mut nfa = Self::new(1, &[0], &[1], alphabet)?;
        nfa.add_transition(0, c, 1)?;
        Ok(nfa)
    }

    /// Thompson construction for union: a fresh start/end state ε-bridge both operands
    /// in parallel (§4.5).
    pub fn union(a: Nfa, b: Nfa) -> Result<Self, NfaError> {
        Self::require_same_alphabet(&a, &b)?;
        let q = a.max_state() + b.max_state() + 3;
        let q0 = 0;
        let qf = q;
        let a_offset = 1;
        let b_offset = a.max_state() + 2;

        let mut nfa = Self::new(q, &[q0], &[qf], &a.alphabet)?;
        nfa.graft(&a, a_offset);
        nfa.graft(&b, b_offset);

        for &s in a.initial_states() {
            nfa.add_transition(q0, alphabet::EPSILON, s + a_offset)?;
        }
        for &s in b.initial_states() {
            nfa.add_transition(q0, alphabet::EPSILON, s + b_offset)?;
        }
        for &s in a.accepting_states() {
            nfa.add_transition(s + a_offset, alphabet::EPSILON, qf)?;
        }
        for &s in b.accepting_states() {
            nfa.add_transition(s + b_offset, alphabet::EPSILON, qf)?;
        }
        Ok(nfa)
    }

    /// Thompson construction for concatenation: every accepting state of `a` gets an
    /// ε-edge to every initial state of (the shifted) `b` (§4.5).
    pub fn concat(a: Nfa, b: Nfa) -> Result<Self, NfaError> {
        Self::require_same_alphabet(&a, &b)?;
        let q = a.max_state() + b.max_state() + 1;
        let b_offset = a.max_state() + 1;

        let i: Vec<usize> = a.initial_states().to_vec();
        let f: Vec<usize> = b.accepting_states().iter().map(|&s| s + b_offset).collect();

        let mut nfa = Self::new(q, &i, &f, &a.alphabet)?;
        nfa.graft(&a, 0);
        nfa.graft(&b, b_offset);

        for &af in a.accepting_states() {
            for &bi in b.initial_states() {
                nfa.add_transition(af, alphabet::EPSILON, bi + b_offset)?;
            }
        }
        Ok(nfa)
    }

    /// Thompson construction for Kleene star: a fresh start/end state straddles a
    /// shifted copy of `a`, with ε-edges for zero occurrences, one pass-through, and
    /// repetition (§4.5).
    pub fn kleene(a: Nfa) -> Result<Self, NfaError> {
        let q = a.max_state() + 3;
        let q0 = 0;
        let qf = q;
        let offset = 1;

        let mut nfa = Self::new(q, &[q0], &[qf], &a.alphabet)?;
        nfa.graft(&a, offset);

        for &s in a.initial_states() {
            nfa.add_transition(q0, alphabet::EPSILON, s + offset)?;
        }
        for &s in a.accepting_states() {
            nfa.add_transition(s + offset, alphabet::EPSILON, qf)?;
            for &i in a.initial_states() {
                nfa.add_transition(s + offset, alphabet::EPSILON, i + offset)?;
            }
        }
        nfa.add_transition(q0, alphabet::EPSILON, qf)?;
        Ok(nfa)
    }

    /// Explicit subset construction (never invoked by [`Nfa::recognize`]): builds an
    /// equivalent DFA over this NFA's alphabet minus ε, which has no meaning as an
    /// input symbol once simulation has been reduced to a single state per step.
    pub fn to_dfa(&self) -> Dfa {
        let eps = self.epsilon_idx();
        let dfa_alphabet: Vec<u8> = self
            .alphabet
            .iter()
            .copied()
            .filter(|&c| c != alphabet::EPSILON)
            .collect();
        let dfa_alphabet = if dfa_alphabet.is_empty() {
            vec![alphabet::EPSILON]
        } else {
            dfa_alphabet
        };

        let mut subset_to_idx: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut dfa_states: Vec<DfaState> = Vec::new();
        let mut worklist: Vec<Vec<usize>> = Vec::new();

        let start = self.epsilon_closure(&self.initial);
        let start_key = start.as_slice().to_vec();
        subset_to_idx.insert(start_key.clone(), 0);
        dfa_states.push(DfaState {
            accepting: OrderedSet::intersects(&start, &self.accepting),
            transitions: vec![None; dfa_alphabet.len()],
        });
        worklist.push(start_key);

        while let Some(subset_key) = worklist.pop() {
            let idx = subset_to_idx[&subset_key];
            let subset = OrderedSet::from_iter_sorted(subset_key.iter().copied());

            for (col, &c) in dfa_alphabet.iter().enumerate() {
                let sym_idx = self.symbol_index.lookup(c).expect("dfa_alphabet drawn from self.alphabet");
                if sym_idx == eps {
                    continue;
                }
                let mut moved = OrderedSet::new();
                for q in subset.iter() {
                    moved.union_in_place(&self.transitions[q][sym_idx]);
                }
                let closure = self.epsilon_closure(&moved);
                if closure.is_empty() {
                    continue;
                }
                let key = closure.as_slice().to_vec();
                let target_idx = *subset_to_idx.entry(key.clone()).or_insert_with(|| {
                    dfa_states.push(DfaState {
                        accepting: OrderedSet::intersects(&closure, &self.accepting),
                        transitions: vec![None; dfa_alphabet.len()],
                    });
                    worklist.push(key.clone());
                    dfa_states.len() - 1
                });
                dfa_states[idx].transitions[col] = Some(target_idx);
            }
        }

        Dfa::from_raw_parts(dfa_alphabet, dfa_states, 0)
    }

    /// Re-parseable dump in the §6.2 NFA file format.
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", self.max_state()));
        out.push_str(&format!("{}\n", self.initial.len()));
        out.push_str(
            &self
                .initial
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        );
        out.push('\n');
        out.push_str(&format!("{}\n", self.accepting.len()));
        out.push_str(
            &self
                .accepting
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        );
        out.push('\n');
        out.push_str(&String::from_utf8_lossy(&self.alphabet));
        out.push('\n');
        for (q, row) in self.transitions.iter().enumerate() {
            for (idx, targets) in row.iter().enumerate() {
                for target in targets.iter() {
                    out.push_str(&format!("{q} {} {target}\n", self.alphabet[idx] as char));
                }
            }
        }
        out
    }

    /// Aligned, human-facing ASCII grid (not re-parseable), for inspection.
    pub fn ascii_table(&self) -> String {
        let mut t = Table::new();
        let mut header = vec![String::from("Δ")];
        header.extend(self.alphabet.iter().map(|&c| (c as char).to_string()));
        t.push_row(header);
        for (q, row) in self.transitions.iter().enumerate() {
            let mut cells = vec![format!(
                "{}{}{q}",
                if self.initial.contains(q) { "->" } else { "" },
                if self.accepting.contains(q) { "*" } else { "" },
            )];
            cells.extend(row.iter().map(|targets| {
                if targets.is_empty() {
                    String::from("{}")
                } else {
                    format!(
                        "{{{}}}",
                        targets
                            .iter()
                            .map(|s| s.to_string())
                            .collect::<Vec<_>>()
                            .join(" ")
                    )
                }
            }));
            t.push_row(cells);
        }
        t.render(" ")
    }
}

impl std::fmt::Display for Nfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ascii_table())
    }
}
