//! # dandy
//!
//! `dandy` compiles regular expressions to byte-level finite automata and simulates them,
//! backed by a restricted byte alphabet (`[38, 122]`, with `&` reserved as ε) and a
//! text file format for loading DFAs and NFAs directly.
//!
//! ## Usage
//!
//! ```rust
//! use dandy::parser;
//!
//! let regex = parser::regex("c(a+b)*c").unwrap();
//! let nfa = regex.to_nfa();
//! assert!(nfa.recognize(b"cabc"));
//! assert!(!nfa.recognize(b"ca"));
//!
//! let dfa = nfa.to_dfa();
//! assert!(dfa.recognize(b"cabc"));
//! ```
//!
//! ## File format
//!
//! A DFA or NFA file is a sequence of numeric header lines (state count, initial
//! state(s), accepting states) followed by an alphabet line and zero or more `q c q'`
//! transition lines. See [`parser`] for the exact grammar.
//!
//! ```rust
//! use dandy::dfa::Dfa;
//!
//! // Accepts binary strings with an even number of `1`s.
//! let source = "1\n0\n1\n0\n01\n0 0 0\n0 1 1\n1 0 0\n1 1 1\n";
//! let dfa: Dfa = dandy::parser::dfa(source).unwrap().try_into().unwrap();
//! assert!(dfa.recognize(b"1101010"));
//! assert!(!dfa.recognize(b"1"));
//! ```
//!
//! ## Operations
//!
//! This library supports:
//!
//! * [Parsing](parser::dfa) and [validating](dfa::parse) DFAs
//! * [Parsing](parser::nfa) and [validating](nfa::parse) NFAs, with or without ε-moves
//! * [Parsing regular expressions](parser::regex) and [compiling them to NFAs](regex::Regex::to_nfa)
//! * Generating a re-parsable table for [DFAs](dfa::Dfa::to_table) and [NFAs](nfa::Nfa::to_table)
//! * Converting [DFAs to NFAs](dfa::Dfa::to_nfa) and [NFAs to DFAs](nfa::Nfa::to_dfa) (explicit subset construction)
//! * [Checking whether two DFAs are equivalent](dfa::Dfa::equivalent_to)
//! * Checking if a word is accepted by a [DFA](dfa::Dfa::recognize) or [NFA](nfa::Nfa::recognize)
//! * [Step-by-step evaluation](dfa::eval::DfaEvaluator) of a word, for the CLI's inspection subcommand
//! * [Identifying and removing unreachable states](dfa::Dfa::remove_unreachable_states) from a DFA
//! * [Identifying and merging non-distinguishable states](dfa::Dfa::state_equivalence_classes) from a DFA
//! * [Minimizing a DFA](dfa::Dfa::minimize) (the two steps above, combined)
//! * [Rendering a DFA or NFA as Graphviz](dot) for the `mydot` CLI tool
//!
//! ## Non-goals
//!
//! Character classes, anchors, backreferences, quantifiers beyond `*`, capture groups,
//! Unicode beyond 7-bit ASCII, and lexicographic word enumeration are out of scope.

pub mod alphabet;
pub mod dfa;
pub mod diagnostics;
pub mod dot;
pub mod nfa;
pub mod parser;
pub mod regex;
pub mod set;
mod table;

#[cfg(test)]
mod tests;
