//! Graphviz `.dot` rendering for DFAs and NFAs (§6.3, §4.11 of the design).
//!
//! This module only produces the textual `.dot` source; invoking the external `dot`
//! binary to rasterize it to a PNG is a CLI-level concern (the `mydot` binary), kept out
//! of the library so `dandy` itself never shells out.

use crate::alphabet;
use crate::dfa::Dfa;
use crate::nfa::Nfa;
use std::fmt::Write;

/// Renders `c` the way an edge label should show it: ε (epsilon) in place of the
/// reserved `&` byte, otherwise the byte as a character.
fn label(c: u8) -> String {
    if c == alphabet::EPSILON {
        "\u{03b5}".to_string()
    } else {
        (c as char).to_string()
    }
}

impl Dfa {
    /// Renders this DFA as Graphviz `.dot` source: one invisible "start" node with an
    /// arrow into the initial state, double-circled accepting states, and one labeled
    /// edge per transition.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        out.push_str("digraph automaton {\n");
        out.push_str("    rankdir=LR;\n");
        out.push_str("    start [shape=point, style=invis];\n");
        writeln!(out, "    start -> {};", self.initial_state()).unwrap();

        for q in 0..self.state_count() {
            let shape = if self.is_accepting(q) {
                "doublecircle"
            } else {
                "circle"
            };
            writeln!(out, "    {q} [shape={shape}];").unwrap();
        }

        for q in 0..self.state_count() {
            for &c in self.alphabet() {
                if let Some(target) = self.step(q, c) {
                    writeln!(out, "    {q} -> {target} [label=\"{}\"];", label(c)).unwrap();
                }
            }
        }

        out.push_str("}\n");
        out
    }
}

impl Nfa {
    /// Renders this NFA as Graphviz `.dot` source, one invisible "start" node per
    /// initial state, double-circled accepting states, and one labeled edge per
    /// `(q, c, q')` in `Δ`.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        out.push_str("digraph automaton {\n");
        out.push_str("    rankdir=LR;\n");

        for (i, &q0) in self.initial_states().iter().enumerate() {
            writeln!(out, "    start{i} [shape=point, style=invis];").unwrap();
            writeln!(out, "    start{i} -> {q0};").unwrap();
        }

        for q in 0..=self.max_state() {
            let shape = if self.accepting_states().contains(&q) {
                "doublecircle"
            } else {
                "circle"
            };
            writeln!(out, "    {q} [shape={shape}];").unwrap();
        }

        for (idx, &c) in self.alphabet().iter().enumerate() {
            for q in 0..=self.max_state() {
                for target in self.transitions_from(q, idx).iter() {
                    writeln!(out, "    {q} -> {target} [label=\"{}\"];", label(c)).unwrap();
                }
            }
        }

        out.push_str("}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dfa_dot_has_one_start_arrow_and_double_circled_accept() {
        let mut dfa = Dfa::new(1, 0, &[1], b"ab").unwrap();
        dfa.add_transition(0, b'a', 1).unwrap();
        let dot = dfa.to_dot();
        assert!(dot.contains("start -> 0;"));
        assert!(dot.contains("1 [shape=doublecircle];"));
        assert!(dot.contains("0 -> 1 [label=\"a\"];"));
    }

    #[test]
    fn nfa_dot_renders_epsilon_as_unicode_letter() {
        let mut nfa = Nfa::new(1, &[0], &[1], b"a").unwrap();
        nfa.add_transition(0, alphabet::EPSILON, 1).unwrap();
        let dot = nfa.to_dot();
        assert!(dot.contains('\u{03b5}'));
        assert!(dot.contains("start0 -> 0;"));
    }
}
