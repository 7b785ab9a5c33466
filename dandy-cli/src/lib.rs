//! Plumbing shared by the `mygrep`, `mydot` and `dandy` binaries: loading automaton
//! files off disk into a convenient sum type, and wiring up ambient `tracing` logging
//! (§4.9/§4.10 of the design).

pub mod automata;
pub mod logging;
