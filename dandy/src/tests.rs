//! Crate-level property tests covering the invariants the core pipeline is built on:
//! ordered-set sortedness/disjointness, ε-closure fixed points, Thompson-construction
//! equivalence, implicit-vs-explicit concatenation, and file-format round-tripping.
//! Deterministic scenario tests live alongside the modules they exercise; this module is
//! for properties that only make sense over many random instances.

use crate::alphabet;
use crate::dfa::Dfa;
use crate::nfa::Nfa;
use crate::set::OrderedSet;
use crate::{parser, regex};
use ::regex::Regex as LibRegex;
use proptest::prelude::*;
use rand::prelude::*;

proptest! {
    /// Pushing into an [`OrderedSet`] always leaves it strictly increasing.
    #[test]
    fn ordered_set_push_stays_sorted(values in prop::collection::vec(0usize..200, 0..100)) {
        let mut set = OrderedSet::new();
        for v in values {
            set.push(v);
        }
        let slice = set.as_slice();
        for w in slice.windows(2) {
            prop_assert!(w[0] < w[1]);
        }
    }

    /// Disjointness as reported by [`OrderedSet::are_disjoint`] agrees with an actual
    /// intersection test, and is symmetric.
    #[test]
    fn ordered_set_disjoint_law(
        a in prop::collection::vec(0usize..40, 0..20),
        b in prop::collection::vec(0usize..40, 0..20),
    ) {
        let sa = OrderedSet::from_iter_sorted(a.iter().copied());
        let sb = OrderedSet::from_iter_sorted(b.iter().copied());
        let real_disjoint = !a.iter().any(|x| b.contains(x));
        prop_assert_eq!(OrderedSet::are_disjoint(&sa, &sb), real_disjoint);
        prop_assert_eq!(OrderedSet::are_disjoint(&sa, &sb), OrderedSet::are_disjoint(&sb, &sa));
    }

    /// ε-closure is idempotent and extensive: closing twice changes nothing, and every
    /// seed state survives into its own closure.
    #[test]
    fn epsilon_closure_is_a_fixed_point(seed_states in prop::collection::vec(0usize..8, 1..5)) {
        let nfa = random_epsilon_nfa();
        let seed = OrderedSet::from_iter_sorted(seed_states.into_iter().filter(|&s| s <= nfa.max_state()));
        let once = nfa.epsilon_closure(&seed);
        let twice = nfa.epsilon_closure(&once);
        prop_assert_eq!(once.as_slice(), twice.as_slice());
        for s in seed.iter() {
            prop_assert!(once.contains(s));
        }
    }

    /// A DFA's transition table round-trips through [`Dfa::to_table`] and the file loader.
    #[test]
    fn dfa_table_reparses_to_an_identical_dfa(dfa in arb_dfa(12)) {
        let reparsed: Dfa = parser::dfa(&dfa.to_table()).unwrap().try_into().unwrap();
        prop_assert_eq!(dfa, reparsed);
    }

    /// Minimizing a DFA never changes the language it recognizes.
    #[test]
    fn minimize_preserves_language(dfa in arb_dfa(12), words in prop::collection::vec(word_over(b"abc"), 0..30)) {
        let mut minimized = dfa.clone();
        minimized.minimize();
        for w in &words {
            prop_assert_eq!(dfa.recognize(w), minimized.recognize(w));
        }
    }

    /// Thompson union accepts exactly the words either operand accepts.
    #[test]
    fn thompson_union_is_either_operand(a in single_byte_regex(), b in single_byte_regex(), word in word_over(b"abcdef")) {
        prop_assume!(a != b);
        let na = regex::parse(&a).unwrap().to_nfa();
        let nb = regex::parse(&b).unwrap().to_nfa();
        let union = Nfa::union(regex::parse(&a).unwrap().to_nfa(), regex::parse(&b).unwrap().to_nfa()).unwrap();
        prop_assert_eq!(union.recognize(&word), na.recognize(&word) || nb.recognize(&word));
    }

    /// Thompson kleene-star always accepts the empty word and any repetition of the base
    /// character.
    #[test]
    fn thompson_kleene_accepts_repetitions_of_the_base_language(c in prop::sample::select(&b"abcdef"[..]), reps in 0usize..6) {
        let base = Nfa::from_char(c, b"abcdef").unwrap();
        let star = Nfa::kleene(base).unwrap();
        prop_assert!(star.recognize(b""));
        let word = vec![c; reps];
        prop_assert!(star.recognize(&word));
    }

    /// Inserting an explicit `.` between every pair of juxtaposed atoms doesn't change the
    /// compiled language.
    #[test]
    fn implicit_concat_matches_explicit_concat(atoms in prop::collection::vec(prop::sample::select(&b"abcdef"[..]), 1..6)) {
        let implicit: String = atoms.iter().map(|&c| c as char).collect();
        let explicit: String = atoms.iter().map(|&c| (c as char).to_string()).collect::<Vec<_>>().join(".");
        let n1 = regex::parse(&implicit).unwrap().to_nfa();
        let n2 = regex::parse(&explicit).unwrap().to_nfa();
        prop_assert_eq!(n1.recognize(&atoms), n2.recognize(&atoms));
    }

    /// Differential test against the `regex` crate: for a regex built only from `+`
    /// (union), juxtaposition (concat) and `*` (Kleene star) over a two-symbol alphabet,
    /// our compiled NFA agrees with a real regex engine's anchored match.
    #[test]
    fn compiled_nfa_agrees_with_a_real_regex_engine(ast in arb_regex_ast(4), word in word_over(b"ab")) {
        let ours = render_dandy(&ast);
        let reference = render_standard(&ast);
        let nfa = regex::parse(&ours).unwrap().to_nfa();
        let lib_re = LibRegex::new(&format!("^(?:{reference})$")).unwrap();
        let as_str = std::str::from_utf8(&word).unwrap();
        prop_assert_eq!(nfa.recognize(&word), lib_re.is_match(as_str));
    }
}

#[test]
fn empty_source_is_a_syntax_error() {
    assert!(regex::parse("").is_err());
}

#[test]
fn single_char_regex_rejects_the_empty_word() {
    let nfa = regex::parse("a").unwrap().to_nfa();
    assert!(nfa.recognize(b"a"));
    assert!(!nfa.recognize(b""));
}

#[test]
fn subset_construction_preserves_the_language() {
    let nfa = regex::parse("(a+b)*c").unwrap().to_nfa();
    let dfa = nfa.to_dfa();
    for w in [&b"c"[..], b"ac", b"abababc", b"b", b""] {
        assert_eq!(dfa.recognize(w), nfa.recognize(w));
    }
}

/// A small random NFA with a handful of ε-transitions scattered among its states, for
/// ε-closure property tests.
fn random_epsilon_nfa() -> Nfa {
    let mut rng = thread_rng();
    let q = rng.gen_range(1..8);
    let mut nfa = Nfa::new(q, &[0], &[q], b"a").unwrap();
    for from in 0..=q {
        let fanout = rng.gen_range(0..=3);
        for _ in 0..fanout {
            let to = rng.gen_range(0..=q);
            nfa.add_transition(from, alphabet::EPSILON, to).unwrap();
        }
    }
    nfa
}

/// A small random total-ish DFA over the fixed alphabet `abc`, for minimization and
/// table-round-trip property tests.
fn arb_dfa(max_states: usize) -> impl Strategy<Value = Dfa> {
    (1usize..max_states).prop_flat_map(|q| {
        let accepting = prop::collection::hash_set(0..=q, 1..=(q + 1)).prop_map(|s| s.into_iter().collect::<Vec<_>>());
        let transitions = prop::collection::vec(0..=q, (q + 1) * 3);
        (Just(q), accepting, transitions).prop_map(|(q, accepting, transitions)| {
            let mut dfa = Dfa::new(q, 0, &accepting, b"abc").unwrap();
            for (i, target) in transitions.into_iter().enumerate() {
                let state = i / 3;
                let c = b"abc"[i % 3];
                dfa.add_transition(state, c, target).unwrap();
            }
            dfa
        })
    })
}

fn word_over(alphabet: &'static [u8]) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(alphabet), 0..8)
}

fn single_byte_regex() -> impl Strategy<Value = String> {
    prop::sample::select(&b"abcdef"[..]).prop_map(|c| (c as char).to_string())
}

#[derive(Debug, Clone)]
enum RegexAst {
    Char(u8),
    Union(Box<RegexAst>, Box<RegexAst>),
    Concat(Box<RegexAst>, Box<RegexAst>),
    Star(Box<RegexAst>),
}

fn arb_regex_ast(depth: u32) -> impl Strategy<Value = RegexAst> {
    let leaf = prop::sample::select(&b"ab"[..]).prop_map(RegexAst::Char);
    leaf.prop_recursive(depth, 32, 4, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| RegexAst::Union(Box::new(a), Box::new(b))),
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| RegexAst::Concat(Box::new(a), Box::new(b))),
            inner.prop_map(|a| RegexAst::Star(Box::new(a))),
        ]
    })
}

/// Renders an AST in this crate's regex syntax (`+` for union, `.` for concat, `*` postfix).
fn render_dandy(ast: &RegexAst) -> String {
    match ast {
        RegexAst::Char(c) => (*c as char).to_string(),
        RegexAst::Union(a, b) => format!("({}+{})", render_dandy(a), render_dandy(b)),
        RegexAst::Concat(a, b) => format!("({}.{})", render_dandy(a), render_dandy(b)),
        RegexAst::Star(a) => format!("({})*", render_dandy(a)),
    }
}

/// Renders the same AST in standard regex syntax (`|` for union, implicit concat), for
/// differential testing against the `regex` crate.
fn render_standard(ast: &RegexAst) -> String {
    match ast {
        RegexAst::Char(c) => (*c as char).to_string(),
        RegexAst::Union(a, b) => format!("(?:{}|{})", render_standard(a), render_standard(b)),
        RegexAst::Concat(a, b) => format!("(?:{}{})", render_standard(a), render_standard(b)),
        RegexAst::Star(a) => format!("(?:{})*", render_standard(a)),
    }
}
