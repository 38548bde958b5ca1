use chomsky::{
    accept,
    automaton::{AutomatonKind, Transition},
    subset_construct, AnyAutomaton, Automaton, StateSet, DFA, ENFA, EPSILON, NFA,
};
use std::{collections::BTreeSet, env, fs, path::PathBuf};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap())
        .join("tests/fixtures")
        .join(name)
}

fn load(name: &str) -> AnyAutomaton {
    let kind = match name.rsplit('.').next() {
        Some("dfa") => AutomatonKind::DFA,
        Some("nfa") => AutomatonKind::NFA,
        Some("enfa") => AutomatonKind::ENFA,
        _ => panic!("unknown automaton kind: {}", name),
    };
    let source = fs::read_to_string(fixture(name)).unwrap();
    AnyAutomaton::parse(kind, &source).unwrap()
}

fn symbols(input: &str) -> Vec<&str> {
    input
        .char_indices()
        .map(|(i, c)| &input[i..i + c.len_utf8()])
        .collect()
}

/// Every input symbol of `automaton`, plus one symbol it does not know.
fn alphabet(automaton: &impl Automaton) -> Vec<String> {
    let mut alphabet: BTreeSet<String> = automaton
        .transition_table()
        .iter()
        .filter(|t| t.symbol != EPSILON)
        .map(|t| t.symbol.to_owned())
        .collect();
    alphabet.insert("?".to_owned());
    alphabet.into_iter().collect()
}

/// Enumerate every word over `alphabet` of at most `max_len` symbols.
fn words(alphabet: &[String], max_len: usize) -> Vec<Vec<&str>> {
    let mut words = vec![vec![]];
    let mut frontier: Vec<Vec<&str>> = vec![vec![]];
    for _ in 0..max_len {
        let mut next = vec![];
        for word in &frontier {
            for symbol in alphabet {
                let mut word = word.clone();
                word.push(symbol.as_str());
                next.push(word);
            }
        }
        words.extend(next.iter().cloned());
        frontier = next;
    }
    words
}

macro_rules! define_tests {
    ($($name:ident: $file:literal, $max_len:expr;)*) => {$(
        #[test]
        fn $name() {
            let automaton = load($file);
            let dfa = automaton.clone().into_dfa();

            let alphabet = alphabet(&automaton);
            for word in words(&alphabet, $max_len) {
                assert_eq!(
                    accept(&automaton, &word),
                    accept(&dfa, &word),
                    "{:?}",
                    word
                );
            }

            // determinism: every destination is a state of the DFA.
            for Transition { to, .. } in dfa.transition_table() {
                assert!(dfa.state(to).is_some(), "missing state {}", to);
            }

            // the rendered DFA reads back as the same automaton.
            let reparsed: DFA = dfa.to_string().parse().unwrap();
            assert_eq!(reparsed, dfa);
            assert_eq!(reparsed.to_string(), dfa.to_string());
        }
    )*};
}

define_tests! {
    decimal_equivalence: "decimal.enfa", 4;
    ending_with_01_equivalence: "ending_with_01.nfa", 7;
    third_from_end_equivalence: "third_from_end.nfa", 7;
    epsilon_chain_equivalence: "epsilon_chain.enfa", 6;
}

const DECIMAL_CASES: &[(&str, bool)] = &[
    ("1111010", false),
    ("1.111010", true),
    ("+1.111010", true),
    ("-1.111010", true),
    ("1111.010", true),
    (".1111010", true),
    ("123455.1111010", true),
    ("+123455.1111010", true),
    ("-123455.1111010", true),
    ("a123455.1111010", false),
    ("12.3455.1111010", false),
    ("12.345519999999999111010", true),
    ("a12.345519999999999111010", false),
    ("12.3ff45519999999999111010", false),
];

#[test]
fn decimal_numbers() {
    let enfa = ENFA::from_file(fixture("decimal.enfa")).unwrap();
    let dfa = subset_construct(&enfa);
    for &(input, expected) in DECIMAL_CASES {
        assert_eq!(accept(&enfa, &symbols(input)), expected, "eNFA: {}", input);
        assert_eq!(accept(&dfa, &symbols(input)), expected, "DFA: {}", input);
    }
}

#[test]
fn strings_ending_with_01() {
    let nfa = NFA::from_file(fixture("ending_with_01.nfa")).unwrap();
    let dfa = subset_construct(&nfa);
    let cases = [
        ("0", false),
        ("1", false),
        ("", false),
        ("1111010", false),
        ("11110101", true),
        ("111101", true),
        ("00000001", true),
        ("00000010", false),
        ("11111111101010100101001010100000010", false),
        ("111111111010101001010010101000000101", true),
        ("ab01", false),
        ("01a", false),
    ];
    for (input, expected) in cases {
        assert_eq!(accept(&nfa, &symbols(input)), expected, "NFA: {}", input);
        assert_eq!(accept(&dfa, &symbols(input)), expected, "DFA: {}", input);
    }
}

#[test]
fn third_symbol_from_the_end() {
    let nfa = NFA::from_file(fixture("third_from_end.nfa")).unwrap();
    let dfa = subset_construct(&nfa);
    assert_eq!(dfa.len(), 8);
    assert_eq!(dfa.start(), "q0");
    assert!(accept(&dfa, &symbols("0100")));
    assert!(!accept(&dfa, &symbols("0010")));
}

#[test]
fn rendering_keeps_every_line() {
    let source = fs::read_to_string(fixture("decimal.enfa")).unwrap();
    let nfa: NFA = source.parse().unwrap();

    let sorted = |text: &str| {
        let mut lines: Vec<String> = text.trim().lines().map(ToOwned::to_owned).collect();
        lines.sort();
        lines
    };
    assert_eq!(sorted(&source), sorted(&nfa.to_string()));
}

#[test]
fn epsilon_closure_of_a_cycle() {
    let enfa = ENFA::from_file(fixture("epsilon_chain.enfa")).unwrap();
    let closed = enfa.eclose(&StateSet::singleton("a"));
    assert_eq!(closed.canonical(), "a,b,c");
    assert_eq!(enfa.eclose(&closed), closed);

    let dfa = subset_construct(&enfa);
    assert_eq!(dfa.start(), "a,b,c");
    assert!(accept(&dfa, &["x"]));
    assert!(accept(&dfa, &["y", "x", "x"]));
    assert!(!accept(&dfa, &["y"]));
}

#[test]
fn construction_is_deterministic() {
    let first = load("decimal.enfa").into_dfa().to_string();
    let second = load("decimal.enfa").into_dfa().to_string();
    assert_eq!(first, second);
}
