use chomsky::{
    grammar::{
        binarize, eliminate_epsilon, eliminate_nongenerating, eliminate_unit_pairs,
        eliminate_unreachable, eliminate_useless, to_normal_form,
    },
    Cfg, GrammarError, Symbol,
};
use std::{
    collections::{BTreeMap, BTreeSet},
    env,
    path::PathBuf,
};

fn load(name: &str) -> Cfg {
    Cfg::from_file(
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap())
            .join("tests/fixtures")
            .join(format!("{}.cfg", name)),
    )
    .unwrap()
}

macro_rules! define_tests {
    ($($name:ident: $transform:expr;)*) => {$(
        #[test]
        fn $name() {
            let cfg = load(stringify!($name));
            let expected = load(concat!(stringify!($name), ".expected"));
            let transformed = ($transform)(&cfg).unwrap();
            assert_eq!(transformed.to_string(), expected.to_string());
        }
    )*};
}

define_tests! {
    unreachable: eliminate_unreachable;
    nongenerating: eliminate_nongenerating;
    useless: eliminate_useless;
    epsilon1: eliminate_epsilon;
    epsilon2: eliminate_epsilon;
    unit_pairs: eliminate_unit_pairs;
}

type Word = Vec<String>;

/// Compute every terminal string of at most `max_len` symbols derived from
/// the start variable.
fn language(cfg: &Cfg, max_len: usize) -> BTreeSet<Word> {
    let Some(start) = cfg.start() else {
        return BTreeSet::new();
    };

    let mut derived: BTreeMap<String, BTreeSet<Word>> = cfg
        .variables()
        .map(|v| (v.id().to_owned(), BTreeSet::new()))
        .collect();

    let mut changed = true;
    while changed {
        changed = false;
        for variable in cfg.variables() {
            let mut found = BTreeSet::new();
            for production in variable.productions() {
                let mut partials: BTreeSet<Word> = [vec![]].into_iter().collect();
                for symbol in production.symbols() {
                    let suffixes: BTreeSet<Word> = match symbol {
                        Symbol::Terminal(..) if symbol.is_epsilon() => [vec![]].into(),
                        Symbol::Terminal(value) => [vec![value.clone()]].into(),
                        Symbol::Variable(id) => derived[id].clone(),
                    };
                    let suffixes = &suffixes;
                    partials = partials
                        .iter()
                        .flat_map(|prefix| {
                            suffixes.iter().filter_map(move |suffix| {
                                (prefix.len() + suffix.len() <= max_len)
                                    .then(|| [&prefix[..], &suffix[..]].concat())
                            })
                        })
                        .collect();
                }
                found.extend(partials);
            }
            let entry = derived.get_mut(variable.id()).unwrap();
            let before = entry.len();
            entry.extend(found);
            changed |= entry.len() != before;
        }
    }

    derived.remove(start).unwrap_or_default()
}

const STEPS: &[(&str, fn(&Cfg) -> Result<Cfg, GrammarError>)] = &[
    ("eliminate_unreachable", eliminate_unreachable),
    ("eliminate_nongenerating", eliminate_nongenerating),
    ("eliminate_useless", eliminate_useless),
    ("eliminate_epsilon", eliminate_epsilon),
    ("eliminate_unit_pairs", eliminate_unit_pairs),
    ("binarize", binarize),
    ("to_normal_form", to_normal_form),
];

#[test]
fn simplification_preserves_the_language() {
    let grammars = [
        ("palindrome", 6),
        ("expression", 4),
        ("balanced", 6),
        ("epsilon1", 5),
        ("unit_pairs", 4),
    ];
    for (name, max_len) in grammars {
        let cfg = load(name);
        let expected = language(&cfg, max_len);
        for &(step, transform) in STEPS {
            let transformed = transform(&cfg).unwrap();
            assert_eq!(
                language(&transformed, max_len),
                expected,
                "{} of {}:\n{}",
                step,
                name,
                transformed
            );
        }
    }
}

fn assert_normal_form(cfg: &Cfg) {
    for variable in cfg.variables() {
        for production in variable.productions() {
            let ok = match production.symbols() {
                [Symbol::Terminal(..)] if production.is_epsilon() => {
                    Some(variable.id()) == cfg.start()
                }
                [Symbol::Terminal(..)] => true,
                [Symbol::Variable(..), Symbol::Variable(..)] => true,
                _ => false,
            };
            assert!(ok, "{} -> {}", variable.id(), production);
        }
    }
}

#[test]
fn normal_form_shape() {
    for name in ["palindrome", "expression", "balanced", "epsilon1", "epsilon2"] {
        let normal = to_normal_form(&load(name)).unwrap();
        assert_normal_form(&normal);
        // the canonical text is a fixpoint of the normal form grammar.
        let reparsed: Cfg = normal.to_string().parse().unwrap();
        assert_eq!(reparsed.to_string(), normal.to_string());
    }
}

#[test]
fn canonical_text_round_trip() {
    for name in ["palindrome", "expression", "nongenerating", "epsilon2"] {
        let cfg = load(name);
        let text = cfg.to_string();
        let reparsed: Cfg = text.parse().unwrap();
        assert_eq!(reparsed.to_string(), text);
    }
}

#[test]
fn useless_symbols_of_a_cyclic_grammar() {
    let cfg = eliminate_useless(&load("balanced")).unwrap();
    assert!(cfg.variable("C").is_none());
    assert!(cfg.variable("D").is_none());
    assert_eq!(cfg.start(), Some("S"));
}
