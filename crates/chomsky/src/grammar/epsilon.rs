//! Elimination of epsilon productions.

use super::{
    fixpoint::{self, Nullable},
    Cfg, GrammarDef, Production, Symbol,
};
use crate::{error::GrammarError, types::Set};

/// Remove the epsilon terminals mixed with other symbols.
///
/// A production consisting only of epsilon terminals collapses into the
/// single production `"epsilon"`.
fn strip_epsilon(production: &Production) -> Production {
    let symbols: Vec<_> = production
        .symbols()
        .iter()
        .filter(|symbol| !symbol.is_epsilon())
        .cloned()
        .collect();
    if symbols.is_empty() {
        Production::epsilon()
    } else {
        Production::new(symbols)
    }
}

/// Enumerate the ways of erasing nullable variables from `production`,
/// leaving out the result where every symbol has been erased.
fn expand(production: &Production, nullable: &Set<String>) -> Vec<Vec<Symbol>> {
    let mut partials: Vec<Vec<Symbol>> = vec![vec![]];
    for symbol in production.symbols() {
        let erasable = symbol
            .as_variable()
            .map_or(false, |id| nullable.contains(id));
        if erasable {
            let kept: Vec<_> = partials
                .iter()
                .map(|partial| {
                    let mut partial = partial.clone();
                    partial.push(symbol.clone());
                    partial
                })
                .collect();
            partials.extend(kept);
        } else {
            for partial in &mut partials {
                partial.push(symbol.clone());
            }
        }
    }
    partials.retain(|partial| !partial.is_empty());
    partials
}

/// Remove every epsilon production.
///
/// Each production is replaced with all of its variants obtained by erasing
/// some of the nullable variables in it. If the start variable is nullable,
/// the production `start -> "epsilon"` is kept so that the language does
/// not change.
pub fn eliminate_epsilon(cfg: &Cfg) -> Result<Cfg, GrammarError> {
    let span = tracing::trace_span!("eliminate_epsilon");
    let _entered = span.enter();

    let Some(start) = cfg.start() else {
        return Ok(Cfg::empty());
    };

    let mut stripped = GrammarDef::default();
    for variable in cfg.variables() {
        stripped.variable(variable.id());
        for production in variable.productions() {
            stripped.push(variable.id(), strip_epsilon(production));
        }
    }
    let stripped = stripped.end_with(Some(start.to_owned()));

    let nullable = fixpoint::satisfied(&stripped, &Nullable)?;
    tracing::trace!("nullable: {:?}", nullable);

    let mut def = GrammarDef::default();
    for variable in stripped.variables() {
        def.variable(variable.id());
        for production in variable.productions() {
            if production.is_epsilon() {
                continue;
            }
            for symbols in expand(production, &nullable) {
                def.push(variable.id(), Production::new(symbols));
            }
        }
    }
    if nullable.contains(start) {
        def.push(start, Production::epsilon());
    }

    let result = def.end_with(Some(start.to_owned()));
    tracing::debug!(
        "eliminate_epsilon: {} nullable variables, {} -> {} productions",
        nullable.len(),
        cfg.num_productions(),
        result.num_productions()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(src: &str) -> String {
        src.parse::<Cfg>().unwrap().to_string()
    }

    #[test]
    fn nullable_variables_are_erased() {
        let cfg: Cfg = r#"
A -> B D E
A -> D F H
B -> "epsilon"
B -> "b"
D -> "epsilon"
E -> F G H
G -> "g"
F -> "a"
F -> "epsilon"
H -> "epsilon"
"#
        .parse()
        .unwrap();
        let expected = canonical(
            r#"
A -> B D E
A -> D E
A -> B E
A -> E
A -> D F H
A -> F H
A -> D H
A -> H
A -> D F
A -> F
A -> D
A -> "epsilon"
B -> "b"
E -> F G H
E -> G H
E -> F G
E -> G
F -> "a"
G -> "g"
"#,
        );
        let cfg = eliminate_epsilon(&cfg).unwrap();
        assert_eq!(cfg.to_string(), expected);
        assert_eq!(cfg.productions("A").count(), 12);
        assert_eq!(cfg.productions("D").count(), 0);
    }

    #[test]
    fn every_subsequence_is_produced() {
        let cfg: Cfg = r#"
A -> B C D E
B -> "b"
B -> "epsilon"
C -> "c"
C -> "epsilon"
D -> "d"
D -> "epsilon"
E -> "e"
E -> "epsilon"
"#
        .parse()
        .unwrap();
        let cfg = eliminate_epsilon(&cfg).unwrap();
        // 15 non-empty subsequences and the epsilon production of the start
        assert_eq!(cfg.productions("A").count(), 16);
        assert!(cfg.productions("A").any(Production::is_epsilon));
        assert!(!cfg.productions("B").any(Production::is_epsilon));
    }

    #[test]
    fn mixed_epsilon_terminals_are_stripped() {
        let cfg: Cfg = "S -> \"a\" \"epsilon\" S\nS -> \"epsilon\" \"epsilon\""
            .parse()
            .unwrap();
        let cfg = eliminate_epsilon(&cfg).unwrap();
        assert_eq!(cfg.to_string(), "S -> \"a\" S\nS -> \"a\"\nS -> \"epsilon\"");
    }

    #[test]
    fn repeated_nullable_variables() {
        let cfg: Cfg = "S -> A A\nA -> \"x\"\nA -> \"epsilon\"".parse().unwrap();
        let cfg = eliminate_epsilon(&cfg).unwrap();
        assert_eq!(
            cfg.to_string(),
            "S -> A A\nS -> \"epsilon\"\nS -> A\nA -> \"x\""
        );
    }
}
