//! Conversion into the normal form where every production is either a
//! single terminal or a pair of variables.

use super::{
    eliminate_epsilon, eliminate_nongenerating, eliminate_unit_pairs, eliminate_unreachable, Cfg,
    GrammarDef, Production, Symbol,
};
use crate::{
    error::GrammarError,
    types::{Map, Set},
};

/// Generator of variable names that collide with no existing variable.
#[derive(Debug)]
struct FreshNames {
    taken: Set<String>,
}

impl FreshNames {
    fn new(cfg: &Cfg) -> Self {
        Self {
            taken: cfg.variables.keys().cloned().collect(),
        }
    }

    /// Claim `base` itself if it is still available.
    fn claim(&mut self, base: &str) -> String {
        if self.taken.insert(base.to_owned()) {
            return base.to_owned();
        }
        self.claim_indexed(base)
    }

    /// Claim the first available name of the form `{base}_{n}`.
    fn claim_indexed(&mut self, base: &str) -> String {
        let mut n = 1;
        loop {
            let name = format!("{}_{}", base, n);
            if self.taken.insert(name.clone()) {
                return name;
            }
            n += 1;
        }
    }
}

/// Make sure the start variable does not occur on the right-hand side of
/// any production, adding a fresh start variable `S0 -> S` if it does.
pub fn isolate_start(cfg: &Cfg) -> Result<Cfg, GrammarError> {
    let Some(start) = cfg.start() else {
        return Ok(Cfg::empty());
    };
    let referenced = cfg
        .variables()
        .flat_map(|variable| variable.productions())
        .any(|production| production.variables().any(|id| id == start));
    if !referenced {
        return Ok(cfg.clone());
    }

    let new_start = FreshNames::new(cfg).claim(&format!("{}0", start));
    tracing::trace!("isolate_start: {} -> {}", new_start, start);

    let mut def = GrammarDef::default();
    def.push(&new_start, Production::new([Symbol::variable(start)]));
    for variable in cfg.variables() {
        def.variable(variable.id());
        for production in variable.productions() {
            def.push(variable.id(), production.clone());
        }
    }
    Ok(def.end_with(Some(new_start)))
}

fn is_plain_name(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Replace the terminals occurring in productions of two or more symbols
/// with fresh variables deriving exactly that terminal.
///
/// The epsilon terminal is left untouched.
pub fn lift_terminals(cfg: &Cfg) -> Result<Cfg, GrammarError> {
    let Some(start) = cfg.start() else {
        return Ok(Cfg::empty());
    };

    let mut fresh = FreshNames::new(cfg);
    let mut lifted: Map<String, String> = Map::default();
    let mut def = GrammarDef::default();
    for variable in cfg.variables() {
        def.variable(variable.id());
        for production in variable.productions() {
            if production.len() < 2 {
                def.push(variable.id(), production.clone());
                continue;
            }
            let mut symbols = Vec::with_capacity(production.len());
            for symbol in production.symbols() {
                match symbol {
                    Symbol::Terminal(value) if !symbol.is_epsilon() => {
                        let id = match lifted.get(value) {
                            Some(id) => id.clone(),
                            None => {
                                let id = if is_plain_name(value) {
                                    fresh.claim(&format!("T_{}", value))
                                } else {
                                    fresh.claim_indexed("T")
                                };
                                tracing::trace!("lift_terminals: {} -> \"{}\"", id, value);
                                lifted.insert(value.clone(), id.clone());
                                id
                            }
                        };
                        symbols.push(Symbol::variable(id));
                    }
                    _ => symbols.push(symbol.clone()),
                }
            }
            def.push(variable.id(), Production::new(symbols));
        }
    }
    for (value, id) in &lifted {
        def.push(id, Production::new([Symbol::terminal(value.as_str())]));
    }

    Ok(def.end_with(Some(start.to_owned())))
}

/// Split every production longer than two symbols into a right-leaning
/// chain of productions of length two.
///
/// `A -> X1 X2 X3 X4` becomes `A -> X1 A_1`, `A_1 -> X2 A_2` and
/// `A_2 -> X3 X4`.
pub fn binarize(cfg: &Cfg) -> Result<Cfg, GrammarError> {
    let span = tracing::trace_span!("binarize");
    let _entered = span.enter();

    let Some(start) = cfg.start() else {
        return Ok(Cfg::empty());
    };

    let mut fresh = FreshNames::new(cfg);
    let mut def = GrammarDef::default();
    for variable in cfg.variables() {
        def.variable(variable.id());
        for production in variable.productions() {
            let symbols = production.symbols();
            if symbols.len() <= 2 {
                def.push(variable.id(), production.clone());
                continue;
            }

            let mut head = variable.id().to_owned();
            let (prefix, tail) = symbols.split_at(symbols.len() - 2);
            for symbol in prefix {
                let next = fresh.claim_indexed(variable.id());
                def.push(
                    &head,
                    Production::new([symbol.clone(), Symbol::variable(next.as_str())]),
                );
                head = next;
            }
            def.push(&head, Production::new(tail.iter().cloned()));
        }
    }

    let result = def.end_with(Some(start.to_owned()));
    tracing::debug!(
        "binarize: {} -> {} variables",
        cfg.variables.len(),
        result.variables.len()
    );
    Ok(result)
}

/// Convert `cfg` into an equivalent grammar whose productions are all
/// either a single terminal or a pair of variables, except for a possible
/// `start -> "epsilon"`.
pub fn to_normal_form(cfg: &Cfg) -> Result<Cfg, GrammarError> {
    let span = tracing::trace_span!("to_normal_form");
    let _entered = span.enter();

    let steps: [(&str, fn(&Cfg) -> Result<Cfg, GrammarError>); 7] = [
        ("isolate_start", isolate_start),
        ("lift_terminals", lift_terminals),
        ("binarize", binarize),
        ("eliminate_epsilon", eliminate_epsilon),
        ("eliminate_unit_pairs", eliminate_unit_pairs),
        ("eliminate_nongenerating", eliminate_nongenerating),
        ("eliminate_unreachable", eliminate_unreachable),
    ];

    let mut current = cfg.clone();
    for (name, step) in steps {
        current = step(&current)?;
        tracing::debug!(
            "{}: {} variables, {} productions",
            name,
            current.variables.len(),
            current.num_productions()
        );
    }
    Ok(current)
}
