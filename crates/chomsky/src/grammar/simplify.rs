//! Removal of useless symbols.

use super::{
    fixpoint::{self, Generating},
    Cfg, GrammarDef,
};
use crate::error::GrammarError;

/// Drop every variable that cannot be reached from the start variable.
///
/// The grammar is rendered in the canonical text, which only visits the
/// reachable variables, and parsed back.
pub fn eliminate_unreachable(cfg: &Cfg) -> Result<Cfg, GrammarError> {
    let span = tracing::trace_span!("eliminate_unreachable");
    let _entered = span.enter();

    let reachable: Cfg = cfg.to_string().parse()?;
    tracing::debug!(
        "eliminate_unreachable: {} -> {} productions",
        cfg.num_productions(),
        reachable.num_productions()
    );
    Ok(reachable)
}

/// Drop every variable that derives no terminal string, together with the
/// productions mentioning it.
///
/// If the start variable itself is non-generating, the result is the
/// grammar of the empty language.
pub fn eliminate_nongenerating(cfg: &Cfg) -> Result<Cfg, GrammarError> {
    let span = tracing::trace_span!("eliminate_nongenerating");
    let _entered = span.enter();

    let generating = fixpoint::satisfied(cfg, &Generating)?;
    let Some(start) = cfg.start().filter(|start| generating.contains(*start)) else {
        tracing::debug!("eliminate_nongenerating: the start variable is non-generating");
        return Ok(Cfg::empty());
    };

    let mut def = GrammarDef::default();
    for variable in cfg.variables() {
        if !generating.contains(variable.id()) {
            tracing::trace!("drop {}", variable.id());
            continue;
        }
        def.variable(variable.id());
        for production in variable.productions() {
            if production.variables().all(|id| generating.contains(id)) {
                def.push(variable.id(), production.clone());
            }
        }
    }

    let result = def.end_with(Some(start.to_owned()));
    tracing::debug!(
        "eliminate_nongenerating: kept {} of {} variables",
        generating.len(),
        cfg.variables.len()
    );
    Ok(result)
}

/// Drop the non-generating variables and then the unreachable ones.
pub fn eliminate_useless(cfg: &Cfg) -> Result<Cfg, GrammarError> {
    eliminate_unreachable(&eliminate_nongenerating(cfg)?)
}
