//! Elimination of unit productions.

use super::{Cfg, GrammarDef, Production};
use crate::error::GrammarError;
use bit_set::BitSet;

/// Compute the unit pairs of `cfg`.
///
/// Row `A` of the returned matrix contains the index of every variable `B`
/// such that `A` derives `B` using only unit productions, `A` itself
/// included.
fn unit_pairs(cfg: &Cfg) -> Result<Vec<BitSet>, GrammarError> {
    let num_variables = cfg.variables.len();
    let mut reach: Vec<BitSet> = (0..num_variables)
        .map(|index| {
            let mut row = BitSet::with_capacity(num_variables);
            row.insert(index);
            row
        })
        .collect();

    for (index, variable) in cfg.variables.values().enumerate() {
        for production in &variable.productions {
            if production.is_empty() {
                return Err(GrammarError::invariant(format!(
                    "zero-length production for `{}'",
                    variable.id
                )));
            }
            if let Some(target) = production.unit_target() {
                let target = cfg.index_of(target).ok_or_else(|| {
                    GrammarError::invariant(format!("unregistered variable `{}'", target))
                })?;
                reach[index].insert(target);
            }
        }
    }

    for middle in 0..num_variables {
        let through = reach[middle].clone();
        for row in &mut reach {
            if row.contains(middle) {
                row.union_with(&through);
            }
        }
    }

    Ok(reach)
}

/// Remove every unit production `A -> B`.
///
/// For every unit pair `(A, B)` the non-unit productions of `B` are copied
/// into `A`.
pub fn eliminate_unit_pairs(cfg: &Cfg) -> Result<Cfg, GrammarError> {
    let span = tracing::trace_span!("eliminate_unit_pairs");
    let _entered = span.enter();

    let Some(start) = cfg.start() else {
        return Ok(Cfg::empty());
    };

    let reach = unit_pairs(cfg)?;
    let non_unit: Vec<Vec<&Production>> = cfg
        .variables
        .values()
        .map(|variable| {
            variable
                .productions
                .iter()
                .filter(|production| production.unit_target().is_none())
                .collect()
        })
        .collect();

    let mut def = GrammarDef::default();
    for (index, variable) in cfg.variables.values().enumerate() {
        def.variable(&variable.id);
        let sources = std::iter::once(index).chain(reach[index].iter().filter(|&b| b != index));
        for source in sources {
            for &production in &non_unit[source] {
                def.push(&variable.id, production.clone());
            }
        }
    }

    let result = def.end_with(Some(start.to_owned()));
    tracing::debug!(
        "eliminate_unit_pairs: {} -> {} productions",
        cfg.num_productions(),
        result.num_productions()
    );
    Ok(result)
}
