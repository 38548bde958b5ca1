//! Least-fixpoint inference of monotone grammar properties.
//!
//! A variable has the property if one of its productions witnesses it
//! directly, or if every variable occurring in one of its productions has
//! it. Instead of rescanning the grammar until nothing changes, each
//! production counts its variable occurrences that are not yet known to have
//! the property, and a variable is settled at the moment one of those
//! counters drops to zero.

use super::{Cfg, Production};
use crate::{error::GrammarError, types::Set, EPSILON};
use bit_set::BitSet;

/// A property inferred by [`satisfied`].
pub trait Property {
    /// Whether `production` witnesses the property without depending on any
    /// variable.
    fn direct(&self, production: &Production) -> bool;

    /// Whether a production containing the terminal `value` may still
    /// witness the property through its variables.
    fn admits(&self, _value: &str) -> bool {
        true
    }
}

/// The variable derives some string of terminals.
#[derive(Debug, Copy, Clone, Default)]
pub struct Generating;

impl Property for Generating {
    fn direct(&self, production: &Production) -> bool {
        production.variables().next().is_none()
    }
}

/// The variable derives the empty string.
#[derive(Debug, Copy, Clone, Default)]
pub struct Nullable;

impl Property for Nullable {
    fn direct(&self, production: &Production) -> bool {
        production.symbols().iter().all(|symbol| symbol.is_epsilon())
    }

    fn admits(&self, value: &str) -> bool {
        value == EPSILON
    }
}

#[derive(Debug)]
struct Dependent {
    owner: usize,
    remaining: usize,
}

/// Compute the set of variables of `cfg` having `property`.
///
/// The result lists the variables in the order they were settled.
pub fn satisfied<P>(cfg: &Cfg, property: &P) -> Result<Set<String>, GrammarError>
where
    P: Property + ?Sized,
{
    let span = tracing::trace_span!("fixpoint");
    let _entered = span.enter();

    let num_variables = cfg.variables.len();
    let mut dependents: Vec<Dependent> = vec![];
    // variable index -> indices of the dependents waiting on it
    let mut waiting: Vec<Vec<usize>> = vec![vec![]; num_variables];
    let mut settled = BitSet::with_capacity(num_variables);
    let mut order = vec![];

    for (owner, variable) in cfg.variables.values().enumerate() {
        for production in &variable.productions {
            if property.direct(production) {
                if settled.insert(owner) {
                    order.push(owner);
                }
                continue;
            }
            if !production.terminals().all(|value| property.admits(value)) {
                continue;
            }

            let slot = dependents.len();
            let mut remaining = 0;
            for id in production.variables() {
                let index = cfg.index_of(id).ok_or_else(|| {
                    GrammarError::invariant(format!("unregistered variable `{}'", id))
                })?;
                waiting[index].push(slot);
                remaining += 1;
            }
            if remaining == 0 {
                if settled.insert(owner) {
                    order.push(owner);
                }
                continue;
            }
            dependents.push(Dependent { owner, remaining });
        }
    }

    let mut worklist = order.clone();
    while let Some(index) = worklist.pop() {
        for &slot in &waiting[index] {
            let dependent = &mut dependents[slot];
            dependent.remaining = dependent.remaining.checked_sub(1).ok_or_else(|| {
                GrammarError::invariant("a dependency counter dropped below zero")
            })?;
            if dependent.remaining == 0 && settled.insert(dependent.owner) {
                tracing::trace!("settled {:?}", cfg.id_at(dependent.owner));
                order.push(dependent.owner);
                worklist.push(dependent.owner);
            }
        }
    }

    let result: Set<String> = order
        .into_iter()
        .filter_map(|index| cfg.id_at(index).map(ToOwned::to_owned))
        .collect();
    tracing::debug!(
        "fixpoint: {} of {} variables satisfied",
        result.len(),
        num_variables
    );
    Ok(result)
}
