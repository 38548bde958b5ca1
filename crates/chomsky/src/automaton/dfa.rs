use super::{Automaton, Transition};
use crate::{error::AutomatonError, set::StateSet, types::Map};
use std::fmt;

/// A state of a [`DFA`], with at most one destination per symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DFAState {
    id: String,
    transitions: Map<String, String>,
}

impl DFAState {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            transitions: Map::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Return the destination on `symbol`, if any.
    pub fn next(&self, symbol: &str) -> Option<&str> {
        self.transitions.get(symbol).map(String::as_str)
    }

    pub fn transitions(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.transitions
            .iter()
            .map(|(symbol, to)| (symbol.as_str(), to.as_str()))
    }
}

/// Deterministic finite automaton.
#[derive(Debug, Clone, PartialEq)]
pub struct DFA {
    states: Map<String, DFAState>,
    start: String,
    finish: StateSet,
}

impl DFA {
    /// Create an automaton consisting only of the start state.
    pub fn new(start: impl Into<String>) -> Self {
        let mut dfa = Self {
            states: Map::default(),
            start: start.into(),
            finish: StateSet::new(),
        };
        let start = dfa.start.clone();
        dfa.add_state(&start);
        dfa
    }

    /// Register a state, returning `true` if it is new.
    pub fn add_state(&mut self, id: &str) -> bool {
        if self.states.contains_key(id) {
            return false;
        }
        self.states.insert(id.to_owned(), DFAState::new(id));
        true
    }

    /// Mark a state as accepting.
    pub fn add_finish(&mut self, id: &str) {
        self.add_state(id);
        self.finish.insert(id);
    }

    /// Add the transition `from --symbol--> to`.
    ///
    /// Adding the same transition twice is allowed, while a second distinct
    /// destination for `(from, symbol)` breaks determinism and is rejected.
    pub fn add_transition(
        &mut self,
        from: &str,
        symbol: &str,
        to: &str,
    ) -> Result<(), AutomatonError> {
        if let Some(existing) = self.states.get(from).and_then(|state| state.next(symbol)) {
            if existing != to {
                return Err(AutomatonError::Nondeterministic {
                    state: from.to_owned(),
                    symbol: symbol.to_owned(),
                    existing: existing.to_owned(),
                });
            }
        }
        self.set_transition(from, symbol, to);
        Ok(())
    }

    /// Unconditionally set the destination of `(from, symbol)`.
    pub(crate) fn set_transition(&mut self, from: &str, symbol: &str, to: &str) {
        self.add_state(from);
        self.add_state(to);
        if let Some(state) = self.states.get_mut(from) {
            state.transitions.insert(symbol.to_owned(), to.to_owned());
        }
    }

    pub fn state(&self, id: &str) -> Option<&DFAState> {
        self.states.get(id)
    }

    pub fn states(&self) -> impl Iterator<Item = &DFAState> + '_ {
        self.states.values()
    }

    /// Return the number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Walk from `from` along `symbols`, returning the state reached or
    /// `None` if some transition is missing.
    pub fn trans(&self, from: &str, symbols: &[&str]) -> Option<&str> {
        let mut current = self.states.get(from)?;
        for symbol in symbols {
            let next = current.next(symbol)?;
            current = self.states.get(next)?;
        }
        Some(current.id())
    }
}

impl Automaton for DFA {
    fn start(&self) -> &str {
        &self.start
    }

    fn finish(&self) -> &StateSet {
        &self.finish
    }

    fn transition_table(&self) -> Vec<Transition<'_>> {
        self.states
            .values()
            .flat_map(|state| {
                state.transitions().map(|(symbol, to)| Transition {
                    from: state.id(),
                    symbol,
                    to,
                })
            })
            .collect()
    }

    fn reach(&self, symbols: &[&str]) -> StateSet {
        self.trans(&self.start, symbols)
            .map(StateSet::singleton)
            .unwrap_or_default()
    }
}

impl fmt::Display for DFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::text::render(self, f)
    }
}
