use super::{Automaton, NFAView, Transition};
use crate::{set::StateSet, types::Map};
use std::fmt;

/// A state of an [`NFA`], with any number of destinations per symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NFAState {
    id: String,
    transitions: Map<String, StateSet>,
}

impl NFAState {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            transitions: Map::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Return the destinations on `symbol`, if any.
    pub fn next(&self, symbol: &str) -> Option<&StateSet> {
        self.transitions.get(symbol)
    }

    pub fn transitions(&self) -> impl Iterator<Item = (&str, &StateSet)> + '_ {
        self.transitions
            .iter()
            .map(|(symbol, to)| (symbol.as_str(), to))
    }
}

/// Nondeterministic finite automaton.
#[derive(Debug, Clone, PartialEq)]
pub struct NFA {
    states: Map<String, NFAState>,
    start: String,
    finish: StateSet,
}

impl NFA {
    /// Create an automaton consisting only of the start state.
    pub fn new(start: impl Into<String>) -> Self {
        let mut nfa = Self {
            states: Map::default(),
            start: start.into(),
            finish: StateSet::new(),
        };
        let start = nfa.start.clone();
        nfa.add_state(&start);
        nfa
    }

    /// Register a state, returning `true` if it is new.
    pub fn add_state(&mut self, id: &str) -> bool {
        if self.states.contains_key(id) {
            return false;
        }
        self.states.insert(id.to_owned(), NFAState::new(id));
        true
    }

    /// Mark a state as accepting.
    pub fn add_finish(&mut self, id: &str) {
        self.add_state(id);
        self.finish.insert(id);
    }

    /// Add the transition `from --symbol--> to`, keeping any other
    /// destinations of `(from, symbol)`.
    pub fn add_transition(&mut self, from: &str, symbol: &str, to: &str) {
        self.add_state(from);
        self.add_state(to);
        if let Some(state) = self.states.get_mut(from) {
            state
                .transitions
                .entry(symbol.to_owned())
                .or_default()
                .insert(to);
        }
    }

    pub fn state(&self, id: &str) -> Option<&NFAState> {
        self.states.get(id)
    }

    /// Return the number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Return the union of the destinations of `from` on `symbol`.
    ///
    /// States without a transition on `symbol` contribute nothing.
    pub fn next_states(&self, from: &StateSet, symbol: &str) -> StateSet {
        let mut next = StateSet::new();
        for state in from.iter() {
            if let Some(dsts) = self.states.get(state).and_then(|s| s.next(symbol)) {
                next.union_with(dsts);
            }
        }
        next
    }

    /// Return the states reached from `from` after consuming `symbols`.
    pub fn trans(&self, from: &str, symbols: &[&str]) -> StateSet {
        self.trans_from_states(StateSet::singleton(from), symbols)
    }

    /// Return the states reached from any state in `from` after consuming
    /// `symbols`.
    pub fn trans_from_states(&self, from: StateSet, symbols: &[&str]) -> StateSet {
        let mut current = from;
        for symbol in symbols {
            if current.is_empty() {
                break;
            }
            current = self.next_states(&current, symbol);
        }
        current
    }
}

impl Automaton for NFA {
    fn start(&self) -> &str {
        &self.start
    }

    fn finish(&self) -> &StateSet {
        &self.finish
    }

    fn transition_table(&self) -> Vec<Transition<'_>> {
        let mut table = vec![];
        for state in self.states.values() {
            for (symbol, dsts) in state.transitions() {
                for to in dsts.iter() {
                    table.push(Transition {
                        from: state.id(),
                        symbol,
                        to,
                    });
                }
            }
        }
        table
    }

    fn reach(&self, symbols: &[&str]) -> StateSet {
        self.trans(&self.start, symbols)
    }
}

impl NFAView for NFA {
    fn states(&self) -> &Map<String, NFAState> {
        &self.states
    }
}

impl fmt::Display for NFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::text::render(self, f)
    }
}
