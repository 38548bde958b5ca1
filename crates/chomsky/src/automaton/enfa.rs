use super::{Automaton, NFAState, NFAView, Transition, NFA};
use crate::{set::StateSet, types::Map, EPSILON};
use std::fmt;

/// Nondeterministic finite automaton with epsilon moves.
///
/// Epsilon moves are stored as ordinary transitions on the reserved
/// [`EPSILON`] symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct ENFA {
    nfa: NFA,
}

impl ENFA {
    /// Create an automaton consisting only of the start state.
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            nfa: NFA::new(start),
        }
    }

    pub fn add_finish(&mut self, id: &str) {
        self.nfa.add_finish(id)
    }

    pub fn add_transition(&mut self, from: &str, symbol: &str, to: &str) {
        self.nfa.add_transition(from, symbol, to)
    }

    pub fn add_epsilon_transition(&mut self, from: &str, to: &str) {
        self.nfa.add_transition(from, EPSILON, to)
    }

    /// View this automaton as a plain NFA, in which epsilon is an ordinary
    /// input symbol.
    pub fn as_nfa(&self) -> &NFA {
        &self.nfa
    }

    /// Return the smallest superset of `states` closed under epsilon moves.
    pub fn eclose(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut stack: Vec<&str> = states.iter().collect();
        while let Some(state) = stack.pop() {
            let Some(dsts) = self.nfa.state(state).and_then(|s| s.next(EPSILON)) else {
                continue;
            };
            for dst in dsts.iter() {
                if closure.insert(dst) {
                    stack.push(dst);
                }
            }
        }
        closure
    }

    /// Return the states reached from `from` after consuming `symbols`,
    /// taking epsilon moves before, between and after the symbols.
    pub fn etrans(&self, from: &str, symbols: &[&str]) -> StateSet {
        let closure = self.eclose(&StateSet::singleton(from));
        self.etrans_from_states(closure, symbols)
    }

    /// Like [`ENFA::etrans`], but starting from an already closed set.
    pub fn etrans_from_states(&self, from: StateSet, symbols: &[&str]) -> StateSet {
        let mut current = from;
        for symbol in symbols {
            if current.is_empty() {
                break;
            }
            current = self.eclose(&self.nfa.next_states(&current, symbol));
        }
        current
    }
}

impl Automaton for ENFA {
    fn start(&self) -> &str {
        self.nfa.start()
    }

    fn finish(&self) -> &StateSet {
        self.nfa.finish()
    }

    fn transition_table(&self) -> Vec<Transition<'_>> {
        self.nfa.transition_table()
    }

    fn reach(&self, symbols: &[&str]) -> StateSet {
        self.etrans(self.nfa.start(), symbols)
    }
}

impl NFAView for ENFA {
    fn states(&self) -> &Map<String, NFAState> {
        self.nfa.states()
    }

    fn close(&self, states: StateSet) -> StateSet {
        self.eclose(&states)
    }

    fn is_input_symbol(&self, symbol: &str) -> bool {
        symbol != EPSILON
    }
}

impl From<NFA> for ENFA {
    fn from(nfa: NFA) -> Self {
        Self { nfa }
    }
}

impl fmt::Display for ENFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::text::render(self, f)
    }
}
