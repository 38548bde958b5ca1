//! Deterministic and nondeterministic finite automata.

mod dfa;
mod enfa;
mod nfa;
mod subset;
pub mod text;

pub use self::{
    dfa::{DFAState, DFA},
    enfa::ENFA,
    nfa::{NFAState, NFA},
    subset::subset_construct,
};

use crate::{set::StateSet, types::Map};
use std::fmt;

/// A single row of a transition table, `from --symbol--> to`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Transition<'a> {
    pub from: &'a str,
    pub symbol: &'a str,
    pub to: &'a str,
}

impl fmt::Display for Transition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.from, self.symbol, self.to)
    }
}

/// The capabilities shared by every kind of finite automaton.
pub trait Automaton {
    /// Return the identifier of the start state.
    fn start(&self) -> &str;

    /// Return the set of finish (accepting) states.
    fn finish(&self) -> &StateSet;

    /// Return every transition of this automaton.
    fn transition_table(&self) -> Vec<Transition<'_>>;

    /// Return the set of states reached from the start state after
    /// consuming all of `symbols`.
    ///
    /// The result is empty if the automaton gets stuck on the way.
    fn reach(&self, symbols: &[&str]) -> StateSet;
}

/// Automata whose transitions lead to sets of states, which subset
/// construction can turn into a [`DFA`].
pub trait NFAView: Automaton {
    fn states(&self) -> &Map<String, NFAState>;

    /// Extend a set of successor states before it becomes a DFA state.
    fn close(&self, states: StateSet) -> StateSet {
        states
    }

    /// Whether `symbol` is consumed from the input, as opposed to a
    /// spontaneous move.
    fn is_input_symbol(&self, _symbol: &str) -> bool {
        true
    }
}

/// Return whether `automaton` accepts the sequence `symbols`.
pub fn accept<A>(automaton: &A, symbols: &[&str]) -> bool
where
    A: Automaton + ?Sized,
{
    // a stuck automaton reaches nothing and hence never accepts.
    automaton.reach(symbols).intersects(automaton.finish())
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AutomatonKind {
    DFA,
    NFA,
    ENFA,
}

impl fmt::Display for AutomatonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DFA => f.write_str("DFA"),
            Self::NFA => f.write_str("NFA"),
            Self::ENFA => f.write_str("eNFA"),
        }
    }
}

/// An automaton of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyAutomaton {
    DFA(DFA),
    NFA(NFA),
    ENFA(ENFA),
}

impl AnyAutomaton {
    /// Parse the automaton text as the specified kind of automaton.
    pub fn parse(kind: AutomatonKind, source: &str) -> Result<Self, crate::ParseError> {
        Ok(match kind {
            AutomatonKind::DFA => Self::DFA(source.parse()?),
            AutomatonKind::NFA => Self::NFA(source.parse()?),
            AutomatonKind::ENFA => Self::ENFA(source.parse()?),
        })
    }

    pub fn kind(&self) -> AutomatonKind {
        match self {
            Self::DFA(..) => AutomatonKind::DFA,
            Self::NFA(..) => AutomatonKind::NFA,
            Self::ENFA(..) => AutomatonKind::ENFA,
        }
    }

    /// Convert into an equivalent DFA, running subset construction unless
    /// this automaton is already deterministic.
    pub fn into_dfa(self) -> DFA {
        match self {
            Self::DFA(dfa) => dfa,
            Self::NFA(nfa) => subset_construct(&nfa),
            Self::ENFA(enfa) => subset_construct(&enfa),
        }
    }
}

impl Automaton for AnyAutomaton {
    fn start(&self) -> &str {
        match self {
            Self::DFA(a) => a.start(),
            Self::NFA(a) => a.start(),
            Self::ENFA(a) => a.start(),
        }
    }

    fn finish(&self) -> &StateSet {
        match self {
            Self::DFA(a) => a.finish(),
            Self::NFA(a) => a.finish(),
            Self::ENFA(a) => a.finish(),
        }
    }

    fn transition_table(&self) -> Vec<Transition<'_>> {
        match self {
            Self::DFA(a) => a.transition_table(),
            Self::NFA(a) => a.transition_table(),
            Self::ENFA(a) => a.transition_table(),
        }
    }

    fn reach(&self, symbols: &[&str]) -> StateSet {
        match self {
            Self::DFA(a) => a.reach(symbols),
            Self::NFA(a) => a.reach(symbols),
            Self::ENFA(a) => a.reach(symbols),
        }
    }
}

impl From<DFA> for AnyAutomaton {
    fn from(dfa: DFA) -> Self {
        Self::DFA(dfa)
    }
}
impl From<NFA> for AnyAutomaton {
    fn from(nfa: NFA) -> Self {
        Self::NFA(nfa)
    }
}
impl From<ENFA> for AnyAutomaton {
    fn from(enfa: ENFA) -> Self {
        Self::ENFA(enfa)
    }
}

impl fmt::Display for AnyAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::render(self, f)
    }
}
