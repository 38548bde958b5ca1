//! Finite automata and context-free grammar normalization.

pub mod automaton;
pub mod error;
pub mod grammar;
pub mod set;
pub mod types;
pub mod util;

pub use crate::{
    automaton::{accept, subset_construct, AnyAutomaton, Automaton, DFA, ENFA, NFA},
    error::{GrammarError, ParseError},
    grammar::{Cfg, Production, Symbol},
    set::StateSet,
};

/// Reserved symbol denoting an epsilon move of an automaton, or the empty
/// string inside a grammar production.
pub const EPSILON: &str = "epsilon";
