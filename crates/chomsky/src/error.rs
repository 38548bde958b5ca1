//! Error types.

use std::io;

/// The text of an automaton or grammar is ill-formed.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error: {}", _0)]
    IO(#[from] io::Error),

    #[error("line {}: {}", line, msg)]
    Malformed { line: usize, msg: String },
}

impl ParseError {
    pub(crate) fn malformed(line: usize, msg: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            msg: msg.into(),
        }
    }
}

/// Failures raised while building or transforming a grammar.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("malformed grammar: {}", msg)]
    Malformed { msg: String },

    /// A previous transformation produced a structure that breaks an internal
    /// invariant.
    #[error("invariant violation: {}", msg)]
    InvariantViolation { msg: String },

    #[error("Syntax error: {}", _0)]
    Parse(#[from] ParseError),
}

impl GrammarError {
    pub(crate) fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation { msg: msg.into() }
    }
}

impl From<&str> for GrammarError {
    fn from(msg: &str) -> Self {
        Self::Malformed { msg: msg.into() }
    }
}
impl From<String> for GrammarError {
    fn from(msg: String) -> Self {
        Self::Malformed { msg }
    }
}

/// Failures raised while building an automaton.
#[derive(Debug, thiserror::Error)]
pub enum AutomatonError {
    #[error("state `{}' already moves to `{}' on `{}'", state, existing, symbol)]
    Nondeterministic {
        state: String,
        symbol: String,
        existing: String,
    },
}
