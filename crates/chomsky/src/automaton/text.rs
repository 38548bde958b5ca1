//! The line-oriented automaton text format.
//!
//! ```text
//! q0
//! q2 q3
//! q0 0 q1
//! q1 epsilon q2
//! ```
//!
//! The first line holds the start state, the second line the
//! space-separated finish states, and every following line a single
//! `from symbol to` transition.

use super::{Automaton, Transition, DFA, ENFA, NFA};
use crate::error::ParseError;
use std::{fmt, fs, path::Path, str::FromStr};

/// Write `automaton` in the text format.
///
/// Finish states and transitions are sorted, so the rendering does not
/// depend on the order in which the automaton was built.
pub fn render<A>(automaton: &A, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    A: Automaton + ?Sized,
{
    writeln!(f, "{}", automaton.start())?;
    crate::util::write_joined(f, automaton.finish().iter(), " ")?;
    writeln!(f)?;
    let mut table = automaton.transition_table();
    table.sort();
    for transition in table {
        writeln!(f, "{}", transition)?;
    }
    Ok(())
}

#[derive(Debug)]
struct Source<'s> {
    start: &'s str,
    finish: Vec<&'s str>,
    transitions: Vec<(usize, Transition<'s>)>,
}

fn parse_source(source: &str) -> Result<Source<'_>, ParseError> {
    let span = tracing::trace_span!("parse_automaton");
    let _entered = span.enter();

    let mut lines = source
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .skip_while(|(_, line)| line.is_empty());

    let (start_line, start) = lines
        .next()
        .ok_or_else(|| ParseError::malformed(1, "missing the start state line"))?;
    if start.split_whitespace().count() != 1 {
        return Err(ParseError::malformed(
            start_line,
            "the start line must hold exactly one state",
        ));
    }
    let (_, finish) = lines
        .next()
        .ok_or_else(|| ParseError::malformed(start_line + 1, "missing the finish states line"))?;
    let finish = finish.split_whitespace().collect();

    let mut transitions = vec![];
    for (line_no, line) in lines {
        if line.is_empty() {
            continue;
        }
        let tokens: Vec<_> = line.split_whitespace().collect();
        let [from, symbol, to] = tokens[..] else {
            return Err(ParseError::malformed(
                line_no,
                format!("expected `from symbol to', found {} tokens", tokens.len()),
            ));
        };
        tracing::trace!("transition {} --{}--> {}", from, symbol, to);
        transitions.push((line_no, Transition { from, symbol, to }));
    }

    Ok(Source {
        start,
        finish,
        transitions,
    })
}

impl FromStr for DFA {
    type Err = ParseError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let source = parse_source(source)?;
        let mut dfa = DFA::new(source.start);
        for state in source.finish {
            dfa.add_finish(state);
        }
        for (line_no, Transition { from, symbol, to }) in source.transitions {
            dfa.add_transition(from, symbol, to)
                .map_err(|err| ParseError::malformed(line_no, err.to_string()))?;
        }
        Ok(dfa)
    }
}

impl FromStr for NFA {
    type Err = ParseError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let source = parse_source(source)?;
        let mut nfa = NFA::new(source.start);
        for state in source.finish {
            nfa.add_finish(state);
        }
        for (_, Transition { from, symbol, to }) in source.transitions {
            nfa.add_transition(from, symbol, to);
        }
        Ok(nfa)
    }
}

impl FromStr for ENFA {
    type Err = ParseError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        source.parse::<NFA>().map(ENFA::from)
    }
}

macro_rules! impl_from_file {
    ($($t:ty),*) => {$(
        impl $t {
            /// Read and parse an automaton text file.
            pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParseError> {
                let source = fs::read_to_string(path)?;
                source.parse()
            }
        }
    )*};
}

impl_from_file!(DFA, NFA, ENFA);

#[cfg(test)]
mod tests {
    use super::*;

    const NFA_SOURCE: &str = "
q0
q2
q0 0 q0
q0 1 q0
q0 0 q1
q1 1 q2
";

    #[test]
    fn parse_nfa() {
        let nfa: NFA = NFA_SOURCE.parse().unwrap();
        assert_eq!(nfa.start(), "q0");
        assert_eq!(nfa.finish().canonical(), "q2");
        assert_eq!(nfa.len(), 3);
        assert_eq!(nfa.transition_table().len(), 4);
    }

    #[test]
    fn rendering_is_sorted() {
        let nfa: NFA = NFA_SOURCE.parse().unwrap();
        assert_eq!(
            nfa.to_string(),
            "q0\nq2\nq0 0 q0\nq0 0 q1\nq0 1 q0\nq1 1 q2\n"
        );
    }

    #[test]
    fn round_trip() {
        let nfa: NFA = NFA_SOURCE.parse().unwrap();
        let again: NFA = nfa.to_string().parse().unwrap();
        assert_eq!(nfa, again);

        let mut dfa = DFA::new("a");
        dfa.add_transition("a", "x", "b").unwrap();
        let again: DFA = dfa.to_string().parse().unwrap();
        assert_eq!(dfa, again);
    }

    #[test]
    fn empty_finish_line_and_no_transitions() {
        let dfa = DFA::new("only");
        let text = dfa.to_string();
        assert_eq!(text, "only\n\n");
        let again: DFA = text.parse().unwrap();
        assert_eq!(dfa, again);
    }

    #[test]
    fn malformed_inputs() {
        assert!(matches!(
            "".parse::<NFA>(),
            Err(ParseError::Malformed { line: 1, .. })
        ));
        assert!(matches!(
            "q0".parse::<NFA>(),
            Err(ParseError::Malformed { line: 2, .. })
        ));
        assert!(matches!(
            "q0\nq1\nq0 a".parse::<NFA>(),
            Err(ParseError::Malformed { line: 3, .. })
        ));
        assert!(matches!(
            "q0\nq1\nq0 a q1 q2".parse::<NFA>(),
            Err(ParseError::Malformed { line: 3, .. })
        ));
        assert!(matches!(
            "q0\nq1\nq0 a q1\nq0 a q2".parse::<DFA>(),
            Err(ParseError::Malformed { line: 4, .. })
        ));
    }
}
