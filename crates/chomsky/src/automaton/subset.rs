//! Subset construction of a DFA from an NFA or eNFA.

use super::{NFAView, DFA};
use crate::{
    set::StateSet,
    types::{Map, Worklist},
};

/// Build a DFA equivalent to `automaton`.
///
/// Every DFA state stands for a set of source states and is named after
/// the canonical string of that set. Only subsets reachable from the start
/// state are materialized.
pub fn subset_construct<A>(automaton: &A) -> DFA
where
    A: NFAView + ?Sized,
{
    let span = tracing::trace_span!("subset_construct");
    let _entered = span.enter();

    let initial = automaton.close(StateSet::singleton(automaton.start()));
    let start = initial.canonical();

    let mut dfa = DFA::new(start.clone());
    if initial.intersects(automaton.finish()) {
        dfa.add_finish(&start);
    }

    let mut subsets: Map<String, StateSet> = Map::default();
    subsets.insert(start.clone(), initial);
    let mut worklist = Worklist::default();
    worklist.push(start);

    while let Some(from) = worklist.pop() {
        let Some(current) = subsets.get(&from) else {
            continue;
        };

        // symbol -> union of the destinations of every state in the subset.
        let mut moves: Map<&str, StateSet> = Map::default();
        for state in current.iter() {
            let Some(state) = automaton.states().get(state) else {
                continue;
            };
            for (symbol, dsts) in state.transitions() {
                if automaton.is_input_symbol(symbol) {
                    moves.entry(symbol).or_default().union_with(dsts);
                }
            }
        }

        let mut discovered = vec![];
        for (symbol, union) in moves {
            let next = automaton.close(union);
            let to = next.canonical();
            if worklist.push(to.clone()) {
                tracing::trace!("new DFA state {{{}}}", to);
                if next.intersects(automaton.finish()) {
                    dfa.add_finish(&to);
                }
                discovered.push((to.clone(), next));
            }
            dfa.set_transition(&from, symbol, &to);
        }
        subsets.extend(discovered);
    }

    tracing::debug!(
        "subset construction: {} source states -> {} DFA states",
        automaton.states().len(),
        dfa.len()
    );

    dfa
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::{accept, Automaton, ENFA, NFA};

    // the 3rd symbol from the end is `1`.
    fn third_from_end() -> NFA {
        let mut nfa = NFA::new("q0");
        nfa.add_transition("q0", "0", "q0");
        nfa.add_transition("q0", "1", "q0");
        nfa.add_transition("q0", "1", "q1");
        for (from, to) in [("q1", "q2"), ("q2", "q3")] {
            nfa.add_transition(from, "0", to);
            nfa.add_transition(from, "1", to);
        }
        nfa.add_finish("q3");
        nfa
    }

    #[test]
    fn states_are_named_by_subsets() {
        let dfa = subset_construct(&third_from_end());
        assert_eq!(dfa.start(), "q0");
        assert_eq!(dfa.len(), 8);
        assert_eq!(dfa.trans("q0", &["1"]), Some("q0,q1"));
        assert_eq!(dfa.trans("q0", &["1", "1", "1"]), Some("q0,q1,q2,q3"));
        assert!(dfa.finish().contains("q0,q1,q2,q3"));
        assert!(dfa.finish().contains("q0,q3"));
        assert!(!dfa.finish().contains("q0,q1"));
    }

    #[test]
    fn construction_is_deterministic() {
        let a = subset_construct(&third_from_end());
        let b = subset_construct(&third_from_end());
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn start_state_is_closed() {
        let mut enfa = ENFA::new("s");
        enfa.add_epsilon_transition("s", "t");
        enfa.add_epsilon_transition("t", "u");
        enfa.add_transition("u", "a", "v");
        enfa.add_finish("u");

        let dfa = subset_construct(&enfa);
        assert_eq!(dfa.start(), "s,t,u");
        assert!(dfa.finish().contains("s,t,u"));
        assert_eq!(dfa.trans("s,t,u", &["a"]), Some("v"));
        assert!(dfa.state("s,t,u").and_then(|s| s.next("epsilon")).is_none());
        assert!(accept(&dfa, &[]));
        assert!(accept(&enfa, &[]));
        assert!(!accept(&dfa, &["a"]));
    }
}
