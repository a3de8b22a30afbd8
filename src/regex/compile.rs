//! Thompson construction from symbolic terms
//!
//! Each term becomes a fragment with one entry and one exit state; fragments
//! compose with epsilon edges. The finished automaton has a single initial
//! state and a single accepting state carrying the caller's tag.

use crate::automaton::bounds::BoundSet;
use crate::automaton::nfa::TermNfa;
use crate::automaton::{CharRange, StateId};
use crate::regex::term::{Atom, RegexTerm};

/// A partial automaton with one entry and one exit
struct Fragment {
    start: StateId,
    end: StateId,
}

/// Compile a term into an NFA whose single accepting state carries `tag`
pub fn compile<A>(term: &RegexTerm, tag: A) -> TermNfa<A> {
    let mut nfa: TermNfa<A> = TermNfa::new();
    let fragment = emit(&mut nfa, term);
    nfa.set_initial(fragment.start);
    nfa.set_accept(fragment.end, tag);
    nfa
}

fn emit<A>(nfa: &mut TermNfa<A>, term: &RegexTerm) -> Fragment {
    match term {
        RegexTerm::Leaf(atom) => emit_leaf(nfa, *atom),
        RegexTerm::Concat(items) => {
            let start = nfa.add_state();
            let mut tail = start;
            for item in items {
                let fragment = emit(nfa, item);
                nfa.add_epsilon(tail, fragment.start);
                tail = fragment.end;
            }
            Fragment { start, end: tail }
        }
        RegexTerm::Alt(items) => {
            let start = nfa.add_state();
            let end = nfa.add_state();
            if items.is_empty() {
                // An empty choice matches the empty string
                nfa.add_epsilon(start, end);
            }
            for item in items {
                let fragment = emit(nfa, item);
                nfa.add_epsilon(start, fragment.start);
                nfa.add_epsilon(fragment.end, end);
            }
            Fragment { start, end }
        }
        RegexTerm::Star(inner) => {
            let start = nfa.add_state();
            let end = nfa.add_state();
            let fragment = emit(nfa, inner);
            nfa.add_epsilon(start, end);
            nfa.add_epsilon(start, fragment.start);
            nfa.add_epsilon(fragment.end, fragment.start);
            nfa.add_epsilon(fragment.end, end);
            Fragment { start, end }
        }
    }
}

fn emit_leaf<A>(nfa: &mut TermNfa<A>, atom: Atom) -> Fragment {
    let start = nfa.add_state();
    let end = nfa.add_state();
    match atom {
        // The exit stays unreachable: nothing matches
        Atom::Nihil => {}
        Atom::Epsilon => nfa.add_epsilon(start, end),
        Atom::Symbol(ch) => nfa.add_edge(start, CharRange::single(ch), end),
        Atom::Any => {
            // Everything except the line break, clipped around it
            if let Some(before) = char::from_u32('\n' as u32 - 1) {
                nfa.add_edge(start, CharRange::new('\0', before), end);
            }
            if let Some(after) = char::from_u32('\n' as u32 + 1) {
                nfa.add_edge(start, CharRange::new(after, char::MAX), end);
            }
        }
        Atom::Bound(bound) => {
            nfa.add_bound_edge(start, BoundSet::of(&[bound]), end);
        }
    }
    Fragment { start, end }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::nfa::Nfa;

    /// Breadth-first simulation, good enough to check small automata
    fn accepts<A>(nfa: &TermNfa<A>, input: &str) -> bool {
        let mut current = nfa.epsilon_closure(&[nfa.initial()]);
        for ch in input.chars() {
            let moved: Vec<StateId> = current
                .iter()
                .flat_map(|&s| nfa.successors(s, ch))
                .collect();
            current = nfa.epsilon_closure(&moved);
            if current.is_empty() {
                return false;
            }
        }
        current.iter().any(|&s| nfa.is_accepting(s))
    }

    #[test]
    fn test_symbol() {
        let nfa = compile(&RegexTerm::symbol('a'), ());
        assert!(accepts(&nfa, "a"));
        assert!(!accepts(&nfa, "b"));
        assert!(!accepts(&nfa, ""));
    }

    #[test]
    fn test_concat() {
        let term = RegexTerm::concat(vec![RegexTerm::symbol('a'), RegexTerm::symbol('b')]);
        let nfa = compile(&term, ());
        assert!(accepts(&nfa, "ab"));
        assert!(!accepts(&nfa, "a"));
        assert!(!accepts(&nfa, "abb"));
    }

    #[test]
    fn test_alt() {
        let term = RegexTerm::alt(vec![RegexTerm::symbol('a'), RegexTerm::symbol('b')]);
        let nfa = compile(&term, ());
        assert!(accepts(&nfa, "a"));
        assert!(accepts(&nfa, "b"));
        assert!(!accepts(&nfa, "c"));
    }

    #[test]
    fn test_star() {
        let term = RegexTerm::star(RegexTerm::symbol('a'));
        let nfa = compile(&term, ());
        assert!(accepts(&nfa, ""));
        assert!(accepts(&nfa, "a"));
        assert!(accepts(&nfa, "aaaa"));
        assert!(!accepts(&nfa, "ab"));
    }

    #[test]
    fn test_nihil_matches_nothing() {
        let nfa = compile(&RegexTerm::nihil(), ());
        assert!(!accepts(&nfa, ""));
        assert!(!accepts(&nfa, "a"));
    }

    #[test]
    fn test_epsilon_matches_empty() {
        let nfa = compile(&RegexTerm::epsilon(), ());
        assert!(accepts(&nfa, ""));
        assert!(!accepts(&nfa, "a"));
    }

    #[test]
    fn test_any_excludes_line_break() {
        let nfa = compile(&RegexTerm::any(), ());
        assert!(accepts(&nfa, "x"));
        assert!(accepts(&nfa, "世"));
        assert!(!accepts(&nfa, "\n"));
    }
}
