//! Nondeterministic automaton contract and its term-compiled implementation

use fxhash::FxHashSet;

use super::bounds::BoundSet;
use super::{CharRange, StateId};

/// The nondeterministic finite-automaton contract
///
/// `Accept` tags mark accepting states; `Match` tags mark match-end states
/// (useful when one automaton recognizes several token kinds). The alphabet
/// introspection methods exist for the determinizer: they report which
/// discrete symbols, intervals, and boundary guards can leave a state set.
pub trait Nfa {
    type Accept;
    type Match;

    fn state_count(&self) -> usize;

    fn is_initial(&self, state: StateId) -> bool;

    /// Successors over an unconditional zero-width edge
    fn epsilon_successors(&self, state: StateId) -> Vec<StateId>;

    /// Successors consuming one discrete symbol
    fn successors(&self, state: StateId, ch: char) -> Vec<StateId>;

    /// Successors over edges whose interval overlaps `range`
    fn range_successors(&self, state: StateId, range: CharRange) -> Vec<StateId>;

    /// Successors over boundary edges whose guard is satisfied by `observed`
    fn bound_successors(&self, state: StateId, observed: BoundSet) -> Vec<StateId>;

    fn accept_tag(&self, state: StateId) -> Option<&Self::Accept>;

    fn match_tag(&self, state: StateId) -> Option<&Self::Match>;

    fn is_accepting(&self, state: StateId) -> bool {
        self.accept_tag(state).is_some()
    }

    /// Every interval leaving any state in `states`
    fn ranges_from(&self, states: &[StateId]) -> Vec<CharRange>;

    /// Every boundary guard leaving any state in `states`
    fn bound_guards_from(&self, states: &[StateId]) -> Vec<BoundSet>;
}

#[derive(Debug, Clone)]
struct NfaStateData<A, B> {
    epsilon: Vec<StateId>,
    edges: Vec<(CharRange, StateId)>,
    bound_edges: Vec<(BoundSet, StateId)>,
    accept: Option<A>,
    match_tag: Option<B>,
}

/// NFA produced by compiling a symbolic term
///
/// Built incrementally by the Thompson construction in
/// [`crate::regex::compile`]; exposes only the [`Nfa`] contract afterwards.
#[derive(Debug, Clone)]
pub struct TermNfa<A, B = ()> {
    states: Vec<NfaStateData<A, B>>,
    initial: StateId,
}

impl<A, B> TermNfa<A, B> {
    pub fn new() -> Self {
        TermNfa {
            states: Vec::new(),
            initial: StateId(0),
        }
    }

    pub fn add_state(&mut self) -> StateId {
        let id = StateId(self.states.len());
        self.states.push(NfaStateData {
            epsilon: Vec::new(),
            edges: Vec::new(),
            bound_edges: Vec::new(),
            accept: None,
            match_tag: None,
        });
        id
    }

    pub fn set_initial(&mut self, state: StateId) {
        self.initial = state;
    }

    pub fn initial(&self) -> StateId {
        self.initial
    }

    pub fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.states[from.0].epsilon.push(to);
    }

    pub fn add_edge(&mut self, from: StateId, range: CharRange, to: StateId) {
        self.states[from.0].edges.push((range, to));
    }

    pub fn add_bound_edge(&mut self, from: StateId, guard: BoundSet, to: StateId) {
        self.states[from.0].bound_edges.push((guard, to));
    }

    pub fn set_accept(&mut self, state: StateId, tag: A) {
        self.states[state.0].accept = Some(tag);
    }

    pub fn set_match_tag(&mut self, state: StateId, tag: B) {
        self.states[state.0].match_tag = Some(tag);
    }

    /// Epsilon closure of a state set, in ascending state order
    pub fn epsilon_closure(&self, states: &[StateId]) -> Vec<StateId> {
        let mut seen: FxHashSet<StateId> = states.iter().copied().collect();
        let mut stack: Vec<StateId> = states.to_vec();
        while let Some(state) = stack.pop() {
            for &next in &self.states[state.0].epsilon {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }
        let mut closure: Vec<StateId> = seen.into_iter().collect();
        closure.sort();
        closure
    }
}

impl<A, B> Default for TermNfa<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, B> Nfa for TermNfa<A, B> {
    type Accept = A;
    type Match = B;

    fn state_count(&self) -> usize {
        self.states.len()
    }

    fn is_initial(&self, state: StateId) -> bool {
        state == self.initial
    }

    fn epsilon_successors(&self, state: StateId) -> Vec<StateId> {
        self.states[state.0].epsilon.clone()
    }

    fn successors(&self, state: StateId, ch: char) -> Vec<StateId> {
        self.states[state.0]
            .edges
            .iter()
            .filter(|(range, _)| range.contains(ch))
            .map(|(_, to)| *to)
            .collect()
    }

    fn range_successors(&self, state: StateId, range: CharRange) -> Vec<StateId> {
        self.states[state.0]
            .edges
            .iter()
            .filter(|(r, _)| r.overlaps(&range))
            .map(|(_, to)| *to)
            .collect()
    }

    fn bound_successors(&self, state: StateId, observed: BoundSet) -> Vec<StateId> {
        self.states[state.0]
            .bound_edges
            .iter()
            .filter(|(guard, _)| observed.is_superset_of(*guard))
            .map(|(_, to)| *to)
            .collect()
    }

    fn accept_tag(&self, state: StateId) -> Option<&A> {
        self.states[state.0].accept.as_ref()
    }

    fn match_tag(&self, state: StateId) -> Option<&B> {
        self.states[state.0].match_tag.as_ref()
    }

    fn ranges_from(&self, states: &[StateId]) -> Vec<CharRange> {
        let mut ranges: Vec<CharRange> = states
            .iter()
            .flat_map(|s| self.states[s.0].edges.iter().map(|(r, _)| *r))
            .collect();
        ranges.sort();
        ranges.dedup();
        ranges
    }

    fn bound_guards_from(&self, states: &[StateId]) -> Vec<BoundSet> {
        let mut guards: Vec<BoundSet> = states
            .iter()
            .flat_map(|s| self.states[s.0].bound_edges.iter().map(|(g, _)| *g))
            .collect();
        guards.sort();
        guards.dedup();
        guards
    }
}
