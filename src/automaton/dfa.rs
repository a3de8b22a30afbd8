//! Deterministic automaton contract and the subset-construction determinizer
//!
//! A [`TableDfa`] is built from any [`Nfa`] implementation by subset
//! construction. Interval edges are split at their boundary points so each
//! deterministic state carries a disjoint, sorted transition table, and every
//! state not leading to acceptance is marked dead. Stepping is total: a
//! character with no matching interval lands in the explicit dead state.

use fxhash::{FxHashMap, FxHashSet};
use indexmap::IndexMap;

use super::bounds::{BoundSet, TextBound};
use super::nfa::Nfa;
use super::{CharRange, StateId};

/// The deterministic finite-automaton contract
pub trait Dfa {
    type Accept;

    fn start(&self) -> StateId;

    /// Consume one character. Total: lands in the dead state on no match.
    fn go(&self, state: StateId, ch: char) -> StateId;

    /// Apply the boundary observations holding at the current position.
    /// Zero-width; a state with no applicable boundary edge stays put.
    fn go_bounds(&self, state: StateId, observed: BoundSet) -> StateId;

    /// True if no accepting state is reachable from here
    fn is_dead(&self, state: StateId) -> bool;

    fn accept_tag(&self, state: StateId) -> Option<&Self::Accept>;

    fn is_accepting(&self, state: StateId) -> bool {
        self.accept_tag(state).is_some()
    }

    /// Diagnostic label (the underlying NFA state set)
    fn label(&self, state: StateId) -> &str;
}

#[derive(Debug, Clone)]
struct DfaStateData<A> {
    /// Disjoint, sorted interval transitions
    trans: Vec<(CharRange, StateId)>,
    /// Keyed by the observation masked to `relevant`
    bound_trans: FxHashMap<BoundSet, StateId>,
    relevant: BoundSet,
    accept: Option<A>,
    label: String,
    dead: bool,
}

/// Deterministic automaton stored as per-state transition tables
#[derive(Debug, Clone)]
pub struct TableDfa<A> {
    states: Vec<DfaStateData<A>>,
    start: StateId,
    dead: StateId,
}

impl<A: Clone> TableDfa<A> {
    /// Subset construction over the [`Nfa`] contract
    pub fn determinize<N>(nfa: &N) -> TableDfa<A>
    where
        N: Nfa<Accept = A>,
    {
        Determinizer::new(nfa).run()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}

impl<A> Dfa for TableDfa<A> {
    type Accept = A;

    fn start(&self) -> StateId {
        self.start
    }

    fn go(&self, state: StateId, ch: char) -> StateId {
        for (range, target) in &self.states[state.0].trans {
            if range.contains(ch) {
                return *target;
            }
        }
        self.dead
    }

    fn go_bounds(&self, state: StateId, observed: BoundSet) -> StateId {
        let data = &self.states[state.0];
        let mask = observed.intersection(data.relevant);
        data.bound_trans.get(&mask).copied().unwrap_or(state)
    }

    fn is_dead(&self, state: StateId) -> bool {
        self.states[state.0].dead
    }

    fn accept_tag(&self, state: StateId) -> Option<&A> {
        self.states[state.0].accept.as_ref()
    }

    fn label(&self, state: StateId) -> &str {
        &self.states[state.0].label
    }
}

struct Determinizer<'a, N: Nfa> {
    nfa: &'a N,
    /// Sorted NFA-state set -> DFA state index, in construction order
    subsets: IndexMap<Vec<StateId>, usize>,
    pending: Vec<Vec<StateId>>,
}

impl<'a, N> Determinizer<'a, N>
where
    N: Nfa,
    N::Accept: Clone,
{
    fn new(nfa: &'a N) -> Self {
        Determinizer {
            nfa,
            subsets: IndexMap::new(),
            pending: Vec::new(),
        }
    }

    fn closure(&self, states: &[StateId]) -> Vec<StateId> {
        let mut seen: FxHashSet<StateId> = states.iter().copied().collect();
        let mut stack: Vec<StateId> = states.to_vec();
        while let Some(state) = stack.pop() {
            for next in self.nfa.epsilon_successors(state) {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }
        let mut closure: Vec<StateId> = seen.into_iter().collect();
        closure.sort();
        closure
    }

    fn intern(&mut self, set: Vec<StateId>) -> StateId {
        if let Some(&idx) = self.subsets.get(&set) {
            return StateId(idx);
        }
        let idx = self.subsets.len();
        self.subsets.insert(set.clone(), idx);
        self.pending.push(set);
        StateId(idx)
    }

    fn run(mut self) -> TableDfa<N::Accept> {
        let initials: Vec<StateId> = (0..self.nfa.state_count())
            .map(StateId)
            .filter(|&s| self.nfa.is_initial(s))
            .collect();
        let start_set = self.closure(&initials);
        let start = self.intern(start_set);
        // The trap state is the empty subset
        let dead = self.intern(Vec::new());

        let mut states: Vec<DfaStateData<N::Accept>> = Vec::new();
        while let Some(set) = self.pending.pop() {
            let idx = self.subsets[&set];
            let data = self.expand(&set, dead);
            if states.len() <= idx {
                states.resize_with(idx + 1, || DfaStateData {
                    trans: Vec::new(),
                    bound_trans: FxHashMap::default(),
                    relevant: BoundSet::EMPTY,
                    accept: None,
                    label: String::new(),
                    dead: false,
                });
            }
            states[idx] = data;
        }

        mark_dead_states(&mut states);
        TableDfa {
            states,
            start,
            dead,
        }
    }

    fn expand(&mut self, set: &[StateId], dead: StateId) -> DfaStateData<N::Accept> {
        let trans = self.expand_intervals(set, dead);
        let (relevant, bound_trans) = self.expand_bounds(set);

        let accept = set
            .iter()
            .find_map(|&s| self.nfa.accept_tag(s))
            .cloned();
        let label = format!(
            "{{{}}}",
            set.iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(",")
        );

        DfaStateData {
            trans,
            bound_trans,
            relevant,
            accept,
            label,
            dead: false,
        }
    }

    /// Split the intervals leaving `set` at their boundary points so the
    /// resulting table is disjoint; one representative character per piece
    /// decides the whole piece.
    fn expand_intervals(
        &mut self,
        set: &[StateId],
        dead: StateId,
    ) -> Vec<(CharRange, StateId)> {
        let ranges = self.nfa.ranges_from(set);
        let mut cuts: Vec<u32> = Vec::with_capacity(ranges.len() * 2);
        for range in &ranges {
            cuts.push(range.lo as u32);
            cuts.push(range.hi as u32 + 1);
        }
        cuts.sort_unstable();
        cuts.dedup();

        let mut trans = Vec::new();
        for window in cuts.windows(2) {
            let (piece_lo, piece_hi) = match clip_piece(window[0], window[1] - 1) {
                Some(piece) => piece,
                None => continue,
            };
            if !ranges.iter().any(|r| r.contains(piece_lo)) {
                continue;
            }
            let moved: Vec<StateId> = {
                let mut moved: Vec<StateId> = set
                    .iter()
                    .flat_map(|&s| self.nfa.successors(s, piece_lo))
                    .collect();
                moved.sort();
                moved.dedup();
                moved
            };
            let target = if moved.is_empty() {
                dead
            } else {
                let moved_closure = self.closure(&moved);
                self.intern(moved_closure)
            };
            trans.push((CharRange::new(piece_lo, piece_hi), target));
        }
        trans
    }

    /// Precompute one boundary transition per distinct masked observation
    fn expand_bounds(&mut self, set: &[StateId]) -> (BoundSet, FxHashMap<BoundSet, StateId>) {
        let guards = self.nfa.bound_guards_from(set);
        let mut relevant = BoundSet::EMPTY;
        for guard in &guards {
            relevant = relevant.union(*guard);
        }
        let relevant_bits: Vec<TextBound> = relevant.iter().collect();

        let mut bound_trans = FxHashMap::default();
        for mask in 0u32..(1 << relevant_bits.len()) {
            let mut observed = BoundSet::EMPTY;
            for (i, &bit) in relevant_bits.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    observed.insert(bit);
                }
            }
            let mut moved: Vec<StateId> = set
                .iter()
                .flat_map(|&s| self.nfa.bound_successors(s, observed))
                .collect();
            if moved.is_empty() {
                continue;
            }
            // Not taking a zero-width edge is always allowed, so the source
            // set stays in play
            moved.extend_from_slice(set);
            moved.sort();
            moved.dedup();
            let moved_closure = self.closure(&moved);
            let target = self.intern(moved_closure);
            bound_trans.insert(observed, target);
        }
        (relevant, bound_trans)
    }
}

/// Surrogate code points are not valid `char` input, so pieces are clipped
/// around the gap rather than split by it
fn clip_piece(lo: u32, hi: u32) -> Option<(char, char)> {
    const GAP_LO: u32 = 0xD800;
    const GAP_HI: u32 = 0xDFFF;
    let lo = if (GAP_LO..=GAP_HI).contains(&lo) {
        GAP_HI + 1
    } else {
        lo
    };
    let hi = if (GAP_LO..=GAP_HI).contains(&hi) {
        GAP_LO - 1
    } else {
        hi
    };
    if lo > hi {
        return None;
    }
    Some((char::from_u32(lo)?, char::from_u32(hi)?))
}

/// Reverse reachability from the accepting states; everything else is dead
fn mark_dead_states<A>(states: &mut [DfaStateData<A>]) {
    let mut alive: FxHashSet<usize> = states
        .iter()
        .enumerate()
        .filter(|(_, s)| s.accept.is_some())
        .map(|(i, _)| i)
        .collect();

    loop {
        let mut grew = false;
        for (idx, state) in states.iter().enumerate() {
            if alive.contains(&idx) {
                continue;
            }
            let reaches = state
                .trans
                .iter()
                .map(|(_, t)| t.0)
                .chain(state.bound_trans.values().map(|t| t.0))
                .any(|t| alive.contains(&t));
            if reaches {
                alive.insert(idx);
                grew = true;
            }
        }
        if !grew {
            break;
        }
    }

    for (idx, state) in states.iter_mut().enumerate() {
        state.dead = !alive.contains(&idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::nfa::TermNfa;
    use crate::regex::{compile, parser};

    fn dfa_for(pattern: &str) -> TableDfa<u8> {
        let term = parser::parse(pattern).unwrap();
        let nfa: TermNfa<u8> = compile::compile(&term, 1);
        TableDfa::determinize(&nfa)
    }

    fn scan(dfa: &TableDfa<u8>, input: &str) -> bool {
        let mut state = dfa.start();
        for ch in input.chars() {
            state = dfa.go(state, ch);
        }
        dfa.is_accepting(state)
    }

    #[test]
    fn test_literal_sequence() {
        let dfa = dfa_for("ab");
        assert!(scan(&dfa, "ab"));
        assert!(!scan(&dfa, "a"));
        assert!(!scan(&dfa, "abc"));
        assert!(!scan(&dfa, "ba"));
    }

    #[test]
    fn test_go_is_total() {
        let dfa = dfa_for("a");
        let mut state = dfa.start();
        state = dfa.go(state, 'z');
        assert!(dfa.is_dead(state));
        // and stays total from the dead state
        state = dfa.go(state, 'a');
        assert!(dfa.is_dead(state));
    }

    #[test]
    fn test_alternation() {
        let dfa = dfa_for("ab|cd");
        assert!(scan(&dfa, "ab"));
        assert!(scan(&dfa, "cd"));
        assert!(!scan(&dfa, "ad"));
    }

    #[test]
    fn test_star() {
        let dfa = dfa_for("a*b");
        assert!(scan(&dfa, "b"));
        assert!(scan(&dfa, "ab"));
        assert!(scan(&dfa, "aaaab"));
        assert!(!scan(&dfa, "aa"));
    }

    #[test]
    fn test_any() {
        let dfa = dfa_for(".b");
        assert!(scan(&dfa, "xb"));
        assert!(scan(&dfa, "世b"));
        assert!(!scan(&dfa, "\nb"));
    }

    #[test]
    fn test_dead_state_detection() {
        let dfa = dfa_for("ab");
        let mut state = dfa.start();
        assert!(!dfa.is_dead(state));
        state = dfa.go(state, 'a');
        assert!(!dfa.is_dead(state));
        state = dfa.go(state, 'b');
        assert!(dfa.is_accepting(state));
        // any further character can no longer reach acceptance
        state = dfa.go(state, 'b');
        assert!(dfa.is_dead(state));
    }

    #[test]
    fn test_accept_tag() {
        let dfa = dfa_for("x");
        let state = dfa.go(dfa.start(), 'x');
        assert_eq!(dfa.accept_tag(state), Some(&1));
    }

    #[test]
    fn test_bound_transition() {
        use crate::automaton::bounds::{BoundSet, TextBound};
        let dfa = dfa_for("^a");
        let at_line_start = BoundSet::of(&[TextBound::BeginInput, TextBound::BeginLine]);
        let state = dfa.go_bounds(dfa.start(), at_line_start);
        let state = dfa.go(state, 'a');
        assert!(dfa.is_accepting(state));

        // without the boundary the anchor edge never fires
        let state = dfa.go(dfa.start(), 'a');
        assert!(!dfa.is_accepting(state));
    }

    #[test]
    fn test_labels_name_nfa_states() {
        let dfa = dfa_for("a");
        assert!(dfa.label(dfa.start()).starts_with('{'));
    }
}
