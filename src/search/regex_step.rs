//! A compiled pattern scan as one step of the grid automaton
//!
//! A [`RegexTransit`] runs a 1-D deterministic scan along a ray from the
//! cursor - "recognize a token in this direction from here" - as a single
//! transition of the outer 2-D automaton. The pattern is compiled to a DFA
//! once at construction; malformed patterns surface there and never inside
//! a walk.

use std::fmt;

use crate::automaton::dfa::{Dfa, TableDfa};
use crate::grid::{Heading, Quadro};
use crate::regex;
use crate::search::Transition;
use crate::utils::error::EngineResult;

/// A 1-D pattern scan usable as a grid-automaton transition
pub struct RegexTransit<P> {
    pattern: String,
    dfa: TableDfa<()>,
    direction: Heading,
    begin: P,
    accept: P,
    reject: P,
}

impl<P> RegexTransit<P> {
    /// Compile `pattern` for scans in `direction`
    ///
    /// `begin` is the only control state the transition may be entered from;
    /// the step result is `accept` or `reject`.
    pub fn new(
        pattern: &str,
        direction: Heading,
        begin: P,
        accept: P,
        reject: P,
    ) -> EngineResult<Self> {
        let dfa = regex::build_dfa(pattern, ())?;
        Ok(RegexTransit {
            pattern: pattern.to_string(),
            dfa,
            direction,
            begin,
            accept,
            reject,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn direction(&self) -> Heading {
        self.direction
    }
}

impl<S: Clone, P, B> Transition<S, P, B> for RegexTransit<P>
where
    P: PartialEq + Clone + fmt::Debug,
{
    /// Scan from the cursor along the configured direction
    ///
    /// Feeds one pixel character per step and advances; stops when the
    /// cursor reaches the grid bound or the DFA goes dead. The result is
    /// `accept` when the DFA was accepting at the last live instant of the
    /// scan - a trailing character that kills the DFA does not retract an
    /// acceptance already reached.
    fn transit(&self, quadro: &mut Quadro<'_, S, B>, state: P) -> P {
        assert!(
            state == self.begin,
            "regex transition for {:?} entered from control state {:?}",
            self.pattern,
            state,
        );
        if quadro.get().is_bound() {
            return self.reject.clone();
        }

        let mut dfa_state = self.dfa.start();
        let mut accepted = false;
        loop {
            let ch = quadro
                .get()
                .to_char()
                .expect("scan cursor is inside the grid");
            let next = self.dfa.go(dfa_state, ch);
            if !self.dfa.is_dead(next) {
                accepted = self.dfa.is_accepting(next);
            }
            quadro.move_toward(self.direction);
            if quadro.get().is_bound() || self.dfa.is_dead(next) {
                break;
            }
            dfa_state = next;
        }

        if accepted {
            self.accept.clone()
        } else {
            self.reject.clone()
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for RegexTransit<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexTransit")
            .field("pattern", &self.pattern)
            .field("direction", &self.direction)
            .field("begin", &self.begin)
            .field("accept", &self.accept)
            .field("reject", &self.reject)
            .finish()
    }
}
