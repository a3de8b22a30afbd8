//! Nondeterministic configuration search over the grid automaton
//!
//! A configuration pairs a [`Quadro`] snapshot with a control state. The
//! search is a depth-first worklist: pop a configuration, succeed if it sits
//! in the accept control state, otherwise push every successor the caller's
//! step function produces (each successor built from a [`Quadro::fork`], so
//! sibling branches never alias).
//!
//! The search is bounded: exploration past [`Lba::max_configs`] is reported
//! as [`EngineError::RunawaySearch`] instead of looping forever. Grammars
//! need no ad hoc repeated-state counters of their own.

pub mod regex_step;

pub use regex_step::RegexTransit;

use crate::grid::Quadro;
use crate::utils::error::{EngineError, EngineResult};

/// The per-step calling convention for control-state transitions
pub trait Transition<S, P, B = ()> {
    /// Apply one step at the cursor, returning the next control state
    fn transit(&self, quadro: &mut Quadro<'_, S, B>, state: P) -> P;
}

/// One explored unit: a grid-cursor snapshot plus a control state
#[derive(Debug)]
pub struct Config<'a, S, P, B = ()> {
    pub quadro: Quadro<'a, S, B>,
    pub state: P,
}

impl<'a, S: Clone, P, B> Config<'a, S, P, B> {
    pub fn new(quadro: Quadro<'a, S, B>, state: P) -> Self {
        Config { quadro, state }
    }
}

/// The bounded depth-first acceptance search
#[derive(Debug, Clone)]
pub struct Lba {
    max_configs: usize,
}

impl Lba {
    /// Default exploration bound
    pub const DEFAULT_MAX_CONFIGS: usize = 100_000;

    pub fn new() -> Self {
        Lba {
            max_configs: Self::DEFAULT_MAX_CONFIGS,
        }
    }

    pub fn with_max_configs(mut self, max_configs: usize) -> Self {
        self.max_configs = max_configs;
        self
    }

    pub fn max_configs(&self) -> usize {
        self.max_configs
    }

    /// Drive `step` from `initial` until a configuration reaches
    /// `accept_state`
    ///
    /// `Ok(false)` is the normal "not accepted" outcome when the worklist
    /// empties; only exceeding the exploration bound is an error.
    pub fn accepts<'a, S, P, B, F>(
        &self,
        mut step: F,
        initial: Config<'a, S, P, B>,
        accept_state: P,
    ) -> EngineResult<bool>
    where
        P: PartialEq,
        F: FnMut(Config<'a, S, P, B>) -> Vec<Config<'a, S, P, B>>,
    {
        let mut worklist = vec![initial];
        let mut explored = 0usize;

        while let Some(config) = worklist.pop() {
            explored += 1;
            if explored > self.max_configs {
                return Err(EngineError::runaway(explored));
            }
            if config.state == accept_state {
                return Ok(true);
            }
            worklist.extend(step(config));
        }
        Ok(false)
    }
}

impl Default for Lba {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TextArt;

    fn quadro(art: &TextArt) -> Quadro<'_, u8> {
        Quadro::new(art, 0)
    }

    #[test]
    fn test_accepts_initial_state() {
        let art = TextArt::from_text("x");
        let initial = Config::new(quadro(&art), 3u32);
        let accepted = Lba::new()
            .accepts(|_| unreachable!("accepting config is popped first"), initial, 3)
            .unwrap();
        assert!(accepted);
    }

    #[test]
    fn test_linear_chain() {
        let art = TextArt::from_text("x");
        let initial = Config::new(quadro(&art), 0u32);
        let accepted = Lba::new()
            .accepts(
                |config| {
                    if config.state < 5 {
                        vec![Config::new(config.quadro.fork(), config.state + 1)]
                    } else {
                        vec![]
                    }
                },
                initial,
                5,
            )
            .unwrap();
        assert!(accepted);
    }

    #[test]
    fn test_branching_finds_the_one_accepting_path() {
        let art = TextArt::from_text("x");
        let initial = Config::new(quadro(&art), 1u32);
        // Branch to 2n and 2n+1; only state 13 accepts. Cut off below depth
        // of 16 so the search space stays finite.
        let accepted = Lba::new()
            .accepts(
                |config| {
                    if config.state >= 16 {
                        return vec![];
                    }
                    vec![
                        Config::new(config.quadro.fork(), config.state * 2),
                        Config::new(config.quadro.fork(), config.state * 2 + 1),
                    ]
                },
                initial,
                13,
            )
            .unwrap();
        assert!(accepted);
    }

    #[test]
    fn test_exhausted_worklist_is_not_accepted() {
        let art = TextArt::from_text("x");
        let initial = Config::new(quadro(&art), 0u32);
        let accepted = Lba::new().accepts(|_| vec![], initial, 9).unwrap();
        assert!(!accepted);
    }

    #[test]
    fn test_runaway_is_reported() {
        let art = TextArt::from_text("x");
        let initial = Config::new(quadro(&art), 0u32);
        let result = Lba::new().with_max_configs(50).accepts(
            |config| vec![Config::new(config.quadro.fork(), config.state)],
            initial,
            9,
        );
        assert!(matches!(result, Err(EngineError::RunawaySearch { .. })));
    }
}
