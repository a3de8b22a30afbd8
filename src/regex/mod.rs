//! Symbolic regular-expression algebra
//!
//! The pipeline a scan subroutine runs once at construction:
//!
//! ```text
//! pattern text -> RegexTerm -> simplify -> Thompson NFA -> subset DFA
//! ```

pub mod compile;
pub mod parser;
pub mod term;

pub use term::{Atom, RegexTerm};

use crate::automaton::dfa::TableDfa;
use crate::automaton::nfa::TermNfa;
use crate::utils::error::EngineResult;

/// Parse, simplify, and determinize a pattern in one step
pub fn build_dfa<A: Clone>(pattern: &str, tag: A) -> EngineResult<TableDfa<A>> {
    let term = parser::parse(pattern)?;
    let nfa: TermNfa<A> = compile::compile(&term, tag);
    Ok(TableDfa::determinize(&nfa))
}
