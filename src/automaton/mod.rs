//! Finite-automaton contracts
//!
//! The NFA side is what a term compiler produces: possibly many successors
//! per symbol, epsilon edges, and zero-width boundary edges. The DFA side is
//! the deterministic specialization a scan actually runs: exactly one
//! successor per input, with an explicit dead state so that stepping is
//! total - "no match" is a transition into the dead state, never an error.
//!
//! States are opaque identities; accept and match tags are looked up through
//! the automaton by state, not stored on the state itself.

pub mod bounds;
pub mod dfa;
pub mod nfa;

pub use bounds::{BoundSet, SequenceHead, TextBound};
pub use dfa::{Dfa, TableDfa};
pub use nfa::{Nfa, TermNfa};

use std::fmt;

/// Opaque automaton state identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub usize);

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// An inclusive character interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharRange {
    pub lo: char,
    pub hi: char,
}

impl CharRange {
    pub fn new(lo: char, hi: char) -> Self {
        debug_assert!(lo <= hi, "inverted range {:?}..{:?}", lo, hi);
        CharRange { lo, hi }
    }

    pub fn single(ch: char) -> Self {
        CharRange { lo: ch, hi: ch }
    }

    pub fn contains(&self, ch: char) -> bool {
        self.lo <= ch && ch <= self.hi
    }

    pub fn overlaps(&self, other: &CharRange) -> bool {
        self.lo <= other.hi && other.lo <= self.hi
    }
}

impl fmt::Display for CharRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lo == self.hi {
            write!(f, "{:?}", self.lo)
        } else {
            write!(f, "{:?}-{:?}", self.lo, self.hi)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_contains() {
        let r = CharRange::new('a', 'z');
        assert!(r.contains('a'));
        assert!(r.contains('m'));
        assert!(r.contains('z'));
        assert!(!r.contains('A'));
    }

    #[test]
    fn test_range_overlap() {
        assert!(CharRange::new('a', 'f').overlaps(&CharRange::new('f', 'z')));
        assert!(!CharRange::new('a', 'e').overlaps(&CharRange::new('f', 'z')));
        assert!(CharRange::single('x').overlaps(&CharRange::new('a', 'z')));
    }
}
