//! Symbolic regular-expression terms and their normalizing rewrite system
//!
//! Terms are immutable and structurally hashable. `Alt` is canonicalized on
//! construction (sorted by the derived ordering, duplicates collapsed) so that
//! equality and hashing treat it as an unordered set; `Concat` stays an
//! ordered sequence. That distinction is what lets the set-based rewrite
//! rules terminate.
//!
//! # Example
//!
//! ```rust
//! use quadro::regex::term::RegexTerm;
//!
//! let term = RegexTerm::concat(vec![
//!     RegexTerm::symbol('a'),
//!     RegexTerm::epsilon(),
//!     RegexTerm::symbol('b'),
//! ]);
//! let simplified = term.simplify();
//! assert_eq!(
//!     simplified,
//!     RegexTerm::concat(vec![RegexTerm::symbol('a'), RegexTerm::symbol('b')])
//! );
//! ```

use std::fmt;

use crate::automaton::bounds::TextBound;

/// An opaque matched unit at a term leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Atom {
    /// Matches nothing (the empty language)
    Nihil,
    /// Matches the empty string
    Epsilon,
    /// Matches one specific character
    Symbol(char),
    /// Matches any character except a line break
    Any,
    /// Zero-width boundary assertion
    Bound(TextBound),
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Nihil => write!(f, "∅"),
            Atom::Epsilon => write!(f, "ε"),
            Atom::Symbol(c) => write!(f, "{}", c),
            Atom::Any => write!(f, "."),
            Atom::Bound(b) => write!(f, "<{}>", b),
        }
    }
}

/// A symbolic regular-expression term
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegexTerm {
    /// An opaque matched unit
    Leaf(Atom),
    /// Ordered sequence
    Concat(Vec<RegexTerm>),
    /// Unordered choice; canonicalized (sorted, deduplicated) on construction
    Alt(Vec<RegexTerm>),
    /// Kleene closure
    Star(Box<RegexTerm>),
}

impl RegexTerm {
    pub fn nihil() -> Self {
        RegexTerm::Leaf(Atom::Nihil)
    }

    pub fn epsilon() -> Self {
        RegexTerm::Leaf(Atom::Epsilon)
    }

    pub fn symbol(c: char) -> Self {
        RegexTerm::Leaf(Atom::Symbol(c))
    }

    pub fn any() -> Self {
        RegexTerm::Leaf(Atom::Any)
    }

    pub fn bound(b: TextBound) -> Self {
        RegexTerm::Leaf(Atom::Bound(b))
    }

    pub fn concat(terms: Vec<RegexTerm>) -> Self {
        RegexTerm::Concat(terms)
    }

    /// Build an alternation in canonical (sorted, deduplicated) form
    pub fn alt(mut terms: Vec<RegexTerm>) -> Self {
        terms.sort();
        terms.dedup();
        RegexTerm::Alt(terms)
    }

    pub fn star(term: RegexTerm) -> Self {
        RegexTerm::Star(Box::new(term))
    }

    pub fn is_nihil(&self) -> bool {
        matches!(self, RegexTerm::Leaf(Atom::Nihil))
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, RegexTerm::Leaf(Atom::Epsilon))
    }

    /// Normalize this term by the rewrite laws, to a fixpoint
    ///
    /// Pure and total; idempotent (`t.simplify().simplify() == t.simplify()`)
    /// and language-preserving.
    pub fn simplify(&self) -> RegexTerm {
        let mut current = self.clone();
        loop {
            let next = simplify_pass(&current);
            if next == current {
                return next;
            }
            current = next;
        }
    }
}

impl fmt::Display for RegexTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Compound sub-terms render parenthesized
        fn child(f: &mut fmt::Formatter<'_>, t: &RegexTerm) -> fmt::Result {
            match t {
                RegexTerm::Leaf(_) => write!(f, "{}", t),
                _ => write!(f, "({})", t),
            }
        }
        match self {
            RegexTerm::Leaf(a) => write!(f, "{}", a),
            RegexTerm::Concat(items) => {
                for item in items {
                    child(f, item)?;
                }
                Ok(())
            }
            RegexTerm::Alt(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    child(f, item)?;
                }
                Ok(())
            }
            RegexTerm::Star(inner) => {
                child(f, inner)?;
                write!(f, "*")
            }
        }
    }
}

/// One bottom-up application of every law
fn simplify_pass(term: &RegexTerm) -> RegexTerm {
    match term {
        RegexTerm::Leaf(_) => term.clone(),
        RegexTerm::Star(inner) => simplify_star(simplify_pass(inner)),
        RegexTerm::Concat(items) => {
            let items: Vec<RegexTerm> = items.iter().map(simplify_pass).collect();
            simplify_concat(items)
        }
        RegexTerm::Alt(items) => {
            if items.is_empty() {
                // Zero alternatives
                return RegexTerm::epsilon();
            }
            let items: Vec<RegexTerm> = items.iter().map(simplify_pass).collect();
            simplify_alt(items)
        }
    }
}

fn simplify_star(inner: RegexTerm) -> RegexTerm {
    match inner {
        // ∅* = ε, ε* = ε
        RegexTerm::Leaf(Atom::Nihil) | RegexTerm::Leaf(Atom::Epsilon) => RegexTerm::epsilon(),
        // (A*)* = A*
        RegexTerm::Star(x) => RegexTerm::Star(x),
        // (ε|A)* = A*
        RegexTerm::Alt(items) if items.iter().any(RegexTerm::is_epsilon) => {
            let kept: Vec<RegexTerm> = items.into_iter().filter(|t| !t.is_epsilon()).collect();
            RegexTerm::star(RegexTerm::alt(kept))
        }
        other => RegexTerm::star(other),
    }
}

fn simplify_concat(items: Vec<RegexTerm>) -> RegexTerm {
    let mut flat = Vec::with_capacity(items.len());
    for item in items {
        if item.is_nihil() {
            // A child matching nothing annihilates the whole sequence
            return RegexTerm::nihil();
        }
        if item.is_epsilon() {
            continue;
        }
        match item {
            RegexTerm::Concat(nested) => flat.extend(nested),
            other => flat.push(other),
        }
    }

    // A* A* collapses to A*
    let mut collapsed: Vec<RegexTerm> = Vec::with_capacity(flat.len());
    for item in flat {
        let redundant = matches!(
            (collapsed.last(), &item),
            (Some(RegexTerm::Star(prev)), RegexTerm::Star(next)) if prev == next
        );
        if !redundant {
            collapsed.push(item);
        }
    }

    match collapsed.len() {
        0 => RegexTerm::epsilon(),
        1 => collapsed.into_iter().next().unwrap(),
        _ => distribute(collapsed),
    }
}

/// A·(B|C)·D rewrites to (A·B·D)|(A·C·D); the surrounding fixpoint
/// re-simplifies the produced alternation
fn distribute(items: Vec<RegexTerm>) -> RegexTerm {
    let alt_at = items
        .iter()
        .position(|t| matches!(t, RegexTerm::Alt(alts) if !alts.is_empty()));
    let Some(idx) = alt_at else {
        return RegexTerm::Concat(items);
    };

    let prefix = &items[..idx];
    let suffix = &items[idx + 1..];
    let RegexTerm::Alt(alternatives) = &items[idx] else {
        unreachable!("position() matched an Alt");
    };

    let branches = alternatives
        .iter()
        .map(|a| {
            let mut seq = prefix.to_vec();
            seq.push(a.clone());
            seq.extend_from_slice(suffix);
            RegexTerm::Concat(seq)
        })
        .collect();
    RegexTerm::alt(branches)
}

fn simplify_alt(items: Vec<RegexTerm>) -> RegexTerm {
    let mut flat = Vec::with_capacity(items.len());
    for item in items {
        if item.is_nihil() {
            continue;
        }
        match item {
            RegexTerm::Alt(nested) => flat.extend(nested),
            other => flat.push(other),
        }
    }

    if flat.is_empty() {
        // Every alternative matched nothing
        return RegexTerm::nihil();
    }

    // A | A* collapses to A*
    let starred: Vec<RegexTerm> = flat
        .iter()
        .filter_map(|t| match t {
            RegexTerm::Star(inner) => Some((**inner).clone()),
            _ => None,
        })
        .collect();
    let kept: Vec<RegexTerm> = flat
        .into_iter()
        .filter(|t| !starred.contains(t))
        .collect();

    match RegexTerm::alt(kept) {
        RegexTerm::Alt(single) if single.len() == 1 => single.into_iter().next().unwrap(),
        other => other,
    }
}
