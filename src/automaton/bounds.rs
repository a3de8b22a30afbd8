//! Zero-width text boundaries and the linear boundary cursor
//!
//! A boundary is a condition that holds *between* two characters and consumes
//! no input: start of input, start of a line, a word edge, and so on. Several
//! boundaries can hold at the same position (the first position of a text is
//! both `BeginInput` and `BeginLine`), so positions yield a [`BoundSet`], not
//! a single value.

use std::fmt;

use crate::utils::error::{EngineError, EngineResult};

/// A zero-width text boundary assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TextBound {
    /// Before the first character of the input
    BeginInput,
    /// At the start of a line (after a line break, or at the very start)
    BeginLine,
    /// At the end of a line (before a line break, or at the very end)
    EndLine,
    /// After the last character of the input
    EndInput,
    /// At the end of the input ignoring one trailing line break
    EndInputWithoutLine,
    /// The word-ness of the surrounding characters flips here
    Word,
    /// The word-ness of the surrounding characters does not flip here
    NotWord,
}

impl TextBound {
    const ALL: [TextBound; 7] = [
        TextBound::BeginInput,
        TextBound::BeginLine,
        TextBound::EndLine,
        TextBound::EndInput,
        TextBound::EndInputWithoutLine,
        TextBound::Word,
        TextBound::NotWord,
    ];

    fn bit(self) -> u8 {
        match self {
            TextBound::BeginInput => 1 << 0,
            TextBound::BeginLine => 1 << 1,
            TextBound::EndLine => 1 << 2,
            TextBound::EndInput => 1 << 3,
            TextBound::EndInputWithoutLine => 1 << 4,
            TextBound::Word => 1 << 5,
            TextBound::NotWord => 1 << 6,
        }
    }
}

impl fmt::Display for TextBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextBound::BeginInput => "begin-input",
            TextBound::BeginLine => "begin-line",
            TextBound::EndLine => "end-line",
            TextBound::EndInput => "end-input",
            TextBound::EndInputWithoutLine => "end-input-without-line",
            TextBound::Word => "word",
            TextBound::NotWord => "not-word",
        };
        write!(f, "{}", name)
    }
}

/// A small copyable set of [`TextBound`] values
///
/// Used both as the observation a cursor position yields and as the guard on
/// a boundary transition, so it needs `Eq + Hash + Copy` to key transition
/// maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BoundSet(u8);

impl BoundSet {
    pub const EMPTY: BoundSet = BoundSet(0);

    pub fn new() -> Self {
        BoundSet(0)
    }

    pub fn of(bounds: &[TextBound]) -> Self {
        let mut set = BoundSet(0);
        for &b in bounds {
            set.insert(b);
        }
        set
    }

    pub fn insert(&mut self, bound: TextBound) -> &mut Self {
        self.0 |= bound.bit();
        self
    }

    pub fn with(mut self, bound: TextBound) -> Self {
        self.insert(bound);
        self
    }

    pub fn contains(&self, bound: TextBound) -> bool {
        self.0 & bound.bit() != 0
    }

    /// True if every member of `other` is also a member of `self`
    pub fn is_superset_of(&self, other: BoundSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersection(&self, other: BoundSet) -> BoundSet {
        BoundSet(self.0 & other.0)
    }

    pub fn union(&self, other: BoundSet) -> BoundSet {
        BoundSet(self.0 | other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = TextBound> + '_ {
        TextBound::ALL.into_iter().filter(|b| self.contains(*b))
    }
}

impl fmt::Display for BoundSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, b) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", b)?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<TextBound> for BoundSet {
    fn from_iter<I: IntoIterator<Item = TextBound>>(iter: I) -> Self {
        let mut set = BoundSet::new();
        for b in iter {
            set.insert(b);
        }
        set
    }
}

fn is_word_char(ch: Option<char>) -> bool {
    match ch {
        Some(c) => !c.is_whitespace(),
        None => false,
    }
}

/// Bidirectional scan cursor over a fixed character sequence
///
/// Tracks a single position and the previously consumed character; computes
/// which boundaries hold between the previous and next character without
/// consuming anything.
#[derive(Debug, Clone)]
pub struct SequenceHead {
    chars: Vec<char>,
    position: usize,
    previous: Option<char>,
}

impl SequenceHead {
    pub fn new(text: &str) -> Self {
        SequenceHead {
            chars: text.chars().collect(),
            position: 0,
            previous: None,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn has_next(&self) -> bool {
        self.position < self.chars.len()
    }

    /// Consume and return the next character, recording it as "previous"
    pub fn read(&mut self) -> EngineResult<char> {
        if !self.has_next() {
            return Err(EngineError::CursorExhausted);
        }
        let ch = self.chars[self.position];
        self.position += 1;
        self.previous = Some(ch);
        Ok(ch)
    }

    /// Step back at most one position, recomputing "previous" from the
    /// sequence. A no-op at position 0.
    pub fn unread(&mut self) -> &mut Self {
        if self.position > 0 {
            self.position -= 1;
            self.previous = if self.position > 0 {
                Some(self.chars[self.position - 1])
            } else {
                None
            };
        }
        self
    }

    /// The full set of boundaries holding between the previous and next
    /// character. Does not consume.
    pub fn bounds(&self) -> BoundSet {
        let mut set = BoundSet::new();
        let next = self.chars.get(self.position).copied();

        match self.previous {
            None => {
                set.insert(TextBound::BeginInput);
                set.insert(TextBound::BeginLine);
            }
            Some('\n') => {
                set.insert(TextBound::BeginLine);
            }
            Some(_) => {}
        }

        match next {
            Some('\n') => {
                set.insert(TextBound::EndLine);
                if self.position + 1 == self.chars.len() {
                    set.insert(TextBound::EndInputWithoutLine);
                }
            }
            Some(_) => {}
            None => {
                set.insert(TextBound::EndLine);
                set.insert(TextBound::EndInput);
                set.insert(TextBound::EndInputWithoutLine);
            }
        }

        if is_word_char(self.previous) != is_word_char(next) {
            set.insert(TextBound::Word);
        } else {
            set.insert(TextBound::NotWord);
        }

        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_set_membership() {
        let set = BoundSet::of(&[TextBound::BeginInput, TextBound::BeginLine]);
        assert!(set.contains(TextBound::BeginInput));
        assert!(set.contains(TextBound::BeginLine));
        assert!(!set.contains(TextBound::EndInput));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_bound_set_superset() {
        let observed = BoundSet::of(&[
            TextBound::BeginInput,
            TextBound::BeginLine,
            TextBound::NotWord,
        ]);
        let guard = BoundSet::of(&[TextBound::BeginLine]);
        assert!(observed.is_superset_of(guard));
        assert!(!guard.is_superset_of(observed));
        assert!(observed.is_superset_of(BoundSet::EMPTY));
    }

    #[test]
    fn test_bounds_at_start() {
        let head = SequenceHead::new("ab\ncd");
        let bounds = head.bounds();
        assert!(bounds.contains(TextBound::BeginInput));
        assert!(bounds.contains(TextBound::BeginLine));
        assert!(!bounds.contains(TextBound::EndLine));
    }

    #[test]
    fn test_bounds_after_line_break() {
        let mut head = SequenceHead::new("ab\ncd");
        head.read().unwrap();
        head.read().unwrap();
        head.read().unwrap(); // consumed the '\n'
        let bounds = head.bounds();
        assert!(bounds.contains(TextBound::BeginLine));
        assert!(!bounds.contains(TextBound::BeginInput));
    }

    #[test]
    fn test_bounds_before_line_break() {
        let mut head = SequenceHead::new("ab\ncd");
        head.read().unwrap();
        head.read().unwrap();
        let bounds = head.bounds();
        assert!(bounds.contains(TextBound::EndLine));
        assert!(!bounds.contains(TextBound::EndInput));
    }

    #[test]
    fn test_bounds_at_end() {
        let mut head = SequenceHead::new("ab\ncd");
        while head.has_next() {
            head.read().unwrap();
        }
        let bounds = head.bounds();
        assert!(bounds.contains(TextBound::EndLine));
        assert!(bounds.contains(TextBound::EndInput));
        assert!(bounds.contains(TextBound::EndInputWithoutLine));
    }

    #[test]
    fn test_word_boundary_flip() {
        let mut head = SequenceHead::new("a b");
        head.read().unwrap(); // between 'a' and ' ': word-ness flips
        assert!(head.bounds().contains(TextBound::Word));
        head.read().unwrap(); // between ' ' and 'b': flips again
        assert!(head.bounds().contains(TextBound::Word));

        let mut head = SequenceHead::new("ab");
        head.read().unwrap(); // between 'a' and 'b': no flip
        assert!(head.bounds().contains(TextBound::NotWord));
    }

    #[test]
    fn test_read_past_end() {
        let mut head = SequenceHead::new("x");
        head.read().unwrap();
        assert!(matches!(head.read(), Err(EngineError::CursorExhausted)));
    }

    #[test]
    fn test_unread() {
        let mut head = SequenceHead::new("ab");
        head.read().unwrap();
        head.read().unwrap();
        head.unread();
        assert_eq!(head.position(), 1);
        assert_eq!(head.read().unwrap(), 'b');

        // unread at 0 is a no-op
        let mut head = SequenceHead::new("ab");
        head.unread();
        assert_eq!(head.position(), 0);
        assert!(head.bounds().contains(TextBound::BeginInput));
    }
}
