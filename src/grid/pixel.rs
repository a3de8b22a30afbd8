//! Grid cell values and their classification
//!
//! A pixel is what one display column of the input holds. Classification
//! (wall, junction, cell) is derived from the stored code point, never stored
//! separately, so two pixels with the same code point always classify the
//! same way.

use std::fmt;

use lazy_static::lazy_static;
use phf::phf_set;

/// ASCII and box-drawing glyphs that join walls
static JUNCTION_GLYPHS: phf::Set<char> = phf_set! {
    '+',
    '┌', '┐', '└', '┘', '├', '┤', '┬', '┴', '┼',
    '╔', '╗', '╚', '╝', '╠', '╣', '╦', '╩', '╬',
    '╒', '╕', '╘', '╛', '╞', '╡', '╤', '╧', '╪',
    '╓', '╖', '╙', '╜', '╟', '╢', '╥', '╨', '╫',
};

/// Horizontal wall glyphs
static HORIZONTAL_GLYPHS: phf::Set<char> = phf_set! {
    '-', '=',
    '─', '━', '═', '╌', '╍',
};

/// Vertical wall glyphs
static VERTICAL_GLYPHS: phf::Set<char> = phf_set! {
    '|',
    '│', '┃', '║', '╎', '╏',
};

lazy_static! {
    /// Code-point ranges rendered two display columns wide
    /// (East Asian Wide and Fullwidth blocks)
    static ref WIDE_RANGES: Vec<(u32, u32)> = vec![
        (0x1100, 0x115F),   // Hangul Jamo
        (0x2E80, 0x303E),   // CJK radicals, Kangxi, CJK punctuation
        (0x3041, 0x33FF),   // Hiragana .. CJK compatibility
        (0x3400, 0x4DBF),   // CJK extension A
        (0x4E00, 0x9FFF),   // CJK unified
        (0xA000, 0xA4CF),   // Yi
        (0xAC00, 0xD7A3),   // Hangul syllables
        (0xF900, 0xFAFF),   // CJK compatibility ideographs
        (0xFE30, 0xFE4F),   // CJK compatibility forms
        (0xFF00, 0xFF60),   // Fullwidth forms
        (0xFFE0, 0xFFE6),   // Fullwidth signs
        (0x20000, 0x2FFFD), // CJK extension B and beyond
        (0x30000, 0x3FFFD),
    ];
}

/// True if `ch` occupies two display columns
pub fn is_double_width(ch: char) -> bool {
    let cp = ch as u32;
    WIDE_RANGES
        .iter()
        .any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

/// One display column of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {
    /// An ordinary character
    Char(char),
    /// The out-of-grid sentinel, one step past any edge
    Bound,
    /// Padding appended to rows shorter than the grid width
    Space,
    /// Continuation column of a double-width character to its left
    EqToLeft,
}

impl Pixel {
    /// The character this pixel contributes to cell text, if any
    pub fn to_char(&self) -> Option<char> {
        match self {
            Pixel::Char(ch) => Some(*ch),
            Pixel::Space | Pixel::EqToLeft => Some(' '),
            Pixel::Bound => None,
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Pixel::Bound)
    }

    /// Wall or junction glyph
    pub fn is_wall(&self) -> bool {
        match self {
            Pixel::Char(ch) => {
                HORIZONTAL_GLYPHS.contains(ch)
                    || VERTICAL_GLYPHS.contains(ch)
                    || JUNCTION_GLYPHS.contains(ch)
            }
            _ => false,
        }
    }

    /// A glyph a horizontal border may contain
    pub fn is_horizontal_wall(&self) -> bool {
        match self {
            Pixel::Char(ch) => HORIZONTAL_GLYPHS.contains(ch) || JUNCTION_GLYPHS.contains(ch),
            _ => false,
        }
    }

    /// A glyph a vertical border may contain
    pub fn is_vertical_wall(&self) -> bool {
        match self {
            Pixel::Char(ch) => VERTICAL_GLYPHS.contains(ch) || JUNCTION_GLYPHS.contains(ch),
            _ => false,
        }
    }

    /// A glyph where walls may meet
    pub fn is_junction(&self) -> bool {
        match self {
            Pixel::Char(ch) => JUNCTION_GLYPHS.contains(ch),
            _ => false,
        }
    }

    /// Cell content: anything inside the grid that is not a wall
    pub fn is_cell(&self) -> bool {
        !self.is_bound() && !self.is_wall()
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pixel::Char(ch) => write!(f, "{}", ch),
            Pixel::Bound => write!(f, "<bound>"),
            Pixel::Space => write!(f, " "),
            Pixel::EqToLeft => write!(f, "<eq-to-left>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_classification() {
        assert!(Pixel::Char('+').is_wall());
        assert!(Pixel::Char('-').is_wall());
        assert!(Pixel::Char('|').is_wall());
        assert!(Pixel::Char('│').is_wall());
        assert!(!Pixel::Char('a').is_wall());
        assert!(!Pixel::Space.is_wall());
    }

    #[test]
    fn test_junction_classification() {
        assert!(Pixel::Char('+').is_junction());
        assert!(Pixel::Char('┼').is_junction());
        assert!(!Pixel::Char('-').is_junction());
        assert!(!Pixel::Char('|').is_junction());
    }

    #[test]
    fn test_wall_orientation() {
        assert!(Pixel::Char('-').is_horizontal_wall());
        assert!(!Pixel::Char('-').is_vertical_wall());
        assert!(Pixel::Char('|').is_vertical_wall());
        assert!(!Pixel::Char('|').is_horizontal_wall());
        // junctions belong to both orientations
        assert!(Pixel::Char('+').is_horizontal_wall());
        assert!(Pixel::Char('+').is_vertical_wall());
    }

    #[test]
    fn test_cell_classification() {
        assert!(Pixel::Char('a').is_cell());
        assert!(Pixel::Space.is_cell());
        assert!(Pixel::EqToLeft.is_cell());
        assert!(!Pixel::Char('+').is_cell());
        assert!(!Pixel::Bound.is_cell());
    }

    #[test]
    fn test_to_char() {
        assert_eq!(Pixel::Char('x').to_char(), Some('x'));
        assert_eq!(Pixel::Space.to_char(), Some(' '));
        assert_eq!(Pixel::EqToLeft.to_char(), Some(' '));
        assert_eq!(Pixel::Bound.to_char(), None);
    }

    #[test]
    fn test_double_width() {
        assert!(is_double_width('世'));
        assert!(is_double_width('ｗ'));
        assert!(!is_double_width('a'));
        assert!(!is_double_width('|'));
    }
}
