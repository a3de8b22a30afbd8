//! The immutable character grid
//!
//! Raw text becomes a rectangle of pixels: one row per line, short rows
//! padded with [`Pixel::Space`], and double-width characters expanded to a
//! real pixel followed by an [`Pixel::EqToLeft`] filler so grid columns stay
//! aligned with display columns.

use std::fmt;

use super::pixel::{is_double_width, Pixel};

/// An immutable pixel grid built once from raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextArt {
    rows: Vec<Vec<Pixel>>,
    column_count: usize,
}

impl TextArt {
    pub fn from_text(text: &str) -> TextArt {
        let mut rows: Vec<Vec<Pixel>> = Vec::new();
        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let mut row = Vec::with_capacity(line.len());
            for ch in line.chars() {
                row.push(Pixel::Char(ch));
                if is_double_width(ch) {
                    row.push(Pixel::EqToLeft);
                }
            }
            rows.push(row);
        }
        // A single trailing newline does not contribute an empty row
        if rows.last().is_some_and(|r| r.is_empty()) && rows.len() > 1 {
            rows.pop();
        }

        let column_count = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(column_count, Pixel::Space);
        }
        TextArt { rows, column_count }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Read the pixel at `(row, col)`
    ///
    /// Exactly one step outside any edge reads the [`Pixel::Bound`] sentinel.
    /// Two or more steps outside is a contract violation and panics: the
    /// automaton must never move that far without checking.
    pub fn pixel(&self, row: isize, col: isize) -> Pixel {
        let row_count = self.rows.len() as isize;
        let column_count = self.column_count as isize;
        assert!(
            (-1..=row_count).contains(&row) && (-1..=column_count).contains(&col),
            "pixel read at ({}, {}) is more than one step outside the {}x{} grid",
            row,
            col,
            row_count,
            column_count,
        );
        if row == -1 || row == row_count || col == -1 || col == column_count {
            return Pixel::Bound;
        }
        self.rows[row as usize][col as usize]
    }
}

impl fmt::Display for TextArt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for pixel in row {
                match pixel.to_char() {
                    Some(ch) => write!(f, "{}", ch)?,
                    None => {}
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangular_padding() {
        let art = TextArt::from_text("abc\nd");
        assert_eq!(art.row_count(), 2);
        assert_eq!(art.column_count(), 3);
        assert_eq!(art.pixel(1, 0), Pixel::Char('d'));
        assert_eq!(art.pixel(1, 1), Pixel::Space);
        assert_eq!(art.pixel(1, 2), Pixel::Space);
    }

    #[test]
    fn test_double_width_expansion() {
        let art = TextArt::from_text("a世b");
        assert_eq!(art.column_count(), 4);
        assert_eq!(art.pixel(0, 0), Pixel::Char('a'));
        assert_eq!(art.pixel(0, 1), Pixel::Char('世'));
        assert_eq!(art.pixel(0, 2), Pixel::EqToLeft);
        assert_eq!(art.pixel(0, 3), Pixel::Char('b'));
    }

    #[test]
    fn test_one_step_outside_is_bound() {
        let art = TextArt::from_text("ab\ncd");
        assert_eq!(art.pixel(-1, 0), Pixel::Bound);
        assert_eq!(art.pixel(2, 1), Pixel::Bound);
        assert_eq!(art.pixel(0, -1), Pixel::Bound);
        assert_eq!(art.pixel(1, 2), Pixel::Bound);
        assert_eq!(art.pixel(-1, -1), Pixel::Bound);
    }

    #[test]
    #[should_panic(expected = "more than one step outside")]
    fn test_two_steps_outside_panics() {
        let art = TextArt::from_text("ab");
        art.pixel(0, 3);
    }

    #[test]
    #[should_panic(expected = "more than one step outside")]
    fn test_two_rows_outside_panics() {
        let art = TextArt::from_text("ab");
        art.pixel(-2, 0);
    }

    #[test]
    fn test_trailing_newline_ignored() {
        let art = TextArt::from_text("ab\ncd\n");
        assert_eq!(art.row_count(), 2);
    }

    #[test]
    fn test_crlf_stripped() {
        let art = TextArt::from_text("ab\r\ncd");
        assert_eq!(art.column_count(), 2);
        assert_eq!(art.pixel(0, 1), Pixel::Char('b'));
    }
}
