//! The two-dimensional tape automaton
//!
//! A [`Quadro`] is a cursor over a [`TextArt`] grid: a position, a heading,
//! per-cell scratch memory, per-cell marks, a text register, and four integer
//! registers that carry a recognized cell's extent out to whatever builder is
//! attached. The grid itself is immutable and shared by reference; everything
//! else is owned, so [`Quadro::fork`] yields a branch that cannot alias its
//! siblings.
//!
//! Mutators return `&mut Self` so walks read as chains:
//!
//! ```rust
//! use quadro::grid::{Quadro, TextArt};
//!
//! let art = TextArt::from_text("ab\ncd");
//! let mut q: Quadro<'_, u8> = Quadro::new(&art, 0);
//! q.turn_east().forward().turn_south().forward();
//! assert_eq!(q.row_position(), 1);
//! assert_eq!(q.column_position(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use fxhash::FxHashMap;

use super::art::TextArt;
use super::pixel::Pixel;

/// Cursor orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub fn left(self) -> Heading {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    pub fn right(self) -> Heading {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    pub fn reverse(self) -> Heading {
        self.left().left()
    }
}

/// The 2-D tape automaton: cursor, heading, scratch, marks, registers
///
/// `S` is the per-cell scratch type; `B` the builder carried alongside the
/// walk (no behavior imposed on it here).
#[derive(Debug)]
pub struct Quadro<'a, S, B = ()> {
    art: &'a TextArt,
    row: isize,
    col: isize,
    heading: Heading,
    scratch: FxHashMap<(isize, isize), S>,
    scratch_default: S,
    marks: FxHashMap<(isize, isize), String>,
    text: String,
    row_register: isize,
    column_register: isize,
    rowspan_register: isize,
    colspan_register: isize,
    builder: Option<Rc<RefCell<B>>>,
}

impl<'a, S: Clone, B> Quadro<'a, S, B> {
    /// A cursor at the top-left corner, heading east
    pub fn new(art: &'a TextArt, scratch_default: S) -> Self {
        Quadro {
            art,
            row: 0,
            col: 0,
            heading: Heading::East,
            scratch: FxHashMap::default(),
            scratch_default,
            marks: FxHashMap::default(),
            text: String::new(),
            row_register: 0,
            column_register: 0,
            rowspan_register: 0,
            colspan_register: 0,
            builder: None,
        }
    }

    /// An independent copy for a search branch: deep-copies scratch, marks,
    /// text, and registers; shares the immutable grid and the builder handle
    pub fn fork(&self) -> Self {
        Quadro {
            art: self.art,
            row: self.row,
            col: self.col,
            heading: self.heading,
            scratch: self.scratch.clone(),
            scratch_default: self.scratch_default.clone(),
            marks: self.marks.clone(),
            text: self.text.clone(),
            row_register: self.row_register,
            column_register: self.column_register,
            rowspan_register: self.rowspan_register,
            colspan_register: self.colspan_register,
            builder: self.builder.clone(),
        }
    }

    pub fn art(&self) -> &'a TextArt {
        self.art
    }

    pub fn row_position(&self) -> isize {
        self.row
    }

    pub fn column_position(&self) -> isize {
        self.col
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Read the pixel under the cursor
    pub fn get(&self) -> Pixel {
        self.art.pixel(self.row, self.col)
    }

    pub fn get_scratch(&self) -> S {
        self.scratch
            .get(&(self.row, self.col))
            .cloned()
            .unwrap_or_else(|| self.scratch_default.clone())
    }

    pub fn set_scratch(&mut self, value: S) -> &mut Self {
        self.scratch.insert((self.row, self.col), value);
        self
    }

    // Movement clamps at the one-past-edge Bound position; the grid itself
    // enforces that nothing reads further out.

    pub fn move_north(&mut self) -> &mut Self {
        self.row = (self.row - 1).max(-1);
        self
    }

    pub fn move_south(&mut self) -> &mut Self {
        self.row = (self.row + 1).min(self.art.row_count() as isize);
        self
    }

    pub fn move_east(&mut self) -> &mut Self {
        self.col = (self.col + 1).min(self.art.column_count() as isize);
        self
    }

    pub fn move_west(&mut self) -> &mut Self {
        self.col = (self.col - 1).max(-1);
        self
    }

    /// Column back to 0, one row down
    pub fn crlf(&mut self) -> &mut Self {
        self.col = 0;
        self.move_south()
    }

    pub fn move_toward(&mut self, heading: Heading) -> &mut Self {
        match heading {
            Heading::North => self.move_north(),
            Heading::East => self.move_east(),
            Heading::South => self.move_south(),
            Heading::West => self.move_west(),
        }
    }

    /// One step along the current heading
    pub fn forward(&mut self) -> &mut Self {
        let heading = self.heading;
        self.move_toward(heading)
    }

    /// One step against the current heading
    pub fn back(&mut self) -> &mut Self {
        let heading = self.heading.reverse();
        self.move_toward(heading)
    }

    pub fn turn_north(&mut self) -> &mut Self {
        self.heading = Heading::North;
        self
    }

    pub fn turn_east(&mut self) -> &mut Self {
        self.heading = Heading::East;
        self
    }

    pub fn turn_south(&mut self) -> &mut Self {
        self.heading = Heading::South;
        self
    }

    pub fn turn_west(&mut self) -> &mut Self {
        self.heading = Heading::West;
        self
    }

    pub fn turn_left(&mut self) -> &mut Self {
        self.heading = self.heading.left();
        self
    }

    pub fn turn_right(&mut self) -> &mut Self {
        self.heading = self.heading.right();
        self
    }

    /// Attach `tag` to the current cell, replacing any previous mark
    pub fn mark(&mut self, tag: impl Into<String>) -> &mut Self {
        self.marks.insert((self.row, self.col), tag.into());
        self
    }

    /// Remove the mark on the current cell, if any
    pub fn unmark(&mut self) -> &mut Self {
        self.marks.remove(&(self.row, self.col));
        self
    }

    pub fn is_marked(&self, tag: &str) -> bool {
        self.marks.get(&(self.row, self.col)).map(String::as_str) == Some(tag)
    }

    /// Read one step ahead without moving: move, read, undo
    pub fn peek_forward(&mut self) -> Pixel {
        let (row, col) = (self.row, self.col);
        self.forward();
        let pixel = self.get();
        self.row = row;
        self.col = col;
        pixel
    }

    /// Read one step to the left of the heading without moving or turning
    pub fn peek_left(&mut self) -> Pixel {
        let (row, col, heading) = (self.row, self.col, self.heading);
        self.turn_left().forward();
        let pixel = self.get();
        self.row = row;
        self.col = col;
        self.heading = heading;
        pixel
    }

    /// Read one step to the right of the heading without moving or turning
    pub fn peek_right(&mut self) -> Pixel {
        let (row, col, heading) = (self.row, self.col, self.heading);
        self.turn_right().forward();
        let pixel = self.get();
        self.row = row;
        self.col = col;
        self.heading = heading;
        pixel
    }

    pub fn clear_text_register(&mut self) -> &mut Self {
        self.text.clear();
        self
    }

    pub fn append_text_register(&mut self, ch: char) -> &mut Self {
        self.text.push(ch);
        self
    }

    pub fn text_register(&self) -> &str {
        &self.text
    }

    pub fn row_register(&self) -> isize {
        self.row_register
    }

    pub fn set_row_register(&mut self, value: isize) -> &mut Self {
        self.row_register = value;
        self
    }

    pub fn column_register(&self) -> isize {
        self.column_register
    }

    pub fn set_column_register(&mut self, value: isize) -> &mut Self {
        self.column_register = value;
        self
    }

    pub fn rowspan_register(&self) -> isize {
        self.rowspan_register
    }

    pub fn set_rowspan_register(&mut self, value: isize) -> &mut Self {
        self.rowspan_register = value;
        self
    }

    pub fn colspan_register(&self) -> isize {
        self.colspan_register
    }

    pub fn set_colspan_register(&mut self, value: isize) -> &mut Self {
        self.colspan_register = value;
        self
    }

    pub fn builder(&self) -> Option<&Rc<RefCell<B>>> {
        self.builder.as_ref()
    }

    pub fn set_builder(&mut self, builder: Rc<RefCell<B>>) -> &mut Self {
        self.builder = Some(builder);
        self
    }
}
