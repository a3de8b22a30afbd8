//! The built-in grid-table grammar
//!
//! Recognizes rectangular ASCII grid tables whose cells are framed by `-`,
//! `|`, and `+` junctions, including row- and column-spanning cells whose
//! corners are junctions. The walk is a raster scan: at every junction pixel
//! that anchors a cell (a horizontal border leaving east, a vertical border
//! leaving south) the grammar closes the cell's borders, captures its
//! interior into the text register, publishes the extent through the four
//! integer registers, and hands the cell to the attached builder.
//!
//! The east-going border probe runs as a [`RegexTransit`] subroutine, so a
//! 1-D pattern scan decides the 2-D anchor question. Grammars for other
//! layouts plug in through the same [`Transition`] contract.

use std::cell::RefCell;
use std::rc::Rc;

use crate::grid::{Heading, Quadro, TextArt};
use crate::search::{Config, Lba, RegexTransit, Transition};
use crate::table::model::{TableModel, TableModelBuilder};
use crate::utils::error::EngineResult;

/// Mark left on a junction whose cell has been published
const ANCHOR_MARK: &str = "cell-anchor";

/// Control states of the grid-table walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableState {
    /// Raster-scanning for cell anchors
    Scan,
    /// Entry state of the top-border probe subroutine
    Probe,
    /// The probe matched a border
    ProbeHit,
    /// The probe did not match a border
    ProbeMiss,
    /// The whole grid has been scanned
    Accept,
}

/// The grid-table grammar: control states plus their transition function
#[derive(Debug)]
pub struct GridTableGrammar {
    /// Dashes up to the next junction, scanning east
    top_border: RegexTransit<TableState>,
}

impl GridTableGrammar {
    pub fn new() -> EngineResult<Self> {
        Ok(GridTableGrammar {
            top_border: RegexTransit::new(
                "--*\\+",
                Heading::East,
                TableState::Probe,
                TableState::ProbeHit,
                TableState::ProbeMiss,
            )?,
        })
    }

    /// Walk `art` and assemble the table its cells describe
    pub fn extract(&self, art: &TextArt) -> EngineResult<TableModel> {
        let builder = Rc::new(RefCell::new(TableModelBuilder::new()));
        let mut quadro: Quadro<'_, u8, TableModelBuilder> = Quadro::new(art, 0);
        quadro.set_builder(Rc::clone(&builder));

        // The raster visits each position once; the bound only trips on a
        // grammar bug
        let budget = (art.row_count() + 2) * (art.column_count() + 2) + 16;
        let accepted = Lba::new().with_max_configs(budget).accepts(
            |mut config| {
                let next = self.transit(&mut config.quadro, config.state);
                vec![Config::new(config.quadro, next)]
            },
            Config::new(quadro, TableState::Scan),
            TableState::Accept,
        )?;
        debug_assert!(accepted, "the raster scan always reaches Accept");

        let model = builder.borrow().build();
        Ok(model)
    }

    /// Try to recognize a cell anchored at the junction under the cursor;
    /// publishes it to the builder on success
    fn try_open_cell(&self, quadro: &mut Quadro<'_, u8, TableModelBuilder>) {
        let row = quadro.row_position();
        let col = quadro.column_position();
        let art = quadro.art();

        // Anchor needs a vertical border leaving south
        if !art.pixel(row + 1, col).is_vertical_wall() {
            return;
        }
        // and a horizontal border leaving east, decided by the pattern probe
        let mut probe = quadro.fork();
        probe.turn_east().forward();
        if probe.get().is_bound() {
            return;
        }
        if self.top_border.transit(&mut probe, TableState::Probe) != TableState::ProbeHit {
            return;
        }

        let Some(right) = find_right_border(art, row, col) else {
            return;
        };
        let Some(bottom) = find_bottom_border(art, row, col) else {
            return;
        };
        if !borders_closed(art, row, col, bottom, right) {
            return;
        }

        // Capture the interior on a fork, then publish through its registers
        let mut capture = quadro.fork();
        capture.clear_text_register();
        for r in (row + 1)..bottom {
            if r > row + 1 {
                capture.append_text_register('\n');
            }
            for c in (col + 1)..right {
                let pixel = art.pixel(r, c);
                // Partial separators inside a spanning cell contribute
                // nothing to its text
                let ch = if pixel.is_wall() {
                    ' '
                } else {
                    pixel.to_char().unwrap_or(' ')
                };
                capture.append_text_register(ch);
            }
        }
        capture
            .set_row_register(row)
            .set_column_register(col)
            .set_rowspan_register(bottom - row)
            .set_colspan_register(right - col);

        if let Some(builder) = capture.builder().cloned() {
            builder.borrow_mut().push_cell(
                capture.row_register(),
                capture.column_register(),
                capture.rowspan_register(),
                capture.colspan_register(),
                capture.text_register(),
            );
        }
        quadro.mark(ANCHOR_MARK);
    }
}

impl Transition<u8, TableState, TableModelBuilder> for GridTableGrammar {
    fn transit(
        &self,
        quadro: &mut Quadro<'_, u8, TableModelBuilder>,
        state: TableState,
    ) -> TableState {
        match state {
            TableState::Scan => {
                let pixel = quadro.get();
                if pixel.is_bound() {
                    if quadro.row_position() >= quadro.art().row_count() as isize {
                        return TableState::Accept;
                    }
                    quadro.crlf();
                    return TableState::Scan;
                }
                if pixel.is_junction() && !quadro.is_marked(ANCHOR_MARK) {
                    self.try_open_cell(quadro);
                }
                quadro.move_east();
                TableState::Scan
            }
            TableState::Accept => TableState::Accept,
            TableState::Probe | TableState::ProbeHit | TableState::ProbeMiss => {
                panic!(
                    "grid grammar driven from internal probe state {:?}",
                    state
                );
            }
        }
    }
}

/// First junction east of `(row, col)` that a vertical border leaves south,
/// walking along an unbroken horizontal border
fn find_right_border(art: &TextArt, row: isize, col: isize) -> Option<isize> {
    let mut c = col + 1;
    while c <= art.column_count() as isize {
        let pixel = art.pixel(row, c);
        if pixel.is_junction() && art.pixel(row + 1, c).is_vertical_wall() {
            return Some(c);
        }
        if !pixel.is_horizontal_wall() {
            return None;
        }
        c += 1;
    }
    None
}

/// First junction south of `(row, col)` that a horizontal border leaves
/// east, walking along an unbroken vertical border
fn find_bottom_border(art: &TextArt, row: isize, col: isize) -> Option<isize> {
    let mut r = row + 1;
    while r <= art.row_count() as isize {
        let pixel = art.pixel(r, col);
        if pixel.is_junction() && art.pixel(r, col + 1).is_horizontal_wall() {
            return Some(r);
        }
        if !pixel.is_vertical_wall() {
            return None;
        }
        r += 1;
    }
    None
}

/// All four borders of the candidate cell are unbroken walls
fn borders_closed(art: &TextArt, top: isize, left: isize, bottom: isize, right: isize) -> bool {
    for c in left..=right {
        if !art.pixel(top, c).is_horizontal_wall() || !art.pixel(bottom, c).is_horizontal_wall() {
            return false;
        }
    }
    for r in top..=bottom {
        if !art.pixel(r, left).is_vertical_wall() || !art.pixel(r, right).is_vertical_wall() {
            return false;
        }
    }
    true
}
