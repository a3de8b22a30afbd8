//! # quadro
//!
//! Table extraction from monospaced text art, built on a 2-D tape automaton.
//!
//! ## Features
//!
//! - **Grid Table Recognition**: finds box-drawn tables in plain text
//! - **Span Support**: merged cells become rowspan/colspan in the model
//! - **2-D Automaton Core**: a four-way cursor (`Quadro`) over a pixel grid
//! - **Regex Subroutines**: DFA scans fired along a heading during the walk
//! - **Bounded Search**: acceptance search with a configuration budget
//! - **Renderers**: CSV (RFC 4180) and HTML output
//!
//! ## Usage Examples
//!
//! ### Extracting a Table
//!
//! ```rust
//! use quadro::extract_table;
//!
//! let text = "\
//! +--+--+
//! |11|12|
//! +--+--+
//! |21|22|
//! +--+--+
//! ";
//! let model = extract_table(text).unwrap();
//! assert_eq!(model.row_count(), 2);
//! assert_eq!(model.cell_text(0, 1), Some("12"));
//! ```
//!
//! ### Rendering
//!
//! ```rust
//! use quadro::{extract_table, to_csv};
//!
//! let model = extract_table("+-+\n|x|\n+-+\n").unwrap();
//! assert_eq!(to_csv(&model), "x\r\n");
//! ```

/// Regular expression terms, parser and compiler
pub mod regex;

/// NFA and DFA machinery shared by the regex layer
pub mod automaton;

/// Pixel grid and the four-way cursor
pub mod grid;

/// Bounded acceptance search and regex subroutine transitions
pub mod search;

/// Table grammar, logical model and renderers
pub mod table;

/// Error types and shared helpers
pub mod utils;

pub use automaton::bounds::{BoundSet, SequenceHead, TextBound};
pub use automaton::dfa::{Dfa, TableDfa};
pub use automaton::nfa::{Nfa, TermNfa};

pub use regex::build_dfa;
pub use regex::parser::parse;
pub use regex::term::{Atom, RegexTerm};

pub use grid::{Heading, Pixel, Quadro, TextArt};

pub use search::regex_step::RegexTransit;
pub use search::{Config, Lba, Transition};

pub use table::{to_csv, to_html, GridTableGrammar, TableModel, TableModelBuilder};

pub use utils::error::{EngineError, EngineResult};

/// Extract the first grammar pass over `text` into a logical table model
///
/// Returns an empty model when the text holds no grid table.
pub fn extract_table(text: &str) -> EngineResult<TableModel> {
    let art = TextArt::from_text(text);
    GridTableGrammar::new()?.extract(&art)
}

/// Extract a table and render it as CSV
pub fn extract_to_csv(text: &str) -> EngineResult<String> {
    Ok(to_csv(&extract_table(text)?))
}

/// Extract a table and render it as HTML
pub fn extract_to_html(text: &str) -> EngineResult<String> {
    Ok(to_html(&extract_table(text)?))
}
