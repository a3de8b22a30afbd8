//! Grid table recognition and output
//!
//! [`GridTableGrammar`] walks a [`TextArt`](crate::grid::TextArt) looking for
//! cell anchors and publishes the extents it finds into a
//! [`TableModelBuilder`]; [`render`] turns the finished [`TableModel`] into
//! CSV or HTML.

pub mod grammar;
pub mod model;
pub mod render;

pub use grammar::{GridTableGrammar, TableState};
pub use model::{RawCell, TableCell, TableModel, TableModelBuilder};
pub use render::{to_csv, to_html};
