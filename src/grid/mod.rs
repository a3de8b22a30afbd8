//! The character grid and its cursor automaton

pub mod art;
pub mod pixel;
pub mod quadro;

pub use art::TextArt;
pub use pixel::{is_double_width, Pixel};
pub use quadro::{Heading, Quadro};
