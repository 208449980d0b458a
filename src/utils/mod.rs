pub mod terminal;

pub use terminal::{escape_single_line, escape_text};
