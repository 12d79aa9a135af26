//! LaTeX snippet editor
//!
//! Symbol palettes grouped by tab, and the input buffer they are inserted
//! into.

pub mod editor;
pub mod symbols;

pub use editor::{MathBuffer, INDENT};
pub use symbols::{lookup, Symbol, SymbolCategory};
