//! pb-core - Core library for probboard
//!
//! This crate holds the comment thread engine behind a problem's discussion
//! view: the comment forest and its canonical ordering, the bounded-depth
//! view handed to renderers, the reload generation guard, the LaTeX snippet
//! editor, and exporters for rendered threads.

pub mod error;
pub mod types;
pub mod config;
pub mod comment;
pub mod generation;
pub mod math;
pub mod export;

pub use error::{ProbboardError, Result};
pub use types::*;
