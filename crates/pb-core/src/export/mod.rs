//! Export functionality for threads
//!
//! Exporters turn a bounded-depth [`ThreadView`](crate::comment::ThreadView)
//! into text:
//! - JSON format (compact and pretty-printed)
//! - Markdown format (nested list, solution badges, edit markers)
//!
//! # Example
//!
//! ```ignore
//! use pb_core::export::ExportRegistry;
//!
//! let registry = ExportRegistry::new();
//! let md = registry.render(&state.view(), "markdown")?;
//! ```

mod exporter;
mod json;
mod markdown;

pub use exporter::{ExportRegistry, ThreadExporter};
pub use json::{ExportComment, ExportData, ExportStats, JsonExporter, EXPORT_VERSION};
pub use markdown::MarkdownExporter;
