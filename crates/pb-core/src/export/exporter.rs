//! Thread renderers and the registry that picks one by format name

use crate::comment::ThreadView;
use crate::error::{ProbboardError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Renders a thread view as text
pub trait ThreadExporter: Send + Sync {
    /// Render the visible part of a thread
    fn export(&self, view: &ThreadView<'_>) -> Result<String>;

    /// Name the format is registered under
    fn format_name(&self) -> &str;

    /// Extension given to output files that have none
    fn file_extension(&self) -> &str;
}

/// Thread exporters keyed by format name
pub struct ExportRegistry {
    exporters: BTreeMap<String, Box<dyn ThreadExporter>>,
}

impl ExportRegistry {
    /// Registry holding the JSON and Markdown renderers
    pub fn new() -> Self {
        let mut registry = Self {
            exporters: BTreeMap::new(),
        };
        registry.register(Box::new(super::json::JsonExporter::new(false)));
        registry.register(Box::new(super::json::JsonExporter::compact()));
        registry.register(Box::new(super::markdown::MarkdownExporter::new()));
        registry
    }

    /// Add a renderer, replacing any registered under the same name
    pub fn register(&mut self, exporter: Box<dyn ThreadExporter>) {
        self.exporters
            .insert(exporter.format_name().to_string(), exporter);
    }

    /// Renderer for a format name
    pub fn exporter(&self, format: &str) -> Result<&dyn ThreadExporter> {
        self.exporters
            .get(format)
            .map(|exporter| exporter.as_ref())
            .ok_or_else(|| ProbboardError::Validation(format!("Unknown export format: {}", format)))
    }

    /// Render a thread view
    pub fn render(&self, view: &ThreadView<'_>, format: &str) -> Result<String> {
        self.exporter(format)?.export(view)
    }

    /// Render a thread view into a file and return where it landed
    ///
    /// A path without an extension gets the format's one. The content goes
    /// to a sibling `.tmp` file first and is renamed over the target.
    pub fn write(&self, view: &ThreadView<'_>, format: &str, path: &Path) -> Result<PathBuf> {
        let exporter = self.exporter(format)?;
        let content = exporter.export(view)?;

        let target = match path.extension() {
            Some(_) => path.to_path_buf(),
            None => path.with_extension(exporter.file_extension()),
        };
        if let Some(dir) = target.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let staging = target.with_extension("tmp");
        let mut file = fs::File::create(&staging)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        drop(file);
        fs::rename(&staging, &target)?;

        Ok(target)
    }

    /// Registered format names, sorted
    pub fn formats(&self) -> Vec<&str> {
        self.exporters.keys().map(String::as_str).collect()
    }
}

impl Default for ExportRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::{CommentForest, CommentRecordBuilder};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    /// Counts the visible entries
    struct EntryCount;

    impl ThreadExporter for EntryCount {
        fn export(&self, view: &ThreadView<'_>) -> Result<String> {
            Ok(format!("{} visible", view.len()))
        }

        fn format_name(&self) -> &str {
            "count"
        }

        fn file_extension(&self) -> &str {
            "txt"
        }
    }

    fn hint_thread() -> CommentForest {
        CommentForest::from_records(vec![CommentRecordBuilder::new("1")
            .text("Try the pigeonhole principle")
            .reply(CommentRecordBuilder::new("1a").text("Which boxes?").build().unwrap())
            .build()
            .unwrap()])
    }

    #[test]
    fn test_registry_offers_json_and_markdown() {
        let registry = ExportRegistry::new();
        assert_eq!(registry.formats(), vec!["json", "json-compact", "markdown"]);
        assert_eq!(registry.exporter("markdown").unwrap().file_extension(), "md");
    }

    #[test]
    fn test_custom_renderer_sees_visible_entries() {
        let mut registry = ExportRegistry::new();
        registry.register(Box::new(EntryCount));
        let forest = hint_thread();

        assert_eq!(registry.render(&forest.produce_view(3), "count").unwrap(), "2 visible");
        assert_eq!(registry.render(&forest.produce_view(0), "count").unwrap(), "1 visible");
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let registry = ExportRegistry::new();
        let forest = hint_thread();
        let err = registry.render(&forest.produce_view(3), "yaml").unwrap_err();
        assert!(matches!(err, ProbboardError::Validation(_)));
    }

    #[test]
    fn test_write_thread_adds_format_extension() {
        let dir = TempDir::new().unwrap();
        let registry = ExportRegistry::new();
        let forest = hint_thread();

        let written = registry
            .write(&forest.produce_view(3), "markdown", &dir.path().join("notes/thread"))
            .unwrap();

        assert_eq!(written, dir.path().join("notes/thread.md"));
        assert!(fs::read_to_string(&written).unwrap().contains("pigeonhole"));
        assert!(!dir.path().join("notes/thread.tmp").exists());
    }

    #[test]
    fn test_write_thread_keeps_given_extension() {
        let dir = TempDir::new().unwrap();
        let registry = ExportRegistry::new();
        let forest = hint_thread();

        let written = registry
            .write(&forest.produce_view(3), "json", &dir.path().join("thread.txt"))
            .unwrap();

        assert_eq!(written, dir.path().join("thread.txt"));
        assert!(fs::read_to_string(&written).unwrap().contains("Which boxes?"));
    }
}
