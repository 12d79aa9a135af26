//! JSON exporter for threads

use super::exporter::ThreadExporter;
use super::markdown::author_label;
use crate::comment::{ThreadView, ViewEntry};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Export format version
pub const EXPORT_VERSION: &str = "1.0";

/// JSON exporter with compact mode support
pub struct JsonExporter {
    /// Whether to use pretty-print formatting
    pretty: bool,
    /// Format name
    name: String,
}

impl JsonExporter {
    /// Create a new JSON exporter
    pub fn new(compact: bool) -> Self {
        Self {
            pretty: !compact,
            name: if compact {
                "json-compact".to_string()
            } else {
                "json".to_string()
            },
        }
    }

    /// Create a compact JSON exporter
    pub fn compact() -> Self {
        Self::new(true)
    }

    /// Create a pretty-printed JSON exporter
    pub fn pretty() -> Self {
        Self::new(false)
    }
}

impl ThreadExporter for JsonExporter {
    fn export(&self, view: &ThreadView<'_>) -> Result<String> {
        let data = ExportData::from_view(view);

        let json = if self.pretty {
            serde_json::to_string_pretty(&data)?
        } else {
            serde_json::to_string(&data)?
        };

        Ok(json)
    }

    fn format_name(&self) -> &str {
        &self.name
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

/// Exported thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportData {
    /// Format version
    pub v: String,
    /// Problem ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    /// Depth cutoff of the view
    pub max_depth: usize,
    /// Statistics
    pub stats: ExportStats,
    /// Visited comments in pre-order
    pub comments: Vec<ExportComment>,
}

impl ExportData {
    /// Create from a thread view
    pub fn from_view(view: &ThreadView<'_>) -> Self {
        Self {
            v: EXPORT_VERSION.to_string(),
            problem: view.problem().map(|p| p.to_string()),
            max_depth: view.max_depth(),
            stats: ExportStats::from_view(view),
            comments: view.iter().map(ExportComment::from_entry).collect(),
        }
    }
}

/// Export statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportStats {
    /// Comments shown
    pub shown: usize,
    /// Top-level comments
    pub top_level: usize,
    /// Comments flagged as solution
    pub solutions: usize,
    /// Replies left out at the cutoff
    pub hidden: usize,
}

impl ExportStats {
    /// Create from a thread view
    pub fn from_view(view: &ThreadView<'_>) -> Self {
        Self {
            shown: view.len(),
            top_level: view.iter().filter(|e| e.depth == 0).count(),
            solutions: view.iter().filter(|e| e.comment.is_solution).count(),
            hidden: view.hidden_total(),
        }
    }
}

/// Exported comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportComment {
    pub id: String,
    pub depth: usize,
    pub author: String,
    pub text: String,
    pub solution: bool,
    /// Creation time, unix seconds
    pub ts: i64,
    /// Last edit time, unix seconds, when edited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited: Option<i64>,
    pub replies: usize,
    #[serde(skip_serializing_if = "is_zero", default)]
    pub hidden: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl ExportComment {
    /// Create from a view entry
    pub fn from_entry(entry: &ViewEntry<'_>) -> Self {
        let comment = entry.comment;
        Self {
            id: comment.id.to_string(),
            depth: entry.depth,
            author: author_label(comment),
            text: comment.text.clone(),
            solution: comment.is_solution,
            ts: comment.created_at.timestamp(),
            edited: comment.is_edited().then(|| comment.updated_at.timestamp()),
            replies: entry.reply_count,
            hidden: entry.hidden_replies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::{CommentForest, CommentRecordBuilder};
    use crate::types::ProblemId;

    fn forest() -> CommentForest {
        let reply = CommentRecordBuilder::new("2")
            .text("Consider parity")
            .author("5")
            .build()
            .unwrap();
        CommentForest::from_records(vec![CommentRecordBuilder::new("1")
            .text("Stuck on part (b)")
            .author("4")
            .author_name("ramanujan")
            .solution(true)
            .reply(reply)
            .build()
            .unwrap()])
    }

    #[test]
    fn test_json_exporter_creation() {
        let exporter = JsonExporter::new(false);
        assert_eq!(exporter.format_name(), "json");
        assert_eq!(exporter.file_extension(), "json");
        assert_eq!(JsonExporter::compact().format_name(), "json-compact");
    }

    #[test]
    fn test_export_thread() {
        let forest = forest();
        let view = forest.produce_view(3).for_problem(ProblemId::from("3"));
        let json = JsonExporter::pretty().export(&view).unwrap();

        let data: ExportData = serde_json::from_str(&json).unwrap();
        assert_eq!(data.problem.as_deref(), Some("3"));
        assert_eq!(data.stats.shown, 2);
        assert_eq!(data.stats.solutions, 1);
        assert_eq!(data.comments[0].author, "ramanujan");
        assert_eq!(data.comments[1].depth, 1);
        assert_eq!(data.comments[1].author, "user 5");
        assert_eq!(data.comments[0].edited, None);
    }

    #[test]
    fn test_compact_vs_pretty() {
        let forest = forest();
        let view = forest.produce_view(3);

        let pretty = JsonExporter::pretty().export(&view).unwrap();
        let compact = JsonExporter::compact().export(&view).unwrap();

        assert!(compact.len() < pretty.len());
    }

    #[test]
    fn test_hidden_count_exported() {
        let forest = forest();
        let data = ExportData::from_view(&forest.produce_view(0));
        assert_eq!(data.comments.len(), 1);
        assert_eq!(data.comments[0].hidden, 1);
        assert_eq!(data.stats.hidden, 1);
    }
}
