//! Markdown exporter for threads

use super::exporter::ThreadExporter;
use crate::comment::{Comment, ThreadView, ViewEntry};
use crate::error::Result;

/// Display name for a comment's author
pub(crate) fn author_label(comment: &Comment) -> String {
    match (&comment.author_name, comment.author_id.as_str()) {
        (Some(name), _) => name.clone(),
        (None, "") => "unknown".to_string(),
        (None, id) => format!("user {}", id),
    }
}

/// Markdown exporter
pub struct MarkdownExporter {
    /// Include the summary section
    include_summary: bool,
    /// Include timestamps next to authors
    include_timestamps: bool,
}

impl MarkdownExporter {
    /// Create a new Markdown exporter with default settings
    pub fn new() -> Self {
        Self {
            include_summary: true,
            include_timestamps: true,
        }
    }

    /// Set whether to include the summary section
    pub fn with_summary(mut self, include: bool) -> Self {
        self.include_summary = include;
        self
    }

    /// Set whether to include timestamps
    pub fn with_timestamps(mut self, include: bool) -> Self {
        self.include_timestamps = include;
        self
    }

    fn render_header(&self, view: &ThreadView<'_>) -> String {
        let mut header = String::from("# Discussion\n\n");
        if let Some(problem) = view.problem() {
            header.push_str(&format!("**Problem:** `{}`\n\n", problem));
        }
        header
    }

    fn render_summary(&self, view: &ThreadView<'_>) -> String {
        if !self.include_summary {
            return String::new();
        }

        let top_level = view.iter().filter(|e| e.depth == 0).count();
        let solutions = view.iter().filter(|e| e.comment.is_solution).count();

        let mut summary = String::from("## Summary\n\n");
        summary.push_str(&format!("- **Comments shown:** {}\n", view.len()));
        summary.push_str(&format!("- **Top-level:** {}\n", top_level));
        summary.push_str(&format!("- **Solutions:** {}\n", solutions));
        if view.hidden_total() > 0 {
            summary.push_str(&format!(
                "- **Replies beyond depth {}:** {}\n",
                view.max_depth(),
                view.hidden_total()
            ));
        }
        summary.push('\n');
        summary
    }

    fn render_entry(&self, entry: &ViewEntry<'_>) -> String {
        let comment = entry.comment;
        let indent = "  ".repeat(entry.depth);
        let mut output = String::new();

        let badge = if comment.is_solution { "✅ **Solution** · " } else { "" };
        let timestamp = if self.include_timestamps {
            format!(" · {}", comment.created_at.format("%Y-%m-%d %H:%M UTC"))
        } else {
            String::new()
        };
        let edited = if comment.is_edited() { " _(edited)_" } else { "" };

        output.push_str(&format!(
            "{}- {}**{}**{}{}\n",
            indent,
            badge,
            author_label(comment),
            timestamp,
            edited
        ));

        for line in comment.text.lines() {
            if line.trim().is_empty() {
                output.push('\n');
            } else {
                output.push_str(&format!("{}  {}\n", indent, line));
            }
        }

        if entry.hidden_replies > 0 {
            let noun = if entry.hidden_replies == 1 { "reply" } else { "replies" };
            output.push_str(&format!(
                "{}  _… {} more {}_\n",
                indent, entry.hidden_replies, noun
            ));
        }

        output
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadExporter for MarkdownExporter {
    fn export(&self, view: &ThreadView<'_>) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.render_header(view));
        output.push_str(&self.render_summary(view));

        if view.is_empty() {
            output.push_str("_No comments yet._\n");
        }
        for entry in view.iter() {
            output.push_str(&self.render_entry(entry));
        }

        Ok(output)
    }

    fn format_name(&self) -> &str {
        "markdown"
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::{CommentForest, CommentRecordBuilder};
    use crate::types::ProblemId;
    use chrono::{TimeZone, Utc};

    fn forest() -> CommentForest {
        let created = Utc.with_ymd_and_hms(2024, 2, 1, 8, 30, 0).unwrap();
        let deep = CommentRecordBuilder::new("4").text("too deep").build().unwrap();
        let reply = CommentRecordBuilder::new("2")
            .text("Why does that hold?")
            .author("8")
            .created_at(created)
            .reply(deep)
            .build()
            .unwrap();
        let root = CommentRecordBuilder::new("1")
            .text("Apply AM-GM.\nThen square both sides.")
            .author("7")
            .author_name("gauss")
            .created_at(created)
            .updated_at(created + chrono::Duration::minutes(5))
            .solution(true)
            .reply(reply)
            .build()
            .unwrap();
        CommentForest::from_records(vec![root])
    }

    #[test]
    fn test_markdown_exporter_creation() {
        let exporter = MarkdownExporter::new();
        assert_eq!(exporter.format_name(), "markdown");
        assert_eq!(exporter.file_extension(), "md");
    }

    #[test]
    fn test_export_empty_thread() {
        let forest = CommentForest::new();
        let md = MarkdownExporter::new().export(&forest.produce_view(3)).unwrap();
        assert!(md.contains("# Discussion"));
        assert!(md.contains("_No comments yet._"));
    }

    #[test]
    fn test_export_thread() {
        let forest = forest();
        let view = forest.produce_view(3).for_problem(ProblemId::from("11"));
        let md = MarkdownExporter::new().export(&view).unwrap();

        assert!(md.contains("**Problem:** `11`"));
        assert!(md.contains("- ✅ **Solution** · **gauss** · 2024-02-01 08:30 UTC _(edited)_"));
        assert!(md.contains("  Then square both sides."));
        assert!(md.contains("  - **user 8**"));
        assert!(md.contains("**Solutions:** 1"));
    }

    #[test]
    fn test_export_hidden_replies_hint() {
        let forest = forest();
        let md = MarkdownExporter::new().export(&forest.produce_view(1)).unwrap();
        assert!(md.contains("_… 1 more reply_"));
        assert!(!md.contains("too deep"));
        assert!(md.contains("**Replies beyond depth 1:** 1"));
    }

    #[test]
    fn test_markdown_without_summary_or_timestamps() {
        let forest = forest();
        let md = MarkdownExporter::new()
            .with_summary(false)
            .with_timestamps(false)
            .export(&forest.produce_view(3))
            .unwrap();
        assert!(!md.contains("## Summary"));
        assert!(!md.contains("UTC"));
    }
}
