//! Bounded-depth thread view handed to renderers

use super::forest::CommentForest;
use super::model::Comment;
use crate::types::{CommentId, ProblemId};

/// One visited comment in a thread view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry<'a> {
    /// The comment
    pub comment: &'a Comment,
    /// Nesting depth, top-level = 0
    pub depth: usize,
    /// Number of direct replies
    pub reply_count: usize,
    /// Direct replies that were not descended into because of the cutoff
    pub hidden_replies: usize,
}

/// Depth-first, pre-order rendering of a comment forest
#[derive(Debug, Clone)]
pub struct ThreadView<'a> {
    problem: Option<ProblemId>,
    max_depth: usize,
    entries: Vec<ViewEntry<'a>>,
}

impl<'a> ThreadView<'a> {
    /// Walk `forest` from its top-level comments
    ///
    /// Replies are only descended into while `depth < max_depth`. Comments at
    /// `max_depth` are still yielded, their replies are not.
    pub fn new(forest: &'a CommentForest, max_depth: usize) -> Self {
        let mut entries = Vec::with_capacity(forest.len());
        let mut stack: Vec<(&CommentId, usize)> =
            forest.root_ids().iter().rev().map(|id| (id, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            let Some(comment) = forest.get(id) else {
                continue;
            };
            let children = forest.child_ids(id);
            let descend = depth < max_depth;

            entries.push(ViewEntry {
                comment,
                depth,
                reply_count: children.len(),
                hidden_replies: if descend { 0 } else { children.len() },
            });

            if descend {
                stack.extend(children.iter().rev().map(|child| (child, depth + 1)));
            }
        }

        Self {
            problem: None,
            max_depth,
            entries,
        }
    }

    /// Attach the problem this thread belongs to
    pub fn for_problem(mut self, problem: ProblemId) -> Self {
        self.problem = Some(problem);
        self
    }

    /// The problem this thread belongs to
    pub fn problem(&self) -> Option<&ProblemId> {
        self.problem.as_ref()
    }

    /// Depth cutoff used for this view
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Visited entries in pre-order
    pub fn entries(&self) -> &[ViewEntry<'a>] {
        &self.entries
    }

    /// Iterate over visited entries
    pub fn iter(&self) -> impl Iterator<Item = &ViewEntry<'a>> {
        self.entries.iter()
    }

    /// Number of visited comments
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deepest depth reached, `None` for an empty view
    pub fn deepest(&self) -> Option<usize> {
        self.entries.iter().map(|e| e.depth).max()
    }

    /// Total replies left unvisited at the cutoff
    pub fn hidden_total(&self) -> usize {
        self.entries.iter().map(|e| e.hidden_replies).sum()
    }
}

impl CommentForest {
    /// Produce the bounded-depth view of this forest
    pub fn produce_view(&self, max_depth: usize) -> ThreadView<'_> {
        ThreadView::new(self, max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::builder::CommentRecordBuilder;
    use crate::comment::model::CommentRecord;
    use crate::config::DEFAULT_MAX_DEPTH;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn node(id: &str, minute: u32, replies: Vec<CommentRecord>) -> CommentRecord {
        CommentRecordBuilder::new(id)
            .text(format!("text {}", id))
            .author("u")
            .created_at(Utc.with_ymd_and_hms(2024, 6, 1, 9, minute, 0).unwrap())
            .replies(replies)
            .build()
            .unwrap()
    }

    /// A single chain d0 -> d1 -> d2 -> d3 -> d4
    fn five_levels() -> CommentForest {
        let d4 = node("d4", 4, vec![]);
        let d3 = node("d3", 3, vec![d4]);
        let d2 = node("d2", 2, vec![d3]);
        let d1 = node("d1", 1, vec![d2]);
        CommentForest::from_records(vec![node("d0", 0, vec![d1])])
    }

    fn visited(view: &ThreadView<'_>) -> Vec<(String, usize)> {
        view.iter()
            .map(|e| (e.comment.id.to_string(), e.depth))
            .collect()
    }

    #[test]
    fn test_empty_forest() {
        let forest = CommentForest::new();
        let view = forest.produce_view(DEFAULT_MAX_DEPTH);
        assert!(view.is_empty());
        assert_eq!(view.deepest(), None);
    }

    #[test]
    fn test_five_levels_cut_at_three() {
        let forest = five_levels();
        let view = forest.produce_view(DEFAULT_MAX_DEPTH);
        assert_eq!(
            visited(&view),
            vec![
                ("d0".to_string(), 0),
                ("d1".to_string(), 1),
                ("d2".to_string(), 2),
                ("d3".to_string(), 3),
            ]
        );
        assert_eq!(view.deepest(), Some(3));
    }

    #[test]
    fn test_cutoff_reports_hidden_replies() {
        let forest = five_levels();
        let view = forest.produce_view(3);
        let last = view.entries().last().unwrap();
        assert_eq!(last.comment.id.as_str(), "d3");
        assert_eq!(last.reply_count, 1);
        assert_eq!(last.hidden_replies, 1);
        assert_eq!(view.hidden_total(), 1);
        // the unreachable reply is still in the data
        assert!(forest.contains(&CommentId::from("d4")));
    }

    #[test]
    fn test_preorder_across_siblings() {
        let forest = CommentForest::from_records(vec![
            node("a", 1, vec![node("a1", 2, vec![]), node("a2", 3, vec![])]),
            node("b", 5, vec![node("b1", 6, vec![])]),
        ]);
        let view = forest.produce_view(3);
        assert_eq!(
            visited(&view),
            vec![
                ("b".to_string(), 0),
                ("b1".to_string(), 1),
                ("a".to_string(), 0),
                ("a1".to_string(), 1),
                ("a2".to_string(), 1),
            ]
        );
        assert_eq!(view.hidden_total(), 0);
    }

    #[test]
    fn test_zero_depth_shows_top_level_only() {
        let forest = five_levels();
        let view = forest.produce_view(0);
        assert_eq!(view.len(), 1);
        assert_eq!(view.entries()[0].hidden_replies, 1);
    }

    #[test]
    fn test_view_is_restartable() {
        let forest = five_levels();
        let first = visited(&forest.produce_view(3));
        let second = visited(&forest.produce_view(3));
        assert_eq!(first, second);
    }

    #[test]
    fn test_for_problem() {
        let forest = CommentForest::new();
        let view = forest.produce_view(3).for_problem(ProblemId::from("42"));
        assert_eq!(view.problem(), Some(&ProblemId::from("42")));
        assert_eq!(view.max_depth(), 3);
    }
}
