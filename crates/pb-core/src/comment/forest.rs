//! Comment forest for a problem's discussion
//!
//! Nodes live in an arena keyed by id; parent and child links are stored as
//! ids. Every lookup, patch and removal therefore works the same way at any
//! nesting depth. Top-level ids are kept in canonical order after each load
//! and mutation; reply lists keep the order the backend delivered.

use super::model::{Comment, CommentRecord, NewComment};
use super::ordering::sort_canonical;
use crate::types::{CommentId, UserId};
use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    comment: Comment,
    parent: Option<CommentId>,
    children: Vec<CommentId>,
}

/// In-memory forest of comments for one problem
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentForest {
    nodes: HashMap<CommentId, Node>,
    roots: Vec<CommentId>,
}

impl CommentForest {
    /// Create an empty forest
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest from backend records
    pub fn from_records(records: Vec<CommentRecord>) -> Self {
        let mut forest = Self::new();
        forest.load(records);
        forest
    }

    /// Replace the whole forest with freshly fetched records
    ///
    /// Returns the top-level ids in canonical order.
    pub fn load(&mut self, records: Vec<CommentRecord>) -> &[CommentId] {
        self.nodes.clear();
        self.roots.clear();

        for record in records {
            if let Some(id) = self.insert_record(record, None) {
                self.roots.push(id);
            }
        }

        self.sort_roots();
        debug!(
            "Loaded {} comments ({} top-level)",
            self.nodes.len(),
            self.roots.len()
        );
        &self.roots
    }

    fn insert_record(&mut self, record: CommentRecord, parent: Option<CommentId>) -> Option<CommentId> {
        if self.nodes.contains_key(&record.id) {
            warn!(
                "Skipping duplicate comment {} ({} records dropped)",
                record.id,
                record.subtree_len()
            );
            return None;
        }

        let (comment, replies) = record.into_parts();
        let id = comment.id.clone();
        self.nodes.insert(
            id.clone(),
            Node {
                comment,
                parent,
                children: Vec::with_capacity(replies.len()),
            },
        );

        let children: Vec<CommentId> = replies
            .into_iter()
            .filter_map(|reply| self.insert_record(reply, Some(id.clone())))
            .collect();
        if let Some(node) = self.nodes.get_mut(&id) {
            node.children = children;
        }

        Some(id)
    }

    /// Reapply canonical ordering to the top-level sequence
    pub fn sort_roots(&mut self) {
        let mut top: Vec<&Comment> = self
            .roots
            .iter()
            .filter_map(|id| self.nodes.get(id).map(|n| &n.comment))
            .collect();
        sort_canonical(&mut top);
        self.roots = top.into_iter().map(|c| c.id.clone()).collect();
    }

    /// Top-level ids in canonical order
    pub fn root_ids(&self) -> &[CommentId] {
        &self.roots
    }

    /// Top-level comments in canonical order
    pub fn top_level(&self) -> Vec<&Comment> {
        self.roots.iter().filter_map(|id| self.get(id)).collect()
    }

    /// Get a comment by ID, at any depth
    pub fn get(&self, id: &CommentId) -> Option<&Comment> {
        self.nodes.get(id).map(|n| &n.comment)
    }

    /// Direct replies of a comment, in backend order
    pub fn replies(&self, id: &CommentId) -> Vec<&Comment> {
        self.child_ids(id)
            .iter()
            .filter_map(|child| self.get(child))
            .collect()
    }

    /// Ids of the direct replies of a comment
    pub fn child_ids(&self, id: &CommentId) -> &[CommentId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Parent of a comment, `None` for top-level or unknown comments
    pub fn parent(&self, id: &CommentId) -> Option<&CommentId> {
        self.nodes.get(id).and_then(|n| n.parent.as_ref())
    }

    /// Nesting depth of a comment (top-level = 0)
    pub fn depth_of(&self, id: &CommentId) -> Option<usize> {
        let mut node = self.nodes.get(id)?;
        let mut depth = 0;
        while let Some(parent) = &node.parent {
            node = self.nodes.get(parent)?;
            depth += 1;
        }
        Some(depth)
    }

    /// Whether a comment is present
    pub fn contains(&self, id: &CommentId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether a comment is a top-level comment
    pub fn is_top_level(&self, id: &CommentId) -> bool {
        self.nodes.get(id).map(|n| n.parent.is_none()).unwrap_or(false)
    }

    /// Total number of comments at all depths
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Prepare a reply to `parent_id`
    ///
    /// Returns `None` when the text is blank. The forest is not touched: the
    /// caller sends the write and reloads, so server-assigned ids and ordering
    /// never have to be reconciled locally.
    pub fn prepare_reply(
        &self,
        parent_id: &CommentId,
        text: &str,
        author_id: &UserId,
    ) -> Option<NewComment> {
        if !self.contains(parent_id) {
            debug!("Reply target {} not in the current snapshot", parent_id);
        }
        Self::draft(Some(parent_id.clone()), text, author_id)
    }

    /// Prepare a new top-level comment, `None` when the text is blank
    pub fn prepare_comment(&self, text: &str, author_id: &UserId) -> Option<NewComment> {
        Self::draft(None, text, author_id)
    }

    fn draft(parent_id: Option<CommentId>, text: &str, author_id: &UserId) -> Option<NewComment> {
        if text.trim().is_empty() {
            return None;
        }
        let now = Utc::now();
        Some(NewComment {
            parent_id,
            text: text.to_string(),
            author_id: author_id.clone(),
            is_solution: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the text of a comment at any depth
    ///
    /// Blank text and unknown ids are no-ops. Returns whether the forest
    /// changed.
    pub fn edit_text(&mut self, id: &CommentId, new_text: &str) -> bool {
        if new_text.trim().is_empty() {
            return false;
        }
        let Some(node) = self.nodes.get_mut(id) else {
            debug!("Edit of unknown comment {} ignored", id);
            return false;
        };
        node.comment.update_text(new_text);
        self.sort_roots();
        true
    }

    /// Patch a node with the backend's answer to an update
    ///
    /// Text, edit time and solution flag are taken from the record; replies
    /// in the record are ignored. Unknown ids are a no-op.
    pub fn apply_server_record(&mut self, record: &CommentRecord) -> bool {
        let Some(node) = self.nodes.get_mut(&record.id) else {
            debug!("Server record for unknown comment {} ignored", record.id);
            return false;
        };
        let comment = &mut node.comment;
        comment.text = record.text.clone();
        comment.updated_at = record
            .updated_at
            .map(|t| t.max(comment.created_at))
            .unwrap_or(comment.updated_at);
        comment.is_solution = record.is_solution;
        self.sort_roots();
        true
    }

    /// Remove a comment and all of its replies, at any depth
    ///
    /// Unknown ids are a silent no-op. Returns the removed comments, the
    /// target first.
    pub fn delete(&mut self, id: &CommentId) -> Vec<Comment> {
        let Some(parent) = self.nodes.get(id).map(|n| n.parent.clone()) else {
            debug!("Delete of unknown comment {} ignored", id);
            return Vec::new();
        };

        match parent {
            Some(parent_id) => {
                if let Some(parent) = self.nodes.get_mut(&parent_id) {
                    parent.children.retain(|child| child != id);
                }
            }
            None => self.roots.retain(|root| root != id),
        }

        let mut removed = Vec::new();
        let mut pending = vec![id.clone()];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                pending.extend(node.children.into_iter().rev());
                removed.push(node.comment);
            }
        }

        self.sort_roots();
        removed
    }

    /// Set the solution flag of a comment at any depth
    ///
    /// `is_solution` is the value the backend answered with. Unknown ids are a
    /// no-op. Returns whether the comment was found.
    pub fn toggle_solution(&mut self, id: &CommentId, is_solution: bool) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            debug!("Solution toggle for unknown comment {} ignored", id);
            return false;
        };
        node.comment.is_solution = is_solution;
        self.sort_roots();
        true
    }

    /// Ids of every comment flagged as a solution, in traversal order
    pub fn solution_ids(&self) -> Vec<CommentId> {
        self.walk()
            .into_iter()
            .filter(|(comment, _)| comment.is_solution)
            .map(|(comment, _)| comment.id.clone())
            .collect()
    }

    /// Every comment with its depth, pre-order, without a depth limit
    pub fn walk(&self) -> Vec<(&Comment, usize)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(&CommentId, usize)> = self.roots.iter().rev().map(|id| (id, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                out.push((&node.comment, depth));
                stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
            }
        }
        out
    }

    /// Number of replies below a comment, at every depth
    pub fn descendant_count(&self, id: &CommentId) -> usize {
        let mut count = 0;
        let mut pending: Vec<&CommentId> = self.child_ids(id).iter().collect();
        while let Some(next) = pending.pop() {
            count += 1;
            pending.extend(self.child_ids(next));
        }
        count
    }

    /// Rebuild nested records in current order
    pub fn to_records(&self) -> Vec<CommentRecord> {
        self.roots.iter().filter_map(|id| self.record_for(id)).collect()
    }

    fn record_for(&self, id: &CommentId) -> Option<CommentRecord> {
        let node = self.nodes.get(id)?;
        let replies = node
            .children
            .iter()
            .filter_map(|child| self.record_for(child))
            .collect();
        Some(CommentRecord::from_comment(&node.comment, replies))
    }
}
