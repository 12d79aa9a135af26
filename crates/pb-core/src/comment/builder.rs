//! Comment record builder for fluent API

use super::model::{AuthorRef, CommentRecord};
use crate::error::{ProbboardError, Result};
use crate::types::{CommentId, UserId};
use chrono::{DateTime, Utc};

/// Builder for creating comment records with fluent API
pub struct CommentRecordBuilder {
    id: CommentId,
    text: Option<String>,
    author_id: Option<UserId>,
    author_name: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    is_solution: bool,
    replies: Vec<CommentRecord>,
}

impl CommentRecordBuilder {
    /// Create a new builder for the given comment id
    pub fn new(id: impl Into<CommentId>) -> Self {
        Self {
            id: id.into(),
            text: None,
            author_id: None,
            author_name: None,
            created_at: None,
            updated_at: None,
            is_solution: false,
            replies: Vec::new(),
        }
    }

    /// Set the comment text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the author id
    pub fn author(mut self, author_id: impl Into<UserId>) -> Self {
        self.author_id = Some(author_id.into());
        self
    }

    /// Set the author's display name
    pub fn author_name(mut self, name: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self
    }

    /// Set the creation time
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Set the last edit time
    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    /// Set the solution flag
    pub fn solution(mut self, is_solution: bool) -> Self {
        self.is_solution = is_solution;
        self
    }

    /// Append a reply
    pub fn reply(mut self, reply: CommentRecord) -> Self {
        self.replies.push(reply);
        self
    }

    /// Append several replies
    pub fn replies(mut self, replies: impl IntoIterator<Item = CommentRecord>) -> Self {
        self.replies.extend(replies);
        self
    }

    /// Build the record
    pub fn build(self) -> Result<CommentRecord> {
        let text = self.text.ok_or_else(|| {
            ProbboardError::Validation("Comment text is required".to_string())
        })?;

        if text.trim().is_empty() {
            return Err(ProbboardError::Validation(
                "Comment text cannot be empty".to_string(),
            ));
        }

        let created_at = self.created_at.unwrap_or_else(Utc::now);
        if let Some(updated_at) = self.updated_at {
            if updated_at < created_at {
                return Err(ProbboardError::Validation(format!(
                    "Comment {} edited before it was created",
                    self.id
                )));
            }
        }

        let author = self.author_name.map(|name| AuthorRef {
            id: self.author_id.clone(),
            username: Some(name),
        });

        Ok(CommentRecord {
            id: self.id,
            text,
            author_id: self.author_id,
            author,
            created_at,
            updated_at: self.updated_at,
            is_solution: self.is_solution,
            replies: self.replies,
        })
    }
}
