//! Backend abstraction for comment threads

use crate::error::Result;
use async_trait::async_trait;
use pb_core::comment::{CommentRecord, NewComment};
use pb_core::{CommentId, ProblemId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bearer token sent with every request
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Read a token from an environment variable
    ///
    /// Returns `None` when the variable is unset or blank.
    pub fn from_env(var: &str) -> Option<Self> {
        std::env::var(var)
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .map(Self)
    }

    /// Raw token
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Answer to a solution toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionToggle {
    pub is_solution: bool,
}

/// Body of a text update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextUpdate {
    pub text: String,
}

/// Remote store of a problem's comments
#[async_trait]
pub trait CommentBackend: Send + Sync {
    /// Fetch the whole thread of a problem
    async fn fetch_comments(&self, problem: &ProblemId) -> Result<Vec<CommentRecord>>;

    /// Create a comment or reply
    async fn post_comment(&self, problem: &ProblemId, comment: &NewComment) -> Result<CommentRecord>;

    /// Replace a comment's text
    async fn put_comment(
        &self,
        problem: &ProblemId,
        comment: &CommentId,
        text: &str,
    ) -> Result<CommentRecord>;

    /// Delete a comment and its replies
    async fn delete_comment(&self, problem: &ProblemId, comment: &CommentId) -> Result<()>;

    /// Flip a comment's solution flag
    async fn put_solution_toggle(
        &self,
        problem: &ProblemId,
        comment: &CommentId,
    ) -> Result<SolutionToggle>;
}
