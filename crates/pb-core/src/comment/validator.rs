//! Comment validation

use super::forest::CommentForest;
use super::model::NewComment;
use crate::config::ThreadConfig;
use crate::error::{ProbboardError, Result};

/// Maximum comment length (default)
pub const MAX_COMMENT_LENGTH: usize = 10000;

/// Minimum comment length
pub const MIN_COMMENT_LENGTH: usize = 1;

/// Validator for comment writes and loaded threads
pub struct CommentValidator {
    max_length: usize,
    min_length: usize,
}

impl CommentValidator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self {
            max_length: MAX_COMMENT_LENGTH,
            min_length: MIN_COMMENT_LENGTH,
        }
    }

    /// Create a new validator with custom max length
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            min_length: MIN_COMMENT_LENGTH,
        }
    }

    /// Create a validator from thread configuration
    pub fn from_config(config: &ThreadConfig) -> Self {
        Self::with_max_length(config.max_comment_length)
    }

    /// Validate comment text
    pub fn validate_text(&self, text: &str) -> Result<()> {
        let length = text.trim().chars().count();

        if length < self.min_length {
            return Err(ProbboardError::Validation(
                "Comment text cannot be empty".to_string(),
            ));
        }

        if length > self.max_length {
            return Err(ProbboardError::Validation(format!(
                "Comment text exceeds maximum length of {} characters",
                self.max_length
            )));
        }

        Ok(())
    }

    /// Validate a pending comment write
    pub fn validate_new(&self, draft: &NewComment) -> Result<()> {
        self.validate_text(&draft.text)?;

        if let Some(parent) = &draft.parent_id {
            if parent.as_str().trim().is_empty() {
                return Err(ProbboardError::Validation(
                    "Reply target cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Check that at most one comment in the thread is flagged as solution
    ///
    /// The backend is expected to keep a single accepted answer per problem;
    /// this is where a client notices when it does not.
    pub fn validate_single_solution(&self, forest: &CommentForest) -> Result<()> {
        let solutions = forest.solution_ids();
        if solutions.len() > 1 {
            let ids: Vec<String> = solutions.iter().map(|id| id.to_string()).collect();
            return Err(ProbboardError::Validation(format!(
                "Multiple comments marked as solution: {}",
                ids.join(", ")
            )));
        }
        Ok(())
    }
}

impl Default for CommentValidator {
    fn default() -> Self {
        Self::new()
    }
}
