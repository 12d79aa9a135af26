//! Error types for backend calls

use pb_core::ProbboardError;
use thiserror::Error;

/// Error raised by a [`CommentBackend`](crate::CommentBackend)
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never got an answer
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Missing or rejected credential
    #[error("Not authorized")]
    Unauthorized,

    /// Problem or comment does not exist on the backend
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response body could not be decoded
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Error from the thread engine
    #[error(transparent)]
    Core(#[from] ProbboardError),
}

impl ClientError {
    /// Message shown to the user in a one-shot notification
    pub fn notification(&self) -> String {
        match self {
            ClientError::Transport(e) if e.is_timeout() => {
                "The server took too long to answer. Please try again.".to_string()
            }
            ClientError::Transport(_) => {
                "Could not reach the server. Check your connection.".to_string()
            }
            ClientError::Status { status, .. } if *status >= 500 => {
                "The server ran into a problem. Please try again later.".to_string()
            }
            ClientError::Status { message, .. } => message.clone(),
            ClientError::Unauthorized => "Please log in again.".to_string(),
            ClientError::NotFound(what) => format!("{} no longer exists.", what),
            ClientError::Decode(_) => "The server sent an unexpected answer.".to_string(),
            ClientError::Core(ProbboardError::Validation(message)) => message.clone(),
            ClientError::Core(e) => e.to_string(),
        }
    }

    /// Whether the backend said the target does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

/// Result type alias for backend calls
pub type Result<T> = std::result::Result<T, ClientError>;
