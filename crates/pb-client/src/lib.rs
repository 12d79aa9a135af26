//! pb-client - Backend access for probboard
//!
//! Connects the thread engine in `pb-core` to the problem board's REST API:
//! the [`CommentBackend`] trait with HTTP and in-memory implementations, and
//! the [`ThreadController`] that applies user actions and reloads.

pub mod backend;
pub mod controller;
pub mod error;
pub mod http;
pub mod memory;

pub use backend::{CommentBackend, Credential, SolutionToggle, TextUpdate};
pub use controller::{FetchedReload, Notice, PendingReload, ThreadController};
pub use error::{ClientError, Result};
pub use http::HttpBackend;
pub use memory::MemoryBackend;
