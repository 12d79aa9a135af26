//! Comment thread module
//!
//! Holds the comment forest of a problem, its canonical ordering, the
//! bounded-depth view, validation and record building.

pub mod model;
pub mod ordering;
pub mod forest;
pub mod view;
pub mod validator;
pub mod builder;

pub use model::*;
pub use ordering::{canonical_order, is_canonical, sort_canonical};
pub use forest::CommentForest;
pub use view::{ThreadView, ViewEntry};
pub use validator::CommentValidator;
pub use builder::CommentRecordBuilder;
