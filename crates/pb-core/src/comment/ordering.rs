//! Canonical ordering of top-level comments
//!
//! Solutions come first, then the most recent comments. The comparator is an
//! explicit two-key comparison and the sort is stable, so comments equal under
//! both keys keep their input order.

use super::model::Comment;
use std::cmp::Ordering;

/// Compare two comments under the canonical ordering
pub fn canonical_order(a: &Comment, b: &Comment) -> Ordering {
    b.is_solution
        .cmp(&a.is_solution)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Stable sort of comments into canonical order
pub fn sort_canonical<C>(comments: &mut [C])
where
    C: AsRef<Comment>,
{
    comments.sort_by(|a, b| canonical_order(a.as_ref(), b.as_ref()));
}

/// Check whether comments are already in canonical order
pub fn is_canonical<C>(comments: &[C]) -> bool
where
    C: AsRef<Comment>,
{
    comments
        .windows(2)
        .all(|pair| canonical_order(pair[0].as_ref(), pair[1].as_ref()) != Ordering::Greater)
}

impl AsRef<Comment> for Comment {
    fn as_ref(&self) -> &Comment {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommentId, UserId};
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap()
    }

    fn comment(id: &str, is_solution: bool, minute: u32) -> Comment {
        Comment {
            id: CommentId::from(id),
            text: format!("comment {}", id),
            author_id: UserId::from("u1"),
            author_name: None,
            created_at: at(minute),
            updated_at: at(minute),
            is_solution,
        }
    }

    fn ids(comments: &[Comment]) -> Vec<&str> {
        comments.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_solution_first_regardless_of_time() {
        let old_solution = comment("a", true, 0);
        let fresh = comment("b", false, 59);
        assert_eq!(canonical_order(&old_solution, &fresh), Ordering::Less);
        assert_eq!(canonical_order(&fresh, &old_solution), Ordering::Greater);
    }

    #[test]
    fn test_newer_first_when_flags_equal() {
        let older = comment("a", false, 1);
        let newer = comment("b", false, 2);
        assert_eq!(canonical_order(&newer, &older), Ordering::Less);
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let mut comments = vec![
            comment("x", false, 5),
            comment("y", false, 5),
            comment("z", false, 5),
        ];
        sort_canonical(&mut comments);
        assert_eq!(ids(&comments), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_sort_mixed() {
        let mut comments = vec![
            comment("1", false, 10),
            comment("2", true, 0),
            comment("3", false, 30),
            comment("4", true, 20),
        ];
        sort_canonical(&mut comments);
        assert_eq!(ids(&comments), vec!["4", "2", "3", "1"]);
        assert!(is_canonical(&comments));
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut comments = vec![
            comment("1", false, 3),
            comment("2", false, 3),
            comment("3", true, 1),
            comment("4", false, 7),
            comment("5", true, 1),
        ];
        sort_canonical(&mut comments);
        let once = comments.clone();
        sort_canonical(&mut comments);
        assert_eq!(comments, once);
    }

    #[test]
    fn test_is_canonical_detects_disorder() {
        let comments = vec![comment("1", false, 1), comment("2", false, 2)];
        assert!(!is_canonical(&comments));
    }

    #[test]
    fn test_sort_references() {
        let a = comment("a", false, 1);
        let b = comment("b", true, 0);
        let mut refs: Vec<&Comment> = vec![&a, &b];
        sort_canonical(&mut refs);
        assert_eq!(refs[0].id.as_str(), "b");
    }
}
