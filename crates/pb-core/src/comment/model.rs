//! Comment data models

use crate::types::{CommentId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment in a problem's discussion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier
    pub id: CommentId,
    /// Comment text, may embed LaTeX math
    pub text: String,
    /// Author of the comment
    pub author_id: UserId,
    /// Display name of the author, when the backend joined it in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
    /// When the comment was last edited
    pub updated_at: DateTime<Utc>,
    /// Whether the problem author accepted this comment as the solution
    #[serde(default)]
    pub is_solution: bool,
}

impl Comment {
    /// Replace the text and refresh updated_at
    ///
    /// `updated_at` never drops below `created_at`, even when the local clock
    /// lags behind the server that stamped the comment.
    pub fn update_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.updated_at = Utc::now().max(self.created_at);
    }

    /// Whether the comment was edited after creation
    pub fn is_edited(&self) -> bool {
        self.updated_at != self.created_at
    }
}

/// Author relation as joined in by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Comment as delivered by the backend, replies already nested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: CommentId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorRef>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_solution: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<CommentRecord>,
}

impl CommentRecord {
    /// Resolve the author id from either the flat field or the joined relation
    pub fn resolved_author_id(&self) -> UserId {
        self.author_id
            .clone()
            .or_else(|| self.author.as_ref().and_then(|a| a.id.clone()))
            .unwrap_or_default()
    }

    /// Split into the node payload and its nested replies
    pub fn into_parts(self) -> (Comment, Vec<CommentRecord>) {
        let author_id = self.resolved_author_id();
        let author_name = self.author.and_then(|a| a.username);
        let updated_at = self
            .updated_at
            .map(|t| t.max(self.created_at))
            .unwrap_or(self.created_at);

        let comment = Comment {
            id: self.id,
            text: self.text,
            author_id,
            author_name,
            created_at: self.created_at,
            updated_at,
            is_solution: self.is_solution,
        };
        (comment, self.replies)
    }

    /// Rebuild a record from a node and already rebuilt replies
    pub fn from_comment(comment: &Comment, replies: Vec<CommentRecord>) -> Self {
        Self {
            id: comment.id.clone(),
            text: comment.text.clone(),
            author_id: Some(comment.author_id.clone()),
            author: comment.author_name.as_ref().map(|name| AuthorRef {
                id: Some(comment.author_id.clone()),
                username: Some(name.clone()),
            }),
            created_at: comment.created_at,
            updated_at: Some(comment.updated_at),
            is_solution: comment.is_solution,
            replies,
        }
    }

    /// Number of records in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + self.replies.iter().map(CommentRecord::subtree_len).sum::<usize>()
    }
}

/// A comment write waiting to be sent to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    /// Parent comment, `None` for a top-level comment
    pub parent_id: Option<CommentId>,
    pub text: String,
    pub author_id: UserId,
    pub is_solution: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewComment {
    /// Whether this write creates a reply
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Timestamps as written by the backend.
///
/// The backend stamps rows with naive UTC datetimes, so values may arrive
/// with or without an offset.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(v) => super::serialize(v, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) => super::parse(&raw).map(Some).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid timestamp: {}", raw))
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record_json() -> &'static str {
        r#"{
            "id": 12,
            "text": "Use induction on n",
            "author": {"id": 4, "username": "euler"},
            "created_at": "2024-03-01T10:00:00.250000",
            "updated_at": "2024-03-01T10:05:00",
            "is_solution": true,
            "replies": [
                {"id": 13, "text": "Nice", "author_id": 5, "created_at": "2024-03-01T11:00:00Z"}
            ]
        }"#
    }

    #[test]
    fn test_record_from_backend_json() {
        let record: CommentRecord = serde_json::from_str(record_json()).unwrap();
        assert_eq!(record.id, CommentId::from("12"));
        assert_eq!(record.resolved_author_id(), UserId::from("4"));
        assert!(record.is_solution);
        assert_eq!(record.replies.len(), 1);
        assert_eq!(record.replies[0].updated_at, None);
        assert_eq!(record.subtree_len(), 2);
    }

    #[test]
    fn test_into_parts_defaults_updated_at() {
        let record: CommentRecord = serde_json::from_str(record_json()).unwrap();
        let (_, replies) = record.into_parts();
        let (reply, _) = replies.into_iter().next().unwrap().into_parts();
        assert_eq!(reply.updated_at, reply.created_at);
        assert!(!reply.is_edited());
        assert_eq!(reply.author_name, None);
    }

    #[test]
    fn test_into_parts_keeps_author_name() {
        let record: CommentRecord = serde_json::from_str(record_json()).unwrap();
        let (comment, _) = record.into_parts();
        assert_eq!(comment.author_name.as_deref(), Some("euler"));
        assert!(comment.is_edited());
    }

    #[test]
    fn test_updated_before_created_is_clamped() {
        let created = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let record = CommentRecord {
            id: CommentId::from("1"),
            text: "x".to_string(),
            author_id: None,
            author: None,
            created_at: created,
            updated_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            is_solution: false,
            replies: vec![],
        };
        let (comment, _) = record.into_parts();
        assert_eq!(comment.updated_at, created);
    }

    #[test]
    fn test_update_text_never_precedes_creation() {
        let future = Utc::now() + chrono::Duration::hours(1);
        let mut comment = Comment {
            id: CommentId::from("1"),
            text: "old".to_string(),
            author_id: UserId::from("u"),
            author_name: None,
            created_at: future,
            updated_at: future,
            is_solution: false,
        };
        comment.update_text("new");
        assert_eq!(comment.text, "new");
        assert!(comment.updated_at >= comment.created_at);
    }

    #[test]
    fn test_timestamp_parse_formats() {
        assert!(timestamp::parse("2024-03-01T10:00:00Z").is_some());
        assert!(timestamp::parse("2024-03-01T10:00:00+02:00").is_some());
        assert!(timestamp::parse("2024-03-01 10:00:00").is_some());
        assert!(timestamp::parse("yesterday").is_none());
    }

    #[test]
    fn test_invalid_timestamp_rejected() {
        let json = r#"{"id": 1, "text": "x", "created_at": "soon"}"#;
        assert!(serde_json::from_str::<CommentRecord>(json).is_err());
    }

    #[test]
    fn test_new_comment_is_reply() {
        let now = Utc::now();
        let draft = NewComment {
            parent_id: Some(CommentId::from("3")),
            text: "reply".to_string(),
            author_id: UserId::from("u"),
            is_solution: false,
            created_at: now,
            updated_at: now,
        };
        assert!(draft.is_reply());
    }
}
