//! Firehose post record
//!
//! One `Post` is one record pulled off the firehose. Posts are immutable
//! once received: the source deserializes them, the windower groups them,
//! the inserter writes them, and nothing in between mutates a field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace for deriving insert ids (UUID v5). Fixed for the lifetime of
/// the deployment so the same post always maps to the same id.
const INSERT_ID_NAMESPACE: Uuid = Uuid::from_u128(0x8f1e_6d2a_41c3_4b7a_9e5d_0c2f_7a18_3b64);

/// A single post from the upstream firehose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Upstream-assigned unique identifier
    pub id: u64,

    /// Numeric id of the author account
    pub author_id: u64,

    /// Author handle at the time of posting
    pub author_handle: String,

    /// Post body
    pub text: String,

    /// Creation timestamp as reported by the firehose
    pub created_at: DateTime<Utc>,

    /// BCP-47 language tag, when the firehose detected one
    #[serde(default)]
    pub lang: Option<String>,
}

/// Derive the idempotency key for a post going to `table`.
///
/// The key is a UUID v5 over `(table, post id)`: stable for the lifetime
/// of the post and unique within the destination table, so the warehouse
/// can safely discard duplicate rows caused by retried batches.
pub fn insert_id(table: &str, post: &Post) -> Uuid {
    let mut name = Vec::with_capacity(table.len() + 1 + 20);
    name.extend_from_slice(table.as_bytes());
    name.push(b':');
    name.extend_from_slice(post.id.to_string().as_bytes());
    Uuid::new_v5(&INSERT_ID_NAMESPACE, &name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(id: u64) -> Post {
        Post {
            id,
            author_id: 42,
            author_handle: "ada".into(),
            text: "hello".into(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            lang: Some("en".into()),
        }
    }

    #[test]
    fn test_insert_id_is_stable() {
        let p = post(1001);
        assert_eq!(insert_id("sample_posts", &p), insert_id("sample_posts", &p));
    }

    #[test]
    fn test_insert_id_differs_per_table_and_post() {
        let a = post(1001);
        let b = post(1002);

        assert_ne!(insert_id("sample_posts", &a), insert_id("user_posts", &a));
        assert_ne!(insert_id("sample_posts", &a), insert_id("sample_posts", &b));
    }

    #[test]
    fn test_deserialize_without_lang() {
        let json = r#"{
            "id": 7,
            "author_id": 9,
            "author_handle": "grace",
            "text": "compile it",
            "created_at": "2024-05-01T12:00:00Z"
        }"#;

        let p: Post = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, 7);
        assert!(p.lang.is_none());
    }
}
