//! Field-to-column mappings
//!
//! Hand-written, explicit mappings from domain types to warehouse rows.
//! Adding a column means adding a line here; there is deliberately no
//! reflective mapper.

use crate::InsertRow;
use hydrant_protocol::{insert_id, Post};
use serde_json::json;

/// Map one post to its warehouse row for `table`.
///
/// The insert id is derived from `(table, post.id)`, so resubmitting the
/// same post to the same table never double-counts.
pub fn post_row(table: &str, post: &Post) -> InsertRow {
    InsertRow {
        insert_id: insert_id(table, post),
        json: json!({
            "id": post.id,
            "author_id": post.author_id,
            "author_handle": post.author_handle,
            "text": post.text,
            "created_at": post.created_at.to_rfc3339(),
            "lang": post.lang,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn post() -> Post {
        Post {
            id: 11,
            author_id: 7,
            author_handle: "ada".into(),
            text: "first".into(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
            lang: None,
        }
    }

    #[test]
    fn test_columns_are_explicit() {
        let row = post_row("sample_posts", &post());
        let object = row.json.as_object().unwrap();

        assert_eq!(object.len(), 6);
        assert_eq!(object["id"], 11);
        assert_eq!(object["author_handle"], "ada");
        assert_eq!(object["created_at"], "2024-05-01T08:30:00+00:00");
        assert!(object["lang"].is_null());
    }

    #[test]
    fn test_row_keeps_stable_insert_id() {
        let a = post_row("sample_posts", &post());
        let b = post_row("sample_posts", &post());
        assert_eq!(a.insert_id, b.insert_id);
    }
}
