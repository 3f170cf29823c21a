use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{non_blank, required};
use crate::error::DomainError;

/// Post entity - represents a blog post written by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a post together with its initial tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub user_id: i32,
    pub title: String,
    pub content: String,
    pub tag_ids: Vec<i32>,
}

impl NewPost {
    pub fn new(
        user_id: i32,
        title: Option<String>,
        content: Option<String>,
        tag_ids: Vec<i32>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            user_id,
            title: required("title", title)?,
            content: required("content", content)?,
            tag_ids,
        })
    }
}

/// Edit of a post. Blank title or content keeps the stored value; `tag_ids` always replaces
/// the post's whole tag set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tag_ids: Vec<i32>,
}

impl PostChanges {
    pub fn new(title: Option<String>, content: Option<String>, tag_ids: Vec<i32>) -> Self {
        Self {
            title: non_blank(title),
            content: non_blank(content),
            tag_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_post_requires_title_and_content() {
        let err = NewPost::new(1, None, Some("Body".into()), vec![]).unwrap_err();
        assert_eq!(err, DomainError::MissingField { field: "title" });

        let err = NewPost::new(1, Some("Hi".into()), Some(" ".into()), vec![]).unwrap_err();
        assert_eq!(err, DomainError::MissingField { field: "content" });
    }

    #[test]
    fn changes_drop_blank_fields() {
        let changes = PostChanges::new(Some(String::new()), Some("New body".into()), vec![3]);
        assert_eq!(changes.title, None);
        assert_eq!(changes.content.as_deref(), Some("New body"));
        assert_eq!(changes.tag_ids, vec![3]);
    }
}
