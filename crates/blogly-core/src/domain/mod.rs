//! Domain entities - the core business objects.

mod post;
mod post_tag;
mod tag;
mod user;

pub use post::{NewPost, Post, PostChanges};
pub use post_tag::{PostTag, Tagging};
pub use tag::{NewTag, Tag};
pub use user::{DEFAULT_IMAGE_URL, NewUser, User, UserChanges};

use crate::error::DomainError;

/// Treat blank form input as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == v.len() {
            Some(v)
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub(crate) fn required(field: &'static str, value: Option<String>) -> Result<String, DomainError> {
    non_blank(value).ok_or(DomainError::MissingField { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_absent() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(Some(" Ann ".into())), Some("Ann".into()));
    }

    #[test]
    fn required_reports_field_name() {
        let err = required("title", Some(" ".into())).unwrap_err();
        assert_eq!(err, DomainError::MissingField { field: "title" });
        assert_eq!(err.to_string(), "Missing required field: title");
    }
}
