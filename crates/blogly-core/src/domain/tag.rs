use serde::{Deserialize, Serialize};

use super::required;
use crate::error::DomainError;

/// Tag entity. Names are unique across all tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

/// Validated tag name, used both for creating and renaming a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
}

impl NewTag {
    pub fn new(name: Option<String>) -> Result<Self, DomainError> {
        Ok(Self {
            name: required("name", name)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_name_is_required() {
        assert_eq!(
            NewTag::new(Some("\t".into())).unwrap_err(),
            DomainError::MissingField { field: "name" }
        );
        assert_eq!(NewTag::new(Some("fun".into())).unwrap().name, "fun");
    }
}
