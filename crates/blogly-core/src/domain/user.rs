use serde::{Deserialize, Serialize};

use super::{non_blank, required};
use crate::error::DomainError;

/// Image shown for users who did not supply one.
pub const DEFAULT_IMAGE_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/8/89/Portrait_Placeholder.png";

/// User entity - represents a user in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub image_url: String,
}

impl User {
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

/// Validated input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: Option<String>,
    pub image_url: String,
}

impl NewUser {
    /// Build a new user from raw input. Blank optional fields are stored as absent, and a
    /// missing image falls back to [`DEFAULT_IMAGE_URL`].
    pub fn new(
        first_name: Option<String>,
        last_name: Option<String>,
        image_url: Option<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            first_name: required("first_name", first_name)?,
            last_name: non_blank(last_name),
            image_url: non_blank(image_url).unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
        })
    }
}

/// Partial update for a user. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
}

impl UserChanges {
    pub fn new(
        first_name: Option<String>,
        last_name: Option<String>,
        image_url: Option<String>,
    ) -> Self {
        Self {
            first_name: non_blank(first_name),
            last_name: non_blank(last_name),
            image_url: non_blank(image_url),
        }
    }

    pub fn apply(self, user: &mut User) {
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = Some(last_name);
        }
        if let Some(image_url) = self.image_url {
            user.image_url = image_url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_first_name_uses_defaults() {
        let user = NewUser::new(Some("Ann".into()), None, Some(String::new())).unwrap();
        assert_eq!(user.first_name, "Ann");
        assert_eq!(user.last_name, None);
        assert_eq!(user.image_url, DEFAULT_IMAGE_URL);
    }

    #[test]
    fn first_name_is_required() {
        let err = NewUser::new(Some("  ".into()), Some("Lee".into()), None).unwrap_err();
        assert_eq!(err, DomainError::MissingField { field: "first_name" });
    }

    #[test]
    fn changes_keep_existing_values_for_blank_fields() {
        let mut user = User {
            id: 1,
            first_name: "Ann".into(),
            last_name: Some("Lee".into()),
            image_url: DEFAULT_IMAGE_URL.into(),
        };

        UserChanges::new(Some(String::new()), Some("Smith".into()), None).apply(&mut user);

        assert_eq!(user.first_name, "Ann");
        assert_eq!(user.full_name(), "Ann Smith");
        assert_eq!(user.image_url, DEFAULT_IMAGE_URL);
    }
}
