//! Form bodies posted by the HTML pages.

use serde::Deserialize;

use crate::middleware::error::AppError;

#[derive(Debug, Deserialize)]
pub struct UserForm {
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    #[serde(rename = "imageURL")]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TagForm {
    pub name: Option<String>,
}

/// Post form. Checked tags arrive as repeated `tag` fields, so the body is read as raw pairs.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tag_ids: Vec<i32>,
}

impl PostForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, AppError> {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "title" if form.title.is_none() => form.title = Some(value),
                "content" if form.content.is_none() => form.content = Some(value),
                "tag" => {
                    let id = value
                        .trim()
                        .parse()
                        .map_err(|_| AppError::BadRequest(format!("Invalid tag id: {}", value)))?;
                    form.tag_ids.push(id);
                }
                _ => {}
            }
        }
        Ok(form)
    }
}
