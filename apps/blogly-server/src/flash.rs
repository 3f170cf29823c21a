//! One-shot flash messages carried in a cookie from a redirect to the next rendered page.

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, time::Duration};

pub const FLASH_COOKIE: &str = "blogly_flash";

/// Messages a handler can leave for the next page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    TagExists,
    TagUnchanged,
}

impl Flash {
    pub fn message(self) -> &'static str {
        match self {
            Flash::TagExists => "Tag name already exists.",
            Flash::TagUnchanged => "Tag name unchanged. Tag name already exists.",
        }
    }

    fn code(self) -> &'static str {
        match self {
            Flash::TagExists => "tag-exists",
            Flash::TagUnchanged => "tag-unchanged",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "tag-exists" => Some(Flash::TagExists),
            "tag-unchanged" => Some(Flash::TagUnchanged),
            _ => None,
        }
    }

    pub fn cookie(self) -> Cookie<'static> {
        Cookie::build(FLASH_COOKIE, self.code())
            .path("/")
            .http_only(true)
            .finish()
    }
}

/// Read the pending flash message, if any.
pub fn take(req: &HttpRequest) -> Option<Flash> {
    req.cookie(FLASH_COOKIE)
        .and_then(|cookie| Flash::from_code(cookie.value()))
}

pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, "")
        .path("/")
        .max_age(Duration::ZERO)
        .finish()
}
