//! HTML view layer: MiniJinja templates rendered from plain serializable data.

mod engine;

use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse};
use minijinja::{Value, context};

pub use engine::{MiniJinjaEngine, TemplateEngine};

use crate::flash;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Render `template` as a full HTML page. A pending flash message is shown once and its
/// cookie cleared.
pub fn render(
    state: &AppState,
    req: &HttpRequest,
    template: &str,
    ctx: Value,
) -> AppResult<HttpResponse> {
    let pending = flash::take(req);
    let ctx = context! {
        flash => pending.map(|f| f.message()),
        ..ctx
    };

    let body = state.views.render(template, ctx)?;

    let mut response = HttpResponse::Ok();
    response.content_type(ContentType::html());
    if pending.is_some() {
        response.cookie(flash::removal_cookie());
    }
    Ok(response.body(body))
}
