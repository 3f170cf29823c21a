//! Landing page.

use actix_web::{HttpRequest, HttpResponse, web};
use minijinja::context;

use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::render;

/// GET /
pub async fn home_page(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    render(&state, &req, "home.html", context! {})
}
