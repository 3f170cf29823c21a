//! Tag pages. Duplicate names are reported through a flash message.

use actix_web::{HttpRequest, HttpResponse, http::header, web};
use minijinja::context;

use blogly_core::domain::{NewTag, Post};

use super::forms::TagForm;
use super::redirect;
use crate::flash::Flash;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::render;

/// GET /tags
pub async fn list_tags(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    let tags = state.tags.find_all().await?;
    render(&state, &req, "tags/list.html", context! { tags })
}

/// GET /tags/{tag_id}
pub async fn tag_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let tag_id = path.into_inner();
    let tag = state
        .tags
        .find_by_id(tag_id)
        .await?
        .ok_or_else(|| AppError::not_found("tag", tag_id))?;
    let posts: Vec<Post> = state
        .tags
        .posts_for_tag(tag_id)
        .await?
        .into_iter()
        .map(|tagging| tagging.post)
        .collect();

    render(&state, &req, "tags/show.html", context! { tag, posts })
}

/// GET /tags/new
pub async fn new_tag_form(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    render(&state, &req, "tags/new.html", context! {})
}

/// POST /tags/new
pub async fn add_tag(
    state: web::Data<AppState>,
    form: web::Form<TagForm>,
) -> AppResult<HttpResponse> {
    let tag = NewTag::new(form.into_inner().name)?;

    match state.tags.create(tag).await {
        Ok(_) => Ok(redirect("/tags")),
        Err(e) if e.is_unique_violation() => Ok(redirect_with_flash("/tags", Flash::TagExists)),
        Err(e) => Err(e.into()),
    }
}

/// GET /tags/{tag_id}/edit
pub async fn edit_tag(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let tag_id = path.into_inner();
    let tag = state
        .tags
        .find_by_id(tag_id)
        .await?
        .ok_or_else(|| AppError::not_found("tag", tag_id))?;

    render(&state, &req, "tags/edit.html", context! { tag })
}

/// POST /tags/{tag_id}/edit
pub async fn update_tag(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<TagForm>,
) -> AppResult<HttpResponse> {
    let tag_id = path.into_inner();
    let tag = NewTag::new(form.into_inner().name)?;
    let location = format!("/tags/{}", tag_id);

    match state.tags.rename(tag_id, tag).await {
        Ok(_) => Ok(redirect(&location)),
        Err(e) if e.is_unique_violation() => {
            Ok(redirect_with_flash(&location, Flash::TagUnchanged))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /tags/{tag_id}/delete - unlinks the tag from every post.
pub async fn delete_tag(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    state.tags.delete(path.into_inner()).await?;

    Ok(redirect("/tags"))
}

fn redirect_with_flash(location: &str, flash: Flash) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .cookie(flash.cookie())
        .finish()
}
