//! Post pages, including tag selection.

use actix_web::{HttpRequest, HttpResponse, web};
use minijinja::context;

use blogly_core::domain::{NewPost, PostChanges, Tag};

use super::forms::PostForm;
use super::redirect;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::render;

/// GET /users/{user_id}/posts/new
pub async fn new_post_form(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user", user_id))?;
    let tags = state.tags.find_all().await?;
    let full_name = user.full_name();

    render(&state, &req, "posts/new.html", context! { user, full_name, tags })
}

/// POST /users/{user_id}/posts/new
pub async fn add_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<Vec<(String, String)>>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user", user_id))?;
    let form = PostForm::from_pairs(form.into_inner())?;
    let post = NewPost::new(user_id, form.title, form.content, form.tag_ids)?;
    state.posts.create(post).await?;

    Ok(redirect(&format!("/users/{}", user_id)))
}

/// GET /posts/{post_id}
pub async fn post_page(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::not_found("post", post_id))?;
    let author = state
        .users
        .find_by_id(post.user_id)
        .await?
        .map(|user| context! { id => user.id, full_name => user.full_name() });
    let tags: Vec<Tag> = state
        .posts
        .tags_for_post(post_id)
        .await?
        .into_iter()
        .map(|tagging| tagging.tag)
        .collect();

    render(&state, &req, "posts/show.html", context! { post, author, tags })
}

/// GET /posts/{post_id}/edit - tags split into the post's current ones and the rest.
pub async fn edit_post(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::not_found("post", post_id))?;

    let current: Vec<i32> = state
        .posts
        .tags_for_post(post_id)
        .await?
        .iter()
        .map(|tagging| tagging.tag.id)
        .collect();
    let (tagged, untagged): (Vec<Tag>, Vec<Tag>) = state
        .tags
        .find_all()
        .await?
        .into_iter()
        .partition(|tag| current.contains(&tag.id));

    render(
        &state,
        &req,
        "posts/edit.html",
        context! { post, tagged, untagged },
    )
}

/// POST /posts/{post_id}/edit - replaces the whole tag set with the checked tags.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<Vec<(String, String)>>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let form = PostForm::from_pairs(form.into_inner())?;
    let changes = PostChanges::new(form.title, form.content, form.tag_ids);
    state.posts.update(post_id, changes).await?;

    Ok(redirect(&format!("/posts/{}", post_id)))
}

/// POST /posts/{post_id}/delete
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::not_found("post", post_id))?;
    state.posts.delete(post_id).await?;

    Ok(redirect(&format!("/users/{}", post.user_id)))
}
