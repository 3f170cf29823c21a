//! User pages.

use actix_web::{HttpRequest, HttpResponse, web};
use minijinja::context;

use blogly_core::domain::{NewUser, UserChanges};

use super::forms::UserForm;
use super::redirect;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::render;

/// GET /users
pub async fn list_users(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    let users: Vec<_> = state
        .users
        .find_all()
        .await?
        .iter()
        .map(|user| context! { id => user.id, full_name => user.full_name() })
        .collect();
    render(&state, &req, "users/list.html", context! { users })
}

/// GET /users/new
pub async fn new_user_form(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    render(&state, &req, "users/new.html", context! {})
}

/// POST /users/new
pub async fn add_user(
    state: web::Data<AppState>,
    form: web::Form<UserForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let user = NewUser::new(form.first_name, form.last_name, form.image_url)?;
    state.users.create(user).await?;

    Ok(redirect("/users"))
}

/// GET /users/{user_id}
pub async fn user_page(
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
    let posts = state.posts.find_by_user_id(user_id).await?;

    let full_name = user.full_name();
    render(&state, &req, "users/show.html", context! { user, full_name, posts })
}

/// GET /users/{user_id}/edit
pub async fn edit_user(
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

    render(&state, &req, "users/edit.html", context! { user })
}

/// POST /users/{user_id}/edit - blank fields keep their current value.
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: web::Form<UserForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let changes = UserChanges::new(form.first_name, form.last_name, form.image_url);
    state.users.update(path.into_inner(), changes).await?;

    Ok(redirect("/users"))
}

/// POST /users/{user_id}/delete - removes the user's posts as well.
pub async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    state.users.delete(path.into_inner()).await?;

    Ok(redirect("/users"))
}
