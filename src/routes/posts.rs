use askama::Template;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::auth::ownership;
use crate::db::posts;
use crate::error::AppResult;
use crate::extractors::{CurrentUser, MaybeUser};
use crate::routes::home::Html;
use crate::routes::{avatar_url, display_date};
use crate::state::AppState;

const MAX_TITLE_LEN: usize = 100;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/post/new", get(new_post_page).post(new_post_submit))
        .route("/post/{id}", get(show_post))
        .route("/post/{id}/edit", get(edit_post_page).post(edit_post_submit))
        .route("/post/{id}/delete", post(delete_post_submit))
        .route(
            "/post/{id}/comment",
            get(comment_page).post(comment_submit),
        )
}

// -- Templates --

#[derive(Template)]
#[template(path = "pages/post_form.html")]
struct PostFormTemplate {
    nav_user: Option<String>,
    legend: String,
    action: String,
    title: String,
    content: String,
    errors: Vec<String>,
}

pub struct CommentView {
    pub author: String,
    pub content: String,
    pub date: String,
}

#[derive(Template)]
#[template(path = "pages/post.html")]
struct PostTemplate {
    nav_user: Option<String>,
    id: String,
    title: String,
    content: String,
    author: String,
    author_avatar: String,
    date: String,
    is_owner: bool,
    comments: Vec<CommentView>,
}

#[derive(Template)]
#[template(path = "pages/comment_form.html")]
struct CommentFormTemplate {
    nav_user: Option<String>,
    post_id: String,
    post_title: String,
    content: String,
    errors: Vec<String>,
}

// -- Forms --

#[derive(Deserialize)]
struct PostForm {
    title: String,
    content: String,
}

#[derive(Deserialize)]
struct CommentForm {
    content: String,
}

fn validate_post(form: &PostForm) -> Vec<String> {
    let mut errors = Vec::new();
    if form.title.trim().is_empty() {
        errors.push("Title is required".to_string());
    } else if form.title.len() > MAX_TITLE_LEN {
        errors.push(format!("Title must be at most {} characters", MAX_TITLE_LEN));
    }
    if form.content.trim().is_empty() {
        errors.push("Content is required".to_string());
    }
    errors
}

// -- Handlers --

/// GET /post/new
async fn new_post_page(user: CurrentUser) -> AppResult<Response> {
    Ok(Html(PostFormTemplate {
        nav_user: Some(user.username),
        legend: "New Post".to_string(),
        action: "/post/new".to_string(),
        title: String::new(),
        content: String::new(),
        errors: Vec::new(),
    })
    .into_response())
}

/// POST /post/new
async fn new_post_submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<PostForm>,
) -> AppResult<Response> {
    let errors = validate_post(&form);
    if !errors.is_empty() {
        return Ok(Html(PostFormTemplate {
            nav_user: Some(user.username),
            legend: "New Post".to_string(),
            action: "/post/new".to_string(),
            title: form.title,
            content: form.content,
            errors,
        })
        .into_response());
    }

    let post_id = posts::create_post(&state.db, &user.id, form.title.trim(), &form.content)?;
    Ok(Redirect::to(&format!("/post/{}", post_id)).into_response())
}

/// GET /post/{id} — public, with comments in creation order
async fn show_post(
    State(state): State<AppState>,
    maybe_user: MaybeUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let post = posts::get_post(&state.db, &id)?;
    let author = crate::db::users::find_by_id(&state.db, &post.user_id)?
        .ok_or(crate::error::AppError::NotFound)?;

    let comments = posts::list_comments(&state.db, &id)?
        .into_iter()
        .map(|c| CommentView {
            author: c.author_username,
            content: c.comment.content,
            date: display_date(&c.comment.created_at),
        })
        .collect();

    let is_owner = maybe_user
        .0
        .as_ref()
        .is_some_and(|u| u.id == post.user_id);

    Ok(Html(PostTemplate {
        nav_user: maybe_user.0.map(|u| u.username),
        id: post.id,
        title: post.title,
        content: post.content,
        author: author.username,
        author_avatar: avatar_url(&author.image_file),
        date: display_date(&post.created_at),
        is_owner,
        comments,
    })
    .into_response())
}

/// GET /post/{id}/edit — owner only, form pre-filled
async fn edit_post_page(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let post = posts::get_post(&state.db, &id)?;
    ownership::require_owner(Some(&user.id), &post.user_id)?;

    Ok(Html(PostFormTemplate {
        nav_user: Some(user.username),
        legend: "Update Post".to_string(),
        action: format!("/post/{}/edit", post.id),
        title: post.title,
        content: post.content,
        errors: Vec::new(),
    })
    .into_response())
}

/// POST /post/{id}/edit
async fn edit_post_submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Form(form): Form<PostForm>,
) -> AppResult<Response> {
    let post = posts::get_post(&state.db, &id)?;
    ownership::require_owner(Some(&user.id), &post.user_id)?;

    let errors = validate_post(&form);
    if !errors.is_empty() {
        return Ok(Html(PostFormTemplate {
            nav_user: Some(user.username),
            legend: "Update Post".to_string(),
            action: format!("/post/{}/edit", post.id),
            title: form.title,
            content: form.content,
            errors,
        })
        .into_response());
    }

    posts::update_post(&state.db, &id, form.title.trim(), &form.content)?;
    Ok(Redirect::to(&format!("/post/{}", id)).into_response())
}

/// POST /post/{id}/delete — owner only; comments cascade away with the post
async fn delete_post_submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let post = posts::get_post(&state.db, &id)?;
    ownership::require_owner(Some(&user.id), &post.user_id)?;

    posts::delete_post(&state.db, &id)?;
    tracing::info!("Post {} deleted by {}", id, user.id);
    Ok(Redirect::to("/").into_response())
}

/// GET /post/{id}/comment — any authenticated user may comment
async fn comment_page(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let post = posts::get_post(&state.db, &id)?;

    Ok(Html(CommentFormTemplate {
        nav_user: Some(user.username),
        post_id: post.id,
        post_title: post.title,
        content: String::new(),
        errors: Vec::new(),
    })
    .into_response())
}

/// POST /post/{id}/comment
async fn comment_submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Form(form): Form<CommentForm>,
) -> AppResult<Response> {
    let post = posts::get_post(&state.db, &id)?;

    if form.content.trim().is_empty() {
        return Ok(Html(CommentFormTemplate {
            nav_user: Some(user.username),
            post_id: post.id,
            post_title: post.title,
            content: form.content,
            errors: vec!["Comment cannot be empty".to_string()],
        })
        .into_response());
    }

    posts::add_comment(&state.db, &id, &user.id, form.content.trim())?;
    Ok(Redirect::to(&format!("/post/{}", id)).into_response())
}
