use askama::Template;
use axum::extract::{Multipart, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use crate::db::{users, StoreError};
use crate::error::{AppError, AppResult};
use crate::extractors::CurrentUser;
use crate::routes::avatar_url;
use crate::routes::home::Html;
use crate::state::AppState;
use crate::storage::avatars;

pub fn router() -> Router<AppState> {
    Router::new().route("/account", get(account_page).post(account_submit))
}

#[derive(Template)]
#[template(path = "pages/account.html")]
struct AccountTemplate {
    nav_user: Option<String>,
    username: String,
    email: String,
    avatar: String,
    score: i64,
    errors: Vec<String>,
    updated: bool,
}

#[derive(Deserialize)]
struct AccountQuery {
    updated: Option<String>,
}

/// GET /account — current values pre-filled
async fn account_page(user: CurrentUser, Query(query): Query<AccountQuery>) -> AppResult<Response> {
    Ok(Html(AccountTemplate {
        nav_user: Some(user.username.clone()),
        username: user.username,
        email: user.email,
        avatar: avatar_url(&user.image_file),
        score: user.score,
        errors: Vec::new(),
        updated: query.updated.is_some(),
    })
    .into_response())
}

/// POST /account — multipart form: username, email, optional picture
async fn account_submit(
    State(state): State<AppState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut username = user.username.clone();
    let mut email = user.email.clone();
    let mut picture: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid form data: {}", e)))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("username") => {
                username = field
                    .text()
                    .await
                    .map_err(|_| AppError::BadRequest("Invalid username field".into()))?;
            }
            Some("email") => {
                email = field
                    .text()
                    .await
                    .map_err(|_| AppError::BadRequest("Invalid email field".into()))?;
            }
            Some("picture") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::BadRequest("Invalid picture upload".into()))?;
                // No file chosen still submits an empty part
                if !filename.is_empty() && !bytes.is_empty() {
                    picture = Some((filename, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    let mut errors = Vec::new();
    let mut image_file = None;

    if let Some((filename, bytes)) = picture {
        match avatars::save_avatar(state.config.uploads_path(), &filename, &bytes) {
            Ok(stored) => image_file = Some(stored),
            Err(e) => errors.push(e.to_string()),
        }
    }

    if errors.is_empty() {
        match users::update_profile(
            &state.db,
            &user.id,
            username.trim(),
            email.trim(),
            image_file.as_deref(),
        ) {
            Ok(()) => return Ok(Redirect::to("/account?updated=1").into_response()),
            Err(StoreError::DuplicateUsername) => {
                errors.push(StoreError::DuplicateUsername.to_string())
            }
            Err(StoreError::DuplicateEmail) => {
                errors.push(StoreError::DuplicateEmail.to_string())
            }
            Err(other) => return Err(other.into()),
        }
    }

    Ok(Html(AccountTemplate {
        nav_user: Some(user.username),
        username,
        email,
        avatar: avatar_url(image_file.as_deref().unwrap_or(&user.image_file)),
        score: user.score,
        errors,
        updated: false,
    })
    .into_response())
}
