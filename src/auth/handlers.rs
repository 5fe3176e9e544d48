use askama::Template;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;

use crate::auth::accounts::{self, LoginError, RegisterError};
use crate::auth::session;
use crate::error::AppResult;
use crate::extractors::{get_cookie_value, MaybeUser};
use crate::routes::home::Html;
use crate::state::AppState;

// -- Templates --

#[derive(Template)]
#[template(path = "pages/register.html")]
pub struct RegisterTemplate {
    pub nav_user: Option<String>,
    pub errors: Vec<String>,
    pub username: String,
    pub email: String,
}

#[derive(Template)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate {
    pub nav_user: Option<String>,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub email: String,
    pub next: String,
}

// -- Request types --

#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// Checkbox: present ("on") when ticked, absent otherwise.
    pub remember: Option<String>,
    pub next: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
    pub registered: Option<String>,
}

// -- Cookie helpers --

fn session_cookie(name: &str, token: &str, max_age_hours: u64) -> String {
    let max_age_secs = max_age_hours * 3600;
    format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        name, token, max_age_secs
    )
}

fn clear_session_cookie(name: &str) -> String {
    format!("{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0", name)
}

/// A `next` target is only followed when it is a local absolute path.
fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//"))
}

// -- Registration --

/// GET /register — already-authenticated users go home
pub async fn register_page(maybe_user: MaybeUser) -> AppResult<Response> {
    if maybe_user.0.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    Ok(Html(RegisterTemplate {
        nav_user: None,
        errors: Vec::new(),
        username: String::new(),
        email: String::new(),
    })
    .into_response())
}

/// POST /register — create the account, then send the user to login
pub async fn register_submit(
    State(state): State<AppState>,
    maybe_user: MaybeUser,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    if maybe_user.0.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    match accounts::register(
        &state.db,
        &form.username,
        &form.email,
        &form.password,
        &form.confirm_password,
    ) {
        Ok(user_id) => {
            tracing::info!("New account registered: {}", user_id);
            Ok(Redirect::to("/login?registered=1").into_response())
        }
        Err(err) => {
            let errors = match err {
                RegisterError::Validation(errors) => errors,
                dup @ (RegisterError::DuplicateUsername | RegisterError::DuplicateEmail) => {
                    vec![dup.to_string()]
                }
                other => return Err(crate::error::AppError::Internal(other.to_string())),
            };
            Ok(Html(RegisterTemplate {
                nav_user: None,
                errors,
                username: form.username,
                email: form.email,
            })
            .into_response())
        }
    }
}

// -- Login / logout --

/// GET /login
pub async fn login_page(
    maybe_user: MaybeUser,
    Query(query): Query<LoginQuery>,
) -> AppResult<Response> {
    if maybe_user.0.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let notice = query
        .registered
        .map(|_| "Your account has been created! You are now able to log in".to_string());

    Ok(Html(LoginTemplate {
        nav_user: None,
        error: None,
        notice,
        email: String::new(),
        next: safe_next(query.next.as_deref()).unwrap_or_default().to_string(),
    })
    .into_response())
}

/// POST /login — verify credentials and establish a session
pub async fn login_submit(
    State(state): State<AppState>,
    maybe_user: MaybeUser,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if maybe_user.0.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let user = match accounts::authenticate(&state.db, &form.email, &form.password) {
        Ok(user) => user,
        Err(LoginError::InvalidCredentials) => {
            return Ok(Html(LoginTemplate {
                nav_user: None,
                error: Some(LoginError::InvalidCredentials.to_string()),
                notice: None,
                email: form.email,
                next: safe_next(form.next.as_deref()).unwrap_or_default().to_string(),
            })
            .into_response());
        }
        Err(other) => return Err(crate::error::AppError::Internal(other.to_string())),
    };

    let hours = if form.remember.is_some() {
        state.config.auth.remember_hours
    } else {
        state.config.auth.session_hours
    };
    let token = session::create_session(&state.db, &user.id, hours)?;

    let target = safe_next(form.next.as_deref()).unwrap_or("/").to_string();

    Ok((
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, target),
            (
                header::SET_COOKIE,
                session_cookie(&state.config.auth.cookie_name, &token, hours),
            ),
        ],
        "",
    )
        .into_response())
}

/// POST /logout — delete the session and redirect home. Logging out while
/// already logged out is a no-op success.
pub async fn logout(
    State(state): State<AppState>,
    request: axum::http::Request<axum::body::Body>,
) -> AppResult<Response> {
    let (parts, _body) = request.into_parts();

    if let Some(token) = get_cookie_value(&parts, &state.config.auth.cookie_name) {
        let _ = session::delete_session(&state.db, token);
    }

    Ok((
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, "/".to_string()),
            (
                header::SET_COOKIE,
                clear_session_cookie(&state.config.auth.cookie_name),
            ),
        ],
        "",
    )
        .into_response())
}
