use askama::Template;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::db::posts;
use crate::error::AppResult;
use crate::extractors::MaybeUser;
use crate::routes::{avatar_url, display_date};
use crate::state::AppState;

/// Wrapper to render askama templates as axum responses
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Template render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

pub struct PostListItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub author_avatar: String,
    pub date: String,
}

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub nav_user: Option<String>,
    pub posts: Vec<PostListItem>,
}

#[derive(Template)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub nav_user: Option<String>,
}

/// GET / and /home — every post, newest first
pub async fn index(State(state): State<AppState>, maybe_user: MaybeUser) -> AppResult<Response> {
    let posts = posts::list_posts(&state.db)?
        .into_iter()
        .map(|p| PostListItem {
            id: p.post.id,
            title: p.post.title,
            content: p.post.content,
            author: p.author_username,
            author_avatar: avatar_url(&p.author_image),
            date: display_date(&p.post.created_at),
        })
        .collect();

    Ok(Html(HomeTemplate {
        nav_user: maybe_user.0.map(|u| u.username),
        posts,
    })
    .into_response())
}

/// GET /about
pub async fn about(maybe_user: MaybeUser) -> AppResult<Response> {
    Ok(Html(AboutTemplate {
        nav_user: maybe_user.0.map(|u| u.username),
    })
    .into_response())
}
