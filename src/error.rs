use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};

use crate::db::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Forbidden")]
    Forbidden,

    /// Action requires a logged-in user. Carries the path the anonymous
    /// request was for, so login can send the user back afterwards.
    #[error("Authentication required")]
    Unauthenticated { next: Option<String> },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn unauthenticated() -> Self {
        AppError::Unauthenticated { next: None }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound,
            dup @ (StoreError::DuplicateUsername | StoreError::DuplicateEmail) => {
                AppError::BadRequest(dup.to_string())
            }
            StoreError::Sql(e) => AppError::Database(e),
            StoreError::Pool(e) => AppError::Pool(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "You do not have permission to do that",
            )
                .into_response(),
            AppError::Unauthenticated { next } => {
                // Only follow local absolute paths back out of the login page
                let target = match next {
                    Some(path) if path.starts_with('/') && !path.starts_with("//") => {
                        format!("/login?next={}", path)
                    }
                    _ => "/login".to_string(),
                };
                Redirect::to(&target).into_response()
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone()).into_response()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            AppError::Pool(e) => {
                tracing::error!("Pool error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn response_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn not_found_returns_404() {
        assert_eq!(response_status(AppError::NotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn forbidden_returns_403() {
        assert_eq!(response_status(AppError::Forbidden), StatusCode::FORBIDDEN);
    }

    #[test]
    fn unauthenticated_redirects_to_login() {
        let response = AppError::unauthenticated().into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/login");
    }

    #[test]
    fn unauthenticated_carries_next_path() {
        let response = AppError::Unauthenticated {
            next: Some("/quiz".to_string()),
        }
        .into_response();
        assert_eq!(response.headers()["location"], "/login?next=/quiz");
    }

    #[test]
    fn unauthenticated_rejects_offsite_next() {
        let response = AppError::Unauthenticated {
            next: Some("//evil.example".to_string()),
        }
        .into_response();
        assert_eq!(response.headers()["location"], "/login");
    }

    #[test]
    fn bad_request_returns_400() {
        assert_eq!(
            response_status(AppError::BadRequest("oops".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn internal_returns_500() {
        assert_eq!(
            response_status(AppError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
