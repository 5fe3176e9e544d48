use askama::Template;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::error::AppResult;
use crate::extractors::CurrentUser;
use crate::routes::home::Html;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lessons/paying-bills", get(paying_bills))
        .route("/lessons/child-education-savings", get(child_education_savings))
}

#[derive(Template)]
#[template(path = "pages/lesson_paying_bills.html")]
struct PayingBillsTemplate {
    nav_user: Option<String>,
}

#[derive(Template)]
#[template(path = "pages/lesson_child_savings.html")]
struct ChildSavingsTemplate {
    nav_user: Option<String>,
    score: i64,
}

/// GET /lessons/paying-bills
async fn paying_bills(user: CurrentUser) -> AppResult<Response> {
    Ok(Html(PayingBillsTemplate {
        nav_user: Some(user.username),
    })
    .into_response())
}

/// GET /lessons/child-education-savings — shows the user's quiz score
async fn child_education_savings(user: CurrentUser) -> AppResult<Response> {
    Ok(Html(ChildSavingsTemplate {
        nav_user: Some(user.username),
        score: user.score,
    })
    .into_response())
}
