use askama::Template;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extractors::CurrentUser;
use crate::routes::home::Html;
use crate::scoring::{self, QuizSubmission, Tier};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/quiz", get(quiz_page).post(quiz_submit))
}

pub struct OutcomeView {
    pub correct_count: u32,
    pub total: u32,
    pub new_score: i64,
    pub success: bool,
}

#[derive(Template)]
#[template(path = "pages/quiz.html")]
struct QuizTemplate {
    nav_user: Option<String>,
    outcome: Option<OutcomeView>,
    error: Option<String>,
}

/// Radio groups arrive only for the options the user picked, so both are
/// optional at the wire level. A missing answer is a validation failure and
/// must not touch the score.
#[derive(Deserialize)]
struct QuizForm {
    q1: Option<String>,
    q2: Option<String>,
}

/// GET /quiz — present the questions
async fn quiz_page(user: CurrentUser) -> AppResult<Response> {
    Ok(Html(QuizTemplate {
        nav_user: Some(user.username),
        outcome: None,
        error: None,
    })
    .into_response())
}

/// POST /quiz — grade and commit
async fn quiz_submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<QuizForm>,
) -> AppResult<Response> {
    let (q1, q2) = match (form.q1, form.q2) {
        (Some(q1), Some(q2)) if !q1.is_empty() && !q2.is_empty() => (q1, q2),
        _ => {
            return Ok(Html(QuizTemplate {
                nav_user: Some(user.username),
                outcome: None,
                error: Some("Please answer both questions".to_string()),
            })
            .into_response());
        }
    };

    let outcome = scoring::submit(&state.db, &user.id, &QuizSubmission { q1, q2 })?;

    Ok(Html(QuizTemplate {
        nav_user: Some(user.username),
        outcome: Some(OutcomeView {
            correct_count: outcome.correct_count,
            total: outcome.total,
            new_score: outcome.new_score,
            success: outcome.tier == Tier::Success,
        }),
        error: None,
    })
    .into_response())
}
