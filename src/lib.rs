// Library exports for Florin
// This allows integration tests and external code to use Florin modules

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod scoring;
pub mod state;
pub mod storage;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router. Shared by the binary and the
/// integration tests so both serve the same routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home::index))
        .route("/home", get(routes::home::index))
        .route("/about", get(routes::home::about))
        .route("/assets/{*path}", get(routes::assets::serve))
        .merge(routes::auth::router())
        .merge(routes::account::router())
        .merge(routes::posts::router())
        .merge(routes::lessons::router())
        .merge(routes::quiz::router())
        .merge(routes::uploads::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
