use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/feedback", post(handlers::submit_feedback))
        .route("/api/opinions/count", get(handlers::get_count))
        .with_state(state)
}
