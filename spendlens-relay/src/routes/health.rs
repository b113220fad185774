//! Liveness probe

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "AI Expense Analyzer Agent is running.",
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(root))
}
