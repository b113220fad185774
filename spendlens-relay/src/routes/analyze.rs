//! Classification endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use crate::error::{RelayError, Result};
use crate::state::AppState;
use crate::types::{InsightsReport, MonthData, TransactionAnalysis, TransactionRequest};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze_transaction))
        .route("/analyze_insights", post(analyze_insights))
}

impl From<JsonRejection> for RelayError {
    fn from(rejection: JsonRejection) -> Self {
        RelayError::BadRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Classify a single transaction message
async fn analyze_transaction(
    State(state): State<AppState>,
    body: std::result::Result<Json<TransactionRequest>, JsonRejection>,
) -> Result<Json<TransactionAnalysis>> {
    let Json(request) = body?;
    let analysis = state.analyzer().categorize(&request.description).await?;
    Ok(Json(analysis))
}

/// Narrative summary and saving suggestions over several months
async fn analyze_insights(
    State(state): State<AppState>,
    body: std::result::Result<Json<Vec<MonthData>>, JsonRejection>,
) -> Result<Json<InsightsReport>> {
    let Json(months) = body?;
    let report = state.analyzer().insights(&months).await?;
    Ok(Json(report))
}
