//! spendlens-relay: HTTP relay that classifies bank transaction messages and
//! summarizes monthly spending with a generative model.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod gemini;
pub mod keys;
pub mod model;
pub mod prompts;
pub mod retry;
pub mod routes;
pub mod state;
pub mod types;

use std::any::Any;
use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use analyzer::ExpenseAnalyzer;
pub use config::RelayConfig;
pub use error::{ModelError, RelayError};
pub use gemini::GeminiClient;
pub use keys::ApiKeyPool;
pub use model::{GenerateRequest, GenerativeModel, ResponseFormat};
pub use retry::RetryPolicy;
pub use state::AppState;
pub use types::{Category, InsightsReport, MonthData, TransactionAnalysis, TransactionRequest};

/// Build the analyzer from configuration, talking to Gemini.
pub fn analyzer_from_config(config: &RelayConfig) -> Result<ExpenseAnalyzer, RelayError> {
    let client = GeminiClient::new(config.gemini.model.clone()).with_base_url(config.gemini.base_url.clone());
    Ok(ExpenseAnalyzer::new(
        Arc::new(client),
        config.gemini.key_pool()?,
        config.retry,
    ))
}

/// Full router with tracing and the catch-all panic handler.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::analyze::router())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    RelayError::Internal(message).into_response()
}
