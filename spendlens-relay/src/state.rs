//! Shared application state

use std::sync::Arc;

use crate::analyzer::ExpenseAnalyzer;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<ExpenseAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: ExpenseAnalyzer) -> Self {
        Self {
            inner: Arc::new(analyzer),
        }
    }

    pub fn analyzer(&self) -> &ExpenseAnalyzer {
        &self.inner
    }
}
