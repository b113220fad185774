//! Expense analyzer: prompt-augmented model calls behind key rotation and retry.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{RelayError, Result};
use crate::keys::ApiKeyPool;
use crate::model::{GenerateRequest, GenerativeModel, ResponseFormat};
use crate::prompts::{CATEGORIZE_SYSTEM_PROMPT, INSIGHTS_SYSTEM_PROMPT};
use crate::retry::RetryPolicy;
use crate::types::{InsightsReport, MonthData, TransactionAnalysis};

const CATEGORIZE_CONTEXT: &str = "Error processing the transaction";
const INSIGHTS_CONTEXT: &str = "Error generating insights";

pub struct ExpenseAnalyzer {
    model: Arc<dyn GenerativeModel>,
    keys: ApiKeyPool,
    retry: RetryPolicy,
}

impl ExpenseAnalyzer {
    pub fn new(model: Arc<dyn GenerativeModel>, keys: ApiKeyPool, retry: RetryPolicy) -> Self {
        Self { model, keys, retry }
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Classify one free-text bank message.
    pub async fn categorize(&self, description: &str) -> Result<TransactionAnalysis> {
        let request = GenerateRequest {
            system_prompt: CATEGORIZE_SYSTEM_PROMPT,
            parts: vec![description.to_string()],
            format: ResponseFormat::Schema(TransactionAnalysis::response_schema()),
        };
        let analysis: TransactionAnalysis = self.call(&request, CATEGORIZE_CONTEXT).await?;

        if analysis.known_category().is_none() {
            debug!(category = %analysis.category, "model returned an unlisted category");
        }
        info!(
            category = %analysis.category,
            merchant = %analysis.merchant,
            transaction = analysis.transaction,
            "categorized transaction"
        );
        Ok(analysis)
    }

    /// Summarize several months of category spend and suggest savings.
    pub async fn insights(&self, months: &[MonthData]) -> Result<InsightsReport> {
        let payload = serde_json::to_string(months).map_err(|e| RelayError::InvalidOutput {
            context: INSIGHTS_CONTEXT,
            message: e.to_string(),
        })?;
        let request = GenerateRequest {
            system_prompt: INSIGHTS_SYSTEM_PROMPT,
            parts: vec![payload],
            format: ResponseFormat::Json,
        };
        let report: InsightsReport = self.call(&request, INSIGHTS_CONTEXT).await?;

        info!(
            months = months.len(),
            suggestions = report.suggestions.len(),
            "generated insights"
        );
        Ok(report)
    }

    /// Every attempt, retries included, takes the next key from the pool.
    async fn call<T: DeserializeOwned>(&self, request: &GenerateRequest, context: &'static str) -> Result<T> {
        let text = self
            .retry
            .run(context, || async {
                let key = self.keys.next_key();
                self.model.generate(key, request).await
            })
            .await?;

        serde_json::from_str(text.trim()).map_err(|e| RelayError::InvalidOutput {
            context,
            message: format!("response did not match the expected shape: {e}"),
        })
    }
}
