//! Request and response contracts of the relay endpoints

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Spending categories the model may assign to a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Bills & Utilities")]
    BillsUtilities,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Food & Drinks")]
    FoodDrinks,
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Health & Fitness")]
    HealthFitness,
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Investments")]
    Investments,
    #[serde(rename = "Miscellaneous")]
    Miscellaneous,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Travel & Transport")]
    TravelTransport,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::BillsUtilities,
        Category::Education,
        Category::Entertainment,
        Category::FoodDrinks,
        Category::Groceries,
        Category::HealthFitness,
        Category::Income,
        Category::Investments,
        Category::Miscellaneous,
        Category::Shopping,
        Category::TravelTransport,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::BillsUtilities => "Bills & Utilities",
            Category::Education => "Education",
            Category::Entertainment => "Entertainment",
            Category::FoodDrinks => "Food & Drinks",
            Category::Groceries => "Groceries",
            Category::HealthFitness => "Health & Fitness",
            Category::Income => "Income",
            Category::Investments => "Investments",
            Category::Miscellaneous => "Miscellaneous",
            Category::Shopping => "Shopping",
            Category::TravelTransport => "Travel & Transport",
        }
    }

    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.label() == label)
    }
}

/// Body of `POST /analyze`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRequest {
    pub description: String,
}

/// Classification of one transaction message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionAnalysis {
    pub category: String,
    #[serde(rename = "Merchant", default = "no_merchant")]
    pub merchant: String,
    #[serde(rename = "Transaction")]
    pub transaction: bool,
}

fn no_merchant() -> String {
    "NONE".to_string()
}

impl TransactionAnalysis {
    /// `None` when the model picked a label outside [`Category::ALL`].
    pub fn known_category(&self) -> Option<Category> {
        Category::from_label(&self.category)
    }

    /// Minimal response schema for schema-constrained generation: no titles,
    /// descriptions or examples.
    pub fn response_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "category": { "type": "string" },
                "Merchant": { "type": "string" },
                "Transaction": { "type": "boolean" },
            },
            "required": ["category", "Merchant", "Transaction"],
        })
    }
}

/// Spend for one calendar month, broken down by category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthData {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub total_amount: f64,
    pub categories: BTreeMap<String, f64>,
}

/// Body of a successful `POST /analyze_insights`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightsReport {
    pub monthly_summary: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}
