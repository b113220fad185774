use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Column labels of the statement table, in output order.
pub const STATEMENT_HEADERS: [&str; 8] = [
    "S No.",
    "Value Date",
    "Transaction Date",
    "Cheque Number",
    "Transaction Remarks",
    "Withdrawal Amount (INR)",
    "Deposit Amount (INR)",
    "Balance (INR)",
];

/// One statement row as scraped from the page, all cells still raw text.
///
/// Built for every candidate row during the page scan; only rows that pass
/// [`crate::validate::is_retainable`] are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub serial: String,
    pub value_date: String,
    pub transaction_date: String,
    pub cheque_number: String,
    pub remarks: String,
    pub withdrawal: String,
    pub deposit: String,
    pub balance: String,
}

/// A table cell as reported by the page source. `None` is an absent cell.
pub type Cell = Option<String>;

/// Rows of cells, first row possibly a header.
pub type Table = Vec<Vec<Cell>>;

/// One page of a statement document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementPage {
    /// 1-based page number
    pub number: u32,
    pub tables: Vec<Table>,
    pub text: Option<String>,
}

/// How a page's candidate rows were obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    Table,
    Text,
    /// Page had neither tables nor text
    Empty,
}

/// Per-page outcome, kept for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub page: u32,
    pub method: ExtractionMethod,
    pub accepted: usize,
    pub skipped: usize,
}

/// All retained records of a document, in page order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub records: Vec<TransactionRecord>,
    pub pages: Vec<PageSummary>,
}

impl ExtractionReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.pages.iter().map(|p| p.skipped).sum()
    }
}

/// Typed form of a [`TransactionRecord`], ready for tabular output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub serial: String,
    /// `None` when the source date did not parse
    pub value_date: Option<NaiveDate>,
    pub transaction_date: Option<NaiveDate>,
    pub cheque_number: String,
    pub remarks: String,
    pub withdrawal: f64,
    pub deposit: f64,
    pub balance: f64,
}
