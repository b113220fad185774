//! spendlens-ingest: bank statement PDF scraping into normalized transaction tables.

pub mod normalize;
pub mod parsers;
pub mod pdf;
pub mod types;
pub mod validate;

pub use normalize::{convert_to_csv, normalize, ConvertOutcome, NormalizeError};
pub use parsers::{extract_page, extract_statement};
pub use pdf::{extract_pdf, load_pages};
pub use types::{
    ExtractionMethod, ExtractionReport, NormalizedRecord, PageSummary, StatementPage,
    TransactionRecord, STATEMENT_HEADERS,
};
pub use validate::{is_amount, is_date};
