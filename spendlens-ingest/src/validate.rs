//! Field predicates used to decide whether a scraped row is a real transaction.

use regex::Regex;
use std::sync::OnceLock;

use crate::types::TransactionRecord;

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}/\d{2}/\d{4}").expect("date regex"))
}

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?\d{1,3}(,\d{3})*(\.\d{2})?$").expect("amount regex"))
}

fn is_placeholder(text: &str) -> bool {
    text.is_empty() || text == "-"
}

/// `DD/MM/YYYY` at the start of the string. Day and month are not range-checked.
pub fn is_date(text: &str) -> bool {
    !is_placeholder(text) && date_re().is_match(text)
}

/// Signed amount with an optional two-digit fraction. Commas are removed
/// before matching.
pub fn is_amount(text: &str) -> bool {
    !is_placeholder(text) && amount_re().is_match(&text.replace(',', ""))
}

/// A record is kept when its transaction date and balance look right.
pub fn is_retainable(record: &TransactionRecord) -> bool {
    is_date(&record.transaction_date) && is_amount(&record.balance)
}
