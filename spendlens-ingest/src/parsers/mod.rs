//! Bank-specific statement parsers

pub mod icici_statement;

pub use icici_statement::{extract_page, extract_statement, PageExtraction};
