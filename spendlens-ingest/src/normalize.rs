//! Typed conversion of scraped records and CSV output.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info};

use crate::types::{NormalizedRecord, TransactionRecord, STATEMENT_HEADERS};

const DATE_FORMAT: &str = "%d/%m/%Y";

/// A numeric column that could not be coerced. Aborts the whole conversion.
#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("row {serial}: {column} is not a number: {value:?}")]
    InvalidAmount {
        serial: String,
        column: &'static str,
        value: String,
    },
}

/// Result of [`convert_to_csv`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertOutcome {
    Written { rows: usize },
    /// No records; no file was created
    Empty,
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

fn parse_amount(
    serial: &str,
    column: &'static str,
    value: &str,
    empty_default: Option<f64>,
) -> Result<f64, NormalizeError> {
    let raw = match (value.is_empty(), empty_default) {
        (true, Some(default)) => return Ok(default),
        _ => value.replace(',', ""),
    };
    raw.trim().parse::<f64>().map_err(|_| NormalizeError::InvalidAmount {
        serial: serial.to_string(),
        column,
        value: value.to_string(),
    })
}

/// Dates that do not parse become `None`; empty withdrawal and deposit cells
/// become `0.0`. The balance has no default.
pub fn normalize_record(record: &TransactionRecord) -> Result<NormalizedRecord, NormalizeError> {
    let serial = &record.serial;
    Ok(NormalizedRecord {
        serial: record.serial.clone(),
        value_date: parse_date(&record.value_date),
        transaction_date: parse_date(&record.transaction_date),
        cheque_number: record.cheque_number.clone(),
        remarks: record.remarks.clone(),
        withdrawal: parse_amount(serial, STATEMENT_HEADERS[5], &record.withdrawal, Some(0.0))?,
        deposit: parse_amount(serial, STATEMENT_HEADERS[6], &record.deposit, Some(0.0))?,
        balance: parse_amount(serial, STATEMENT_HEADERS[7], &record.balance, None)?,
    })
}

pub fn normalize(records: &[TransactionRecord]) -> Result<Vec<NormalizedRecord>, NormalizeError> {
    records.iter().map(normalize_record).collect()
}

fn format_amount(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}

fn format_date(d: Option<NaiveDate>) -> String {
    d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Write normalized rows under the fixed eight-column header.
pub fn write_csv<W: Write>(writer: W, rows: &[NormalizedRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(STATEMENT_HEADERS)?;
    for row in rows {
        wtr.write_record([
            row.serial.clone(),
            format_date(row.value_date),
            format_date(row.transaction_date),
            row.cheque_number.clone(),
            row.remarks.clone(),
            format_amount(row.withdrawal),
            format_amount(row.deposit),
            format_amount(row.balance),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Normalize `records` and save them to `output`.
///
/// Nothing is written when `records` is empty or when any row fails to
/// normalize.
pub fn convert_to_csv(records: &[TransactionRecord], output: impl AsRef<Path>) -> Result<ConvertOutcome> {
    let output = output.as_ref();
    if records.is_empty() {
        error!("no transactions to save to CSV");
        return Ok(ConvertOutcome::Empty);
    }

    let rows = normalize(records)?;
    let file = std::fs::File::create(output)
        .with_context(|| format!("creating {}", output.display()))?;
    write_csv(file, &rows).with_context(|| format!("writing {}", output.display()))?;

    info!(path = %output.display(), rows = rows.len(), "CSV file saved");
    Ok(ConvertOutcome::Written { rows: rows.len() })
}
