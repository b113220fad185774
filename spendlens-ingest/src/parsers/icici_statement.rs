//! ICICI-style savings account statement parser.
//!
//! Statement table columns:
//!   S No. | Value Date | Transaction Date | Cheque Number | Transaction Remarks |
//!   Withdrawal Amount (INR) | Deposit Amount (INR) | Balance (INR)
//!
//! Pages with detected tables are read row by row. Pages without tables fall
//! back to the plain text, where each cell sits on its own line and a line
//! holding only the serial number starts the next transaction:
//!   1
//!   01/04/2024
//!   01/04/2024
//!   -
//!   UPI/ZOMATO/ORDER
//!   425.50
//!   0.00
//!   574.50

use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::types::{
    Cell, ExtractionMethod, ExtractionReport, PageSummary, StatementPage, Table,
    TransactionRecord, STATEMENT_HEADERS,
};
use crate::validate::is_retainable;

const COLUMN_COUNT: usize = STATEMENT_HEADERS.len();
const REMARKS_COLUMN: usize = 4;

fn serial_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\s*$").expect("serial regex"))
}

/// Records pulled out of a single page, plus how many candidates were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct PageExtraction {
    pub method: ExtractionMethod,
    pub records: Vec<TransactionRecord>,
    pub skipped: usize,
}

/// Run every page through [`extract_page`], keeping records in page order.
pub fn extract_statement<'a>(pages: impl IntoIterator<Item = &'a StatementPage>) -> ExtractionReport {
    let mut report = ExtractionReport::default();

    for page in pages {
        info!(page = page.number, "processing page");
        let extraction = extract_page(page);
        report.pages.push(PageSummary {
            page: page.number,
            method: extraction.method,
            accepted: extraction.records.len(),
            skipped: extraction.skipped,
        });
        report.records.extend(extraction.records);
    }

    info!(count = report.records.len(), "extracted transactions");
    report
}

/// Tables first; the text fallback only runs when the page has no tables.
pub fn extract_page(page: &StatementPage) -> PageExtraction {
    if !page.tables.is_empty() {
        info!(page = page.number, tables = page.tables.len(), "found tables");
        let mut out = PageExtraction {
            method: ExtractionMethod::Table,
            records: Vec::new(),
            skipped: 0,
        };
        for table in &page.tables {
            collect_table_rows(page.number, table, &mut out);
        }
        return out;
    }

    info!(page = page.number, "no tables found, falling back to text parsing");
    match page.text.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(text) => parse_text_groups(page.number, text),
        None => {
            warn!(page = page.number, "no text extracted");
            PageExtraction {
                method: ExtractionMethod::Empty,
                records: Vec::new(),
                skipped: 0,
            }
        }
    }
}

fn is_header_row(row: &[Cell]) -> bool {
    row.iter()
        .flatten()
        .any(|cell| STATEMENT_HEADERS.contains(&cell.as_str()))
}

fn collect_table_rows(page: u32, table: &Table, out: &mut PageExtraction) {
    let rows = match table.first() {
        Some(first) if is_header_row(first) => &table[1..],
        _ => &table[..],
    };

    for row in rows {
        let Some(record) = record_from_table_row(row) else {
            warn!(page, ?row, "skipping incomplete row");
            out.skipped += 1;
            continue;
        };
        if is_retainable(&record) {
            out.records.push(record);
        } else {
            warn!(page, ?row, "skipping invalid row");
            out.skipped += 1;
        }
    }
}

/// Needs at least eight cells, none absent. Extra trailing cells are ignored.
fn record_from_table_row(row: &[Cell]) -> Option<TransactionRecord> {
    if row.len() < COLUMN_COUNT {
        return None;
    }
    let cells: Vec<&str> = row
        .iter()
        .map(|c| c.as_deref())
        .collect::<Option<Vec<_>>>()?;

    Some(TransactionRecord {
        serial: cells[0].trim().to_string(),
        value_date: cells[1].trim().to_string(),
        transaction_date: cells[2].trim().to_string(),
        cheque_number: cells[3].trim().to_string(),
        remarks: collapse_whitespace(cells[REMARKS_COLUMN]),
        withdrawal: cells[5].trim().to_string(),
        deposit: cells[6].trim().to_string(),
        balance: cells[7].trim().to_string(),
    })
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_text_groups(page: u32, text: &str) -> PageExtraction {
    let mut out = PageExtraction {
        method: ExtractionMethod::Text,
        records: Vec::new(),
        skipped: 0,
    };
    let mut group: Option<Vec<String>> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if serial_line_re().is_match(line) {
            if let Some(done) = group.take() {
                close_group(page, done, &mut out);
            }
            group = Some(vec![line.to_string()]);
        } else if let Some(lines) = group.as_mut() {
            lines.push(line.to_string());
        } else {
            debug!(page, line, "ignoring line before first serial number");
        }
    }

    if let Some(done) = group {
        close_group(page, done, &mut out);
    }

    out
}

fn close_group(page: u32, lines: Vec<String>, out: &mut PageExtraction) {
    let Some(record) = record_from_text_group(&lines) else {
        debug!(page, lines = lines.len(), "dropping short text group");
        out.skipped += 1;
        return;
    };
    if is_retainable(&record) {
        out.records.push(record);
    } else {
        warn!(page, ?lines, "skipping invalid text transaction");
        out.skipped += 1;
    }
}

/// Positional assignment: four leading cells, remarks in the middle, three
/// amounts at the end.
fn record_from_text_group(lines: &[String]) -> Option<TransactionRecord> {
    if lines.len() < COLUMN_COUNT {
        return None;
    }
    let n = lines.len();

    Some(TransactionRecord {
        serial: lines[0].clone(),
        value_date: lines[1].clone(),
        transaction_date: lines[2].clone(),
        cheque_number: lines[3].clone(),
        remarks: lines[REMARKS_COLUMN..n - 3].join(" "),
        withdrawal: lines[n - 3].clone(),
        deposit: lines[n - 2].clone(),
        balance: lines[n - 1].clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    fn header() -> Vec<Cell> {
        cells(&STATEMENT_HEADERS)
    }

    fn table_page(tables: Vec<Table>) -> StatementPage {
        StatementPage {
            number: 1,
            tables,
            text: Some("should be ignored".into()),
        }
    }

    fn text_page(text: &str) -> StatementPage {
        StatementPage {
            number: 2,
            tables: Vec::new(),
            text: Some(text.to_string()),
        }
    }

    #[test]
    fn test_table_rows_are_trimmed_and_header_dropped() {
        let page = table_page(vec![vec![
            header(),
            cells(&[
                " 1 ",
                "01/04/2024",
                " 01/04/2024 ",
                "-",
                "UPI/ZOMATO\n  ORDER   123",
                "425.50",
                "",
                " 574.50 ",
            ]),
        ]]);

        let out = extract_page(&page);
        assert_eq!(out.method, ExtractionMethod::Table);
        assert_eq!(out.records.len(), 1);
        let r = &out.records[0];
        assert_eq!(r.serial, "1");
        assert_eq!(r.transaction_date, "01/04/2024");
        assert_eq!(r.remarks, "UPI/ZOMATO ORDER 123");
        assert_eq!(r.deposit, "");
        assert_eq!(r.balance, "574.50");
    }

    #[test]
    fn test_table_header_match_is_exact() {
        let padded = cells(&[" S No. ", "x", "x", "x", "x", "x", "x", "x"]);
        let row = cells(&["7", "02/04/2024", "02/04/2024", "-", "NEFT", "", "100.00", "674.50"]);
        let out = extract_page(&table_page(vec![vec![padded, row]]));
        // the padded label is not a header, so it is read as a data row and fails validation
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.skipped, 1);
    }

    #[test]
    fn test_table_first_row_kept_when_not_a_header() {
        let row = cells(&["7", "02/04/2024", "02/04/2024", "-", "NEFT", "", "100.00", "674.50"]);
        let page = table_page(vec![vec![row.clone(), row]]);
        assert_eq!(extract_page(&page).records.len(), 2);
    }

    #[test]
    fn test_table_rows_short_or_with_absent_cells_are_skipped() {
        let mut absent = cells(&["2", "02/04/2024", "02/04/2024", "-", "ATM", "100.00", "", "474.50"]);
        absent[3] = None;
        let short = cells(&["3", "02/04/2024", "02/04/2024", "-", "ATM", "100.00", "374.50"]);
        let page = table_page(vec![vec![header(), absent, short]]);

        let out = extract_page(&page);
        assert!(out.records.is_empty());
        assert_eq!(out.skipped, 2);
    }

    #[test]
    fn test_table_rows_failing_validation_are_skipped() {
        let bad_date = cells(&["1", "01/04/2024", "2024-04-01", "-", "X", "", "", "1.00"]);
        let bad_balance = cells(&["2", "01/04/2024", "01/04/2024", "-", "X", "", "", "Balance"]);
        let page = table_page(vec![vec![bad_date, bad_balance]]);

        let out = extract_page(&page);
        assert!(out.records.is_empty());
        assert_eq!(out.skipped, 2);
    }

    #[test]
    fn test_text_fallback_assigns_fields_positionally() {
        let text = "Statement of account\n\
                    1\n01/04/2024\n01/04/2024\n-\nUPI/ZOMATO/\nORDER 123\n425.50\n\n574.50\n\
                    2 \n03/04/2024\n03/04/2024\n-\nSALARY\n\n\n500.00\n";
        // group 2 has only six non-empty lines
        let out = extract_page(&text_page(text));

        assert_eq!(out.method, ExtractionMethod::Text);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.skipped, 1);

        let r = &out.records[0];
        assert_eq!(r.serial, "1");
        assert_eq!(r.value_date, "01/04/2024");
        assert_eq!(r.cheque_number, "-");
        assert_eq!(r.remarks, "UPI/ZOMATO/");
        assert_eq!(r.withdrawal, "ORDER 123");
        assert_eq!(r.deposit, "425.50");
        assert_eq!(r.balance, "574.50");
    }

    #[test]
    fn test_text_group_with_eight_lines_closes_at_end_of_page() {
        let text = "1\n01/04/2024\n02/04/2024\n-\nPOS/AMAZON\nPAY\n1,299.00\n0.00\n";
        // last line "0.00" is the balance; deposit "1,299.00"; withdrawal "PAY"
        let out = extract_page(&text_page(text));
        assert_eq!(out.records.len(), 1);
        let r = &out.records[0];
        assert_eq!(r.transaction_date, "02/04/2024");
        assert_eq!(r.remarks, "POS/AMAZON");
        assert_eq!(r.balance, "0.00");
    }

    #[test]
    fn test_text_group_with_seven_lines_is_never_kept() {
        let text = "1\n01/04/2024\n01/04/2024\n-\nREMARK\n10.00\n20.00";
        let out = extract_page(&text_page(text));
        assert!(out.records.is_empty());
        assert_eq!(out.skipped, 1);
    }

    #[test]
    fn test_page_without_tables_or_text_is_empty() {
        let page = StatementPage {
            number: 3,
            tables: Vec::new(),
            text: None,
        };
        let out = extract_page(&page);
        assert_eq!(out.method, ExtractionMethod::Empty);
        assert!(out.records.is_empty());
    }

    #[test]
    fn test_extract_statement_keeps_page_order() {
        let first = table_page(vec![vec![cells(&[
            "1", "01/04/2024", "01/04/2024", "-", "A", "1.00", "", "9.00",
        ])]]);
        let second = text_page("2\n02/04/2024\n02/04/2024\n-\nB\n\n2.00\n0.00\n11.00");

        let report = extract_statement([&first, &second]);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].serial, "1");
        assert_eq!(report.records[1].serial, "2");
        assert_eq!(report.pages.len(), 2);
        assert_eq!(report.pages[1].method, ExtractionMethod::Text);
    }
}
