//! PDF page source: loads a statement with lopdf and turns each page into a
//! [`StatementPage`] (plain text plus any tables found in it).

use anyhow::{Context, Result};
use lopdf::Document;
use regex::Regex;
use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{error, warn};

use crate::parsers::icici_statement::extract_statement;
use crate::types::{Cell, ExtractionReport, StatementPage, Table, STATEMENT_HEADERS};

/// Rows inside a table need at least this many cells.
const MIN_TABLE_COLUMNS: usize = 3;
/// Header lines name at least this many statement columns.
const MIN_HEADER_MATCHES: usize = 3;

/// A cell is a run of words separated by single spaces.
fn cell_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\s]+(?: [^\s]+)*").expect("cell regex"))
}

/// Load every page of the document, in page order.
pub fn load_pages(path: impl AsRef<Path>) -> Result<Vec<StatementPage>> {
    let path = path.as_ref();
    let doc = Document::load(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(pages_from_document(&doc))
}

/// Same as [`load_pages`] for an in-memory document.
pub fn load_pages_from_mem(bytes: &[u8]) -> Result<Vec<StatementPage>> {
    let doc = Document::load_mem(bytes).context("parsing PDF bytes")?;
    Ok(pages_from_document(&doc))
}

fn pages_from_document(doc: &Document) -> Vec<StatementPage> {
    doc.get_pages()
        .keys()
        .map(|&number| {
            let text = match doc.extract_text(&[number]) {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(page = number, "text extraction failed: {e}");
                    None
                }
            };
            let tables = text.as_deref().map(detect_tables).unwrap_or_default();
            StatementPage {
                number,
                tables,
                text,
            }
        })
        .collect()
}

/// Extract all retainable transactions from a statement PDF.
///
/// A document that cannot be opened or parsed yields an empty report; the
/// failure is logged, not returned.
pub fn extract_pdf(path: impl AsRef<Path>) -> ExtractionReport {
    match load_pages(path) {
        Ok(pages) => extract_statement(&pages),
        Err(e) => {
            error!("failed to process PDF: {e:#}");
            ExtractionReport::default()
        }
    }
}

/// Find statement tables in page text.
///
/// Cells are separated by tabs or runs of two or more spaces. A table starts
/// at an anchor line: either the statement header (enough cells equal to a
/// column label) or a line with a cell for every column. The anchor's cell
/// positions become the column layout. Following lines with at least
/// [`MIN_TABLE_COLUMNS`] cells belong to the table; any other line ends it.
///
/// A row with fewer cells than columns had blank cells collapsed into the
/// surrounding gaps. Its cells are placed under the column they overlap and
/// the remaining columns are filled with empty strings.
pub fn detect_tables(text: &str) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut current: Option<(Vec<Range<usize>>, Table)> = None;

    for line in text.lines() {
        let cells = line_cells(line);

        if let Some((columns, rows)) = current.as_mut() {
            if cells.len() >= MIN_TABLE_COLUMNS && !is_header_line(&cells) {
                rows.push(place_cells(columns, &cells));
                continue;
            }
        }
        if let Some((_, rows)) = current.take() {
            tables.push(rows);
        }

        if is_anchor(&cells) {
            let columns: Vec<Range<usize>> = cells.iter().map(|(span, _)| span.clone()).collect();
            let row = cells.iter().map(|(_, c)| Some(c.to_string())).collect();
            current = Some((columns, vec![row]));
        }
    }
    if let Some((_, rows)) = current {
        tables.push(rows);
    }

    tables
}

fn line_cells(line: &str) -> Vec<(Range<usize>, &str)> {
    cell_re()
        .find_iter(line)
        .map(|m| (m.range(), m.as_str()))
        .collect()
}

fn is_header_line(cells: &[(Range<usize>, &str)]) -> bool {
    cells
        .iter()
        .filter(|(_, c)| STATEMENT_HEADERS.contains(c))
        .count()
        >= MIN_HEADER_MATCHES
}

fn is_anchor(cells: &[(Range<usize>, &str)]) -> bool {
    is_header_line(cells) || cells.len() >= STATEMENT_HEADERS.len()
}

fn place_cells(columns: &[Range<usize>], cells: &[(Range<usize>, &str)]) -> Vec<Cell> {
    if cells.len() >= columns.len() {
        return cells.iter().map(|(_, c)| Some(c.to_string())).collect();
    }

    let mut row = vec![String::new(); columns.len()];
    for (span, cell) in cells {
        let slot = nearest_column(columns, span);
        if !row[slot].is_empty() {
            row[slot].push(' ');
        }
        row[slot].push_str(cell);
    }
    row.into_iter().map(Some).collect()
}

/// Column with the largest overlap, or the closest one when nothing overlaps.
fn nearest_column(columns: &[Range<usize>], span: &Range<usize>) -> usize {
    let overlap = |col: &Range<usize>| {
        col.end.min(span.end).saturating_sub(col.start.max(span.start))
    };
    let distance = |col: &Range<usize>| {
        if span.end <= col.start {
            col.start - span.end
        } else {
            span.start.saturating_sub(col.end)
        }
    };

    columns
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            overlap(*a)
                .cmp(&overlap(*b))
                .then_with(|| distance(*b).cmp(&distance(*a)))
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}
