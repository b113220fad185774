use anyhow::{Context, Result};
use spendlens_ingest::{convert_to_csv, extract_pdf, ConvertOutcome, ExtractionMethod};
use std::path::Path;

/// Scrape `pdf` into `out`. Writes nothing when no transactions are found.
pub fn convert(pdf: &Path, out: &Path) -> Result<()> {
    tracing::info!("starting PDF processing for {}", pdf.display());

    let report = extract_pdf(pdf);
    if report.is_empty() {
        tracing::error!("no transactions found in the PDF");
        return Ok(());
    }

    match convert_to_csv(&report.records, out)
        .with_context(|| format!("saving {}", out.display()))?
    {
        ConvertOutcome::Written { rows } => {
            println!(
                "Wrote {} transactions to {} ({} rows skipped)",
                rows,
                out.display(),
                report.skipped()
            );
        }
        ConvertOutcome::Empty => {}
    }
    Ok(())
}

/// Print what the extractor sees, page by page, without writing a file.
pub fn inspect(pdf: &Path, json: bool) -> Result<()> {
    let report = extract_pdf(pdf);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}: {} pages", pdf.display(), report.pages.len());
    for p in &report.pages {
        let method = match p.method {
            ExtractionMethod::Table => "table",
            ExtractionMethod::Text => "text",
            ExtractionMethod::Empty => "empty",
        };
        println!(
            "  page {:>3} [{:<5}] accepted={} skipped={}",
            p.page, method, p.accepted, p.skipped
        );
    }
    for r in &report.records {
        println!(
            "  {:>4} | {} | {} | {:>12} | {:>12} | {:>12}",
            r.serial, r.transaction_date, r.remarks, r.withdrawal, r.deposit, r.balance
        );
    }
    println!("Total: {} transactions", report.records.len());
    Ok(())
}
