use spendlens_ingest::pdf::detect_tables;
use spendlens_ingest::{
    convert_to_csv, extract_statement, ConvertOutcome, ExtractionMethod, StatementPage,
    STATEMENT_HEADERS,
};

/// Layout text as a column-preserving extractor would render it.
const TABLE_PAGE: &str = "\
ICICI Bank
Statement of Transactions in Savings Account
S No.  Value Date  Transaction Date  Cheque Number  Transaction Remarks  Withdrawal Amount (INR)  Deposit Amount (INR)  Balance (INR)
1  01/04/2024  01/04/2024  -  UPI/ZOMATO/425001  425.50  0.00  574.50
2  03/04/2024  03/04/2024  -  NEFT/SALARY  0.00  500.00  1074.50
3  05/04/2024  TOTAL  -  -  -  -  -
";

/// One cell per line, as lopdf returns it for most statements.
const TEXT_PAGE: &str = "\
Page 2
4
06/04/2024
06/04/2024
-
POS/AMAZON PAY
INDIA
299.00
0.00
775.50
5
07/04/2024
07/04/2024
-
ATM/CASH
100.00
";

fn pages() -> Vec<StatementPage> {
    vec![
        StatementPage {
            number: 1,
            tables: detect_tables(TABLE_PAGE),
            text: Some(TABLE_PAGE.to_string()),
        },
        StatementPage {
            number: 2,
            tables: detect_tables(TEXT_PAGE),
            text: Some(TEXT_PAGE.to_string()),
        },
    ]
}

#[test]
fn test_table_and_text_pages_feed_one_csv() {
    let pages = pages();
    assert!(pages[1].tables.is_empty());

    let report = extract_statement(&pages);
    assert_eq!(report.pages[0].method, ExtractionMethod::Table);
    assert_eq!(report.pages[1].method, ExtractionMethod::Text);

    let serials: Vec<&str> = report.records.iter().map(|r| r.serial.as_str()).collect();
    // row 3 has no valid transaction date or balance; group 5 is too short.
    // "1074.50" has four integer digits and fails the amount check too.
    assert_eq!(serials, vec!["1", "4"]);
    assert_eq!(report.records[1].remarks, "POS/AMAZON PAY INDIA");
    assert_eq!(report.skipped(), 3);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("statement.csv");
    let outcome = convert_to_csv(&report.records, &out).unwrap();
    assert_eq!(outcome, ConvertOutcome::Written { rows: 2 });

    let csv = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "1,2024-04-01,2024-04-01,-,UPI/ZOMATO/425001,425.5,0.0,574.5");
    assert_eq!(lines[2], "4,2024-04-06,2024-04-06,-,POS/AMAZON PAY INDIA,299.0,0.0,775.5");
}

#[test]
fn test_no_valid_rows_means_no_file() {
    let page = StatementPage {
        number: 1,
        tables: Vec::new(),
        text: Some("Opening balance\nNo transactions this period\n".to_string()),
    };
    let report = extract_statement([&page]);
    assert!(report.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("empty.csv");
    assert_eq!(convert_to_csv(&report.records, &out).unwrap(), ConvertOutcome::Empty);
    assert!(!out.exists());
}

fn page(number: u32, text: &str) -> StatementPage {
    StatementPage {
        number,
        tables: detect_tables(text),
        text: Some(text.to_string()),
    }
}

/// Columns padded to their label width, blank cells left as spaces.
fn aligned(values: &[&str]) -> String {
    STATEMENT_HEADERS
        .iter()
        .zip(values)
        .map(|(label, value)| format!("{value:<width$}", width = label.len() + 2))
        .collect()
}

#[test]
fn test_blank_amount_cells_in_aligned_table_become_zero() {
    let text = [
        aligned(&STATEMENT_HEADERS),
        aligned(&["1", "01/04/2024", "01/04/2024", "-", "UPI/ZOMATO/425001", "425.50", "", "574.50"]),
        aligned(&["2", "03/04/2024", "03/04/2024", "-", "NEFT/SALARY", "", "500.00", "974.50"]),
    ]
    .join("\n");

    let report = extract_statement([&page(1, &text)]);
    assert_eq!(report.pages[0].method, ExtractionMethod::Table);
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.skipped(), 0);
    assert_eq!(report.records[0].deposit, "");
    assert_eq!(report.records[1].withdrawal, "");

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("aligned.csv");
    convert_to_csv(&report.records, &out).unwrap();
    let csv = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[1], "1,2024-04-01,2024-04-01,-,UPI/ZOMATO/425001,425.5,0.0,574.5");
    assert_eq!(lines[2], "2,2024-04-03,2024-04-03,-,NEFT/SALARY,0.0,500.0,974.5");
}

#[test]
fn test_aligned_account_details_do_not_hide_text_transactions() {
    let text = "\
Account No  XXXX4321  Branch  MG Road
Customer ID  555  IFSC  ICIC0000001
1
01/04/2024
01/04/2024
-
ATM/CASH
100.00
0.00
474.50
";

    let report = extract_statement([&page(1, text)]);
    assert_eq!(report.pages[0].method, ExtractionMethod::Text);
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].remarks, "ATM/CASH");
}
