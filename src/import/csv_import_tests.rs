#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;
use std::io::Write;

fn make_csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn standard_columns() -> LedgerColumns {
    LedgerColumns {
        date: 0,
        description: 1,
        category: 2,
        amount: 3,
    }
}

fn row(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|s| s.to_string()).collect()
}

// ── parse_decimal ─────────────────────────────────────────────

#[test]
fn test_parse_decimal_basic() {
    assert_eq!(parse_decimal("100.50").unwrap(), dec!(100.50));
    assert_eq!(parse_decimal("-42.99").unwrap(), dec!(-42.99));
}

#[test]
fn test_parse_decimal_with_currency() {
    assert_eq!(parse_decimal("$1,234.56").unwrap(), dec!(1234.56));
    assert_eq!(parse_decimal("-$99.99").unwrap(), dec!(-99.99));
}

#[test]
fn test_parse_decimal_parentheses_negative() {
    assert_eq!(parse_decimal("(500.00)").unwrap(), dec!(-500.00));
}

#[test]
fn test_parse_decimal_empty_is_malformed() {
    assert!(parse_decimal("").is_none());
    assert!(parse_decimal("  ").is_none());
}

#[test]
fn test_parse_decimal_integer() {
    assert_eq!(parse_decimal("42").unwrap(), dec!(42));
}

#[test]
fn test_parse_decimal_invalid() {
    assert!(parse_decimal("not_a_number").is_none());
}

// ── parse_date ────────────────────────────────────────────────

#[test]
fn test_parse_date_iso_format() {
    let d = parse_date("2024-01-15").unwrap();
    assert_eq!(d, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
}

#[test]
fn test_parse_date_us_format() {
    let d = parse_date("01/15/2024").unwrap();
    assert_eq!(d, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
}

#[test]
fn test_parse_date_two_digit_year() {
    let d = parse_date("01/15/24").unwrap();
    assert_eq!(d, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
}

#[test]
fn test_parse_date_two_digit_year_dashes() {
    let d = parse_date("10-03-24").unwrap();
    assert_eq!(d, NaiveDate::from_ymd_opt(2024, 10, 3).unwrap());
}

#[test]
fn test_parse_date_day_first_two_digit_year() {
    let d = parse_date("28/09/24").unwrap();
    assert_eq!(d, NaiveDate::from_ymd_opt(2024, 9, 28).unwrap());
}

#[test]
fn test_parse_date_four_digit_years_unchanged() {
    let expected = NaiveDate::from_ymd_opt(2024, 10, 3).unwrap();
    assert_eq!(parse_date("10-03-2024").unwrap(), expected);
    assert_eq!(parse_date("03/10/2024").unwrap(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    assert_eq!(parse_date("28/10/2024").unwrap(), NaiveDate::from_ymd_opt(2024, 10, 28).unwrap());
}

#[test]
fn test_parse_date_timestamp_keeps_date() {
    let d = parse_date("2024-10-03 14:22:00").unwrap();
    assert_eq!(d, NaiveDate::from_ymd_opt(2024, 10, 3).unwrap());
}

#[test]
fn test_parse_date_invalid() {
    assert!(parse_date("not-a-date").is_none());
    assert!(parse_date("").is_none());
}

// ── CsvImporter::parse ────────────────────────────────────────

#[test]
fn test_parse_basic_rows() {
    let rows = vec![
        row(&["2024-01-02", "Coffee", "Food", "-4.50"]),
        row(&["2024-01-05", "Rent", "Housing", "-1500.00"]),
    ];
    let txns = CsvImporter::parse(&rows, &standard_columns()).unwrap();
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    assert_eq!(txns[0].description, "Coffee");
    assert_eq!(txns[0].category, "Food");
    assert_eq!(txns[0].amount, dec!(-4.50));
    assert_eq!(txns[1].description, "Rent");
}

#[test]
fn test_parse_keeps_labels_verbatim() {
    let rows = vec![row(&["2024-01-02", " Coffee ", "food ", "-4.50"])];
    let txns = CsvImporter::parse(&rows, &standard_columns()).unwrap();
    assert_eq!(txns[0].description, " Coffee ");
    assert_eq!(txns[0].category, "food ");
}

#[test]
fn test_parse_skips_blank_rows() {
    let rows = vec![
        row(&["2024-01-02", "Coffee", "Food", "-4.50"]),
        row(&["", "", "", ""]),
        row(&["2024-01-05", "Rent", "Housing", "-1500.00"]),
    ];
    let txns = CsvImporter::parse(&rows, &standard_columns()).unwrap();
    assert_eq!(txns.len(), 2);
}

#[test]
fn test_parse_malformed_date_reports_row() {
    let rows = vec![
        row(&["2024-01-02", "Coffee", "Food", "-4.50"]),
        row(&["yesterday", "Lunch", "Food", "-12.00"]),
    ];
    let err = CsvImporter::parse(&rows, &standard_columns()).unwrap_err();
    match err {
        ReportError::MalformedDate { row, value } => {
            assert_eq!(row, 2);
            assert_eq!(value, "yesterday");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_parse_malformed_amount() {
    let rows = vec![row(&["2024-01-02", "Coffee", "Food", "four fifty"])];
    let err = CsvImporter::parse(&rows, &standard_columns()).unwrap_err();
    assert!(matches!(err, ReportError::MalformedAmount { row: 1, .. }));
}

#[test]
fn test_parse_short_row_is_malformed() {
    let rows = vec![row(&["2024-01-02", "Coffee"])];
    let err = CsvImporter::parse(&rows, &standard_columns()).unwrap_err();
    assert!(matches!(err, ReportError::MalformedAmount { .. }));
}

#[test]
fn test_parse_empty_rows() {
    let rows: Vec<Vec<String>> = vec![];
    let txns = CsvImporter::parse(&rows, &standard_columns()).unwrap();
    assert!(txns.is_empty());
}

// ── CsvImporter::load ─────────────────────────────────────────

#[test]
fn test_load_file() {
    let csv = "Date,Description,Category,Amount\n\
               2024-01-02,Coffee,Food,-4.50\n\
               2024-01-05,Rent,Housing,-1500.00\n\
               2024-01-10,Salary,Income,3000.00\n";
    let file = make_csv_file(csv);
    let txns = CsvImporter::load(file.path()).unwrap();
    assert_eq!(txns.len(), 3);
    assert_eq!(txns[2].category, "Income");
    assert_eq!(txns[2].amount, dec!(3000.00));
}

#[test]
fn test_load_quoted_fields_and_extra_columns() {
    let csv = "Account,Date,Description,Category,Amount\n\
               Checking,2024-01-02,\"Coffee, Bagel\",Food,\"$1,004.50\"\n";
    let file = make_csv_file(csv);
    let txns = CsvImporter::load(file.path()).unwrap();
    assert_eq!(txns[0].description, "Coffee, Bagel");
    assert_eq!(txns[0].amount, dec!(1004.50));
}

#[test]
fn test_load_missing_file() {
    let err = CsvImporter::load(Path::new("/nonexistent/ledger.csv")).unwrap_err();
    assert!(matches!(err, ReportError::FileNotFound(_)));
}

#[test]
fn test_load_header_only_is_empty() {
    let file = make_csv_file("Date,Description,Category,Amount\n");
    let err = CsvImporter::load(file.path()).unwrap_err();
    assert!(matches!(err, ReportError::EmptyLedger));
}

#[test]
fn test_load_empty_file() {
    let file = make_csv_file("");
    let err = CsvImporter::load(file.path()).unwrap_err();
    assert!(matches!(err, ReportError::EmptyLedger));
}

#[test]
fn test_load_missing_column() {
    let file = make_csv_file("Date,Description,Amount\n2024-01-02,Coffee,-4.50\n");
    let err = CsvImporter::load(file.path()).unwrap_err();
    assert!(matches!(err, ReportError::MissingColumn("Category")));
}
