use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use super::LedgerColumns;
use crate::error::ReportError;
use crate::models::Transaction;

// `%Y` also accepts one to four digits ("24" is year 24), so the two-digit-year
// forms go first. `%y` takes exactly two digits and rejects "2024".
const DATE_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%m-%d-%y",
    "%d/%m/%y",
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d/%m/%Y",
];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub(crate) struct CsvImporter;

impl CsvImporter {
    /// Read a ledger file into transactions, keeping file order.
    pub(crate) fn load(path: &Path) -> Result<Vec<Transaction>, ReportError> {
        if !path.exists() {
            return Err(ReportError::FileNotFound(path.to_path_buf()));
        }
        let read_err = |source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_path(path)
            .map_err(read_err)?;

        let headers: Vec<String> = rdr
            .headers()
            .map_err(read_err)?
            .iter()
            .map(|s| s.to_string())
            .collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ReportError::EmptyLedger);
        }
        let columns = LedgerColumns::locate(&headers)?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(read_err)?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        let transactions = Self::parse(&rows, &columns)?;
        if transactions.is_empty() {
            return Err(ReportError::EmptyLedger);
        }

        tracing::debug!(
            path = %path.display(),
            transactions = transactions.len(),
            "ledger loaded"
        );
        Ok(transactions)
    }

    /// Parse data rows (header excluded) into Transactions. Rows whose
    /// fields are all blank are skipped; row numbers in errors are 1-based.
    pub(crate) fn parse(
        rows: &[Vec<String>],
        columns: &LedgerColumns,
    ) -> Result<Vec<Transaction>, ReportError> {
        let mut transactions = Vec::with_capacity(rows.len());

        for (i, row) in rows.iter().enumerate() {
            if row.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            let row_number = i + 1;

            let date_str = field(row, columns.date).trim();
            let date = parse_date(date_str).ok_or_else(|| ReportError::MalformedDate {
                row: row_number,
                value: date_str.to_string(),
            })?;

            let amount_str = field(row, columns.amount);
            let amount = parse_decimal(amount_str).ok_or_else(|| ReportError::MalformedAmount {
                row: row_number,
                value: amount_str.to_string(),
            })?;

            transactions.push(Transaction::new(
                date,
                field(row, columns.description).to_string(),
                field(row, columns.category).to_string(),
                amount,
            ));
        }

        Ok(transactions)
    }
}

fn field(row: &[String], index: usize) -> &str {
    row.get(index).map(|s| s.as_str()).unwrap_or("")
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    let cleaned = s
        .replace(['$', ',', '"'], "")
        .replace('(', "-")
        .replace(')', "")
        .trim()
        .to_string();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
