use crate::error::ReportError;

/// Positions of the four ledger columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LedgerColumns {
    pub(crate) date: usize,
    pub(crate) description: usize,
    pub(crate) category: usize,
    pub(crate) amount: usize,
}

impl LedgerColumns {
    /// Locate the required columns by name. Matching ignores case and
    /// surrounding whitespace; extra columns and column order don't matter.
    pub(crate) fn locate(headers: &[String]) -> Result<Self, ReportError> {
        let h: Vec<String> = headers
            .iter()
            .map(|s| s.trim().trim_start_matches('\u{feff}').to_lowercase())
            .collect();

        Ok(Self {
            date: col_index(&h, "date").ok_or(ReportError::MissingColumn("Date"))?,
            description: col_index(&h, "description")
                .ok_or(ReportError::MissingColumn("Description"))?,
            category: col_index(&h, "category").ok_or(ReportError::MissingColumn("Category"))?,
            amount: col_index(&h, "amount").ok_or(ReportError::MissingColumn("Amount"))?,
        })
    }
}

fn col_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
