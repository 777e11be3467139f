use std::path::PathBuf;

use thiserror::Error;

/// Broad classes of failure, used by the orchestrator to decide whether a
/// failure aborts the run or is reported at the delivery boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorKind {
    Input,
    Computation,
    Render,
    Configuration,
    Delivery,
}

#[derive(Debug, Error)]
pub(crate) enum ReportError {
    #[error("ledger file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read ledger {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("ledger is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: could not parse date '{value}'")]
    MalformedDate { row: usize, value: String },

    #[error("row {row}: could not parse amount '{value}'")]
    MalformedAmount { row: usize, value: String },

    #[error("ledger contains no transactions")]
    EmptyLedger,

    #[error("monthly budget is zero; percentage spent is undefined")]
    DivisionByZero,

    #[error("arithmetic overflow while {0}")]
    Overflow(&'static str),

    #[error("no category spending to chart")]
    EmptyCategories,

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("missing {0} in configuration")]
    MissingCredential(&'static str),

    #[error("missing RECEIVER_EMAIL in configuration")]
    MissingRecipient,

    #[error("invalid SMTP port '{0}'")]
    InvalidPort(String),

    #[error("invalid {field} address: {source}")]
    InvalidAddress {
        field: &'static str,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("invalid attachment content type: {0}")]
    ContentType(#[from] lettre::message::header::ContentTypeErr),

    #[error("delivery failed: {0}")]
    Delivery(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ReportError {
    pub(crate) fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound(_)
            | Self::Read { .. }
            | Self::MissingColumn(_)
            | Self::MalformedDate { .. }
            | Self::MalformedAmount { .. }
            | Self::EmptyLedger => ErrorKind::Input,
            Self::DivisionByZero | Self::Overflow(_) => ErrorKind::Computation,
            Self::EmptyCategories | Self::Chart(_) => ErrorKind::Render,
            Self::MissingCredential(_)
            | Self::MissingRecipient
            | Self::InvalidPort(_)
            | Self::InvalidAddress { .. }
            | Self::Message(_)
            | Self::ContentType(_) => ErrorKind::Configuration,
            Self::Delivery(_) => ErrorKind::Delivery,
        }
    }

    /// Configuration and delivery failures are the ones reported at the
    /// process boundary instead of aborting the run.
    pub(crate) fn is_dispatch_failure(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Configuration | ErrorKind::Delivery
        )
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
