mod cli;

use anyhow::Result;
use std::process::ExitCode;

use crate::chart::render_pie_chart;
use crate::config::{report_subject, MailConfig};
use crate::dispatch::Dispatcher;
use crate::error::ReportError;
use crate::import::CsvImporter;
use crate::models::Transaction;
use crate::report::format_report;
use crate::summarize::summarize;

pub(crate) use cli::{parse_args, print_usage, Command, Options};

/// Exit status when the report could not be produced.
pub(crate) const EXIT_PIPELINE_FAILURE: u8 = 1;
/// Exit status when the report was produced but could not be delivered.
pub(crate) const EXIT_DELIVERY_FAILURE: u8 = 2;
/// Exit status for bad command-line usage.
pub(crate) const EXIT_USAGE: u8 = 64;

/// A fully generated report, ready to send.
#[derive(Debug)]
pub(crate) struct Report {
    pub(crate) period: String,
    pub(crate) text: String,
    pub(crate) chart_png: Vec<u8>,
}

#[derive(Debug)]
pub(crate) enum Outcome {
    Sent,
    Printed,
    DeliveryFailed(ReportError),
}

impl Outcome {
    pub(crate) fn exit_status(&self) -> u8 {
        match self {
            Self::Sent | Self::Printed => 0,
            Self::DeliveryFailed(_) => EXIT_DELIVERY_FAILURE,
        }
    }

    pub(crate) fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// Exit status for an error that escaped [`as_report`]. Configuration and
/// delivery problems keep their own status even when they surface early.
pub(crate) fn failure_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ReportError>() {
        Some(report_err) if report_err.is_dispatch_failure() => EXIT_DELIVERY_FAILURE,
        _ => EXIT_PIPELINE_FAILURE,
    }
}

/// Run the whole pipeline. Anything failing before delivery is returned as
/// an error; delivery problems come back as [`Outcome::DeliveryFailed`].
pub(crate) fn as_report(options: &Options) -> Result<Outcome> {
    let report = build_report(options)?;

    if options.dry_run {
        println!("{}", report.text);
        return Ok(Outcome::Printed);
    }

    let config = MailConfig::from_env(report_subject(&report.period));
    Ok(dispatch(&report, config))
}

/// Load → summarize → chart → format.
pub(crate) fn build_report(options: &Options) -> Result<Report> {
    let transactions = CsvImporter::load(&options.ledger)?;
    let summary = summarize(&transactions, options.budget)?;
    let chart_png = render_pie_chart(&summary.category_totals)?;

    let period = options
        .period
        .clone()
        .unwrap_or_else(|| default_period(&transactions));
    let text = format_report(&summary, options.budget, &period);

    tracing::debug!(
        ledger = %options.ledger.display(),
        %period,
        transactions = transactions.len(),
        "report generated"
    );
    Ok(Report {
        period,
        text,
        chart_png,
    })
}

/// Validate the mail settings and send. Never panics or propagates: the
/// caller decides what a failed delivery means for the process.
pub(crate) fn dispatch(report: &Report, config: Result<MailConfig, ReportError>) -> Outcome {
    let result = config
        .and_then(|config| Dispatcher::new(&config))
        .and_then(|dispatcher| dispatcher.send(&report.text, &report.chart_png));

    match result {
        Ok(()) => Outcome::Sent,
        Err(err) => Outcome::DeliveryFailed(err),
    }
}

/// Month and year of the latest transaction, e.g. "October 2024".
fn default_period(transactions: &[Transaction]) -> String {
    transactions
        .iter()
        .map(|t| t.date)
        .max()
        .map(|date| date.format("%B %Y").to_string())
        .unwrap_or_else(|| chrono::Local::now().format("%B %Y").to_string())
}
