use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

use crate::models::DEFAULT_MONTHLY_BUDGET;

/// Ledger read when no path is given.
pub(crate) const DEFAULT_LEDGER_PATH: &str = "data/october-2024.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Options {
    pub(crate) ledger: PathBuf,
    pub(crate) budget: Decimal,
    /// Caption for the report; derived from the ledger when absent.
    pub(crate) period: Option<String>,
    pub(crate) dry_run: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            ledger: PathBuf::from(DEFAULT_LEDGER_PATH),
            budget: DEFAULT_MONTHLY_BUDGET,
            period: None,
            dry_run: false,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Report(Options),
    Help,
    Version,
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub(crate) struct UsageError(String);

/// Parse the arguments that follow the program name.
pub(crate) fn parse_args(args: &[String]) -> Result<Command, UsageError> {
    let mut options = Options::default();
    let mut ledger: Option<PathBuf> = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" | "help" => return Ok(Command::Help),
            "--version" | "-V" | "version" => return Ok(Command::Version),
            "--dry-run" | "-n" => options.dry_run = true,
            "--budget" | "-b" => {
                let raw = flag_value(&mut iter, "--budget")?;
                options.budget = Decimal::from_str(raw.replace(['$', ','], "").trim())
                    .map_err(|_| UsageError(format!("Invalid budget amount: {raw}")))?;
            }
            "--period" | "-p" => {
                options.period = Some(flag_value(&mut iter, "--period")?.to_string());
            }
            other if other.starts_with('-') => {
                return Err(UsageError(format!("Unknown option: {other}")));
            }
            path => {
                if ledger.is_some() {
                    return Err(UsageError(format!("Unexpected argument: {path}")));
                }
                let home = std::env::var_os("HOME").map(PathBuf::from);
                ledger = Some(expand_home(path, home));
            }
        }
    }

    if let Some(path) = ledger {
        options.ledger = path;
    }
    Ok(Command::Report(options))
}

fn flag_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> Result<&'a str, UsageError> {
    iter.next()
        .map(|s| s.as_str())
        .ok_or_else(|| UsageError(format!("{flag} requires a value")))
}

pub(crate) fn print_usage() {
    println!("BudgetMail — monthly budget report by email");
    println!();
    println!("Usage: budgetmail [ledger.csv] [options]");
    println!();
    println!("Arguments:");
    println!("  ledger.csv                    CSV with Date, Description, Category, Amount");
    println!("                                (default: {DEFAULT_LEDGER_PATH})");
    println!();
    println!("Options:");
    println!("  --budget, -b <amount>         Monthly budget (default: {DEFAULT_MONTHLY_BUDGET})");
    println!("  --period, -p <caption>        Reporting period caption (default: month of latest transaction)");
    println!("  --dry-run, -n                 Print the report instead of emailing it");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Environment (.env is loaded if present):");
    println!("  EMAIL_ADDRESS, APP_PASSWORD   Sender account and app password");
    println!("  RECEIVER_EMAIL                Report recipient");
    println!("  SMTP_HOST, SMTP_PORT          Mail server (default: smtp.gmail.com:465)");
    println!("  RUST_LOG                      Log filter (default: info)");
}

/// Resolve a leading `~/` against `home`. Without a home directory the path
/// is used as given.
fn expand_home(path: &str, home: Option<PathBuf>) -> PathBuf {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
