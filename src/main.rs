mod chart;
mod config;
mod dispatch;
mod error;
mod import;
mod models;
mod report;
mod run;
mod summarize;

use std::error::Error as _;
use std::process::ExitCode;

use error::ReportError;
use run::{Command, Outcome};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            tracing::warn!(error = %err, "could not load .env");
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match run::parse_args(&args) {
        Ok(Command::Report(options)) => options,
        Ok(Command::Help) => {
            run::print_usage();
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            println!("budgetmail {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("Error: {err}");
            run::print_usage();
            return ExitCode::from(run::EXIT_USAGE);
        }
    };

    match run::as_report(&options) {
        Ok(outcome) => {
            match &outcome {
                Outcome::Sent => println!("Report sent successfully!"),
                Outcome::Printed => {}
                Outcome::DeliveryFailed(err) => {
                    let cause = err.source().map(|source| source.to_string());
                    tracing::error!(
                        kind = ?err.kind(),
                        error = %err,
                        cause = ?cause,
                        "report delivery failed"
                    );
                    println!("Error sending email: {err}");
                }
            }
            outcome.exit_code()
        }
        Err(err) => {
            let kind = err.downcast_ref::<ReportError>().map(ReportError::kind);
            tracing::error!(kind = ?kind, error = %format!("{err:#}"), "report generation failed");
            println!("Error: {err:#}");
            ExitCode::from(run::failure_status(&err))
        }
    }
}
