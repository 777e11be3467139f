use std::time::Duration;

use secrecy::SecretString;

use crate::error::ReportError;

pub(crate) const SENDER_ENV: &str = "EMAIL_ADDRESS";
pub(crate) const SECRET_ENV: &str = "APP_PASSWORD";
pub(crate) const RECIPIENT_ENV: &str = "RECEIVER_EMAIL";
pub(crate) const HOST_ENV: &str = "SMTP_HOST";
pub(crate) const PORT_ENV: &str = "SMTP_PORT";

pub(crate) const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub(crate) const DEFAULT_SMTP_PORT: u16 = 465;
pub(crate) const SESSION_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the dispatcher needs to deliver one report. Sender, secret
/// and recipient stay optional here; the dispatcher rejects a config that
/// lacks them before opening any connection.
#[derive(Debug)]
pub(crate) struct MailConfig {
    pub(crate) sender: Option<String>,
    pub(crate) secret: Option<SecretString>,
    pub(crate) recipient: Option<String>,
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) subject: String,
    pub(crate) timeout: Duration,
}

impl MailConfig {
    pub(crate) fn new(subject: String) -> Self {
        Self {
            sender: None,
            secret: None,
            recipient: None,
            host: DEFAULT_SMTP_HOST.into(),
            port: DEFAULT_SMTP_PORT,
            subject,
            timeout: SESSION_TIMEOUT,
        }
    }

    /// Read mail settings from the process environment.
    pub(crate) fn from_env(subject: String) -> Result<Self, ReportError> {
        Self::from_lookup(subject, |key| std::env::var(key).ok())
    }

    /// Read mail settings through `lookup`. Blank values count as missing.
    pub(crate) fn from_lookup<F>(subject: String, lookup: F) -> Result<Self, ReportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::new(subject);
        config.sender = get(SENDER_ENV);
        config.secret = get(SECRET_ENV).map(SecretString::from);
        config.recipient = get(RECIPIENT_ENV);
        if let Some(host) = get(HOST_ENV) {
            config.host = host;
        }
        if let Some(port) = get(PORT_ENV) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ReportError::InvalidPort(port.clone()))?;
        }
        Ok(config)
    }
}

/// Subject line for a report covering `period`.
pub(crate) fn report_subject(period: &str) -> String {
    format!("Monthly Expense Report - {period}")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
