use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::{ExposeSecret, SecretString};

use crate::config::{MailConfig, SECRET_ENV, SENDER_ENV};
use crate::error::ReportError;

/// Content-ID of the inline chart part.
pub(crate) const CHART_CONTENT_ID: &str = "expense_chart";

/// A validated mail configuration, ready to send reports.
#[derive(Debug)]
pub(crate) struct Dispatcher {
    login: String,
    secret: SecretString,
    sender: Mailbox,
    recipient: Mailbox,
    host: String,
    port: u16,
    subject: String,
    timeout: Duration,
}

impl Dispatcher {
    /// Validate `config` without touching the network. Sender and secret
    /// are checked first, then the recipient, then address syntax.
    pub(crate) fn new(config: &MailConfig) -> Result<Self, ReportError> {
        let login = present(config.sender.as_deref())
            .ok_or(ReportError::MissingCredential(SENDER_ENV))?;
        let secret = config
            .secret
            .as_ref()
            .map(|s| s.expose_secret())
            .filter(|s| !s.is_empty())
            .ok_or(ReportError::MissingCredential(SECRET_ENV))?;
        let recipient = present(config.recipient.as_deref()).ok_or(ReportError::MissingRecipient)?;

        Ok(Self {
            sender: parse_mailbox("sender", login)?,
            recipient: parse_mailbox("recipient", recipient)?,
            login: login.to_string(),
            secret: SecretString::from(secret.to_string()),
            host: config.host.clone(),
            port: config.port,
            subject: config.subject.clone(),
            timeout: config.timeout,
        })
    }

    /// Build the multipart message: the report as text/plain plus the chart
    /// as an inline PNG under [`CHART_CONTENT_ID`].
    pub(crate) fn compose(&self, report: &str, chart_png: &[u8]) -> Result<Message, ReportError> {
        let chart = Attachment::new_inline(CHART_CONTENT_ID.to_string())
            .body(chart_png.to_vec(), ContentType::parse("image/png")?);

        let message = Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(self.subject.clone())
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(report.to_string()))
                    .singlepart(chart),
            )?;
        Ok(message)
    }

    /// Send `message` through `transport` once, then shut the transport down
    /// whether or not the send succeeded. Failures keep the transport error
    /// as their source.
    pub(crate) fn deliver<T>(&self, transport: &T, message: &Message) -> Result<(), ReportError>
    where
        T: Transport,
        T::Error: std::error::Error + Send + Sync + 'static,
    {
        let sent = transport.send(message);
        transport.shutdown();
        sent.map_err(|err| ReportError::Delivery(Box::new(err)))?;
        tracing::info!(recipient = %self.recipient, "report delivered");
        Ok(())
    }

    /// Compose and send over an implicit-TLS SMTP session. The session
    /// belongs to this call and is closed before it returns, on every path.
    pub(crate) fn send(&self, report: &str, chart_png: &[u8]) -> Result<(), ReportError> {
        let message = self.compose(report, chart_png)?;

        let transport = SmtpTransport::relay(&self.host)
            .map_err(|err| ReportError::Delivery(Box::new(err)))?
            .port(self.port)
            .credentials(Credentials::new(
                self.login.clone(),
                self.secret.expose_secret().to_string(),
            ))
            .timeout(Some(self.timeout))
            .build();

        tracing::debug!(host = %self.host, port = self.port, "opening SMTP session");
        self.deliver(&transport, &message)
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_mailbox(field: &'static str, value: &str) -> Result<Mailbox, ReportError> {
    value
        .trim()
        .parse()
        .map_err(|source| ReportError::InvalidAddress { field, source })
}
