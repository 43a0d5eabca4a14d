// src/notify/email.rs
// =============================================================================
// Emails a search result as pretty-printed JSON.
//
// Uses lettre's async SMTP transport with STARTTLS and the credentials from
// EmailConfig. A failed send is returned as an error; there is no retry.
// =============================================================================

use crate::config::EmailConfig;
use anyhow::{Context, Result};
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Serialize;
use tracing::info;

pub const SUBJECT: &str = "Course availability report";

// Sends `report` to `recipient`
//
// Parameters:
//   config: relay credentials, also the sender address
//   recipient: where the report goes (from --email)
//   report: anything serializable, usually a search Outcome
pub async fn send_report<T: Serialize>(
    config: &EmailConfig,
    recipient: &str,
    report: &T,
) -> Result<()> {
    let body = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    let message = build_message(config, recipient, body)?;

    let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        .with_context(|| format!("invalid SMTP relay '{}'", config.smtp_host))?
        .port(config.smtp_port)
        .credentials(Credentials::new(
            config.username.clone(),
            config.password.clone(),
        ))
        .build();

    mailer
        .send(message)
        .await
        .with_context(|| format!("failed to email report to {}", recipient))?;

    info!(recipient, "report emailed");
    Ok(())
}

// Builds the plaintext message without sending it
fn build_message(config: &EmailConfig, recipient: &str, body: String) -> Result<Message> {
    let from: Mailbox = config
        .username
        .parse()
        .with_context(|| format!("invalid sender address '{}'", config.username))?;
    let to: Mailbox = recipient
        .parse()
        .with_context(|| format!("invalid recipient address '{}'", recipient))?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(SUBJECT)
        .header(ContentType::TEXT_PLAIN)
        .body(body)
        .context("failed to build email")?;

    Ok(message)
}
