// src/mailer.rs

use reqwest::blocking::Client;
use serde::Serialize;
use std::error::Error;
use std::fmt;
use tracing::info;

const BREVO_ENDPOINT: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Debug)]
pub enum MailerError {
    /// The request never got a response.
    RequestFailed(String),
    /// Brevo answered with a non-2xx status.
    Rejected { status: u16, body: String },
}

impl fmt::Display for MailerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MailerError::RequestFailed(msg) => write!(f, "Request failed: {msg}"),
            MailerError::Rejected { status, body } => {
                write!(f, "Brevo rejected the email ({status}): {body}")
            }
        }
    }
}

impl Error for MailerError {}

/// Anything that can deliver a rendered HTML email.
pub trait Mailer {
    fn send(&self, recipient_email: &str, subject: &str, html_content: &str)
        -> Result<(), MailerError>;
}

pub struct BrevoMailer {
    api_key: String,
    sender_email: String,
    sender_name: String,
    client: Client,
}

#[derive(Serialize)]
struct BrevoSender<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct BrevoRecipient<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoPayload<'a> {
    sender: BrevoSender<'a>,
    to: Vec<BrevoRecipient<'a>>,
    subject: &'a str,
    html_content: &'a str,
}

impl BrevoMailer {
    pub fn new(api_key: String, sender_email: String, sender_name: String) -> Self {
        Self {
            api_key,
            sender_email,
            sender_name,
            client: Client::new(),
        }
    }
}

impl Mailer for BrevoMailer {
    fn send(
        &self,
        recipient_email: &str,
        subject: &str,
        html_content: &str,
    ) -> Result<(), MailerError> {
        let payload = BrevoPayload {
            sender: BrevoSender {
                name: &self.sender_name,
                email: &self.sender_email,
            },
            to: vec![BrevoRecipient {
                email: recipient_email,
            }],
            subject,
            html_content,
        };

        let resp = self
            .client
            .post(BREVO_ENDPOINT)
            .header("api-key", &self.api_key)
            .header("Content-Type", mime::APPLICATION_JSON.as_ref())
            .json(&payload)
            .send()
            .map_err(|e| MailerError::RequestFailed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                body: resp.text().unwrap_or_default(),
            });
        }

        info!(to = recipient_email, subject, "email sent");
        Ok(())
    }
}

/// Logs messages instead of sending them. Used for `digest --dry-run`.
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(
        &self,
        recipient_email: &str,
        subject: &str,
        html_content: &str,
    ) -> Result<(), MailerError> {
        info!(
            to = recipient_email,
            subject,
            bytes = html_content.len(),
            "dry run: email not sent"
        );
        Ok(())
    }
}
