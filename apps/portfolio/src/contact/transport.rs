//! Delivery of contact messages. The form only knows the `ContactTransport`
//! trait; which implementation runs is decided at startup.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{info, warn};

use crate::contact::form::ContactMessage;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Webhook rejected the message (status {status})")]
    Rejected { status: u16 },
}

#[async_trait]
pub trait ContactTransport: Send + Sync {
    fn name(&self) -> &'static str;

    async fn deliver(&self, message: &ContactMessage) -> Result<(), TransportError>;
}

/// Writes messages to the log. Used when no webhook is configured.
pub struct LogTransport;

#[async_trait]
impl ContactTransport for LogTransport {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn deliver(&self, message: &ContactMessage) -> Result<(), TransportError> {
        info!(
            from = %message.email,
            name = %message.name,
            chars = message.message.chars().count(),
            "Contact message received"
        );
        Ok(())
    }
}

/// POSTs the message as JSON to a webhook (form service, chat hook, mail relay).
#[derive(Clone)]
pub struct WebhookTransport {
    client: Client,
    url: String,
}

impl WebhookTransport {
    pub fn new(url: String) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(WEBHOOK_TIMEOUT).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl ContactTransport for WebhookTransport {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn deliver(&self, message: &ContactMessage) -> Result<(), TransportError> {
        let response = self.client.post(&self.url).json(message).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Contact webhook returned {}", status);
            return Err(TransportError::Rejected {
                status: status.as_u16(),
            });
        }
        info!("Contact message delivered via webhook");
        Ok(())
    }
}
