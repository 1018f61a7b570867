use crate::config::MailRelayConfig;
use anyhow::Context;
use serde::Serialize;
use std::time::Duration;
use tracing::info;

/// Email delivery channel. The implementation decides the transport; the
/// dispatcher only hands over recipient, subject and HTML body.
#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Serialize)]
struct OutboundMail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Posts outbound notifications as JSON to the configured mail relay.
/// The request timeout bounds every send so one dead transport cannot
/// stall a whole scan.
pub struct RelayMailer {
    client: reqwest::Client,
    relay: MailRelayConfig,
}

impl RelayMailer {
    pub fn new(relay: MailRelayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("To create mail relay http client");
        Self { client, relay }
    }
}

#[async_trait::async_trait]
impl IMailer for RelayMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> anyhow::Result<()> {
        self.client
            .post(&self.relay.url)
            .header("campus-mail-relay-key", &self.relay.key)
            .json(&OutboundMail {
                from: &self.relay.from,
                to,
                subject,
                html: html_body,
            })
            .send()
            .await
            .context("Mail relay unreachable")?
            .error_for_status()
            .context("Mail relay rejected the message")?;
        Ok(())
    }
}

/// Fallback mailer when no relay is configured. Logs the send and drops
/// the message, which keeps the pipeline exercisable in demos.
pub struct NoopMailer;

#[async_trait::async_trait]
impl IMailer for NoopMailer {
    async fn send(&self, to: &str, subject: &str, _html_body: &str) -> anyhow::Result<()> {
        info!("No mail relay configured. Dropping mail to {}: {}", to, subject);
        Ok(())
    }
}
