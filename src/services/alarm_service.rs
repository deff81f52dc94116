use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of every relayed alarm message.
pub const ALARM_PREFIX: &str = "Huston, we have a problem: ";

/// Notification event delivered by the alerting fabric: one record per
/// published alarm message.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AlarmEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<AlarmRecord>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlarmRecord {
    #[serde(rename = "Sns")]
    pub sns: AlarmMessage,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlarmMessage {
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Subject", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct WebhookPayload {
    pub text: String,
}

impl WebhookPayload {
    pub fn for_alarm(message: &str) -> Self {
        Self {
            text: format!("{}{}", ALARM_PREFIX, message),
        }
    }
}

#[derive(Error, Debug)]
pub enum AlarmError {
    #[error("Webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Webhook rejected alarm with status {0}")]
    Rejected(u16),
}

/// Relays alarm messages to a chat webhook, one POST per record.
#[derive(Clone)]
pub struct AlarmForwarder {
    client: reqwest::Client,
    webhook_url: String,
}

impl AlarmForwarder {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: webhook_url.into(),
        }
    }

    /// Posts every record in order, stopping at the first failed delivery.
    /// Returns the number of messages delivered.
    pub async fn forward(&self, event: &AlarmEvent) -> Result<usize, AlarmError> {
        for (index, record) in event.records.iter().enumerate() {
            let payload = WebhookPayload::for_alarm(&record.sns.message);
            let response = self
                .client
                .post(&self.webhook_url)
                .json(&payload)
                .send()
                .await?;

            if !response.status().is_success() {
                tracing::error!(
                    status = response.status().as_u16(),
                    record = index,
                    "Alarm webhook rejected message"
                );
                return Err(AlarmError::Rejected(response.status().as_u16()));
            }
            tracing::info!(record = index, "Alarm forwarded");
        }
        Ok(event.records.len())
    }
}
