//! Telegram Bot API notifier

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Credentials;
use crate::error::NotifyError;

use super::{format_alert, Notifier, SignalAlert};

const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramNotifier {
    base_url: String,
    http: Client,
}

impl TelegramNotifier {
    pub fn new(base_url: &str) -> Result<Self, NotifyError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self::with_client(base_url, http))
    }

    pub fn with_client(base_url: &str, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Send pre-rendered HTML text
    pub async fn send_message(&self, credentials: &Credentials, text: &str) -> Result<(), NotifyError> {
        if !credentials.is_complete() {
            return Err(NotifyError::MissingCredentials);
        }

        let url = format!("{}/bot{}/sendMessage", self.base_url, credentials.token);
        let request = SendMessageRequest {
            chat_id: &credentials.chat_id,
            text,
            parse_mode: "HTML",
            disable_web_page_preview: true,
        };
        let response = self.http.post(&url).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: Option<TelegramResponse> = serde_json::from_str(&body).ok();
        match parsed {
            Some(TelegramResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(TelegramResponse { description, .. }) => Err(NotifyError::Rejected {
                status: status.as_u16(),
                description: description.unwrap_or(body),
            }),
            None => Err(NotifyError::Rejected {
                status: status.as_u16(),
                description: body,
            }),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, credentials: &Credentials, alert: &SignalAlert) -> Result<(), NotifyError> {
        let text = format_alert(alert);
        self.send_message(credentials, &text).await?;
        info!(
            symbol = %alert.symbol,
            direction = %alert.verdict.direction,
            "Alert sent for {}: {}",
            alert.symbol,
            alert.verdict.direction
        );
        Ok(())
    }
}
