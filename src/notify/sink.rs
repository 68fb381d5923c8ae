use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use crate::config::NotificationsConfig;
use crate::notify::engine::NotificationEvent;

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, event: &NotificationEvent) -> Result<()>;
}

pub struct StdoutSink;

#[async_trait]
impl NotificationSink for StdoutSink {
    async fn send(&self, event: &NotificationEvent) -> Result<()> {
        println!("[{:?}] {} - {}", event.kind, event.title, event.body);
        Ok(())
    }
}

pub struct WebhookSink {
    client: Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ministry-path/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .context("failed to build webhook HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    fn is_discord(&self) -> bool {
        self.url.contains("discord.com/api/webhooks")
            || self.url.contains("discordapp.com/api/webhooks")
    }
}

#[async_trait]
impl NotificationSink for WebhookSink {
    async fn send(&self, event: &NotificationEvent) -> Result<()> {
        let req = if self.is_discord() {
            let content = format!("**{}**\n{}", event.title, event.body);
            self.client
                .post(&self.url)
                .json(&serde_json::json!({ "content": content }))
        } else {
            self.client.post(&self.url).json(event)
        };

        req.send().await?.error_for_status()?;
        Ok(())
    }
}

pub fn sinks_from_config(config: &NotificationsConfig) -> Vec<Box<dyn NotificationSink>> {
    let mut sinks: Vec<Box<dyn NotificationSink>> = Vec::new();
    if config.enable_stdout {
        sinks.push(Box::new(StdoutSink));
    }
    let url = config.webhook_url.trim();
    if !url.is_empty() {
        match WebhookSink::new(url) {
            Ok(sink) => sinks.push(Box::new(sink)),
            Err(err) => warn!("webhook notifications disabled: {err:#}"),
        }
    }
    sinks
}

/// Sends every event to every sink. Failures are logged, never returned.
pub async fn dispatch(sinks: &[Box<dyn NotificationSink>], events: &[NotificationEvent]) {
    for event in events {
        for sink in sinks {
            if let Err(err) = sink.send(event).await {
                warn!("notification delivery failed for {}: {err:#}", event.member_id);
            }
        }
    }
}
