use crate::message_card::MessageCard;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Contents of the JSON input file handed to the binary
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationConfig {
    #[serde(rename = "webhookURL", default)]
    pub webhook_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Values supplied on the command line or through the environment.
/// Anything set here replaces the value read from the input file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub webhook_url: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub color: Option<String>,
}

impl NotificationConfig {
    #[tracing::instrument(name = "load_config", skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?;

        let config = Self::from_json(&content)
            .with_context(|| format!("Failed to parse input file {}", path.display()))?;

        info!("Loaded notification input");
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Input is not a valid notification JSON document")
    }

    pub fn apply_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(webhook_url) = overrides.webhook_url {
            debug!("Webhook URL overridden");
            self.webhook_url = webhook_url;
        }
        if let Some(title) = overrides.title {
            self.title = title;
        }
        if let Some(text) = overrides.text {
            self.text = text;
        }
        if overrides.color.is_some() {
            self.color = overrides.color;
        }
        self
    }

    /// Title and text are checked by the card itself when it is sent; the URL
    /// has to be present before a client is even built.
    pub fn ensure_webhook_url(&self) -> Result<&str> {
        if self.webhook_url.trim().is_empty() {
            anyhow::bail!("Missing webhook URL");
        }
        Ok(&self.webhook_url)
    }

    pub fn to_message_card(&self) -> MessageCard {
        let card = MessageCard::new(self.title.clone(), self.text.clone());
        match &self.color {
            Some(color) => card.with_color(color.clone()),
            None => card,
        }
    }
}
