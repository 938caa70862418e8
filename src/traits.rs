use crate::error::{SendError, SerializationError, ValidationError};
use async_trait::async_trait;
use url::Url;

#[cfg(test)]
use mockall::automock;

/// A message format that can be posted to a Teams channel
#[cfg_attr(test, automock)]
pub trait TeamsMessage: Send + Sync {
    /// Check that the required fields are present
    fn validate(&self) -> Result<(), ValidationError>;

    /// Encode the message into the JSON request body
    fn serialize(&self) -> Result<Vec<u8>, SerializationError>;
}

/// Trait for delivering messages to an incoming webhook
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Check that the webhook URL is well formed and points at an approved host
    fn validate_webhook(&self, webhook_url: &str) -> Result<Url, ValidationError>;

    /// Send a message to the given webhook URL
    async fn send(&self, webhook_url: &str, message: &dyn TeamsMessage) -> Result<(), SendError>;
}
