//! Error types for message validation and webhook delivery.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Failures detected before anything is sent over the network.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The destination string could not be parsed as a URL. The URL itself is
    /// not kept since its path carries the webhook secret.
    #[error("could not parse webhook URL")]
    MalformedUrl(#[source] url::ParseError),

    /// The URL parsed but is not an approved incoming webhook host.
    #[error("the webhook URL does not match the expected pattern; got scheme {scheme:?}, host {host:?}")]
    UrlPatternMismatch { scheme: String, host: String },

    #[error("invalid message card: title required")]
    MissingTitle,

    #[error("invalid message card: text required")]
    MissingText,
}

/// The message could not be encoded as JSON.
#[derive(Debug, Error)]
#[error("error marshalling message card to JSON")]
pub struct SerializationError(#[from] pub serde_json::Error);

/// Every way a single send can fail. Nothing here is retried internally.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("webhook URL validation failed")]
    InvalidDestination(#[source] ValidationError),

    #[error("failed to validate message")]
    InvalidMessage(#[source] ValidationError),

    #[error("failed to prepare message")]
    SerializationFailed(#[from] SerializationError),

    #[error("webhook did not answer within {0:?}")]
    Timeout(Duration),

    #[error("failed to send message")]
    TransportFailure(#[source] reqwest::Error),

    #[error("error on code: {status}, {body:?}")]
    EndpointError { status: StatusCode, body: String },

    #[error("message unsuccessful, invalid webhook URL response text: got {body:?}, expected {expected:?}")]
    UnexpectedResponseBody { body: String, expected: &'static str },
}

impl SendError {
    /// True when the caller has to change its input (URL or message) before trying again.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            SendError::InvalidDestination(_)
                | SendError::InvalidMessage(_)
                | SendError::SerializationFailed(_)
        )
    }

    /// True when the same request might succeed if the caller repeats it later.
    pub fn is_transient(&self) -> bool {
        match self {
            SendError::Timeout(_) | SendError::TransportFailure(_) => true,
            SendError::EndpointError { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}
