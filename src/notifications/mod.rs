use crate::error::{SendError, ValidationError};
use crate::traits::{MessageSender, TeamsMessage};
use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::RegexSet;
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;
use uuid::Uuid;

/// Host patterns accepted for incoming webhooks. The scheme must be `https`.
pub const WEBHOOK_HOST_VALID_PATTERNS: &[&str] = &[r"^(?:.*\.webhook|outlook)\.office(?:365)?\.com$"];

/// Body returned by the endpoint when a message was accepted
pub const EXPECTED_ENDPOINT_RESPONSE_TEXT: &str = "1";

/// Ceiling for the whole exchange: connect, write and reading the response body
pub const WEBHOOK_SEND_TIMEOUT: Duration = Duration::from_secs(5);

const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// All of `WEBHOOK_HOST_VALID_PATTERNS` or nothing: a pattern that fails to
/// compile is logged and every host is rejected.
static WEBHOOK_HOST_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(WEBHOOK_HOST_VALID_PATTERNS).unwrap_or_else(|e| {
        error!("Invalid webhook host pattern, rejecting all webhook URLs: {}", e);
        RegexSet::empty()
    })
});

/// Submits messages to a Microsoft Teams channel
#[derive(Clone, Debug)]
pub struct TeamsClient {
    http_client: Client,
    timeout: Duration,
    skip_webhook_url_validation: bool,
}

impl TeamsClient {
    pub fn new() -> Result<Self> {
        info!("Creating HTTP client for webhook delivery");
        let http_client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_http_client(http_client))
    }

    pub fn with_http_client(http_client: Client) -> Self {
        Self {
            http_client,
            timeout: WEBHOOK_SEND_TIMEOUT,
            skip_webhook_url_validation: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Only require the URL to parse, accepting any host. Meant for local endpoints.
    pub fn skip_webhook_url_validation(mut self, skip: bool) -> Self {
        self.skip_webhook_url_validation = skip;
        self
    }

    pub fn http_client(&self) -> &Client {
        &self.http_client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn check_destination(&self, webhook_url: &str) -> Result<Url, ValidationError> {
        if self.skip_webhook_url_validation {
            return parse_webhook_url(webhook_url);
        }
        self.validate_webhook(webhook_url)
    }

    async fn post(&self, url: Url, payload: Vec<u8>) -> Result<(), SendError> {
        let response = self
            .http_client
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!(status = %response.status(), "Processing response");
        let status = response.status();
        // consumes the response, so the connection is released on every path below
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        process_response(status, body)
    }

    fn transport_error(&self, err: reqwest::Error) -> SendError {
        if err.is_timeout() {
            SendError::Timeout(self.timeout)
        } else {
            // reqwest embeds the full request URL, secret path included
            SendError::TransportFailure(err.without_url())
        }
    }
}

fn parse_webhook_url(webhook_url: &str) -> Result<Url, ValidationError> {
    Url::parse(webhook_url).map_err(ValidationError::MalformedUrl)
}

/// Log a failed send. Only the error's `Display` chain is written, which never
/// contains the webhook URL.
pub fn log_send_failure(err: &SendError) {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }

    error!(
        configuration_error = err.is_configuration_error(),
        transient = err.is_transient(),
        "Failed to send message: {}",
        message
    );
}

/// Classify a fully read response
pub fn process_response(status: StatusCode, body: String) -> Result<(), SendError> {
    if status.as_u16() >= 299 {
        return Err(SendError::EndpointError { status, body });
    }

    if body.trim() != EXPECTED_ENDPOINT_RESPONSE_TEXT {
        return Err(SendError::UnexpectedResponseBody {
            body,
            expected: EXPECTED_ENDPOINT_RESPONSE_TEXT,
        });
    }

    Ok(())
}

#[async_trait]
impl MessageSender for TeamsClient {
    fn validate_webhook(&self, webhook_url: &str) -> Result<Url, ValidationError> {
        let url = parse_webhook_url(webhook_url)?;

        let approved = url.scheme() == "https"
            && url
                .host_str()
                .is_some_and(|host| WEBHOOK_HOST_PATTERNS.is_match(host));

        if !approved {
            return Err(ValidationError::UrlPatternMismatch {
                scheme: url.scheme().to_string(),
                host: url.host_str().unwrap_or_default().to_string(),
            });
        }

        Ok(url)
    }

    #[tracing::instrument(
        name = "send",
        skip(self, webhook_url, message),
        fields(request_id = %Uuid::new_v4(), host = tracing::field::Empty)
    )]
    async fn send(&self, webhook_url: &str, message: &dyn TeamsMessage) -> Result<(), SendError> {
        debug!("Validating webhook URL");
        let url = self
            .check_destination(webhook_url)
            .map_err(SendError::InvalidDestination)?;
        // the path and query carry the webhook secret, only the host is recorded
        tracing::Span::current().record("host", url.host_str().unwrap_or_default());

        debug!("Validating message");
        message.validate().map_err(SendError::InvalidMessage)?;

        debug!("Serializing message");
        let payload = message.serialize()?;

        debug!(bytes = payload.len(), "Sending message");
        let result = match tokio::time::timeout(self.timeout, self.post(url, payload)).await {
            Ok(result) => result,
            Err(_) => Err(SendError::Timeout(self.timeout)),
        };

        match &result {
            Ok(()) => info!("Message sent successfully"),
            Err(e) => warn!("Failed to send message: {}", e),
        }

        result
    }
}
