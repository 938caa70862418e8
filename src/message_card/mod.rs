//! Legacy Office 365 connector card with a title, a text body and an
//! optional accent colour.

use crate::error::{SerializationError, ValidationError};
use crate::traits::TeamsMessage;
use serde::Serialize;

pub const MESSAGE_CARD_TYPE: &str = "MessageCard";
pub const MESSAGE_CARD_CONTEXT: &str = "https://schema.org/extensions";

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct MessageCard {
    #[serde(rename = "@type")]
    card_type: &'static str,

    #[serde(rename = "@context")]
    context: &'static str,

    /// Shown at the top of the card
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,

    /// Hex colour of the card's accent bar, e.g. `"0076D7"`
    #[serde(skip_serializing_if = "is_blank")]
    pub color: Option<String>,
}

fn is_blank(color: &Option<String>) -> bool {
    color.as_deref().is_none_or(str::is_empty)
}

impl MessageCard {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn card_type(&self) -> &str {
        self.card_type
    }

    pub fn context(&self) -> &str {
        self.context
    }
}

impl Default for MessageCard {
    fn default() -> Self {
        Self {
            card_type: MESSAGE_CARD_TYPE,
            context: MESSAGE_CARD_CONTEXT,
            title: String::new(),
            text: String::new(),
            color: None,
        }
    }
}

impl TeamsMessage for MessageCard {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if self.text.is_empty() {
            return Err(ValidationError::MissingText);
        }
        Ok(())
    }

    fn serialize(&self) -> Result<Vec<u8>, SerializationError> {
        Ok(serde_json::to_vec(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_card_carries_schema_constants() {
        let card = MessageCard::default();
        assert_eq!(card.card_type(), "MessageCard");
        assert_eq!(card.context(), "https://schema.org/extensions");
        assert!(card.color.is_none());
    }

    #[test]
    fn test_blank_color_is_treated_as_absent() {
        assert!(is_blank(&None));
        assert!(is_blank(&Some(String::new())));
        assert!(!is_blank(&Some("FF0000".to_string())));
    }
}
