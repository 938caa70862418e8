pub mod configuration;
pub mod error;
pub mod message_card;
pub mod notifications;
pub mod telemetry;
pub mod traits;
