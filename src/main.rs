use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use teams_notifier::configuration::{NotificationConfig, Overrides};
use teams_notifier::notifications::{TeamsClient, log_send_failure};
use teams_notifier::telemetry::{get_subscriber, init_subscriber};
use teams_notifier::traits::MessageSender;
use tracing::info;

/// Send a MessageCard to a Microsoft Teams channel through an incoming webhook
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with `webhookURL`, `title`, `text` and optionally `color`
    input_file: PathBuf,

    /// Webhook to post to, replaces `webhookURL` from the input file
    #[arg(long, env = "TEAMS_WEBHOOK_URL")]
    webhook_url: Option<String>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    text: Option<String>,

    /// Accent colour of the card, e.g. 0076D7
    #[arg(long)]
    color: Option<String>,

    /// Default log filter when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            webhook_url: self.webhook_url.clone(),
            title: self.title.clone(),
            text: self.text.clone(),
            color: self.color.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout is reserved for the summary below
    let subscriber = get_subscriber("teams-notifier".into(), cli.log_level.clone(), std::io::stderr);
    init_subscriber(subscriber)?;

    info!("Starting teams-notifier");

    let config = NotificationConfig::from_file(&cli.input_file)?.apply_overrides(cli.overrides());
    let webhook_url = config.ensure_webhook_url()?;
    let card = config.to_message_card();

    let client = TeamsClient::new()?;
    if let Err(e) = client.send(webhook_url, &card).await {
        log_send_failure(&e);
        return Err(e).context("failed to send message");
    }

    println!("Webhook URL: {}", webhook_url);
    println!("Title: {}", config.title);
    println!("Text: {}", config.text);

    Ok(())
}
