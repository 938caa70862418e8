/// Shared test fixtures and utilities for test modules
#[allow(dead_code)]
pub mod fixtures {
    use std::io::Write;
    use std::time::Duration;
    use teams_notifier::message_card::MessageCard;
    use teams_notifier::notifications::TeamsClient;
    use tempfile::NamedTempFile;

    /// A webhook URL shaped like the ones Teams hands out for a connector
    pub const VALID_WEBHOOK_URL: &str = "https://contoso.webhook.office.com/webhookb2/bb521093-fc98-488f-8876-af892e9649b4@d3c08eb3-7c4c-4a01-bc01-6c67b56c8da9/IncomingWebhook/34c22a9c8b004f74b8fc50cfe3754e89/93c9fa28-01e3-42ea-bab7-9264721a3fad";

    pub fn valid_card() -> MessageCard {
        MessageCard::new("Deployment finished", "Version 1.2.3 is live")
    }

    /// Client that accepts the loopback URL of a wiremock server
    pub fn local_client() -> TeamsClient {
        TeamsClient::new()
            .expect("Failed to create client")
            .skip_webhook_url_validation(true)
    }

    pub fn local_client_with_timeout(timeout: Duration) -> TeamsClient {
        local_client().with_timeout(timeout)
    }

    /// Writes `content` to a temporary file that lives as long as the returned handle
    pub fn input_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write temp file");
        file
    }
}

/// In-memory sink for the bunyan formatting layer
#[allow(dead_code)]
pub mod logging {
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Collects everything the formatting layer writes
    #[derive(Clone, Default)]
    pub struct BufferSink(Arc<Mutex<Vec<u8>>>);

    impl BufferSink {
        pub fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for BufferSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferSink {
        type Writer = BufferSink;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }
}
