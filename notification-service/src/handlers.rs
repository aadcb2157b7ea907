use futures::StreamExt;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::Message;
use tracing::{error, info, warn};

use crate::events::{self, Notification};

/// What happened to a single message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Logged { records: usize },
    Unrecognized,
    Skipped,
}

pub struct NotificationRelay;

impl NotificationRelay {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self, consumer: StreamConsumer) {
        let mut message_stream = consumer.stream();

        while let Some(message) = message_stream.next().await {
            match message {
                Ok(m) => {
                    match m.payload_view::<str>() {
                        Some(Ok(body)) => {
                            self.handle_body(body);
                        }
                        Some(Err(e)) => warn!("Message body is not UTF-8, skipping: {}", e),
                        None => warn!("Empty message at offset {}, skipping", m.offset()),
                    }
                    // Auto-commit is off; every message is committed here, parsed or not
                    if let Err(e) = consumer.commit_message(&m, CommitMode::Async) {
                        error!("Error committing message: {}", e);
                    }
                }
                Err(e) => error!("Error receiving message: {}", e),
            }
        }
    }

    pub fn handle_body(&self, body: &str) -> Outcome {
        match events::parse(body) {
            Ok(Notification::ObjectsCreated(records)) => {
                for record in &records {
                    info!(
                        bucket = %record.s3.bucket.name,
                        key = %record.s3.object.key,
                        size = ?record.s3.object.size,
                        event_time = ?record.event_time,
                        "{}",
                        record.event_name
                    );
                }
                Outcome::Logged { records: records.len() }
            }
            Ok(Notification::Unrecognized(value)) => {
                info!("Unrecognized event: {}", value);
                Outcome::Unrecognized
            }
            Err(e) => {
                warn!("Not a JSON event, skipping: {}", e);
                Outcome::Skipped
            }
        }
    }
}

impl Default for NotificationRelay {
    fn default() -> Self {
        Self::new()
    }
}
