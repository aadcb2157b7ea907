mod events;
mod handlers;

use anyhow::Result;
use clap::Parser;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "notification-service")]
struct Args {
    #[arg(long, env = "KAFKA_BROKERS", default_value = "localhost:9092")]
    kafka_brokers: String,

    #[arg(long, env = "NOTIFICATIONS_TOPIC", default_value = "notifications-queue")]
    topic: String,

    #[arg(long, default_value = "notification-service")]
    group_id: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let consumer: StreamConsumer = consumer_config(&args).create()?;

    consumer.subscribe(&[&args.topic])?;

    info!("Notification relay consuming {}", args.topic);

    handlers::NotificationRelay::new().run(consumer).await;

    Ok(())
}

/// Offsets are committed by the relay after each message, never by the client.
fn consumer_config(args: &Args) -> ClientConfig {
    let mut config = ClientConfig::new();
    config
        .set("group.id", &args.group_id)
        .set("bootstrap.servers", &args.kafka_brokers)
        .set("enable.partition.eof", "false")
        .set("session.timeout.ms", "6000")
        .set("enable.auto.commit", "false")
        .set("auto.offset.reset", "earliest");
    config
}
