use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Object-storage event envelope: `{"Records": [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageNotification {
    pub records: Vec<ObjectRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecord {
    pub event_name: String,
    #[serde(default)]
    pub event_time: Option<DateTime<Utc>>,
    pub s3: ObjectEntity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectEntity {
    pub bucket: Bucket,
    pub object: StoredObject,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoredObject {
    pub key: String,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone)]
pub enum Notification {
    ObjectsCreated(Vec<ObjectRecord>),
    /// Valid JSON that is not a storage envelope, e.g. a test event.
    Unrecognized(Value),
}

/// Fails only when the body is not JSON at all.
pub fn parse(body: &str) -> Result<Notification, serde_json::Error> {
    let value: Value = serde_json::from_str(body)?;
    match serde_json::from_value::<StorageNotification>(value.clone()) {
        Ok(notification) => Ok(Notification::ObjectsCreated(notification.records)),
        Err(_) => Ok(Notification::Unrecognized(value)),
    }
}
