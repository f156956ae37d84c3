use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// A backend collection addressable under `/{COLLECTION}`
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn id(&self) -> Uuid;

    /// Short human readable title used in listings
    fn label(&self) -> &str;

    /// The moment the item is about, if it has one
    fn occurs_at(&self) -> Option<DateTime<Utc>> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatePlan {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub all_day: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub purchased: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub title: String,
    pub remind_at: DateTime<Utc>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

impl Resource for DatePlan {
    const COLLECTION: &'static str = "dates";

    fn id(&self) -> Uuid {
        self.id
    }
    fn label(&self) -> &str {
        &self.title
    }
    fn occurs_at(&self) -> Option<DateTime<Utc>> {
        Some(self.scheduled_at)
    }
}

impl Resource for Event {
    const COLLECTION: &'static str = "events";

    fn id(&self) -> Uuid {
        self.id
    }
    fn label(&self) -> &str {
        &self.title
    }
    fn occurs_at(&self) -> Option<DateTime<Utc>> {
        Some(self.starts_at)
    }
}

impl Resource for Gift {
    const COLLECTION: &'static str = "gifts";

    fn id(&self) -> Uuid {
        self.id
    }
    fn label(&self) -> &str {
        &self.name
    }
}

impl Resource for Reminder {
    const COLLECTION: &'static str = "reminders";

    fn id(&self) -> Uuid {
        self.id
    }
    fn label(&self) -> &str {
        &self.title
    }
    fn occurs_at(&self) -> Option<DateTime<Utc>> {
        Some(self.remind_at)
    }
}

impl Resource for Note {
    const COLLECTION: &'static str = "notes";

    fn id(&self) -> Uuid {
        self.id
    }
    fn label(&self) -> &str {
        &self.title
    }
    fn occurs_at(&self) -> Option<DateTime<Utc>> {
        Some(self.updated_at)
    }
}

impl Resource for Message {
    const COLLECTION: &'static str = "messages";

    fn id(&self) -> Uuid {
        self.id
    }
    fn label(&self) -> &str {
        &self.content
    }
    fn occurs_at(&self) -> Option<DateTime<Utc>> {
        Some(self.sent_at)
    }
}
