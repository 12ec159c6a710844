//! Message data models.
//!
//! A message belongs to exactly one hub. Apart from `hub_id` the store keeps
//! whatever fields the client posted (`content`, `sender`, `text`, ...).

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::types::Json;

use crate::models::hub::{HubId, strip_managed_keys};

pub type MessageId = i64;

/// A message as stored and as returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub id: MessageId,
    pub hub_id: HubId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Row shape of the `messages` table.
#[derive(Debug, sqlx::FromRow)]
pub struct MessageRow {
    pub id: MessageId,
    pub hub_id: HubId,
    pub fields: Json<Map<String, Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Self {
            id: row.id,
            hub_id: row.hub_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            fields: row.fields.0,
        }
    }
}

/// Input for creating a message under a hub.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub hub_id: HubId,
    pub fields: Map<String, Value>,
}

impl NewMessage {
    /// Build a message for `hub_id` from a request body.
    ///
    /// The hub id always comes from the route; a `hub_id` in the body is
    /// overwritten.
    pub fn for_hub(hub_id: HubId, mut fields: Map<String, Value>) -> Self {
        strip_managed_keys(&mut fields);
        fields.remove("hub_id");
        Self { hub_id, fields }
    }
}
