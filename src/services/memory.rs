//! In-memory hub store.
//!
//! Mirrors the PostgreSQL schema rules: hub names are required and unique,
//! messages must reference an existing hub, and removing a hub removes its
//! messages.

use std::{cmp::Ordering, collections::BTreeMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    models::{
        hub::{Hub, HubId, HubPatch, HubQuery, NewHub, SortDirection, SortField},
        message::{Message, MessageId, NewMessage},
    },
    services::{HubStore, StoreError},
};

#[derive(Default)]
pub struct MemoryHubStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    hubs: BTreeMap<HubId, Hub>,
    messages: BTreeMap<MessageId, Message>,
    last_hub_id: HubId,
    last_message_id: MessageId,
}

impl Tables {
    fn name_taken(&self, name: &str, except: Option<HubId>) -> bool {
        self.hubs
            .values()
            .any(|hub| hub.name == name && Some(hub.id) != except)
    }
}

impl MemoryHubStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &Hub, b: &Hub, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

#[async_trait]
impl HubStore for MemoryHubStore {
    async fn find(&self, query: &HubQuery) -> Result<Vec<Hub>, StoreError> {
        let tables = self.tables.read().await;

        let mut hubs: Vec<Hub> = tables.hubs.values().cloned().collect();
        hubs.sort_by(|a, b| {
            let primary = match query.sortdir {
                SortDirection::Asc => compare(a, b, query.sortby),
                SortDirection::Desc => compare(b, a, query.sortby),
            };
            primary.then(a.id.cmp(&b.id))
        });

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let limit = query.limit.map_or(usize::MAX, |limit| limit.get() as usize);

        Ok(hubs.into_iter().skip(offset).take(limit).collect())
    }

    async fn find_by_id(&self, id: HubId) -> Result<Option<Hub>, StoreError> {
        Ok(self.tables.read().await.hubs.get(&id).cloned())
    }

    async fn add(&self, hub: NewHub) -> Result<Hub, StoreError> {
        let name = hub
            .name
            .ok_or_else(|| StoreError::Constraint("hubs.name is required".to_string()))?;

        let mut tables = self.tables.write().await;
        if tables.name_taken(&name, None) {
            return Err(StoreError::Constraint(format!(
                "hubs.name must be unique, {name:?} exists"
            )));
        }

        tables.last_hub_id += 1;
        let now = Utc::now();
        let created = Hub {
            id: tables.last_hub_id,
            name,
            description: hub.description,
            created_at: now,
            updated_at: now,
            attributes: hub.attributes,
        };
        tables.hubs.insert(created.id, created.clone());

        Ok(created)
    }

    async fn update(&self, id: HubId, patch: HubPatch) -> Result<Option<Hub>, StoreError> {
        let mut tables = self.tables.write().await;

        if let Some(name) = &patch.name {
            if tables.name_taken(name, Some(id)) {
                return Err(StoreError::Constraint(format!(
                    "hubs.name must be unique, {name:?} exists"
                )));
            }
        }

        let Some(hub) = tables.hubs.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(hub);
        hub.updated_at = Utc::now();

        Ok(Some(hub.clone()))
    }

    async fn remove(&self, id: HubId) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.hubs.remove(&id).is_none() {
            return Ok(0);
        }
        tables.messages.retain(|_, message| message.hub_id != id);

        Ok(1)
    }

    async fn find_hub_messages(&self, hub_id: HubId) -> Result<Vec<Message>, StoreError> {
        let tables = self.tables.read().await;

        Ok(tables
            .messages
            .values()
            .filter(|message| message.hub_id == hub_id)
            .cloned()
            .collect())
    }

    async fn add_message(&self, message: NewMessage) -> Result<Message, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.hubs.contains_key(&message.hub_id) {
            return Err(StoreError::Constraint(format!(
                "messages.hub_id references missing hub {}",
                message.hub_id
            )));
        }

        tables.last_message_id += 1;
        let now = Utc::now();
        let created = Message {
            id: tables.last_message_id,
            hub_id: message.hub_id,
            created_at: now,
            updated_at: now,
            fields: message.fields,
        };
        tables.messages.insert(created.id, created.clone());

        Ok(created)
    }
}
