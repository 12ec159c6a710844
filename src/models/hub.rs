//! Hub data models and the request types that feed the store.
//!
//! This module defines:
//! - `Hub`: the record returned to clients
//! - `HubRow`: the database row behind a `Hub`
//! - `NewHub` / `HubPatch`: store inputs split out of a JSON request body
//! - `HubQuery`: list filters taken from the query string

use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::types::Json;

/// Hub identifier, generated by the store.
pub type HubId = i64;

/// A hub as stored and as returned to API clients.
///
/// Fields other than the known columns are kept in `attributes` and
/// flattened into the JSON representation, so clients get back exactly what
/// they sent.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 1,
///   "name": "Engineering",
///   "description": null,
///   "created_at": "2025-12-20T10:00:00Z",
///   "updated_at": "2025-12-20T10:00:00Z",
///   "floor": 3
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hub {
    pub id: HubId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Row shape of the `hubs` table.
#[derive(Debug, sqlx::FromRow)]
pub struct HubRow {
    pub id: HubId,
    pub name: String,
    pub description: Option<String>,
    pub attributes: Json<Map<String, Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HubRow> for Hub {
    fn from(row: HubRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
            attributes: row.attributes.0,
        }
    }
}

/// Input for creating a hub.
///
/// `name` is optional here because the body is accepted as-is; the store is
/// the one that rejects a hub without a name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewHub {
    pub name: Option<String>,
    pub description: Option<String>,
    pub attributes: Map<String, Value>,
}

impl NewHub {
    /// Split a request body into known columns and extra attributes.
    ///
    /// Store-managed keys (`id`, timestamps) are dropped.
    pub fn from_fields(mut fields: Map<String, Value>) -> Self {
        strip_managed_keys(&mut fields);
        Self {
            name: take_string(&mut fields, "name"),
            description: take_string(&mut fields, "description"),
            attributes: fields,
        }
    }
}

/// Partial update for a hub. `None` leaves the column untouched; attributes
/// are merged key by key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HubPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub attributes: Map<String, Value>,
}

impl HubPatch {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        let NewHub {
            name,
            description,
            attributes,
        } = NewHub::from_fields(fields);
        Self {
            name,
            description,
            attributes,
        }
    }

    /// Apply this patch to a hub in place.
    pub fn apply(&self, hub: &mut Hub) {
        if let Some(name) = &self.name {
            hub.name = name.clone();
        }
        if let Some(description) = &self.description {
            hub.description = Some(description.clone());
        }
        for (key, value) in &self.attributes {
            hub.attributes.insert(key.clone(), value.clone());
        }
    }
}

/// Column a hub listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Filters accepted by `GET /api/hubs`.
///
/// # Query Example
///
/// `?sortby=name&sortdir=desc&limit=10&page=2`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HubQuery {
    #[serde(default)]
    pub sortby: SortField,

    #[serde(default)]
    pub sortdir: SortDirection,

    /// Page size; no limit when absent. `limit=0` is rejected at parse time.
    pub limit: Option<NonZeroU32>,

    /// 1-based page number, only used together with `limit`
    pub page: Option<u32>,
}

impl HubQuery {
    /// Number of rows to skip for the requested page.
    pub fn offset(&self) -> u64 {
        match self.limit {
            Some(limit) => u64::from(limit.get()) * u64::from(self.page.unwrap_or(1).saturating_sub(1)),
            None => 0,
        }
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    // Non-string values are dropped; the key must not reappear as an attribute.
    match fields.remove(key) {
        Some(Value::String(value)) => Some(value),
        _ => None,
    }
}

pub(crate) fn strip_managed_keys(fields: &mut Map<String, Value>) {
    for key in ["id", "created_at", "updated_at"] {
        fields.remove(key);
    }
}
