//! PostgreSQL hub store.
//!
//! Known columns map one to one; everything else a client sends is kept in a
//! `JSONB` column (`hubs.attributes`, `messages.fields`).

use async_trait::async_trait;
use sqlx::types::Json;

use crate::{
    db::DbPool,
    models::{
        hub::{Hub, HubId, HubPatch, HubQuery, HubRow, NewHub},
        message::{Message, MessageRow, NewMessage},
    },
    services::{HubStore, StoreError},
};

const HUB_COLUMNS: &str = "id, name, description, attributes, created_at, updated_at";

#[derive(Clone)]
pub struct PgHubStore {
    pool: DbPool,
}

impl PgHubStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HubStore for PgHubStore {
    async fn find(&self, query: &HubQuery) -> Result<Vec<Hub>, StoreError> {
        // ORDER BY cannot be bound; the column and direction come from closed enums.
        // LIMIT NULL means no limit in PostgreSQL.
        let sql = format!(
            "SELECT {HUB_COLUMNS} FROM hubs ORDER BY {} {}, id ASC LIMIT $1 OFFSET $2",
            query.sortby.column(),
            query.sortdir.keyword(),
        );

        let rows = sqlx::query_as::<_, HubRow>(&sql)
            .bind(query.limit.map(|limit| i64::from(limit.get())))
            .bind(i64::try_from(query.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: HubId) -> Result<Option<Hub>, StoreError> {
        let row = sqlx::query_as::<_, HubRow>(&format!(
            "SELECT {HUB_COLUMNS} FROM hubs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn add(&self, hub: NewHub) -> Result<Hub, StoreError> {
        // A missing name is rejected by the NOT NULL constraint.
        let row = sqlx::query_as::<_, HubRow>(&format!(
            r#"
            INSERT INTO hubs (name, description, attributes)
            VALUES ($1, $2, $3)
            RETURNING {HUB_COLUMNS}
            "#
        ))
        .bind(hub.name)
        .bind(hub.description)
        .bind(Json(hub.attributes))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(&self, id: HubId, patch: HubPatch) -> Result<Option<Hub>, StoreError> {
        let row = sqlx::query_as::<_, HubRow>(&format!(
            r#"
            UPDATE hubs
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                attributes = attributes || $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {HUB_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.description)
        .bind(Json(patch.attributes))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn remove(&self, id: HubId) -> Result<u64, StoreError> {
        // Messages go with the hub through ON DELETE CASCADE.
        let removed = sqlx::query("DELETE FROM hubs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(removed)
    }

    async fn find_hub_messages(&self, hub_id: HubId) -> Result<Vec<Message>, StoreError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, hub_id, fields, created_at, updated_at
            FROM messages
            WHERE hub_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(hub_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn add_message(&self, message: NewMessage) -> Result<Message, StoreError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO messages (hub_id, fields)
            VALUES ($1, $2)
            RETURNING id, hub_id, fields, created_at, updated_at
            "#,
        )
        .bind(message.hub_id)
        .bind(Json(message.fields))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}
