use async_trait::async_trait;
use uuid::Uuid;

use super::{delete_row, fetch_by_id, fetch_listing, reload, Repository, Source};
use crate::db::DbPool;
use crate::error::{CoreError, Result};
use crate::pagination::{Listing, PageRequest};
use crate::types::{ContactMessage, ContactMessageChanges, NewContactMessage};

const SOURCE: Source = Source {
    entity: "contact message",
    table: "contact_messages",
    columns: "cm.*",
    from: "contact_messages cm",
    id_column: "cm.id",
};

#[derive(Clone)]
pub struct ContactMessageRepository {
    pool: DbPool,
}

impl ContactMessageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for ContactMessageRepository {
    type Record = ContactMessage;
    type Create = NewContactMessage;
    type Update = ContactMessageChanges;
    // The inbox has no filtered listings.
    type Filter = ();

    const ENTITY: &'static str = "contact message";
    const NOT_FOUND: &'static str = "Contact message not found.";

    async fn create(&self, payload: NewContactMessage) -> Result<ContactMessage> {
        let row = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (id, name, email, message)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&payload.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<ContactMessage>> {
        fetch_by_id(&self.pool, &SOURCE, id).await
    }

    async fn list_filtered(&self, _filter: (), page: PageRequest) -> Result<Listing<ContactMessage>> {
        fetch_listing(&self.pool, &SOURCE, &[], "cm.created_at DESC, cm.id", page).await
    }

    async fn update(&self, id: Uuid, changes: ContactMessageChanges) -> Result<ContactMessage> {
        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE contact_messages
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                message = COALESCE($4, message)
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.message)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(id) => reload(&self.pool, &SOURCE, id).await,
            None => Err(CoreError::not_found(SOURCE.entity, id)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        delete_row(&self.pool, &SOURCE, id).await
    }
}
