use async_trait::async_trait;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use uuid::Uuid;

use super::common::parse_uuid;
use crate::{
    db::{
        error::{DbError, DbResult},
        repos::TicketRepo,
    },
    models::Ticket,
};

pub struct SqliteTicketRepo {
    pool: SqlitePool,
}

impl SqliteTicketRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_ticket(row: &SqliteRow) -> DbResult<Ticket> {
    Ok(Ticket {
        id: parse_uuid(&row.get::<String, _>("id"))?,
        owner_id: parse_uuid(&row.get::<String, _>("owner_id"))?,
        product: row.get("product"),
        description: row.get("description"),
        status: row.get("status"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[async_trait]
impl TicketRepo for SqliteTicketRepo {
    async fn create(
        &self,
        owner_id: Uuid,
        product: &str,
        description: &str,
        status: &str,
    ) -> DbResult<Ticket> {
        let id = Uuid::new_v4();
        let now = chrono::Utc::now();

        sqlx::query(
            r#"
            INSERT INTO tickets (id, owner_id, product, description, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(owner_id.to_string())
        .bind(product)
        .bind(description)
        .bind(status)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Ticket {
            id,
            owner_id,
            product: product.to_string(),
            description: description.to_string(),
            status: status.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<Ticket>> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, product, description, status, created_at, updated_at
            FROM tickets
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_ticket).transpose()
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> DbResult<Vec<Ticket>> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, product, description, status, created_at, updated_at
            FROM tickets
            WHERE owner_id = ?
            ORDER BY created_at, id
            "#,
        )
        .bind(owner_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_ticket).collect()
    }

    async fn list_all(&self) -> DbResult<Vec<Ticket>> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, product, description, status, created_at, updated_at
            FROM tickets
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_ticket).collect()
    }

    async fn update(&self, ticket: &Ticket) -> DbResult<Ticket> {
        let now = chrono::Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE tickets
            SET product = ?, description = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&ticket.product)
        .bind(&ticket.description)
        .bind(&ticket.status)
        .bind(now)
        .bind(ticket.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(Ticket {
            updated_at: now,
            ..ticket.clone()
        })
    }

    async fn delete(&self, id: Uuid) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        Ok(())
    }
}
