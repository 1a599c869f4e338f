use async_trait::async_trait;
use uuid::Uuid;

use crate::{db::error::DbResult, models::Ticket};

#[async_trait]
pub trait TicketRepo: Send + Sync {
    /// Insert a ticket with a fresh id and return the stored record.
    async fn create(
        &self,
        owner_id: Uuid,
        product: &str,
        description: &str,
        status: &str,
    ) -> DbResult<Ticket>;
    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<Ticket>>;
    /// List tickets owned by a user, in insertion order.
    async fn list_by_owner(&self, owner_id: Uuid) -> DbResult<Vec<Ticket>>;
    async fn list_all(&self) -> DbResult<Vec<Ticket>>;
    /// Persist an already-mutated record and return the persisted form.
    ///
    /// Fails with `DbError::NotFound` if the row vanished between the
    /// caller's read and this write (concurrent delete).
    async fn update(&self, ticket: &Ticket) -> DbResult<Ticket>;
    async fn delete(&self, id: Uuid) -> DbResult<()>;
}
