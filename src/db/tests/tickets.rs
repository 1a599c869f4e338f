//! Tests for the SQLite TicketRepo implementation

use uuid::Uuid;

use super::harness::{create_sqlite_pool, run_sqlite_migrations};
use crate::{
    db::{
        error::DbError,
        repos::{TicketRepo, UserRepo},
        sqlite::{SqliteTicketRepo, SqliteUserRepo},
    },
    models::{CreateUser, Ticket},
};

struct TicketTestContext {
    tickets: SqliteTicketRepo,
    users: SqliteUserRepo,
}

impl TicketTestContext {
    async fn new() -> Self {
        let pool = create_sqlite_pool().await;
        run_sqlite_migrations(&pool).await;
        Self {
            tickets: SqliteTicketRepo::new(pool.clone()),
            users: SqliteUserRepo::new(pool),
        }
    }

    /// Create a test user and return its id
    async fn create_test_user(&self, name: &str) -> Uuid {
        self.users
            .create(CreateUser {
                name: name.to_string(),
                email: None,
                is_admin: false,
            })
            .await
            .expect("Failed to create test user")
            .id
    }
}

#[tokio::test]
async fn test_create_ticket() {
    let ctx = TicketTestContext::new().await;
    let owner_id = ctx.create_test_user("owner").await;

    let ticket = ctx
        .tickets
        .create(owner_id, "printer", "jammed", Ticket::STATUS_NEW)
        .await
        .expect("Failed to create ticket");

    assert_eq!(ticket.owner_id, owner_id);
    assert_eq!(ticket.product, "printer");
    assert_eq!(ticket.description, "jammed");
    assert_eq!(ticket.status, "new");
    assert!(!ticket.id.is_nil());
}

#[tokio::test]
async fn test_get_by_id_round_trip() {
    let ctx = TicketTestContext::new().await;
    let owner_id = ctx.create_test_user("owner").await;

    let created = ctx
        .tickets
        .create(owner_id, "printer", "jammed", Ticket::STATUS_NEW)
        .await
        .expect("Failed to create ticket");

    let fetched = ctx
        .tickets
        .get_by_id(created.id)
        .await
        .expect("Failed to get ticket")
        .expect("Ticket should exist");

    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.owner_id, owner_id);
    assert_eq!(fetched.product, "printer");
    assert_eq!(fetched.description, "jammed");
    assert_eq!(fetched.status, "new");
}

#[tokio::test]
async fn test_get_by_id_not_found() {
    let ctx = TicketTestContext::new().await;

    let result = ctx
        .tickets
        .get_by_id(Uuid::new_v4())
        .await
        .expect("Query should succeed");

    assert!(result.is_none());
}

#[tokio::test]
async fn test_list_by_owner_filters_and_preserves_insertion_order() {
    let ctx = TicketTestContext::new().await;
    let u1 = ctx.create_test_user("u1").await;
    let u2 = ctx.create_test_user("u2").await;

    let first = ctx
        .tickets
        .create(u1, "printer", "jammed", Ticket::STATUS_NEW)
        .await
        .expect("Failed to create ticket");
    let second = ctx
        .tickets
        .create(u1, "laptop", "won't boot", Ticket::STATUS_NEW)
        .await
        .expect("Failed to create ticket");
    ctx.tickets
        .create(u2, "phone", "cracked screen", Ticket::STATUS_NEW)
        .await
        .expect("Failed to create ticket");

    let owned = ctx
        .tickets
        .list_by_owner(u1)
        .await
        .expect("Failed to list tickets");

    assert_eq!(owned.len(), 2);
    assert_eq!(owned[0].id, first.id);
    assert_eq!(owned[1].id, second.id);
    assert!(owned.iter().all(|t| t.owner_id == u1));
}

#[tokio::test]
async fn test_list_by_owner_empty() {
    let ctx = TicketTestContext::new().await;
    let owner_id = ctx.create_test_user("owner").await;

    let owned = ctx
        .tickets
        .list_by_owner(owner_id)
        .await
        .expect("Failed to list tickets");

    assert!(owned.is_empty());
}

#[tokio::test]
async fn test_list_all_spans_owners() {
    let ctx = TicketTestContext::new().await;
    let u1 = ctx.create_test_user("u1").await;
    let u2 = ctx.create_test_user("u2").await;

    ctx.tickets
        .create(u1, "printer", "jammed", Ticket::STATUS_NEW)
        .await
        .expect("Failed to create ticket");
    ctx.tickets
        .create(u2, "laptop", "won't boot", Ticket::STATUS_NEW)
        .await
        .expect("Failed to create ticket");

    let all = ctx.tickets.list_all().await.expect("Failed to list tickets");
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_update_persists_mutated_record() {
    let ctx = TicketTestContext::new().await;
    let owner_id = ctx.create_test_user("owner").await;

    let mut ticket = ctx
        .tickets
        .create(owner_id, "printer", "jammed", Ticket::STATUS_NEW)
        .await
        .expect("Failed to create ticket");

    ticket.status = "open".to_string();
    let updated = ctx
        .tickets
        .update(&ticket)
        .await
        .expect("Failed to update ticket");

    assert_eq!(updated.id, ticket.id);
    assert_eq!(updated.status, "open");
    assert!(updated.updated_at >= ticket.created_at);

    let fetched = ctx
        .tickets
        .get_by_id(ticket.id)
        .await
        .expect("Failed to get ticket")
        .expect("Ticket should exist");
    assert_eq!(fetched.status, "open");
    assert_eq!(fetched.product, "printer");
}

#[tokio::test]
async fn test_update_vanished_row_is_not_found() {
    let ctx = TicketTestContext::new().await;
    let owner_id = ctx.create_test_user("owner").await;

    let ticket = ctx
        .tickets
        .create(owner_id, "printer", "jammed", Ticket::STATUS_NEW)
        .await
        .expect("Failed to create ticket");

    ctx.tickets
        .delete(ticket.id)
        .await
        .expect("Failed to delete ticket");

    let result = ctx.tickets.update(&ticket).await;
    assert!(matches!(result, Err(DbError::NotFound)));
}

#[tokio::test]
async fn test_delete() {
    let ctx = TicketTestContext::new().await;
    let owner_id = ctx.create_test_user("owner").await;

    let ticket = ctx
        .tickets
        .create(owner_id, "printer", "jammed", Ticket::STATUS_NEW)
        .await
        .expect("Failed to create ticket");

    ctx.tickets
        .delete(ticket.id)
        .await
        .expect("Failed to delete ticket");

    let result = ctx
        .tickets
        .get_by_id(ticket.id)
        .await
        .expect("Query should succeed");
    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete_not_found() {
    let ctx = TicketTestContext::new().await;

    let result = ctx.tickets.delete(Uuid::new_v4()).await;
    assert!(matches!(result, Err(DbError::NotFound)));
}
