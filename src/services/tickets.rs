use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::{
    authz::{self, Access, TicketAction},
    db::{DbError, DbPool},
    models::{CreateTicket, Ticket, UpdateTicket, User},
};

/// Failure of a ticket operation, carrying the reason shown to the caller.
#[derive(Debug, Error)]
pub enum TicketError {
    /// The principal id did not resolve to a user record.
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Database(#[from] DbError),
}

const USER_NOT_FOUND: &str = "User not found";
const TICKET_NOT_FOUND: &str = "Ticket not found";
const NOT_AUTHORIZED: &str = "Not Authorized";

/// The ticket resource controller.
///
/// Every operation follows the same shape: resolve the principal, load the
/// target ticket when the operation names one, consult the authorization
/// policy, then perform the store operation. Existence is checked before
/// ownership, so a missing ticket reads as NotFound to every caller.
#[derive(Clone)]
pub struct TicketService {
    db: Arc<DbPool>,
}

impl TicketService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Re-validate that the authenticated principal still exists.
    ///
    /// Authentication happened upstream; this guards against principals
    /// deleted after their credentials were issued.
    async fn resolve_principal(&self, principal_id: Uuid) -> Result<User, TicketError> {
        self.db
            .users()
            .get_by_id(principal_id)
            .await?
            .ok_or_else(|| TicketError::Unauthorized(USER_NOT_FOUND.to_string()))
    }

    /// List every ticket in the system. Admin only.
    ///
    /// A resolved non-admin is rejected as Unauthorized rather than
    /// Forbidden; existing clients depend on that status.
    pub async fn list_all(&self, principal_id: Uuid) -> Result<Vec<Ticket>, TicketError> {
        let principal = self.resolve_principal(principal_id).await?;

        match authz::evaluate(&principal, None, TicketAction::ListAll) {
            Access::Granted => Ok(self.db.tickets().list_all().await?),
            _ => Err(TicketError::Unauthorized(
                "Not authorized as an admin user".to_string(),
            )),
        }
    }

    /// List the tickets owned by the principal.
    pub async fn list_own(&self, principal_id: Uuid) -> Result<Vec<Ticket>, TicketError> {
        let principal = self.resolve_principal(principal_id).await?;

        match authz::evaluate(&principal, None, TicketAction::ListOwn) {
            Access::Granted => Ok(self.db.tickets().list_by_owner(principal.id).await?),
            _ => Err(TicketError::Forbidden(NOT_AUTHORIZED.to_string())),
        }
    }

    /// Fetch a single ticket. Owner or admin.
    pub async fn get(&self, principal_id: Uuid, ticket_id: Uuid) -> Result<Ticket, TicketError> {
        let principal = self.resolve_principal(principal_id).await?;
        let ticket = self.db.tickets().get_by_id(ticket_id).await?;

        match (
            authz::evaluate(&principal, ticket.as_ref(), TicketAction::Read),
            ticket,
        ) {
            (Access::Granted, Some(ticket)) => Ok(ticket),
            (Access::Denied, _) => Err(TicketError::Forbidden(NOT_AUTHORIZED.to_string())),
            _ => Err(TicketError::NotFound(TICKET_NOT_FOUND.to_string())),
        }
    }

    /// Create a ticket owned by the principal, with status forced to `new`.
    ///
    /// Input validation (non-empty product and description) happens at the
    /// request boundary before the principal is resolved.
    pub async fn create(
        &self,
        principal_id: Uuid,
        input: CreateTicket,
    ) -> Result<Ticket, TicketError> {
        let principal = self.resolve_principal(principal_id).await?;

        match authz::evaluate(&principal, None, TicketAction::Create) {
            Access::Granted => {
                let ticket = self
                    .db
                    .tickets()
                    .create(
                        principal.id,
                        &input.product,
                        &input.description,
                        Ticket::STATUS_NEW,
                    )
                    .await?;
                tracing::info!(ticket_id = %ticket.id, owner_id = %ticket.owner_id, "Ticket created");
                Ok(ticket)
            }
            _ => Err(TicketError::Forbidden(NOT_AUTHORIZED.to_string())),
        }
    }

    /// Update a ticket in place. Owner or admin.
    ///
    /// Only supplied non-empty fields are applied; see
    /// [`Ticket::apply_update`].
    pub async fn update(
        &self,
        principal_id: Uuid,
        ticket_id: Uuid,
        input: UpdateTicket,
    ) -> Result<Ticket, TicketError> {
        let principal = self.resolve_principal(principal_id).await?;
        let ticket = self.db.tickets().get_by_id(ticket_id).await?;

        match (
            authz::evaluate(&principal, ticket.as_ref(), TicketAction::Update),
            ticket,
        ) {
            (Access::Granted, Some(mut ticket)) => {
                // An update that applies nothing skips the write entirely,
                // leaving the record (including its timestamp) untouched.
                if ticket.apply_update(input) {
                    Ok(self.db.tickets().update(&ticket).await?)
                } else {
                    Ok(ticket)
                }
            }
            (Access::Denied, _) => Err(TicketError::Forbidden(
                "Not authorized to update this ticket".to_string(),
            )),
            _ => Err(TicketError::NotFound(TICKET_NOT_FOUND.to_string())),
        }
    }

    /// Delete a ticket. Owner only: admins do not bypass ownership here,
    /// and a denied delete is reported as NotFound, the same as a missing
    /// ticket. Existing clients depend on both behaviors.
    pub async fn delete(&self, principal_id: Uuid, ticket_id: Uuid) -> Result<(), TicketError> {
        let principal = self.resolve_principal(principal_id).await?;
        let ticket = self.db.tickets().get_by_id(ticket_id).await?;

        match (
            authz::evaluate(&principal, ticket.as_ref(), TicketAction::Delete),
            ticket,
        ) {
            (Access::Granted, Some(ticket)) => {
                self.db.tickets().delete(ticket.id).await?;
                tracing::info!(ticket_id = %ticket.id, "Ticket deleted");
                Ok(())
            }
            (Access::Denied, _) => Err(TicketError::NotFound(NOT_AUTHORIZED.to_string())),
            _ => Err(TicketError::NotFound(TICKET_NOT_FOUND.to_string())),
        }
    }
}
