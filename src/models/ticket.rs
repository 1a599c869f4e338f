use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A support ticket.
///
/// Ownership is fixed at creation and never transfers. `status` starts as
/// [`Ticket::STATUS_NEW`] and is free text afterwards; operators use it as
/// workflow vocabulary (`open`, `closed`, ...) rather than a closed enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    /// User who created the ticket; immutable.
    pub owner_id: Uuid,
    pub product: String,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Status assigned to every ticket at creation.
    pub const STATUS_NEW: &'static str = "new";

    /// Apply an update request to this record in memory, returning whether
    /// anything was applied.
    ///
    /// A field is applied only when it is supplied and non-empty; an
    /// explicit empty string is ignored, so update can never clear a
    /// field. Callers that supply no fields get the record back untouched.
    pub fn apply_update(&mut self, input: UpdateTicket) -> bool {
        let mut changed = false;
        if let Some(product) = input.product.filter(|v| !v.is_empty()) {
            self.product = product;
            changed = true;
        }
        if let Some(description) = input.description.filter(|v| !v.is_empty()) {
            self.description = description;
            changed = true;
        }
        if let Some(status) = input.status.filter(|v| !v.is_empty()) {
            self.status = status;
            changed = true;
        }
        changed
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTicket {
    /// Product the ticket is about
    #[serde(default)]
    #[validate(length(min = 1, message = "Please add a product and a description"))]
    pub product: String,
    /// Description of the problem
    #[serde(default)]
    #[validate(length(min = 1, message = "Please add a product and a description"))]
    pub description: String,
}

/// Partial update; omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTicket {
    pub product: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}
