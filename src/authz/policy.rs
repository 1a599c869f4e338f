//! Pure access decisions for ticket operations.
//!
//! The policy is a function of the principal, the target ticket (absent for
//! collection operations and for ids that resolved to nothing), and the
//! requested action. It performs no I/O; callers load the ticket first and
//! map the outcome to their transport's error vocabulary.

use crate::models::{Ticket, User};

/// Operation requested against the ticket collection or a single ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketAction {
    /// List every ticket in the system.
    ListAll,
    /// List the caller's own tickets.
    ListOwn,
    Create,
    Read,
    Update,
    Delete,
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// The principal may not perform this action on this ticket.
    Denied,
    /// The target ticket does not exist. Reported before any ownership
    /// check, so non-existence is visible to every caller alike.
    UnknownTicket,
}

/// Evaluate whether `principal` may perform `action` on `ticket`.
///
/// Admins bypass ownership for `Read` and `Update` but not for `Delete`:
/// only the owner may delete a ticket.
pub fn evaluate(principal: &User, ticket: Option<&Ticket>, action: TicketAction) -> Access {
    match action {
        TicketAction::ListAll => {
            if principal.is_admin {
                Access::Granted
            } else {
                Access::Denied
            }
        }
        TicketAction::ListOwn | TicketAction::Create => Access::Granted,
        TicketAction::Read | TicketAction::Update => match ticket {
            None => Access::UnknownTicket,
            Some(t) if is_owner(principal, t) || principal.is_admin => Access::Granted,
            Some(_) => Access::Denied,
        },
        TicketAction::Delete => match ticket {
            None => Access::UnknownTicket,
            Some(t) if is_owner(principal, t) => Access::Granted,
            Some(_) => Access::Denied,
        },
    }
}

fn is_owner(principal: &User, ticket: &Ticket) -> bool {
    ticket.owner_id == principal.id
}
