mod tickets;

use std::sync::Arc;

pub use tickets::{TicketError, TicketService};

use crate::db::DbPool;

/// Service layer aggregate, constructed once from the database pool.
#[derive(Clone)]
pub struct Services {
    pub tickets: TicketService,
}

impl Services {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            tickets: TicketService::new(db),
        }
    }
}
