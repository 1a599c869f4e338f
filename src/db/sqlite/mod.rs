mod common;
mod tickets;
mod users;

pub use tickets::SqliteTicketRepo;
pub use users::SqliteUserRepo;
