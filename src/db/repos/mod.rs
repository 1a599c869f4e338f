mod tickets;
mod users;

pub use tickets::TicketRepo;
pub use users::UserRepo;
