mod policy;

pub use policy::{Access, TicketAction, evaluate};
