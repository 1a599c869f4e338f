mod error;
pub mod health;
pub mod tickets;

pub use error::{ApiError, ErrorDetail, ErrorResponse};
