//! Web layer for the fuel station directory.
//!
//! Provides the HTTP endpoints for stations, price reports and store
//! diagnostics.

mod dto;
mod error;
mod routes;
mod state;

pub use dto::*;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
