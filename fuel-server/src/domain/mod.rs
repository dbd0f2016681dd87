//! Domain types for the fuel station directory.
//!
//! Records are validated before they reach the store, so code that
//! holds a validated `Station` or `Price` can trust its constraints.

mod error;
mod price;
mod record_id;
mod station;

pub use error::ValidationError;
pub use price::Price;
pub use record_id::{InvalidRecordId, RecordId};
pub use station::Station;
