//! `portaria-core` — canonical record types for the delivery registry.
//!
//! Pure data crate: record shapes, the closed status/block enumerations,
//! timestamp parsing and the delivery lifecycle. No IO dependencies.

pub mod delivery;
pub mod headers;
pub mod resident;
pub mod time;

pub use delivery::{Block, Delivery, DeliveryEdit, DeliveryError, Status};
pub use resident::{Resident, ResidentEdit};
pub use time::{format_timestamp, is_valid_date, parse_timestamp};
