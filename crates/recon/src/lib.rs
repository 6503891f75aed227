//! `portaria-recon` — import reconciliation engine for the delivery registry.
//!
//! Pure engine crate: receives decoded rows, returns the merged collection
//! plus added/updated/skipped counters. No CLI or IO dependencies.

pub mod decode;
pub mod engine;
pub mod error;
pub mod mapper;
pub mod model;
pub mod validate;

pub use decode::{decode_rows, sniff_delimiter};
pub use engine::{reconcile_batch, reconcile_residents};
pub use error::ImportError;
pub use mapper::{map_resident_row, map_row};
pub use model::{Candidate, ReconcileOutcome, ResidentCandidate};
pub use validate::{is_valid_delivery, validate_delivery, validate_resident, RowRejection};
