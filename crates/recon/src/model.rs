use serde::Serialize;

use portaria_core::{Delivery, Resident};

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

/// A candidate delivery decoded from one imported row.
///
/// Everything but the id is optional and carried as the raw string from the
/// file: the reconciler decides per field whether the value replaces the
/// stored one or falls back to it.
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    pub id: String,
    pub resident_name: Option<String>,
    pub apartment: Option<String>,
    pub block: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub delivered_at: Option<String>,
    pub picked_up_by: Option<String>,
}

/// A candidate resident decoded from one imported row.
#[derive(Debug, Clone, Default)]
pub struct ResidentCandidate {
    pub id: String,
    pub name: Option<String>,
    pub apartment: Option<String>,
    pub block: Option<String>,
    pub document: Option<String>,
    pub phone: Option<String>,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of merging one import batch into a collection.
///
/// `skipped` counts rows dropped for any reason: missing id, failed
/// validation after merge, or failed construction on insert.
#[derive(Debug, Serialize)]
pub struct ReconcileOutcome<T> {
    pub records: Vec<T>,
    pub added: u32,
    pub updated: u32,
    pub skipped: u32,
}

pub type DeliveryOutcome = ReconcileOutcome<Delivery>;
pub type ResidentOutcome = ReconcileOutcome<Resident>;
