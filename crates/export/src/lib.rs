//! `portaria-export` — stateless renderers over a delivery snapshot.
//!
//! Three output encodings: full-fidelity flat CSV, the pending-only table
//! grouped by block (CSV), and the same grouped table as a printable PDF.
//! All functions return in-memory payloads; writing files is the caller's
//! job.

pub mod error;
pub mod flat;
pub mod grouped;
pub mod pdf;

pub use error::ExportError;
pub use flat::{render_flat, render_residents_flat};
pub use grouped::{grouped_to_csv, render_grouped_pending, GroupedTable};
pub use pdf::grouped_to_pdf;
