//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range | Domain    | Description                               |
//! |-------|-----------|-------------------------------------------|
//! | 0     | Universal | Success                                   |
//! | 1     | Universal | General error (unspecified)               |
//! | 2     | Universal | CLI usage error (bad args)                |
//! | 3     | Universal | File I/O error                            |
//! | 10-19 | registry  | Import/export/record-level codes          |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// File I/O error - cannot read the import file or write an artifact.
pub const EXIT_IO: u8 = 3;

/// Structural import error - empty, headerless or undecodable input.
/// Row-level failures never use this; they are counted and reported.
pub const EXIT_IMPORT_STRUCTURAL: u8 = 10;

/// Nothing matches the export predicate (no records, or no pending ones).
pub const EXIT_EXPORT_EMPTY: u8 = 11;

/// No record with the given identifier.
pub const EXIT_NOT_FOUND: u8 = 12;

/// Rejected status transition (already delivered).
pub const EXIT_INVALID_TRANSITION: u8 = 13;

/// A mapping file exists but does not parse.
pub const EXIT_STORE_CORRUPT: u8 = 14;
