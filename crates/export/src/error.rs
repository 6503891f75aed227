use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum ExportError {
    /// Nothing to export at all.
    NoRecords,
    /// No pending deliveries for the grouped report.
    NoPending,
    /// CSV encoding failure.
    Csv(String),
    /// PDF assembly failure.
    Pdf(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRecords => write!(f, "there are no records to export"),
            Self::NoPending => write!(f, "there are no pending deliveries to export"),
            Self::Csv(msg) => write!(f, "CSV encoding error: {msg}"),
            Self::Pdf(msg) => write!(f, "PDF encoding error: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}
