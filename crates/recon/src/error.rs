use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum ImportError {
    /// Empty input, or a header row with no data rows beneath it.
    Empty,
    /// Header row contains none of the expected columns.
    NoKnownColumns,
    /// Underlying CSV decode error.
    Csv(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "import file has no data rows"),
            Self::NoKnownColumns => {
                write!(f, "header row does not contain any recognized column")
            }
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
        }
    }
}

impl std::error::Error for ImportError {}
