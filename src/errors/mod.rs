use thiserror::Error;

/// Rejected search parameters, raised while building a `SearchQuery`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unsupported format '{0}', expected one of: {1}")]
    UnsupportedFormat(String, String),

    #[error("date '{0}' is not formatted as YYYY-MM-DD")]
    MalformedDate(String),

    #[error("begin date {begin} is after end date {end}")]
    InvertedDateRange { begin: String, end: String },

    #[error("search keywords must be alphanumeric (and spaces): '{0}'")]
    InvalidKeywords(String),
}

/// A page did not match the markup pattern expected for one of its fields
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("missing {0}")]
    MissingElement(&'static str),

    #[error("malformed {field}: {detail}")]
    Malformed { field: &'static str, detail: String },

    #[error("sideboard marker found {0} times, expected exactly once")]
    SideboardMarker(usize),
}

impl ExtractionError {
    pub fn malformed(field: &'static str, detail: impl Into<String>) -> Self {
        Self::Malformed {
            field,
            detail: detail.into(),
        }
    }
}

/// The persisted tournament id list cannot be read or resumed from
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("non-integer tournament id '{0}' in id file")]
    MalformedEntry(String),

    #[error("tournament id file is empty, rebuild it first")]
    EmptyIdList,

    #[error("tournament {0} page has no 'Date:' line to resume from")]
    MissingResumeDate(u64),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("'{0}' is not a tournament id")]
pub struct InvalidTournamentId(pub String);

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str, id: &str) -> String {
    format!("Failed to parse {} {}", data_type, id)
}

/// Add context to storage errors
pub fn storage_context(operation: &str, path: &std::path::Path) -> String {
    format!("Failed to {} {}", operation, path.display())
}
