use chrono::NaiveDate;

/// Errors surfaced by store queries and the page pipelines
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    /// No rows exist for the requested series. Shown as an empty state.
    #[error("No observations found for series: {0}")]
    EmptyRange(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Unknown series: {0}")]
    UnknownSeries(String),

    /// A primary id equal to a companion label would overwrite that column
    #[error("Series id {0} collides with a companion column label")]
    LabelConflict(String),

    #[error("Malformed date in store: {0}")]
    MalformedDate(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MarketError {
    /// Whether the current interaction must be aborted.
    ///
    /// Store and output failures are fatal; everything else is rendered as a
    /// message on the page that triggered it.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MarketError::Database(_) | MarketError::Io(_) | MarketError::Serialization(_)
        )
    }
}
