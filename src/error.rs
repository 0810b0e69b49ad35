use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    /// The scoreboard request could not complete. This is the only failure shown on the page.
    #[error("Failed to load games: {0}")]
    Network(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Lookup for event {id} failed: {reason}")]
    BackfillLookup { id: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, BoardError>;
