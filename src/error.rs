use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeline API error: {0}")]
    TimelineApi(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Why a single ingestion cycle stopped early.
///
/// None of these are fatal to the process: the loop logs them and tries
/// again on the next tick.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("failed to read cursor: {0}")]
    CursorRead(#[source] AppError),

    #[error("failed to fetch timeline: {0}")]
    Fetch(#[source] AppError),

    #[error("failed to persist item {sequence_id}: {source}")]
    Persist {
        sequence_id: i64,
        #[source]
        source: AppError,
    },
}
