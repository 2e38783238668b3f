use std::path::PathBuf;

use thiserror::Error;

/// Batchscribe's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Batchscribe's crate-wide error type for run-fatal failures.
///
/// These are the only errors that abort a run before (or without) any file
/// processing. Per-file failures are modeled separately as
/// [`crate::provider::TranscribeError`] so the batch can keep going.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// No API key could be resolved from flags or the environment.
    #[error("no Deepgram API key provided (use --api-key or set DEEPGRAM_API_KEY)")]
    MissingApiKey,

    /// The input directory does not exist or is not a directory.
    #[error("input directory not found: {0}")]
    NotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
