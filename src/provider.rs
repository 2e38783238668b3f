use thiserror::Error;

use crate::opts::TranscribeOpts;
use crate::response::TranscriptionResponse;

/// How a single provider call can fail.
///
/// Both variants are recoverable at the batch level: the orchestrator counts
/// the file as failed and moves on. Neither is allowed to abort the run.
#[derive(Debug, Error)]
pub enum TranscribeError {
    /// The provider answered with a structured error (non-2xx).
    #[error("provider error (status {status}): {body}")]
    Provider { status: u16, body: String },

    /// Anything else: file I/O, transport exhaustion, a response body we
    /// couldn't make sense of.
    #[error("{0}")]
    Unexpected(String),
}

impl TranscribeError {
    pub(crate) fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}

/// Pluggable transcription capability used by [`crate::batch::run_batch`].
///
/// A provider turns one file's raw bytes plus the shared request options
/// into a [`TranscriptionResponse`]. The production implementation is
/// [`crate::deepgram::DeepgramClient`]; tests substitute a fake so the
/// orchestrator and writer run without network access.
pub trait TranscriptionProvider {
    /// Perform one blocking transcription call.
    ///
    /// Implementations own their transport-level timeout and retry policy;
    /// callers never retry.
    fn transcribe(
        &self,
        audio: &[u8],
        opts: &TranscribeOpts,
    ) -> Result<TranscriptionResponse, TranscribeError>;
}
