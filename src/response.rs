//! Typed model of the Deepgram transcription payload.
//!
//! This is a deliberately *closed* contract: we name every field we consume
//! or re-emit, and the JSON artifact is produced by serializing this tree
//! back out. Fields Deepgram adds that we don't model are dropped on
//! deserialization, which keeps the dump's shape a documented, versioned
//! contract rather than a mirror of whatever the provider sent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A complete transcription result for one media file.
///
/// Owned transiently while that file is being processed; nothing is cached
/// across files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub metadata: ResponseMetadata,
    pub results: ResponseResults,
}

impl TranscriptionResponse {
    /// The first channel's first alternative, when present.
    ///
    /// All single-channel consumers (the plain transcript, the bucketed
    /// transcript, the confidence log line) read through this accessor.
    pub fn primary_alternative(&self) -> Option<&Alternative> {
        self.results
            .channels
            .first()
            .and_then(|channel| channel.alternatives.first())
    }
}

/// Request-level metadata reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Provider-assigned request identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// When the provider produced the result. Serialized as ISO-8601.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Audio duration in seconds.
    pub duration: f64,

    /// Number of audio channels the provider saw.
    #[serde(default)]
    pub channels: u32,
}

/// The transcription proper: one entry per audio channel, plus optional
/// utterance segmentation when it was requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseResults {
    pub channels: Vec<Channel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utterances: Option<Vec<Utterance>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    /// Candidate transcriptions, best first.
    pub alternatives: Vec<Alternative>,
}

/// One candidate transcription of a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alternative {
    /// The full transcript text.
    pub transcript: String,

    /// Overall confidence in `[0.0, 1.0]`.
    pub confidence: f64,

    /// Timed words, in non-decreasing `start` order.
    #[serde(default)]
    pub words: Vec<Word>,
}

/// A single timed word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    /// Raw token as recognized.
    pub word: String,

    /// Start offset in seconds.
    pub start: f64,

    /// End offset in seconds.
    pub end: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Punctuated/capitalized rendering, present when `punctuate` was on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punctuated_word: Option<String>,
}

impl Word {
    /// The text this word contributes to human-readable output:
    /// the punctuated form when available, the raw token otherwise.
    pub fn display_text(&self) -> &str {
        self.punctuated_word.as_deref().unwrap_or(&self.word)
    }
}

/// An utterance-level segment (requested via `utterances=true`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utterance {
    pub start: f64,
    pub end: f64,
    pub transcript: String,
    pub confidence: f64,
}
