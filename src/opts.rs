use std::time::Duration;

/// Options that control how a transcription request is performed.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI is responsible for mapping user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (APIs, tests, batch jobs) can construct options programmatically
///
/// One value is built per run and reused unchanged for every file.
#[derive(Debug, Clone)]
pub struct TranscribeOpts {
    /// Deepgram model identifier (e.g. `"nova-3"`, `"nova-2"`).
    pub model: String,

    /// Language code (e.g. `"en"`, `"es"`).
    pub language: String,

    /// Whether the provider should format currency, phone numbers, etc.
    pub smart_format: bool,

    /// Whether the provider should add punctuation.
    pub punctuate: bool,

    /// Whether the provider should group words into paragraphs.
    pub paragraphs: bool,

    /// Whether the provider should segment the audio into utterances.
    pub utterances: bool,

    /// Whether the provider should attribute words to speakers.
    pub diarize: bool,

    /// Upper bound on a single provider call, applied at the transport level.
    pub timeout: Duration,

    /// Retry budget for transient transport failures. A structured provider
    /// error (non-2xx) is never retried.
    pub max_retries: u32,
}

impl Default for TranscribeOpts {
    fn default() -> Self {
        Self {
            model: "nova-3".to_string(),
            language: "en".to_string(),
            smart_format: true,
            punctuate: true,
            paragraphs: true,
            utterances: true,
            diarize: false,
            timeout: Duration::from_secs(600),
            max_retries: 3,
        }
    }
}
