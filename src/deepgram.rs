use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::error::Result;
use crate::opts::TranscribeOpts;
use crate::provider::{TranscribeError, TranscriptionProvider};
use crate::response::TranscriptionResponse;

const DEFAULT_BASE_URL: &str = "https://api.deepgram.com";

/// Production [`TranscriptionProvider`] backed by Deepgram's pre-recorded
/// `/v1/listen` endpoint.
///
/// One client is built per run and reused for every file. The per-call
/// timeout is baked into the underlying HTTP client at construction time;
/// the retry budget is applied per call, to transport failures only.
pub struct DeepgramClient {
    http: Client,
    api_key: String,
    base_url: String,
    max_retries: u32,
}

impl DeepgramClient {
    /// Build a client with the request timeout and retry budget from `opts`.
    pub fn new(api_key: impl Into<String>, opts: &TranscribeOpts) -> Result<Self> {
        Self::with_base_url(api_key, opts, DEFAULT_BASE_URL)
    }

    /// Same as [`DeepgramClient::new`] but pointing at a different host.
    ///
    /// Tests use this to aim at a local fixture server; it also covers
    /// self-hosted Deepgram deployments.
    pub fn with_base_url(
        api_key: impl Into<String>,
        opts: &TranscribeOpts,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("batchscribe/", env!("CARGO_PKG_VERSION")))
            .timeout(opts.timeout)
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries: opts.max_retries,
        })
    }

    fn listen_url(&self) -> String {
        format!("{}/v1/listen", self.base_url)
    }
}

impl TranscriptionProvider for DeepgramClient {
    fn transcribe(
        &self,
        audio: &[u8],
        opts: &TranscribeOpts,
    ) -> std::result::Result<TranscriptionResponse, TranscribeError> {
        let url = self.listen_url();
        let query = listen_query(opts);

        // Transport failures (connect, timeout, mid-body drops) are retried
        // up to the budget. A reply with any HTTP status is final: a non-2xx
        // is a structured provider error, not a transient fault.
        let mut attempt = 0;
        let response = loop {
            let result = self
                .http
                .post(&url)
                .header("Authorization", format!("Token {}", self.api_key))
                .header("Content-Type", "application/octet-stream")
                .query(&query)
                .body(audio.to_vec())
                .send();

            match result {
                Ok(response) => break response,
                Err(err) if attempt < self.max_retries => {
                    attempt += 1;
                    warn!(attempt, max_retries = self.max_retries, error = %err, "transport failure, retrying");
                }
                Err(err) => {
                    return Err(TranscribeError::unexpected(format!(
                        "transport failure after {} attempt(s): {err}",
                        attempt + 1
                    )));
                }
            }
        };

        let status = response.status();
        debug!(%status, "provider replied");

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(TranscribeError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .map_err(|err| TranscribeError::unexpected(format!("failed to read provider response: {err}")))?;

        serde_json::from_str(&body).map_err(|err| {
            TranscribeError::unexpected(format!("malformed provider response: {err}"))
        })
    }
}

/// Query parameters for `/v1/listen`, derived from the shared options.
///
/// Kept as a standalone function so the request shape is testable without a
/// network.
fn listen_query(opts: &TranscribeOpts) -> Vec<(&'static str, String)> {
    vec![
        ("model", opts.model.clone()),
        ("language", opts.language.clone()),
        ("smart_format", opts.smart_format.to_string()),
        ("punctuate", opts.punctuate.to_string()),
        ("paragraphs", opts.paragraphs.to_string()),
        ("utterances", opts.utterances.to_string()),
        ("diarize", opts.diarize.to_string()),
    ]
}
