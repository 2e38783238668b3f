//! Sequential batch orchestration.
//!
//! Files are processed one at a time, in the scanner's sorted order. Each
//! file moves through a tiny state machine: skipped when its transcript
//! already exists, succeeded when the provider call and the plain-transcript
//! write both land, failed otherwise. A failure never aborts the batch.

use std::fs;
use std::path::Path;

use tracing::{error, info};

use crate::media::MediaFile;
use crate::opts::TranscribeOpts;
use crate::provider::{TranscribeError, TranscriptionProvider};
use crate::tracker::is_transcribed;
use crate::writer::write_artifacts;

/// Terminal state of one file within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// The plain transcript already existed; nothing was done.
    Skipped,
    /// Transcribed and written.
    Succeeded,
    /// The provider call or the plain-transcript write failed.
    Failed,
}

/// Counts accumulated across one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub successful: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.successful + self.skipped + self.failed
    }

    fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Skipped => self.skipped += 1,
            FileOutcome::Succeeded => self.successful += 1,
            FileOutcome::Failed => self.failed += 1,
        }
    }
}

/// Process every file in order and return the accumulated counts.
///
/// Retries happen only inside the provider's transport layer; at this level
/// each file gets exactly one attempt, and processing always continues to
/// the next file.
pub fn run_batch<P: TranscriptionProvider>(
    provider: &P,
    files: &[MediaFile],
    opts: &TranscribeOpts,
    output_dir: impl AsRef<Path>,
) -> RunSummary {
    let output_dir = output_dir.as_ref();
    let mut summary = RunSummary::default();

    for (index, media) in files.iter().enumerate() {
        info!(
            file = %media.file_name(),
            index = index + 1,
            total = files.len(),
            "processing"
        );
        summary.record(process_file(provider, media, opts, output_dir));
    }

    summary
}

fn process_file<P: TranscriptionProvider>(
    provider: &P,
    media: &MediaFile,
    opts: &TranscribeOpts,
    output_dir: &Path,
) -> FileOutcome {
    if is_transcribed(media, output_dir) {
        info!(file = %media.file_name(), "already transcribed, skipping");
        return FileOutcome::Skipped;
    }

    match transcribe_one(provider, media, opts, output_dir) {
        Ok(()) => {
            info!(file = %media.file_name(), "transcribed");
            FileOutcome::Succeeded
        }
        Err(TranscribeError::Provider { status, body }) => {
            error!(file = %media.file_name(), status, body = %body, "provider rejected the request");
            FileOutcome::Failed
        }
        Err(TranscribeError::Unexpected(message)) => {
            error!(file = %media.file_name(), error = %message, "transcription failed");
            FileOutcome::Failed
        }
    }
}

fn transcribe_one<P: TranscriptionProvider>(
    provider: &P,
    media: &MediaFile,
    opts: &TranscribeOpts,
    output_dir: &Path,
) -> Result<(), TranscribeError> {
    let size_mib = media.size_bytes() as f64 / (1024.0 * 1024.0);
    info!(file = %media.file_name(), size_mib = format!("{size_mib:.1}"), model = %opts.model, "transcribing");

    // The whole file goes to the provider in one request body.
    let audio = fs::read(media.path()).map_err(|err| {
        TranscribeError::unexpected(format!("failed to read {}: {err}", media.path().display()))
    })?;

    let response = provider.transcribe(&audio, opts)?;

    if let Some(alternative) = response.primary_alternative() {
        info!(
            file = %media.file_name(),
            duration_secs = response.metadata.duration,
            confidence = alternative.confidence,
            "provider result received"
        );
    }

    write_artifacts(media, &response, output_dir)
        .map_err(|err| TranscribeError::unexpected(format!("{err:#}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{
        Alternative, Channel, ResponseMetadata, ResponseResults, TranscriptionResponse, Word,
    };
    use std::cell::RefCell;

    fn response(transcript: &str) -> TranscriptionResponse {
        TranscriptionResponse {
            metadata: ResponseMetadata {
                request_id: None,
                created: None,
                duration: 4.2,
                channels: 1,
            },
            results: ResponseResults {
                channels: vec![Channel {
                    alternatives: vec![Alternative {
                        transcript: transcript.to_string(),
                        confidence: 0.9,
                        words: vec![Word {
                            word: transcript.to_string(),
                            start: 0.0,
                            end: 1.0,
                            confidence: Some(0.9),
                            punctuated_word: None,
                        }],
                    }],
                }],
                utterances: None,
            },
        }
    }

    /// Scripted provider: pops one canned result per call.
    struct FakeProvider {
        script: RefCell<Vec<Result<TranscriptionResponse, TranscribeError>>>,
        calls: RefCell<usize>,
    }

    impl FakeProvider {
        fn new(script: Vec<Result<TranscriptionResponse, TranscribeError>>) -> Self {
            Self {
                script: RefCell::new(script),
                calls: RefCell::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.borrow()
        }
    }

    impl TranscriptionProvider for FakeProvider {
        fn transcribe(
            &self,
            _audio: &[u8],
            _opts: &TranscribeOpts,
        ) -> Result<TranscriptionResponse, TranscribeError> {
            *self.calls.borrow_mut() += 1;
            self.script.borrow_mut().remove(0)
        }
    }

    fn fixture_files(dir: &Path, names: &[&str]) -> Vec<MediaFile> {
        for name in names {
            std::fs::write(dir.join(name), b"bytes").expect("write fixture");
        }
        crate::media::scan_media_files(dir).expect("scan fixtures")
    }

    #[test]
    fn batch_counts_success_skip_and_failure() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("transcripts");
        std::fs::create_dir_all(&out)?;
        let files = fixture_files(dir.path(), &["a.mp3", "b.mp3", "c.mp3"]);

        // b is already done.
        std::fs::write(out.join("b_transcript.txt"), b"done")?;

        let provider = FakeProvider::new(vec![
            Ok(response("first")),
            Err(TranscribeError::Provider {
                status: 400,
                body: "bad audio".to_string(),
            }),
        ]);

        let summary = run_batch(&provider, &files, &TranscribeOpts::default(), &out);

        assert_eq!(
            summary,
            RunSummary {
                successful: 1,
                skipped: 1,
                failed: 1,
            }
        );
        assert_eq!(summary.total(), 3);
        // The skipped file never reached the provider.
        assert_eq!(provider.calls(), 2);
        Ok(())
    }

    #[test]
    fn provider_failure_does_not_stop_the_batch() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("transcripts");
        std::fs::create_dir_all(&out)?;
        let files = fixture_files(dir.path(), &["a.mp3", "b.mp3"]);

        let provider = FakeProvider::new(vec![
            Err(TranscribeError::unexpected("connection reset")),
            Ok(response("second")),
        ]);

        let summary = run_batch(&provider, &files, &TranscribeOpts::default(), &out);

        assert_eq!(summary.successful, 1);
        assert_eq!(summary.failed, 1);
        assert!(out.join("b_transcript.txt").is_file());
        assert!(!out.join("a_transcript.txt").exists());
        Ok(())
    }

    #[test]
    fn rerun_after_success_skips_everything() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("transcripts");
        std::fs::create_dir_all(&out)?;
        let files = fixture_files(dir.path(), &["a.mp3", "b.mp3"]);

        let provider = FakeProvider::new(vec![Ok(response("one")), Ok(response("two"))]);
        let first = run_batch(&provider, &files, &TranscribeOpts::default(), &out);
        assert_eq!(first.successful, 2);

        let provider = FakeProvider::new(Vec::new());
        let second = run_batch(&provider, &files, &TranscribeOpts::default(), &out);

        assert_eq!(
            second,
            RunSummary {
                successful: 0,
                skipped: 2,
                failed: 0,
            }
        );
        assert_eq!(provider.calls(), 0);
        Ok(())
    }

    #[test]
    fn unreadable_file_counts_as_failed() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("transcripts");
        std::fs::create_dir_all(&out)?;
        let files = fixture_files(dir.path(), &["a.mp3"]);

        // Remove the media file after discovery so the read fails.
        std::fs::remove_file(dir.path().join("a.mp3"))?;

        let provider = FakeProvider::new(vec![Ok(response("unused"))]);
        let summary = run_batch(&provider, &files, &TranscribeOpts::default(), &out);

        assert_eq!(summary.failed, 1);
        assert_eq!(provider.calls(), 0);
        Ok(())
    }
}
