//! Artifact emission for one transcribed file.
//!
//! Three artifacts are produced per input, in a fixed order:
//! 1. `<stem>_transcript.txt` — plain transcript (required; a failure here
//!    fails the file)
//! 2. `<stem>_timestamped.txt` — transcript chunked into time buckets
//!    (best-effort; absence of word timings or a write failure degrades to
//!    a warning)
//! 3. `<stem>_full_response.json` — the full typed response, pretty-printed
//!    (best-effort, same policy)

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::media::MediaFile;
use crate::response::{TranscriptionResponse, Word};
use crate::tracker::transcript_path;

/// Minimum gap (seconds) between a bucket's start and a word before that
/// word opens a new bucket. Buckets are *at least* this long, never
/// fixed-width: the window restarts at each marker.
const BUCKET_GAP_SECONDS: f64 = 10.0;

const HEADER_RULE_WIDTH: usize = 80;

/// Write all artifacts for `media` under `output_dir`.
///
/// The plain transcript is the completion marker, so its write must succeed
/// for the file to count as transcribed; the other two artifacts are
/// individually best-effort and only log warnings on failure.
pub fn write_artifacts(
    media: &MediaFile,
    response: &TranscriptionResponse,
    output_dir: impl AsRef<Path>,
) -> Result<()> {
    let output_dir = output_dir.as_ref();

    let alternative = response
        .primary_alternative()
        .context("provider response contains no transcription alternatives")?;

    let plain_path = transcript_path(media, output_dir);
    fs::write(
        &plain_path,
        plain_transcript(&media.file_name(), &alternative.transcript),
    )
    .with_context(|| format!("failed to write plain transcript: {}", plain_path.display()))?;
    info!(path = %plain_path.display(), "saved plain transcript");

    if alternative.words.is_empty() {
        warn!(file = %media.file_name(), "no word-level timestamps in response, skipping timestamped transcript");
    } else if let Err(err) = write_timestamped(media, &alternative.words, output_dir) {
        warn!(file = %media.file_name(), error = %err, "could not create timestamped transcript");
    }

    if let Err(err) = write_full_response(media, response, output_dir) {
        warn!(file = %media.file_name(), error = %err, "could not save full JSON response");
    }

    Ok(())
}

fn plain_transcript(file_name: &str, transcript: &str) -> String {
    format!(
        "Transcript: {file_name}\n{}\n\n{transcript}",
        "=".repeat(HEADER_RULE_WIDTH)
    )
}

fn write_timestamped(media: &MediaFile, words: &[Word], output_dir: &Path) -> Result<()> {
    let path = output_dir.join(format!("{}_timestamped.txt", media.stem()));
    let mut body = format!(
        "Timestamped Transcript: {}\n{}\n\n",
        media.file_name(),
        "=".repeat(HEADER_RULE_WIDTH)
    );
    body.push_str(&bucket_words(words));

    fs::write(&path, body)
        .with_context(|| format!("failed to write timestamped transcript: {}", path.display()))?;
    info!(path = %path.display(), "saved timestamped transcript");
    Ok(())
}

fn write_full_response(
    media: &MediaFile,
    response: &TranscriptionResponse,
    output_dir: &Path,
) -> Result<()> {
    let path = output_dir.join(format!("{}_full_response.json", media.stem()));
    let file = fs::File::create(&path)
        .with_context(|| format!("failed to create JSON dump: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), response)
        .with_context(|| format!("failed to serialize JSON dump: {}", path.display()))?;
    info!(path = %path.display(), "saved full JSON response");
    Ok(())
}

/// Render timed words into marker-prefixed lines.
///
/// Walk the words in order, keeping a running bucket start (initially 0).
/// A word whose start is at least [`BUCKET_GAP_SECONDS`] past the bucket
/// start flushes the buffered line, emits a `[MM:SS]` marker stamped with
/// *that word's* start, and restarts the window there. The opening bucket
/// gets its marker too, stamped with its own start. The final buffer
/// flushes without a trailing blank line.
fn bucket_words(words: &[Word]) -> String {
    let mut out = String::new();
    let mut bucket_start = 0.0f64;
    let mut line_buffer: Vec<&str> = Vec::new();
    let mut marker_written = false;

    for word in words {
        if word.start - bucket_start >= BUCKET_GAP_SECONDS {
            if !line_buffer.is_empty() {
                out.push_str(&line_buffer.join(" "));
                out.push_str("\n\n");
                line_buffer.clear();
            }
            out.push_str(&format_marker(word.start));
            out.push(' ');
            bucket_start = word.start;
            marker_written = true;
        } else if !marker_written {
            out.push_str(&format_marker(bucket_start));
            out.push(' ');
            marker_written = true;
        }

        line_buffer.push(word.display_text());
    }

    if !line_buffer.is_empty() {
        out.push_str(&line_buffer.join(" "));
        out.push('\n');
    }

    out
}

/// Format a bucket marker as `[MM:SS]` (floor of minutes and seconds).
fn format_marker(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("[{minutes:02}:{secs:02}]")
}
