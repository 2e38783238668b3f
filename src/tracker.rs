use std::path::{Path, PathBuf};

use crate::media::MediaFile;

/// Expected path of the plain transcript for `media` under `output_dir`.
///
/// The plain transcript doubles as the resumability marker: its presence is
/// the one and only signal that a file was already processed.
pub fn transcript_path(media: &MediaFile, output_dir: impl AsRef<Path>) -> PathBuf {
    output_dir
        .as_ref()
        .join(format!("{}_transcript.txt", media.stem()))
}

/// Whether `media` already has a plain transcript under `output_dir`.
///
/// Pure predicate over the filesystem, no caching. It is called both for
/// the pre-run status listing and for the skip decision during processing,
/// and must answer the same both times.
pub fn is_transcribed(media: &MediaFile, output_dir: impl AsRef<Path>) -> bool {
    transcript_path(media, output_dir).is_file()
}
