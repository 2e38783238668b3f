use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File extensions we hand to the provider, lowercase without the dot.
///
/// Deepgram accepts raw container bytes for all of these, so we don't
/// decode or demux anything locally.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp4", "mp3", "wav", "m4a", "flac", "aac"];

/// An immutable reference to one candidate media file.
///
/// Discovered once by [`scan_media_files`], read once when transcribing,
/// never mutated. The derived fields exist so downstream code doesn't
/// re-interrogate the filesystem:
/// - `stem` names the output artifacts (`<stem>_transcript.txt`, ...)
/// - `size_bytes` feeds the per-file progress log line
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    path: PathBuf,
    stem: String,
    size_bytes: u64,
}

impl MediaFile {
    /// Build a `MediaFile` from a path, capturing its stem and size.
    ///
    /// Fails if the file is not stat-able. Paths without a UTF-8 stem are
    /// handled lossily; artifact names stay deterministic either way.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let meta = fs::metadata(&path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path,
            stem,
            size_bytes: meta.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Filename without its extension.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Filename including its extension, for user-facing messages.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// List the supported media files directly inside `input_dir`.
///
/// Behavior:
/// - extension match is ASCII case-insensitive (`clip.MP3` counts)
/// - no recursion into subdirectories
/// - results are sorted lexicographically by filename so repeated runs
///   process files in the same order
///
/// A missing or non-directory path is a run-fatal [`Error::NotFound`].
pub fn scan_media_files(input_dir: impl AsRef<Path>) -> Result<Vec<MediaFile>> {
    let input_dir = input_dir.as_ref();
    if !input_dir.is_dir() {
        return Err(Error::NotFound(input_dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if !has_supported_extension(&path) {
            continue;
        }
        files.push(MediaFile::new(path)?);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"x").expect("write fixture");
    }

    #[test]
    fn scan_filters_by_extension_case_insensitively() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), "a.mp3");
        touch(dir.path(), "b.MP4");
        touch(dir.path(), "c.txt");
        touch(dir.path(), "d.flac");
        touch(dir.path(), "noext");

        let files = scan_media_files(dir.path())?;
        let names: Vec<String> = files.iter().map(|f| f.file_name()).collect();
        assert_eq!(names, vec!["a.mp3", "b.MP4", "d.flac"]);
        Ok(())
    }

    #[test]
    fn scan_sorts_by_filename() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), "zebra.wav");
        touch(dir.path(), "alpha.wav");
        touch(dir.path(), "mango.wav");

        let files = scan_media_files(dir.path())?;
        let names: Vec<String> = files.iter().map(|f| f.file_name()).collect();
        assert_eq!(names, vec!["alpha.wav", "mango.wav", "zebra.wav"]);
        Ok(())
    }

    #[test]
    fn scan_does_not_recurse() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::create_dir(dir.path().join("nested"))?;
        touch(&dir.path().join("nested"), "inner.mp3");
        touch(dir.path(), "outer.mp3");

        let files = scan_media_files(dir.path())?;
        let names: Vec<String> = files.iter().map(|f| f.file_name()).collect();
        assert_eq!(names, vec!["outer.mp3"]);
        Ok(())
    }

    #[test]
    fn scan_missing_dir_is_not_found() {
        let err = scan_media_files("/definitely/not/a/dir").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn media_file_exposes_stem_and_size() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("episode_01.m4a"), b"abcdef")?;

        let media = MediaFile::new(dir.path().join("episode_01.m4a"))?;
        assert_eq!(media.stem(), "episode_01");
        assert_eq!(media.file_name(), "episode_01.m4a");
        assert_eq!(media.size_bytes(), 6);
        Ok(())
    }
}
