use std::fs;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use batchscribe::batch::run_batch;
use batchscribe::deepgram::DeepgramClient;
use batchscribe::logging;
use batchscribe::media::{SUPPORTED_EXTENSIONS, scan_media_files};
use batchscribe::opts::TranscribeOpts;
use batchscribe::tracker::is_transcribed;

#[derive(Parser, Debug)]
#[command(name = "batchscribe")]
#[command(about = "Transcribe a directory of audio/video files with Deepgram")]
struct Params {
    /// Input directory containing audio/video files.
    #[arg(short = 'i', long = "input-dir", default_value = ".")]
    pub input_dir: PathBuf,

    /// Output directory for transcripts (default: INPUT_DIR/transcripts).
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Deepgram model to use.
    #[arg(short = 'm', long = "model", default_value = "nova-3")]
    pub model: String,

    /// Language code.
    #[arg(short = 'l', long = "language", default_value = "en")]
    pub language: String,

    /// Deepgram API key (can also use the DEEPGRAM_API_KEY env var).
    #[arg(long = "api-key")]
    pub api_key: Option<String>,
}

fn main() -> Result<()> {
    // A local .env may pre-populate the environment before flags are read.
    let _ = dotenvy::dotenv();
    logging::init();

    let params = Params::parse();

    let Some(api_key) = resolve_api_key(&params) else {
        bail!(batchscribe::Error::MissingApiKey);
    };

    let output_dir = params
        .output_dir
        .clone()
        .unwrap_or_else(|| params.input_dir.join("transcripts"));

    let files = scan_media_files(&params.input_dir)?;
    if files.is_empty() {
        println!(
            "No media files found in {} (supported: {})",
            params.input_dir.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        );
        return Ok(());
    }

    fs::create_dir_all(&output_dir)?;

    println!("Input directory:  {}", params.input_dir.display());
    println!("Output directory: {}", output_dir.display());
    println!();
    println!("Found {} file(s) to process:", files.len());
    for media in &files {
        let status = if is_transcribed(media, &output_dir) {
            "skip"
        } else {
            "todo"
        };
        println!("  [{status}] {}", media.file_name());
    }
    println!();

    let opts = TranscribeOpts {
        model: params.model.clone(),
        language: params.language.clone(),
        ..TranscribeOpts::default()
    };
    let client = DeepgramClient::new(api_key, &opts)?;

    let summary = run_batch(&client, &files, &opts, &output_dir);

    println!();
    println!("Summary");
    println!("  successful: {}", summary.successful);
    println!("  skipped:    {}", summary.skipped);
    println!("  failed:     {}", summary.failed);
    println!("  total:      {}", summary.total());
    println!();
    println!("Transcripts saved to: {}", output_dir.display());

    Ok(())
}

fn resolve_api_key(params: &Params) -> Option<String> {
    params
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .or_else(|| {
            std::env::var("DEEPGRAM_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
        })
}
