//! `batchscribe` — batch transcription of local media files via Deepgram.
//!
//! This crate provides:
//! - Directory scanning for supported audio/video files
//! - Resumability via on-disk transcript detection
//! - A pluggable transcription provider (Deepgram over HTTPS in production)
//! - Artifact writers (plain, time-bucketed, full JSON dump)
//! - A sequential batch orchestrator with per-file failure isolation
//!
//! The library is designed to be driven by the bundled CLI, but every piece
//! is constructible programmatically so batch jobs and tests can run it
//! without a terminal or a network.

// High-level API (most consumers should start here).
pub mod batch;
pub mod opts;

// Input discovery and resumability.
pub mod media;
pub mod tracker;

// The provider seam and its production implementation.
pub mod deepgram;
pub mod provider;

// The provider's response contract.
pub mod response;

// Artifact emission.
pub mod writer;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use error::{Error, Result};
