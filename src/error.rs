//! Error types for imagesorter.
//!
//! Usage problems are reported as [`ConfigError`] before anything touches the
//! filesystem. Everything that can go wrong afterwards is a [`SortError`] and
//! ends the run. Non-fatal conditions are not errors at all: they are queued as
//! warnings on the [`DestinationSet`](crate::catalog::DestinationSet).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid command-line usage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No source directory was given.
    #[error("please provide a source directory")]
    MissingSource,

    /// No destination directory was given.
    #[error("please provide a source directory and at least one target directory")]
    MissingDestinations,

    /// Scan mode needs exactly one target directory.
    #[error("scan mode needs exactly one target directory, got {0}")]
    ScanTargetCount(usize),
}

/// Writing an image to the terminal failed.
#[derive(Debug, Error)]
#[error(
    "failed to display the image as {protocol}, check that you're using a terminal that supports \
     Kitty's terminal graphics protocol or Sixel"
)]
pub struct RenderError {
    /// Human-readable name of the encoding that was in use.
    pub protocol: &'static str,
    #[source]
    pub source: io::Error,
}

/// Fatal errors raised while setting up or running a sorting session.
#[derive(Debug, Error)]
pub enum SortError {
    #[error("failed to read from source directory {path}: {source}")]
    ReadSource { path: PathBuf, source: io::Error },

    #[error("failed to read target directory {path}: {source}")]
    ReadScanTarget { path: PathBuf, source: io::Error },

    #[error("target directory {0} has no subdirectories to sort into")]
    EmptyScanTarget(PathBuf),

    #[error("failed to create {path}: {source}")]
    CreateDirectory { path: PathBuf, source: io::Error },

    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    #[error("failed to open {path}: {source}")]
    OpenImage { path: PathBuf, source: io::Error },

    #[error("failed to decode {path}: {source}")]
    DecodeImage {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to move {from} to {to}: {source}")]
    MoveFile {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("failed to read from stdin: {0}")]
    ReadInput(#[source] io::Error),

    #[error("failed to write to the terminal: {0}")]
    Terminal(#[from] io::Error),
}

impl SortError {
    /// True for errors tied to a single unreadable image file.
    pub fn is_unreadable_image(&self) -> bool {
        matches!(self, Self::OpenImage { .. } | Self::DecodeImage { .. })
    }
}

/// Result type for sorting operations.
pub type SortResult<T> = Result<T, SortError>;
