//! Error types for the KDE explorer.
//!
//! This module provides a unified error handling approach using `thiserror`.
//! Click-count problems are not errors: they are reported on the console and
//! recovered from locally (see [`crate::session::ClickCheck`]).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for explorer operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Errors that can occur in the explorer.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The x and y sample sequences differ in length.
    #[error("Sample length mismatch: {x} x-values but {y} y-values")]
    SampleLengthMismatch {
        /// Number of x-values.
        x: usize,
        /// Number of y-values.
        y: usize,
    },

    /// Not enough samples to fit a kernel density estimate.
    #[error("At least 2 samples are required to fit a KDE, got {0}")]
    TooFewSamples(usize),

    /// The sample covariance could not be computed.
    #[error("Sample covariance is not finite")]
    NonFiniteCovariance,

    /// An operation needs a rendered contour that does not exist yet.
    #[error("No contour has been rendered yet; call contour() first")]
    NoContour,

    /// A grid vector is empty.
    #[error("Grid vectors must not be empty")]
    EmptyGrid,

    /// A command-line value could not be parsed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Failed to read a sample file.
    #[error("Failed to read samples from {path}: {message}")]
    SampleRead {
        /// File being read.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to access clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExplorerError {
    /// Create a SampleRead error.
    pub fn sample_read(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SampleRead {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
