//! Error handling for the Tally library.
//!
//! Errors defined here describe failures of the instrumentation itself:
//! building a bar style or writing a log line. They are reported through
//! `tracing` and swallowed at the public boundary, so a transfer never fails
//! because its progress bar could not be drawn. Errors produced by a wrapped
//! [`Target`](crate::Target) keep their own type and pass through untouched.

use std::io;
use thiserror::Error;

/// Errors that can happen while rendering progress output.
#[derive(Error, Debug)]
pub enum Error {
    /// A progress bar template could not be parsed.
    ///
    /// Returned when a [`BarOpts`](crate::BarOpts) template is not valid
    /// indicatif template syntax.
    #[error("Invalid progress template")]
    Template {
        #[from]
        source: indicatif::style::TemplateError,
    },

    /// A progress character set is too short to draw a bar.
    ///
    /// A bar needs at least a "filled" and a "to do" character.
    #[error("Invalid progress characters: {0:?}")]
    ProgressChars(String),

    /// I/O Error.
    ///
    /// Raised when a log line cannot be written to its sink.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },
}

/// Result type alias for operations that can fail with a Tally error.
pub type Result<T> = std::result::Result<T, Error>;
