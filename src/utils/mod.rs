//! Shared utility functions.
//!
//! # Examples
//!
//! ```rust
//! use tally::utils::format_bytes;
//!
//! println!("Pushed {}", format_bytes(3 * 1024 * 1024));
//! ```

pub mod format;

pub use format::format_bytes;
pub(crate) use format::ensure_newline;
