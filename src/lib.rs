//! Tally draws progress bars for content transfers without getting in their
//! way.
//!
//! It wraps the two byte streams of a content-addressable push/pull pipeline,
//! blobs pushed to a remote [`Target`] and archives being unpacked, and counts
//! the bytes flowing through them. On an interactive terminal each stream gets
//! a live bar; otherwise everything passes through untouched and output falls
//! back to plain lines.
//!
//! # Quick Start
//!
//! ```rust
//! use std::io::{self, Read};
//! use tally::{Descriptor, OutputBuilder, Target};
//!
//! struct Registry;
//!
//! impl Target for Registry {
//!     type Error = io::Error;
//!
//!     fn push(&self, _expected: &Descriptor, content: &mut dyn Read) -> io::Result<()> {
//!         io::copy(content, &mut io::sink()).map(|_| ())
//!     }
//! }
//!
//! let output = OutputBuilder::new().build();
//! let target = output.wrap_target(Registry);
//! let blob: &[u8] = b"model weights";
//! let descriptor = Descriptor::new("sha256:0c8e2a1f9d3b4c5e", blob.len() as u64);
//! target.push(&descriptor, &mut &blob[..])?;
//! target.wait();
//! # Ok::<(), io::Error>(())
//! ```
//!
//! # Module Organization
//!
//! - [`descriptor`] - The `(digest, size)` identity of a transferred blob
//! - [`error`] - Rendering errors, never surfaced to transfers
//! - [`gate`] - The predicate deciding whether bars are drawn
//! - [`logger`] - Progress-aware logger and the unpack stream wrapper
//! - [`output`] - The `Output` facade, its builder and configuration
//! - [`progress`] - Render sessions, bars, styles and the byte-counting proxy
//! - [`target`] - The `Target` trait and its progress decorator
//! - [`utils`] - Shared utility functions

pub mod descriptor;
pub mod error;
pub mod gate;
pub mod logger;
pub mod output;
pub mod progress;
pub mod target;
pub mod utils;

pub use descriptor::Descriptor;
pub use error::{Error, Result};
pub use gate::{ProgressGate, TerminalProbe};
pub use logger::{ProgressLogger, ProgressReader};
pub use output::{Output, OutputBuilder, OutputConfig};
pub use progress::{Bar, BarOpts, BarState, ProxyReader, RenderSession, StyleOptions};
pub use target::{ProgressTarget, Target};
pub use utils::format_bytes;
