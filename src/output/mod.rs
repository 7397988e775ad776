//! Output module containing the facade, its builder, and configuration.
//!
//! # Overview
//!
//! - `output` - The [`Output`] facade wrapping targets and unpack streams
//! - `builder` - [`OutputBuilder`] for configuring an [`Output`]
//! - `config` - [`OutputConfig`] and its defaults
//!
//! # Examples
//!
//! ```rust
//! use tally::output::OutputBuilder;
//!
//! let output = OutputBuilder::new()
//!     .progress_bars(true)
//!     .debug(false)
//!     .build();
//! let logger = output.logger();
//! logger.infoln("Pushing model");
//! ```

pub mod builder;
pub mod config;
#[allow(clippy::module_inception)]
pub mod output;

pub use builder::OutputBuilder;
pub use config::{OutputConfig, DEFAULT_REFRESH_INTERVAL, DEFAULT_WIDTH};
pub use output::{Output, UNPACK_LABEL};
