//! Builder pattern implementation for creating [`Output`] instances.
//!
//! # Examples
//!
//! ## Basic Builder Usage
//!
//! ```rust
//! use tally::OutputBuilder;
//!
//! let output = OutputBuilder::new().debug(true).width(40).build();
//! assert!(output.logger().debug_enabled());
//! ```
//!
//! ## Hidden Progress Bars
//!
//! ```rust
//! use tally::OutputBuilder;
//!
//! let output = OutputBuilder::hidden().build();
//! assert!(!output.should_instrument());
//! ```

use super::{config::OutputConfig, output::Output};
use crate::StyleOptions;

use std::sync::Arc;
use std::time::Duration;

/// A builder used to create an [`Output`].
///
/// ```rust
/// # fn main()  {
/// use tally::OutputBuilder;
///
/// let output = OutputBuilder::new().progress_bars(false).debug(true).build();
/// # }
/// ```
#[derive(Debug, Default)]
pub struct OutputBuilder {
    config: OutputConfig,
}

impl OutputBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        OutputBuilder::default()
    }

    /// Convenience function to turn progress bars off.
    pub fn hidden() -> Self {
        OutputBuilder::default().progress_bars(false)
    }

    /// Request progress bars. They are only drawn on a terminal.
    pub fn progress_bars(mut self, progress_bars: bool) -> Self {
        self.config.progress_bars = progress_bars;
        self
    }

    /// Print debug lines.
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Set the bar width, in columns.
    pub fn width(mut self, width: u16) -> Self {
        self.config.width = width;
        self
    }

    /// Set the interval between two redraws.
    pub fn refresh_interval(mut self, refresh_interval: Duration) -> Self {
        self.config.refresh_interval = refresh_interval;
        self
    }

    /// Set the bar style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Replace the standard output terminal check.
    pub fn terminal_probe<F>(mut self, probe: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.config.terminal = Some(Arc::new(probe));
        self
    }

    /// Create the [`Output`] with the specified options.
    pub fn build(self) -> Output {
        Output::new(self.config)
    }
}
