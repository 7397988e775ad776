//! Configuration structures and defaults for the output layer.
//!
//! The two process-wide toggles, "print progress bars" and "print debug
//! output", are owned by the caller and handed over here explicitly. Nothing
//! in this crate reads global state.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use tally::output::OutputConfig;
//!
//! let config = OutputConfig::default();
//! assert!(config.progress_bars);
//! assert!(!config.debug);
//! assert_eq!(config.width, 60);
//! assert_eq!(config.refresh_interval, Duration::from_millis(180));
//! ```

use crate::gate::{ProgressGate, TerminalProbe};
use crate::StyleOptions;

use std::time::Duration;

/// Default bar width, in columns.
pub const DEFAULT_WIDTH: u16 = 60;

/// Default interval between two redraws.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(180);

/// Configuration structure for the output layer.
#[derive(Clone)]
pub struct OutputConfig {
    /// Draw progress bars when standard output is a terminal.
    pub progress_bars: bool,
    /// Print debug lines.
    pub debug: bool,
    /// Bar width, in columns.
    pub width: u16,
    /// Interval between two redraws of a bar.
    pub refresh_interval: Duration,
    /// Bar style options.
    pub style_options: StyleOptions,
    /// Custom terminal probe. Standard output is probed when unset.
    pub terminal: Option<TerminalProbe>,
}

impl OutputConfig {
    /// Gate deciding whether bars are drawn under this configuration.
    pub fn gate(&self) -> ProgressGate {
        match &self.terminal {
            Some(probe) => ProgressGate::with_probe(self.progress_bars, probe.clone()),
            None => ProgressGate::new(self.progress_bars),
        }
    }
}

impl std::fmt::Debug for OutputConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputConfig")
            .field("progress_bars", &self.progress_bars)
            .field("debug", &self.debug)
            .field("width", &self.width)
            .field("refresh_interval", &self.refresh_interval)
            .field("style_options", &self.style_options)
            .field("terminal", &self.terminal.is_some())
            .finish()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            progress_bars: true,
            debug: false,
            width: DEFAULT_WIDTH,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            style_options: StyleOptions::default(),
            terminal: None,
        }
    }
}
