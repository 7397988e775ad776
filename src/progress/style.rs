//! Progress bar styling and configuration options.
//!
//! Two kinds of bars are drawn: push bars, one per blob being copied, and the
//! unpack bar. By default push bars collapse into a one-line summary once
//! complete, while the unpack bar is cleared from the screen.
//!
//! # Examples
//!
//! ## Default Styling
//!
//! ```rust
//! use tally::progress::StyleOptions;
//!
//! let style_options = StyleOptions::default();
//! assert!(!style_options.push().clears());
//! assert!(style_options.unpack().clears());
//! ```
//!
//! ## Custom Styling
//!
//! ```rust
//! use tally::progress::{BarOpts, StyleOptions};
//!
//! let custom_style = StyleOptions::new(
//!     BarOpts::new("{prefix} [{bar}] {percent}%", "#>.", None, true),
//!     BarOpts::unpack(),
//! );
//! ```

use crate::error::{Error, Result};
use crate::progress::speed::EwmaSpeed;
use indicatif::ProgressStyle;

/// Number of samples the throughput average is weighted over.
pub const EWMA_WINDOW: u32 = 60;

/// Define the style options for every bar a session draws.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    /// Style options for push bars.
    pub(crate) push: BarOpts,
    /// Style options for the unpack bar.
    pub(crate) unpack: BarOpts,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            push: BarOpts::transfer(),
            unpack: BarOpts::unpack(),
        }
    }
}

impl StyleOptions {
    /// Create new [`StyleOptions`].
    pub fn new(push: BarOpts, unpack: BarOpts) -> Self {
        Self { push, unpack }
    }

    /// Set the options for push bars.
    pub fn set_push(&mut self, push: BarOpts) {
        self.push = push;
    }

    /// Set the options for the unpack bar.
    pub fn set_unpack(&mut self, unpack: BarOpts) {
        self.unpack = unpack;
    }

    /// Get a reference to the push bar options.
    pub fn push(&self) -> &BarOpts {
        &self.push
    }

    /// Get a reference to the unpack bar options.
    pub fn unpack(&self) -> &BarOpts {
        &self.unpack
    }
}

/// Define the options for a progress bar.
///
/// Templates use indicatif syntax. The `{bar}` placeholder is expanded to a
/// bar of the session width, and `{ewma_speed}` renders the moving-average
/// throughput.
#[derive(Debug, Clone)]
pub struct BarOpts {
    /// Template while the transfer is running.
    template: String,
    /// Progression characters set: "filled", "current", and "to do".
    progress_chars: String,
    /// Template swapped in once the bar completes. `{msg}` holds the
    /// formatted total size.
    completed_template: Option<String>,
    /// Clear the progress bar once completed.
    pub(crate) clear: bool,
}

impl BarOpts {
    /// Bounded bar with counters and throughput.
    ///
    /// `Copying 2c26b46b |=========>----------| 1.50 KiB / 3.00 KiB | 1.02 KiB/s`
    pub const TEMPLATE_TRANSFER: &'static str =
        "{prefix} |{bar}| {binary_bytes} / {binary_total_bytes} | {ewma_speed}";
    /// Summary left behind by a completed push.
    ///
    /// `Copying 2c26b46b | 3.00 KiB  | done`
    pub const TEMPLATE_TRANSFER_DONE: &'static str = "{prefix} | {msg} | done";
    /// Use `=` as filler, `>` as the tip and `-` as padding.
    pub const CHARS_BOUNDED: &'static str = "=>-";

    /// Create a new [`BarOpts`].
    pub fn new(
        template: impl Into<String>,
        progress_chars: impl Into<String>,
        completed_template: Option<String>,
        clear: bool,
    ) -> Self {
        Self {
            template: template.into(),
            progress_chars: progress_chars.into(),
            completed_template,
            clear,
        }
    }

    /// Options used for push bars.
    pub fn transfer() -> Self {
        Self {
            template: Self::TEMPLATE_TRANSFER.into(),
            progress_chars: Self::CHARS_BOUNDED.into(),
            completed_template: Some(Self::TEMPLATE_TRANSFER_DONE.into()),
            clear: false,
        }
    }

    /// Options used for the unpack bar: same look, removed on completion.
    pub fn unpack() -> Self {
        Self {
            template: Self::TEMPLATE_TRANSFER.into(),
            progress_chars: Self::CHARS_BOUNDED.into(),
            completed_template: None,
            clear: true,
        }
    }

    /// Set to `true` to clear the progress bar upon completion.
    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// Whether the bar is cleared upon completion.
    pub fn clears(&self) -> bool {
        self.clear
    }

    /// Create the running [`ProgressStyle`] for a bar `width` columns wide.
    pub fn to_progress_style(&self, width: u16) -> Result<ProgressStyle> {
        if self.progress_chars.chars().count() < 2 {
            return Err(Error::ProgressChars(self.progress_chars.clone()));
        }
        let style = ProgressStyle::with_template(&expand_bar(&self.template, width))?
            .progress_chars(&self.progress_chars)
            .with_key("ewma_speed", EwmaSpeed::new(EWMA_WINDOW));
        Ok(style)
    }

    /// Create the [`ProgressStyle`] shown once the bar completes, if any.
    pub fn to_completed_style(&self, width: u16) -> Result<Option<ProgressStyle>> {
        self.completed_template
            .as_deref()
            .map(|template| {
                ProgressStyle::with_template(&expand_bar(template, width)).map_err(Error::from)
            })
            .transpose()
    }
}

fn expand_bar(template: &str, width: u16) -> String {
    template.replace("{bar}", &format!("{{bar:{width}}}"))
}
