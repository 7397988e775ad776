//! Output facade handing out instrumented targets, streams and loggers.
//!
//! # Examples
//!
//! ## Unpacking a Stream
//!
//! ```rust
//! use std::io::Read;
//! use tally::OutputBuilder;
//!
//! let output = OutputBuilder::new().build();
//! let layer: &[u8] = b"layer contents";
//! let (logger, mut reader) = output.instrument_unpack(layer.len() as u64, layer);
//!
//! let mut unpacked = Vec::new();
//! reader.read_to_end(&mut unpacked).unwrap();
//! logger.infof(format_args!("Unpacked {} bytes", unpacked.len()));
//! logger.wait();
//! ```

use super::config::OutputConfig;
use crate::gate::ProgressGate;
use crate::logger::{ProgressLogger, ProgressReader};
use crate::progress::{ProxyReader, RenderSession};
use crate::target::ProgressTarget;

use std::fmt;
use std::fmt::Debug;
use tracing::debug;

/// Label of the unpack bar.
pub const UNPACK_LABEL: &str = "Unpacking";

/// Entry point of the instrumentation layer.
///
/// An output can be created via its builder:
///
/// ```rust
/// # fn main()  {
/// use tally::OutputBuilder;
///
/// let output = OutputBuilder::new().build();
/// # }
/// ```
#[derive(Clone)]
pub struct Output {
    config: OutputConfig,
    gate: ProgressGate,
}

impl Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("config", &self.config)
            .finish()
    }
}

impl Output {
    /// Creates a new Output with the given configuration.
    pub(crate) fn new(config: OutputConfig) -> Self {
        let gate = config.gate();
        Self { config, gate }
    }

    /// Gets the configuration.
    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Gets the activation gate.
    pub fn gate(&self) -> &ProgressGate {
        &self.gate
    }

    /// Whether bars would be drawn right now.
    pub fn should_instrument(&self) -> bool {
        self.gate.should_instrument()
    }

    /// Logger writing directly to standard output.
    pub fn logger(&self) -> ProgressLogger {
        ProgressLogger::stdout(self.config.debug)
    }

    fn session(&self) -> RenderSession {
        RenderSession::new(self.config.width, self.config.refresh_interval)
    }

    /// Wrap `target` so that every push draws a bar.
    ///
    /// When bars are not drawn the target is only moved into a pass-through
    /// wrapper; no session is created.
    pub fn wrap_target<T>(&self, target: T) -> ProgressTarget<T> {
        if !self.should_instrument() {
            debug!("Progress bars disabled, pushing without instrumentation");
            return ProgressTarget::direct(target, self.config.debug);
        }
        ProgressTarget::instrumented(
            target,
            self.session(),
            self.config.style_options.push().clone(),
            self.config.debug,
        )
    }

    /// Instrument an unpack stream of `size` bytes.
    ///
    /// Returns the logger to print through while unpacking, and the stream
    /// to read from. When bars are not drawn the logger writes to standard
    /// output and the stream is returned as is.
    pub fn instrument_unpack<R>(&self, size: u64, stream: R) -> (ProgressLogger, ProgressReader<R>) {
        if !self.should_instrument() {
            debug!(size, "Progress bars disabled, unpacking without instrumentation");
            return (self.logger(), ProgressReader::Direct(stream));
        }

        let session = self.session();
        let bar = session.add_bar(UNPACK_LABEL, size, self.config.style_options.unpack());
        let logger = ProgressLogger::session(session, self.config.debug);
        (logger, ProgressReader::Counted(ProxyReader::new(stream, bar)))
    }
}
