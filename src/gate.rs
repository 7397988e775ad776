//! Decide whether progress instrumentation should run at all.

use std::fmt;
use std::io::{self, IsTerminal};
use std::sync::Arc;

/// Predicate telling whether standard output is an interactive terminal.
pub type TerminalProbe = Arc<dyn Fn() -> bool + Send + Sync>;

/// Default probe: ask the OS whether standard output is a terminal.
pub fn stdout_is_terminal() -> bool {
    io::stdout().is_terminal()
}

/// Activation predicate for all instrumentation.
///
/// Progress bars are drawn only when they were requested and standard output
/// is a terminal. The terminal probe runs on every call, so a redirection made
/// before the first check is honored.
///
/// ```rust
/// use std::sync::Arc;
/// use tally::ProgressGate;
///
/// let gate = ProgressGate::with_probe(true, Arc::new(|| false));
/// assert!(!gate.should_instrument());
/// ```
#[derive(Clone)]
pub struct ProgressGate {
    progress_bars: bool,
    terminal: TerminalProbe,
}

impl ProgressGate {
    /// Create a gate probing the real standard output.
    pub fn new(progress_bars: bool) -> Self {
        Self::with_probe(progress_bars, Arc::new(stdout_is_terminal))
    }

    /// Create a gate using a custom terminal probe.
    pub fn with_probe(progress_bars: bool, terminal: TerminalProbe) -> Self {
        Self {
            progress_bars,
            terminal,
        }
    }

    /// Whether progress bars were requested.
    pub fn progress_bars(&self) -> bool {
        self.progress_bars
    }

    /// Return `true` when bars were requested and stdout is a terminal.
    pub fn should_instrument(&self) -> bool {
        self.progress_bars && (self.terminal)()
    }
}

impl fmt::Debug for ProgressGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressGate")
            .field("progress_bars", &self.progress_bars)
            .finish_non_exhaustive()
    }
}
