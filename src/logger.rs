//! Progress-aware logging and unpack instrumentation.
//!
//! A [`ProgressLogger`] prints user-facing lines. Bound directly to a writer
//! (standard output unless told otherwise) it simply writes; bound to a
//! [`RenderSession`] it prints above the live bars so they are not torn.
//!
//! # Examples
//!
//! ```rust
//! use tally::ProgressLogger;
//!
//! let logger = ProgressLogger::stdout(false);
//! logger.infof(format_args!("Unpacking {} layers", 3));
//! logger.debugln("not printed, debug output is off");
//! logger.wait();
//! ```

use crate::progress::{ProxyReader, RenderSession};
use crate::utils::ensure_newline;

use std::fmt::{self, Display};
use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Where a [`ProgressLogger`] sends its lines.
#[derive(Clone)]
enum Sink {
    Direct(SharedWriter),
    Session(RenderSession),
}

/// Dual-mode text sink for user-facing output.
///
/// Every line written ends with exactly one newline, added when the caller
/// left it out.
#[derive(Clone)]
pub struct ProgressLogger {
    sink: Sink,
    debug: bool,
}

impl ProgressLogger {
    /// Logger writing straight to standard output.
    pub fn stdout(debug: bool) -> Self {
        Self::to_writer(io::stdout(), debug)
    }

    /// Logger writing straight to `writer`.
    pub fn to_writer(writer: impl Write + Send + 'static, debug: bool) -> Self {
        Self {
            sink: Sink::Direct(Arc::new(Mutex::new(Box::new(writer)))),
            debug,
        }
    }

    /// Logger printing above the bars of `session`.
    pub fn session(session: RenderSession, debug: bool) -> Self {
        Self {
            sink: Sink::Session(session),
            debug,
        }
    }

    /// Session this logger prints through, if any.
    pub fn render_session(&self) -> Option<&RenderSession> {
        match &self.sink {
            Sink::Session(session) => Some(session),
            Sink::Direct(_) => None,
        }
    }

    /// Whether debug lines are printed.
    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    /// Print `s` on its own line.
    pub fn infoln(&self, s: impl Display) {
        self.write_line(s.to_string());
    }

    /// Print formatted text, terminated by a newline.
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.write_line(fmt::format(args));
    }

    /// Print `s` on its own line when debug output is enabled.
    pub fn debugln(&self, s: impl Display) {
        if self.debug {
            self.write_line(s.to_string());
        }
    }

    /// Print formatted text when debug output is enabled.
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        if !self.debug {
            return;
        }
        self.write_line(fmt::format(args));
    }

    /// Block until every bar of the bound session finished drawing.
    ///
    /// No-op for a logger writing directly.
    pub fn wait(&self) {
        if let Sink::Session(session) = &self.sink {
            session.wait();
        }
    }

    fn write_line(&self, text: String) {
        let line = ensure_newline(text);
        let written = match &self.sink {
            Sink::Direct(writer) => {
                let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
                writer
                    .write_all(line.as_bytes())
                    .and_then(|()| writer.flush())
                    .map_err(crate::Error::from)
            }
            Sink::Session(session) => session.println(&line),
        };
        if let Err(err) = written {
            trace!(error = %err, "Dropped log line");
        }
    }
}

impl fmt::Debug for ProgressLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sink = match &self.sink {
            Sink::Direct(_) => "direct",
            Sink::Session(_) => "session",
        };
        f.debug_struct("ProgressLogger")
            .field("sink", &sink)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Stream returned by [`Output::instrument_unpack`](crate::Output::instrument_unpack).
///
/// Either the caller's stream, untouched, or that stream behind a
/// [`ProxyReader`].
#[derive(Debug)]
pub enum ProgressReader<R> {
    /// Instrumentation is off; reads go straight to the stream.
    Direct(R),
    /// Reads advance the unpack bar.
    Counted(ProxyReader<R>),
}

impl<R> ProgressReader<R> {
    /// Whether reads are counted.
    pub fn is_counted(&self) -> bool {
        matches!(self, ProgressReader::Counted(_))
    }

    /// Finalize the unpack bar, if any. Calling it again has no effect.
    pub fn close(&mut self) {
        if let ProgressReader::Counted(proxy) = self {
            proxy.close();
        }
    }

    /// Get a reference to the underlying stream.
    pub fn get_ref(&self) -> &R {
        match self {
            ProgressReader::Direct(inner) => inner,
            ProgressReader::Counted(proxy) => proxy.get_ref(),
        }
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            ProgressReader::Direct(inner) => inner.read(buf),
            ProgressReader::Counted(proxy) => proxy.read(buf),
        }
    }
}
