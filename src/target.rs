//! Content-transfer targets and the progress decorator wrapping them.
//!
//! [`Target`] is the capability this crate instruments: pushing a blob,
//! identified by a [`Descriptor`], from a reader to some destination.
//! [`ProgressTarget`] implements the same trait, so it can be used wherever
//! the wrapped target was accepted.
//!
//! # Examples
//!
//! ```rust
//! use std::io::{self, Read};
//! use tally::{Descriptor, OutputBuilder, Target};
//!
//! struct Discard;
//!
//! impl Target for Discard {
//!     type Error = io::Error;
//!
//!     fn push(&self, _expected: &Descriptor, content: &mut dyn Read) -> io::Result<()> {
//!         io::copy(content, &mut io::sink()).map(|_| ())
//!     }
//! }
//!
//! let output = OutputBuilder::hidden().build();
//! let target = output.wrap_target(Discard);
//! target.push(&Descriptor::new("sha256:abcdef0123456789", 3), &mut &b"abc"[..]).unwrap();
//! target.wait();
//! ```

use crate::descriptor::Descriptor;
use crate::logger::ProgressLogger;
use crate::progress::{BarOpts, ProxyReader, RenderSession};

use std::io::Read;
use std::sync::Arc;

/// Anything a blob can be pushed to.
pub trait Target {
    /// Error returned by a failed push.
    type Error;

    /// Push the content described by `expected`, read from `content`.
    fn push(&self, expected: &Descriptor, content: &mut dyn Read) -> Result<(), Self::Error>;
}

impl<T: Target + ?Sized> Target for &T {
    type Error = T::Error;

    fn push(&self, expected: &Descriptor, content: &mut dyn Read) -> Result<(), Self::Error> {
        (**self).push(expected, content)
    }
}

impl<T: Target + ?Sized> Target for Box<T> {
    type Error = T::Error;

    fn push(&self, expected: &Descriptor, content: &mut dyn Read) -> Result<(), Self::Error> {
        (**self).push(expected, content)
    }
}

impl<T: Target + ?Sized> Target for Arc<T> {
    type Error = T::Error;

    fn push(&self, expected: &Descriptor, content: &mut dyn Read) -> Result<(), Self::Error> {
        (**self).push(expected, content)
    }
}

/// A [`Target`] whose pushes draw a progress bar.
///
/// Built by [`Output::wrap_target`](crate::Output::wrap_target). Without a
/// session every push goes straight to the wrapped target.
#[derive(Debug)]
pub struct ProgressTarget<T> {
    inner: T,
    instrumentation: Option<(RenderSession, BarOpts)>,
    debug: bool,
}

impl<T> ProgressTarget<T> {
    /// Wrap `inner` so that its pushes are drawn in `session`.
    pub fn instrumented(inner: T, session: RenderSession, style: BarOpts, debug: bool) -> Self {
        Self {
            inner,
            instrumentation: Some((session, style)),
            debug,
        }
    }

    /// Wrap `inner` without any instrumentation.
    pub fn direct(inner: T, debug: bool) -> Self {
        Self {
            inner,
            instrumentation: None,
            debug,
        }
    }

    /// Whether pushes are drawn.
    pub fn is_instrumented(&self) -> bool {
        self.instrumentation.is_some()
    }

    /// Session drawing the bars, if any.
    pub fn session(&self) -> Option<&RenderSession> {
        self.instrumentation.as_ref().map(|(session, _)| session)
    }

    /// Get a reference to the wrapped target.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Return the wrapped target.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Logger whose lines interleave with this target's bars.
    pub fn logger(&self) -> ProgressLogger {
        match self.session() {
            Some(session) => ProgressLogger::session(session.clone(), self.debug),
            None => ProgressLogger::stdout(self.debug),
        }
    }

    /// Block until every push bar finished drawing. No-op without a session.
    pub fn wait(&self) {
        if let Some(session) = self.session() {
            session.wait();
        }
    }
}

impl<T: Target> Target for ProgressTarget<T> {
    type Error = T::Error;

    fn push(&self, expected: &Descriptor, content: &mut dyn Read) -> Result<(), Self::Error> {
        let Some((session, style)) = &self.instrumentation else {
            return self.inner.push(expected, content);
        };

        let label = format!("Copying {}", expected.short_digest());
        let bar = session.add_bar(label, expected.size(), style);
        let mut proxy = ProxyReader::new(content, bar);
        let result = self.inner.push(expected, &mut proxy);
        proxy.close();
        result
    }
}
