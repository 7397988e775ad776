//! Byte-counting reader.

use crate::progress::session::Bar;
use std::io::{self, Read};

/// Reader that advances a [`Bar`] by the number of bytes read through it.
///
/// Bytes are handed back untouched and read errors are returned as they come.
/// The bar is finalized on end of stream, on [`ProxyReader::close`], or when
/// the proxy is dropped, whichever comes first.
///
/// ```rust
/// use std::io::Read;
/// use std::time::Duration;
/// use tally::progress::{BarOpts, ProxyReader, RenderSession};
///
/// let session = RenderSession::hidden(60, Duration::from_millis(180));
/// let bar = session.add_bar("Unpacking", 5, &BarOpts::unpack());
/// let mut reader = ProxyReader::new(&b"hello"[..], bar.clone());
///
/// let mut out = String::new();
/// reader.read_to_string(&mut out).unwrap();
/// assert_eq!(out, "hello");
/// assert_eq!(bar.consumed(), 5);
/// assert!(bar.is_complete());
/// ```
#[derive(Debug)]
pub struct ProxyReader<R> {
    inner: R,
    bar: Option<Bar>,
}

impl<R> ProxyReader<R> {
    /// Wrap `inner`, reporting reads to `bar`.
    pub fn new(inner: R, bar: Bar) -> Self {
        Self {
            inner,
            bar: Some(bar),
        }
    }

    /// Finalize the bar. Calling it again has no effect.
    ///
    /// A bar whose total was not reached is left as drawn.
    pub fn close(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish(false);
        }
    }

    /// Whether the bar is still bound to this reader.
    pub fn is_open(&self) -> bool {
        self.bar.is_some()
    }

    /// Get a reference to the wrapped reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Get a mutable reference to the wrapped reader.
    ///
    /// Bytes read directly from it are not counted.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }
}

impl<R: Read> Read for ProxyReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 && !buf.is_empty() {
            if let Some(bar) = self.bar.take() {
                bar.finish(true);
            }
        } else if let Some(bar) = &self.bar {
            bar.advance(n as u64);
        }
        Ok(n)
    }
}

impl<R> Drop for ProxyReader<R> {
    fn drop(&mut self) {
        self.close();
    }
}
