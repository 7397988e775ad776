//! Progress module containing the rendering side of the instrumentation.
//!
//! # Overview
//!
//! - `style` - Bar templates and completion behavior
//! - `session` - The [`RenderSession`] owning live bars, and the [`Bar`] itself
//! - `proxy` - [`ProxyReader`], the byte-counting reader feeding a bar
//! - `speed` - [`EwmaSpeed`], the moving-average throughput shown next to bars
//!
//! # Examples
//!
//! ```rust
//! use std::io::Read;
//! use std::time::Duration;
//! use tally::progress::{ProxyReader, RenderSession, StyleOptions};
//!
//! let styles = StyleOptions::default();
//! let session = RenderSession::hidden(60, Duration::from_millis(180));
//! let bar = session.add_bar("Copying 2c26b46b", 3, styles.push());
//!
//! let mut content = Vec::new();
//! ProxyReader::new(&b"foo"[..], bar)
//!     .read_to_end(&mut content)
//!     .unwrap();
//!
//! session.wait();
//! assert!(session.bars()[0].is_complete());
//! ```

pub(crate) mod proxy;
pub(crate) mod session;
pub(crate) mod speed;
pub(crate) mod style;

pub use proxy::ProxyReader;
pub use session::{refresh_rate_hz, Bar, BarState, RenderSession};
pub use speed::EwmaSpeed;
pub use style::{BarOpts, StyleOptions, EWMA_WINDOW};
