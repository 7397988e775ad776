//! Render session: the set of live bars sharing one terminal area.
//!
//! A [`RenderSession`] wraps an indicatif [`MultiProgress`] and keeps its own
//! record of every [`Bar`] it created, so callers can block until all of them
//! are finished and tests can inspect what was counted.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use tally::progress::{BarOpts, RenderSession};
//!
//! let session = RenderSession::hidden(60, Duration::from_millis(180));
//! let bar = session.add_bar("Unpacking", 1024, &BarOpts::unpack());
//! assert_eq!(bar.total(), 1024);
//! assert_eq!(session.bars().len(), 1);
//! ```

use crate::error::Result;
use crate::progress::style::BarOpts;
use crate::utils::format_bytes;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const ACTIVE: u8 = 0;
const COMPLETE: u8 = 1;
const REMOVED: u8 = 2;
const ABANDONED: u8 = 3;

/// Lifecycle of a [`Bar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarState {
    /// Still receiving bytes.
    Active,
    /// Reached its total or its stream was exhausted; summary left on screen.
    Complete,
    /// Complete and cleared from the display.
    Removed,
    /// Closed before completion and left as drawn.
    Abandoned,
}

impl BarState {
    fn from_u8(value: u8) -> Self {
        match value {
            COMPLETE => BarState::Complete,
            REMOVED => BarState::Removed,
            ABANDONED => BarState::Abandoned,
            _ => BarState::Active,
        }
    }
}

/// Bars that have not finished yet, and whether the redraw thread runs.
#[derive(Debug, Default)]
struct Counts {
    pending: usize,
    ticking: bool,
}

#[derive(Debug, Default)]
struct Pending {
    counts: Mutex<Counts>,
    finished: Condvar,
}

impl Pending {
    fn lock(&self) -> MutexGuard<'_, Counts> {
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new bar. Returns `true` when the caller must start the
    /// redraw thread.
    fn acquire(&self) -> bool {
        let mut counts = self.lock();
        counts.pending += 1;
        !std::mem::replace(&mut counts.ticking, true)
    }

    fn release(&self) {
        let mut counts = self.lock();
        counts.pending = counts.pending.saturating_sub(1);
        if counts.pending == 0 {
            self.finished.notify_all();
        }
    }

    /// Clear the ticking flag, after the redraw thread failed to start.
    fn stop_ticking(&self) {
        self.lock().ticking = false;
    }

    /// Sleep for one tick. Returns `false`, clearing the ticking flag, once no
    /// bar is left to redraw.
    fn next_tick(&self, tick: Duration) -> bool {
        let counts = self.lock();
        let mut counts = self
            .finished
            .wait_timeout(counts, tick)
            .unwrap_or_else(PoisonError::into_inner)
            .0;
        if counts.pending == 0 {
            counts.ticking = false;
            return false;
        }
        true
    }

    fn wait(&self, tick: Duration) {
        let mut counts = self.lock();
        while counts.pending > 0 {
            counts = self
                .finished
                .wait_timeout(counts, tick)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }
}

/// Draw rate, in Hz, matching a redraw every `refresh_interval`.
///
/// Rounded up so the draw target never drops a scheduled tick.
///
/// ```rust
/// use std::time::Duration;
/// use tally::progress::refresh_rate_hz;
///
/// assert_eq!(refresh_rate_hz(Duration::from_millis(180)), 6);
/// assert_eq!(refresh_rate_hz(Duration::from_secs(5)), 1);
/// ```
pub fn refresh_rate_hz(refresh_interval: Duration) -> u8 {
    let millis = refresh_interval.as_millis().max(1);
    1000u128.div_ceil(millis).clamp(1, u128::from(u8::MAX)) as u8
}

/// One progress indicator bound to one stream.
///
/// Cloning a [`Bar`] yields another handle to the same indicator.
#[derive(Clone)]
pub struct Bar {
    inner: Arc<BarInner>,
}

struct BarInner {
    label: String,
    total: u64,
    consumed: AtomicU64,
    state: AtomicU8,
    clear: bool,
    completed_style: Option<ProgressStyle>,
    pb: ProgressBar,
    pending: Arc<Pending>,
}

impl Bar {
    /// Label drawn in front of the bar.
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    /// Declared number of bytes.
    pub fn total(&self) -> u64 {
        self.inner.total
    }

    /// Bytes observed so far. May exceed [`Bar::total`] when a stream
    /// delivers more than it declared.
    pub fn consumed(&self) -> u64 {
        self.inner.consumed.load(Ordering::Acquire)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> BarState {
        BarState::from_u8(self.inner.state.load(Ordering::Acquire))
    }

    /// Whether the bar reached its total or its stream was exhausted.
    pub fn is_complete(&self) -> bool {
        matches!(self.state(), BarState::Complete | BarState::Removed)
    }

    /// Message currently drawn by the bar. Holds the size summary once a
    /// push bar completes.
    pub fn message(&self) -> String {
        self.inner.pb.message()
    }

    /// Whether the bar stopped rendering, complete or not.
    pub fn is_finished(&self) -> bool {
        self.state() != BarState::Active
    }

    /// Record `n` more bytes.
    pub(crate) fn advance(&self, n: u64) {
        let consumed = self.inner.consumed.fetch_add(n, Ordering::AcqRel) + n;
        self.inner.pb.inc(n);
        if consumed >= self.inner.total {
            self.finish(false);
        }
    }

    /// Stop rendering the bar. Only the first call has an effect.
    ///
    /// The bar counts as complete when `exhausted` is set or the total was
    /// reached, and is abandoned otherwise.
    pub(crate) fn finish(&self, exhausted: bool) {
        let inner = &self.inner;
        let complete = exhausted || self.consumed() >= inner.total;
        let next = match (complete, inner.clear) {
            (false, _) => ABANDONED,
            (true, true) => REMOVED,
            (true, false) => COMPLETE,
        };
        if inner
            .state
            .compare_exchange(ACTIVE, next, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        match next {
            REMOVED => inner.pb.finish_and_clear(),
            COMPLETE => {
                if let Some(style) = &inner.completed_style {
                    inner.pb.set_style(style.clone());
                    inner
                        .pb
                        .set_message(format!("{:<9}", format_bytes(inner.total)));
                }
                inner.pb.finish();
            }
            _ => inner.pb.abandon(),
        }
        inner.pending.release();
    }
}

impl fmt::Debug for Bar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bar")
            .field("label", &self.inner.label)
            .field("total", &self.inner.total)
            .field("consumed", &self.consumed())
            .field("state", &self.state())
            .finish()
    }
}

/// Owner of all bars drawn for one wrapped target or stream.
///
/// Cloning a [`RenderSession`] yields another handle to the same session; it
/// can be shared between threads pushing concurrently.
#[derive(Clone)]
pub struct RenderSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    multi: MultiProgress,
    bars: Mutex<Vec<Bar>>,
    pending: Arc<Pending>,
    width: u16,
    refresh_interval: Duration,
    refresh_hz: u8,
}

impl RenderSession {
    /// Create a session drawing to standard output.
    ///
    /// The draw target is rate-limited to one frame per `refresh_interval`.
    pub fn new(width: u16, refresh_interval: Duration) -> Self {
        let target = ProgressDrawTarget::stdout_with_hz(refresh_rate_hz(refresh_interval));
        Self::with_draw_target(target, width, refresh_interval)
    }

    /// Create a session that counts bytes but draws nothing.
    pub fn hidden(width: u16, refresh_interval: Duration) -> Self {
        Self::with_draw_target(ProgressDrawTarget::hidden(), width, refresh_interval)
    }

    fn with_draw_target(
        target: ProgressDrawTarget,
        width: u16,
        refresh_interval: Duration,
    ) -> Self {
        debug!(width, ?refresh_interval, "Creating render session");
        Self {
            inner: Arc::new(SessionInner {
                multi: MultiProgress::with_draw_target(target),
                bars: Mutex::new(Vec::new()),
                pending: Arc::new(Pending::default()),
                width,
                refresh_interval,
                refresh_hz: refresh_rate_hz(refresh_interval),
            }),
        }
    }

    /// Width of the bars, in columns.
    pub fn width(&self) -> u16 {
        self.inner.width
    }

    /// Interval between two redraws of the session.
    pub fn refresh_interval(&self) -> Duration {
        self.inner.refresh_interval
    }

    /// Maximum number of frames drawn per second.
    pub fn refresh_hz(&self) -> u8 {
        self.inner.refresh_hz
    }

    /// Create and register a new bar.
    ///
    /// If the style cannot be built the bar still counts bytes but is not
    /// drawn.
    pub fn add_bar(&self, label: impl Into<String>, total: u64, opts: &BarOpts) -> Bar {
        let label = label.into();
        let inner = &self.inner;

        let (pb, completed_style) = match Self::styles(opts, inner.width) {
            Ok((running, completed)) => {
                let pb = inner.multi.add(
                    ProgressBar::new(total)
                        .with_style(running)
                        .with_prefix(label.clone()),
                );
                (pb, completed)
            }
            Err(err) => {
                warn!(%label, error = %err, "Progress bar unavailable, continuing without it");
                (ProgressBar::hidden(), None)
            }
        };

        let start_ticker = inner.pending.acquire();
        let bar = Bar {
            inner: Arc::new(BarInner {
                label,
                total,
                consumed: AtomicU64::new(0),
                state: AtomicU8::new(ACTIVE),
                clear: opts.clear,
                completed_style,
                pb,
                pending: inner.pending.clone(),
            }),
        };
        self.lock_bars().push(bar.clone());
        if start_ticker {
            self.spawn_ticker();
        }
        bar
    }

    /// Start the thread redrawing active bars every refresh interval. It
    /// stops once every bar is finished or the session is gone.
    fn spawn_ticker(&self) {
        let session = Arc::downgrade(&self.inner);
        let pending = self.inner.pending.clone();
        let tick = self.inner.refresh_interval;
        let spawned = thread::Builder::new()
            .name("tally-render".into())
            .spawn(move || {
                while pending.next_tick(tick) {
                    let Some(inner) = session.upgrade() else {
                        pending.stop_ticking();
                        return;
                    };
                    let bars = inner.bars.lock().unwrap_or_else(PoisonError::into_inner);
                    for bar in bars.iter().filter(|bar| !bar.is_finished()) {
                        bar.inner.pb.tick();
                    }
                }
            });
        if let Err(err) = spawned {
            warn!(error = %err, "Could not start the redraw thread, bars redraw on reads only");
            self.inner.pending.stop_ticking();
        }
    }

    fn styles(opts: &BarOpts, width: u16) -> Result<(ProgressStyle, Option<ProgressStyle>)> {
        Ok((
            opts.to_progress_style(width)?,
            opts.to_completed_style(width)?,
        ))
    }

    /// Snapshot of every bar created so far.
    pub fn bars(&self) -> Vec<Bar> {
        self.lock_bars().clone()
    }

    fn lock_bars(&self) -> MutexGuard<'_, Vec<Bar>> {
        self.inner
            .bars
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Write `text` to standard output without tearing the bars.
    pub fn println(&self, text: &str) -> Result<()> {
        self.inner.multi.suspend(|| -> io::Result<()> {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()
        })?;
        Ok(())
    }

    /// Block until every bar of the session is finished.
    pub fn wait(&self) {
        self.inner.pending.wait(self.inner.refresh_interval);
    }
}

impl fmt::Debug for RenderSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderSession")
            .field("width", &self.inner.width)
            .field("refresh_interval", &self.inner.refresh_interval)
            .field("refresh_hz", &self.inner.refresh_hz)
            .field("bars", &self.lock_bars().len())
            .finish()
    }
}
