//! Moving-average throughput for progress templates.

use indicatif::style::ProgressTracker;
use indicatif::{BinaryBytes, ProgressState};
use std::fmt;
use std::time::Instant;

/// Exponentially weighted moving average of bytes per second.
///
/// Each sample is the rate observed since the previous one, weighted with
/// `alpha = 2 / (window + 1)`. Registered as the `{ewma_speed}` template key.
///
/// ```rust
/// use std::time::{Duration, Instant};
/// use tally::progress::EwmaSpeed;
///
/// let start = Instant::now();
/// let mut speed = EwmaSpeed::new(60);
/// speed.record(0, start);
/// speed.record(1024, start + Duration::from_secs(1));
/// assert_eq!(speed.rate(), Some(1024.0));
/// ```
#[derive(Debug, Clone)]
pub struct EwmaSpeed {
    alpha: f64,
    rate: Option<f64>,
    last: Option<(u64, Instant)>,
}

impl EwmaSpeed {
    /// Create a tracker averaging over roughly `window` samples.
    pub fn new(window: u32) -> Self {
        Self {
            alpha: 2.0 / (f64::from(window.max(1)) + 1.0),
            rate: None,
            last: None,
        }
    }

    /// Record that `pos` bytes had been consumed at `now`.
    pub fn record(&mut self, pos: u64, now: Instant) {
        if let Some((last_pos, last_at)) = self.last {
            let elapsed = now.saturating_duration_since(last_at).as_secs_f64();
            if elapsed <= 0.0 {
                return;
            }
            let sample = pos.saturating_sub(last_pos) as f64 / elapsed;
            self.rate = Some(match self.rate {
                Some(rate) => rate + self.alpha * (sample - rate),
                None => sample,
            });
        }
        self.last = Some((pos, now));
    }

    /// Current average in bytes per second, once two samples were recorded.
    pub fn rate(&self) -> Option<f64> {
        self.rate
    }
}

impl ProgressTracker for EwmaSpeed {
    fn clone_box(&self) -> Box<dyn ProgressTracker> {
        Box::new(self.clone())
    }

    fn tick(&mut self, state: &ProgressState, now: Instant) {
        self.record(state.pos(), now);
    }

    fn reset(&mut self, state: &ProgressState, now: Instant) {
        self.rate = None;
        self.last = Some((state.pos(), now));
    }

    fn write(&self, _state: &ProgressState, w: &mut dyn fmt::Write) {
        let rate = self.rate.unwrap_or_default().max(0.0) as u64;
        let _ = write!(w, "{}/s", BinaryBytes(rate));
    }
}
