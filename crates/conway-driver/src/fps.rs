//! Rolling frame-rate sampler.
//!
//! Each call to [`FpsSampler::record`] converts the time since the previous
//! call into an instantaneous rate (`1000 / elapsed_ms`), appends it to a
//! bounded FIFO window, and reports latest/mean/min/max over that window.

use std::collections::VecDeque;

/// Number of samples retained by default.
pub const DEFAULT_FPS_WINDOW: usize = 100;

/// Rounded statistics over the current sample window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FpsStats {
    pub latest: i64,
    pub mean: i64,
    pub min: i64,
    pub max: i64,
}

impl FpsStats {
    /// Multi-line readout for the FPS text node.
    #[must_use]
    pub fn display_text(&self, window: usize) -> String {
        format!(
            "Frames per Second:\n         latest = {}\navg of last {window} = {}\nmin of last {window} = {}\nmax of last {window} = {}",
            self.latest, self.mean, self.min, self.max
        )
    }
}

#[derive(Debug, Clone)]
pub struct FpsSampler {
    samples: VecDeque<f64>,
    capacity: usize,
    last_ms: f64,
}

impl FpsSampler {
    /// Create an empty sampler whose first interval starts at `now_ms`.
    #[must_use]
    pub fn new(now_ms: f64) -> Self {
        Self::with_capacity(now_ms, DEFAULT_FPS_WINDOW)
    }

    /// Create an empty sampler retaining at most `capacity` samples (min 1).
    #[must_use]
    pub fn with_capacity(now_ms: f64, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity,
            last_ms: now_ms,
        }
    }

    /// Record a frame at `now_ms` and return the updated statistics.
    ///
    /// A frame that arrives at or before the previous timestamp has no
    /// defined rate; it moves the reference time forward but adds no sample.
    pub fn record(&mut self, now_ms: f64) -> Option<FpsStats> {
        let elapsed = now_ms - self.last_ms;
        self.last_ms = now_ms;

        if elapsed > 0.0 {
            self.samples.push_back(1000.0 / elapsed);
            while self.samples.len() > self.capacity {
                self.samples.pop_front();
            }
        }

        self.stats()
    }

    /// Statistics over the current window, or `None` while it is empty.
    #[must_use]
    pub fn stats(&self) -> Option<FpsStats> {
        let latest = *self.samples.back()?;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &fps in &self.samples {
            sum += fps;
            min = min.min(fps);
            max = max.max(fps);
        }
        let mean = sum / self.samples.len() as f64;

        Some(FpsStats {
            latest: round_half_up(latest),
            mean: round_half_up(mean),
            min: round_half_up(min),
            max: round_half_up(max),
        })
    }

    /// Retained samples, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Round to the nearest integer, halves toward positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
