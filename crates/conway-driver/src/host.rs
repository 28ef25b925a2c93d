//! Capabilities the driver consumes from its host and from the universe.

use web_time::Instant;

use crate::DriverError;

/// Operations the driver needs from the simulation/grid collaborator.
///
/// Construction (bind a canvas id, pick initial extents) belongs to the
/// concrete type; everything the render loop and controls touch is here.
pub trait UniverseHandle {
    /// Paint the background and grid lines.
    fn draw_grid(&self);
    /// Paint every cell's current state.
    fn draw_cells(&self);
    /// Advance the simulation by one step.
    fn tick(&mut self);
    fn set_width(&mut self, width: u32);
    fn set_height(&mut self, height: u32);
    /// Randomize live-cell state.
    fn random_mutate(&mut self);
    fn set_alive_cell(&mut self, row: u32, col: u32);
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// Monotonic time source, in milliseconds.
pub trait MonotonicClock {
    fn now_ms(&self) -> f64;
}

/// Identifier of a pending animation frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Per-frame scheduling primitive with a matching cancellation.
///
/// Implementations schedule exactly one callback per successful request; the
/// host then invokes [`Controller::on_animation_frame`](crate::Controller::on_animation_frame).
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, DriverError>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Text outputs of the control panel.
pub trait ControlView {
    /// Replace the FPS readout.
    fn set_fps_text(&mut self, text: &str);
    /// Replace the play/pause button label.
    fn set_toggle_label(&mut self, label: &str);
}

/// Wall-clock-backed monotonic clock.
///
/// Uses `web_time::Instant`, which maps to `performance.now()` on wasm32 and
/// to `std::time::Instant` elsewhere.
#[derive(Debug, Clone, Copy)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for InstantClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_clock_never_goes_backwards() {
        let clock = InstantClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(a >= 0.0);
        assert!(b >= a);
    }
}
