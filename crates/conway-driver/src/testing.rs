//! Deterministic host doubles.
//!
//! These stand in for the browser when driving a [`Controller`] natively:
//! time only moves when told to, frames only fire when pumped, and every call
//! into the universe or the view is recorded for inspection.

use std::cell::{Cell, RefCell};

use crate::DriverError;
use crate::controller::Controller;
use crate::host::{ControlView, FrameHandle, FrameScheduler, MonotonicClock, UniverseHandle};

/// Clock that advances only when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, dt_ms: f64) {
        self.now.set(self.now.get() + dt_ms);
    }
}

impl MonotonicClock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Scheduler that queues frame requests until [`fire`](Self::fire) is called.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Vec<FrameHandle>,
    cancelled: Vec<FrameHandle>,
    requested: u32,
    fail_next: bool,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames requested and neither fired nor cancelled, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    /// Frames cancelled so far, in order.
    #[must_use]
    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }

    /// Total successful requests.
    #[must_use]
    pub const fn requested(&self) -> u32 {
        self.requested
    }

    /// Make the next request fail with [`DriverError::Schedule`].
    pub fn fail_next_request(&mut self) {
        self.fail_next = true;
    }

    /// Dequeue the oldest pending frame, as the host would when it fires.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, DriverError> {
        if std::mem::take(&mut self.fail_next) {
            return Err(DriverError::Schedule("scheduler refused request".to_string()));
        }
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        self.requested += 1;
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|&pending| pending != handle);
        self.cancelled.push(handle);
    }
}

/// One call observed by [`RecordingUniverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniverseCall {
    DrawGrid,
    DrawCells,
    Tick,
    SetWidth(u32),
    SetHeight(u32),
    RandomMutate,
    SetAliveCell { row: u32, col: u32 },
}

/// Universe stand-in that tracks extents and records every call.
#[derive(Debug, Default)]
pub struct RecordingUniverse {
    width: u32,
    height: u32,
    calls: RefCell<Vec<UniverseCall>>,
}

impl RecordingUniverse {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: RefCell::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn calls(&self) -> Vec<UniverseCall> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls equal to `call`.
    #[must_use]
    pub fn count(&self, call: UniverseCall) -> usize {
        self.calls.borrow().iter().filter(|&&c| c == call).count()
    }

    pub fn clear_calls(&mut self) {
        self.calls.get_mut().clear();
    }

    fn record(&self, call: UniverseCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl UniverseHandle for RecordingUniverse {
    fn draw_grid(&self) {
        self.record(UniverseCall::DrawGrid);
    }

    fn draw_cells(&self) {
        self.record(UniverseCall::DrawCells);
    }

    fn tick(&mut self) {
        self.record(UniverseCall::Tick);
    }

    fn set_width(&mut self, width: u32) {
        self.width = width;
        self.record(UniverseCall::SetWidth(width));
    }

    fn set_height(&mut self, height: u32) {
        self.height = height;
        self.record(UniverseCall::SetHeight(height));
    }

    fn random_mutate(&mut self) {
        self.record(UniverseCall::RandomMutate);
    }

    fn set_alive_cell(&mut self, row: u32, col: u32) {
        self.record(UniverseCall::SetAliveCell { row, col });
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// View that keeps the latest texts plus the label history.
#[derive(Debug, Default)]
pub struct RecordingView {
    fps_text: Option<String>,
    labels: Vec<String>,
}

impl RecordingView {
    #[must_use]
    pub fn fps_text(&self) -> Option<&str> {
        self.fps_text.as_deref()
    }

    /// Current toggle label.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }

    /// Every label ever set, oldest first.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl ControlView for RecordingView {
    fn set_fps_text(&mut self, text: &str) {
        self.fps_text = Some(text.to_owned());
    }

    fn set_toggle_label(&mut self, label: &str) {
        self.labels.push(label.to_owned());
    }
}

/// Fire up to `frames` pending frames, advancing the clock by `frame_ms`
/// before each. Stops early once nothing is pending; returns frames run.
pub fn pump_frames<U, V>(
    controller: &mut Controller<U, ManualScheduler, ManualClock, V>,
    frames: usize,
    frame_ms: f64,
) -> Result<usize, DriverError>
where
    U: UniverseHandle,
    V: ControlView,
{
    let mut ran = 0;
    while ran < frames {
        if controller.scheduler_mut().fire().is_none() {
            break;
        }
        controller.clock().advance(frame_ms);
        controller.on_animation_frame()?;
        ran += 1;
    }
    Ok(ran)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduler_hands_out_distinct_handles() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.request_frame().unwrap();
        let b = scheduler.request_frame().unwrap();
        assert_ne!(a, b);
        assert_eq!(scheduler.fire(), Some(a));
        assert_eq!(scheduler.pending(), &[b]);
    }

    #[test]
    fn cancel_removes_only_the_named_frame() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.request_frame().unwrap();
        let b = scheduler.request_frame().unwrap();
        scheduler.cancel_frame(a);
        assert_eq!(scheduler.pending(), &[b]);
        assert_eq!(scheduler.cancelled(), &[a]);
    }

    #[test]
    fn manual_clock_moves_only_when_told() {
        let clock = ManualClock::new(5.0);
        assert_eq!(clock.now_ms(), 5.0);
        clock.advance(2.5);
        assert_eq!(clock.now_ms(), 7.5);
        clock.set(1.0);
        assert_eq!(clock.now_ms(), 1.0);
    }
}
