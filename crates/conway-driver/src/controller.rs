//! Render-loop and control-panel state machine.
//!
//! [`Controller`] owns everything the page's callbacks share: the universe
//! handle, the frame scheduler, the clock, the view, the FPS sampler, the
//! playback state, and the drawing-session flag. The host forwards DOM events
//! and animation-frame callbacks to it:
//!
//! 1. [`Controller::play`] runs one frame immediately and schedules the next.
//! 2. Each fired frame calls [`Controller::on_animation_frame`].
//! 3. Buttons map to [`Controller::toggle_play_pause`],
//!    [`Controller::resize`], and [`Controller::random_mutate`].
//! 4. Canvas mouse events map to the `pointer_*` methods.
//!
//! At most one frame is ever pending: the handle lives inside
//! [`Playback::Playing`], so there is no state in which two can coexist.

use tracing::{debug, error, trace};

use crate::DriverError;
use crate::config::DriverConfig;
use crate::fps::FpsSampler;
use crate::host::{ControlView, FrameHandle, FrameScheduler, MonotonicClock, UniverseHandle};
use crate::pointer::{self, CanvasMetrics, CellCoord};

/// Whether the render loop is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// A frame is scheduled under `frame`.
    Playing { frame: FrameHandle },
    /// No frame is scheduled.
    Paused,
}

/// Labels and policy copied out of [`DriverConfig`].
#[derive(Debug, Clone)]
struct Options {
    pause_glyph: String,
    resume_glyph: String,
    fps_window: usize,
    resume_on_random_mutate: bool,
}

impl From<&DriverConfig> for Options {
    fn from(config: &DriverConfig) -> Self {
        Self {
            pause_glyph: config.pause_glyph.clone(),
            resume_glyph: config.resume_glyph.clone(),
            fps_window: config.fps_window,
            resume_on_random_mutate: config.resume_on_random_mutate,
        }
    }
}

pub struct Controller<U, S, C, V> {
    universe: U,
    scheduler: S,
    clock: C,
    view: V,
    fps: FpsSampler,
    playback: Playback,
    drawing: bool,
    options: Options,
}

impl<U, S, C, V> Controller<U, S, C, V>
where
    U: UniverseHandle,
    S: FrameScheduler,
    C: MonotonicClock,
    V: ControlView,
{
    /// Create a paused controller. The FPS window starts at the current time.
    pub fn new(universe: U, scheduler: S, clock: C, view: V, config: &DriverConfig) -> Self {
        let options = Options::from(config);
        let fps = FpsSampler::with_capacity(clock.now_ms(), options.fps_window);
        Self {
            universe,
            scheduler,
            clock,
            view,
            fps,
            playback: Playback::Paused,
            drawing: false,
            options,
        }
    }

    // ── Playback ────────────────────────────────────────────────────

    /// PAUSED → PLAYING: switch the label and run a frame right away.
    ///
    /// Calling this while already playing does nothing.
    pub fn play(&mut self) -> Result<(), DriverError> {
        if let Playback::Playing { frame } = self.playback {
            trace!(frame = frame.0, "play ignored: loop already scheduled");
            return Ok(());
        }
        debug!("playback resumed");
        self.view.set_toggle_label(&self.options.pause_glyph);
        self.run_frame()
    }

    /// PLAYING → PAUSED: cancel the pending frame and switch the label.
    ///
    /// Pausing while paused only refreshes the label.
    pub fn pause(&mut self) {
        if let Playback::Playing { frame } = self.playback {
            self.scheduler.cancel_frame(frame);
            debug!(frame = frame.0, "playback paused");
        }
        self.playback = Playback::Paused;
        self.view.set_toggle_label(&self.options.resume_glyph);
    }

    pub fn toggle_play_pause(&mut self) -> Result<(), DriverError> {
        if self.is_paused() {
            self.play()
        } else {
            self.pause();
            Ok(())
        }
    }

    /// Host callback for a fired animation frame.
    ///
    /// A callback that arrives after [`pause`](Self::pause) cancelled its
    /// frame is ignored.
    pub fn on_animation_frame(&mut self) -> Result<(), DriverError> {
        match self.playback {
            Playback::Playing { .. } => self.run_frame(),
            Playback::Paused => {
                trace!("stale animation frame ignored");
                Ok(())
            }
        }
    }

    /// Sample FPS, redraw, tick, then schedule the next frame.
    fn run_frame(&mut self) -> Result<(), DriverError> {
        if let Some(stats) = self.fps.record(self.clock.now_ms()) {
            let text = stats.display_text(self.options.fps_window);
            self.view.set_fps_text(&text);
        }

        self.universe.draw_grid();
        self.universe.draw_cells();
        self.universe.tick();

        match self.scheduler.request_frame() {
            Ok(frame) => {
                trace!(frame = frame.0, "next frame scheduled");
                self.playback = Playback::Playing { frame };
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "render loop stopped");
                self.playback = Playback::Paused;
                self.view.set_toggle_label(&self.options.resume_glyph);
                Err(err)
            }
        }
    }

    // ── Controls ────────────────────────────────────────────────────

    /// Forward a new grid size. Range checks are the universe's concern.
    pub fn resize(&mut self, width: u32, height: u32) {
        debug!(width, height, "resize requested");
        self.universe.set_width(width);
        self.universe.set_height(height);
    }

    /// Randomize the universe and show the pause glyph.
    ///
    /// The loop is only restarted when `resume_on_random_mutate` is set;
    /// otherwise a paused universe stays paused behind the "playing" label.
    pub fn random_mutate(&mut self) -> Result<(), DriverError> {
        self.view.set_toggle_label(&self.options.pause_glyph);
        self.universe.random_mutate();
        debug!(paused = self.is_paused(), "universe randomized");
        if self.options.resume_on_random_mutate && self.is_paused() {
            return self.play();
        }
        Ok(())
    }

    // ── Pointer drawing ─────────────────────────────────────────────

    /// Mouse-down on the canvas: pause and open a drawing session.
    pub fn pointer_down(&mut self) {
        self.pause();
        self.drawing = true;
    }

    /// Mouse-up: close the drawing session.
    pub fn pointer_up(&mut self) {
        self.drawing = false;
    }

    /// Mouse-move on the canvas.
    ///
    /// While a drawing session is open and the loop is paused, marks the cell
    /// under the pointer alive and repaints cells without ticking. Returns the
    /// painted cell.
    pub fn pointer_move(
        &mut self,
        metrics: &CanvasMetrics,
        client_x: f64,
        client_y: f64,
    ) -> Option<CellCoord> {
        if !self.drawing || !self.is_paused() {
            return None;
        }
        let cell = pointer::cell_at(
            metrics,
            client_x,
            client_y,
            self.universe.width(),
            self.universe.height(),
        )?;
        self.universe.set_alive_cell(cell.row, cell.col);
        self.universe.draw_cells();
        trace!(row = cell.row, col = cell.col, "cell painted");
        Some(cell)
    }

    /// Stop the loop and end any drawing session.
    pub fn shutdown(&mut self) {
        self.pause();
        self.drawing = false;
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub const fn playback(&self) -> Playback {
        self.playback
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool {
        matches!(self.playback, Playback::Paused)
    }

    #[must_use]
    pub const fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Handle of the scheduled frame, if any.
    #[must_use]
    pub const fn pending_frame(&self) -> Option<FrameHandle> {
        match self.playback {
            Playback::Playing { frame } => Some(frame),
            Playback::Paused => None,
        }
    }

    #[must_use]
    pub const fn fps(&self) -> &FpsSampler {
        &self.fps
    }

    #[must_use]
    pub const fn universe(&self) -> &U {
        &self.universe
    }

    pub fn universe_mut(&mut self) -> &mut U {
        &mut self.universe
    }

    #[must_use]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        ManualClock, ManualScheduler, RecordingUniverse, RecordingView, UniverseCall,
    };
    use pretty_assertions::assert_eq;

    type TestController =
        Controller<RecordingUniverse, ManualScheduler, ManualClock, RecordingView>;

    fn controller() -> TestController {
        Controller::new(
            RecordingUniverse::new(64, 64),
            ManualScheduler::new(),
            ManualClock::new(0.0),
            RecordingView::default(),
            &DriverConfig::default(),
        )
    }

    #[test]
    fn starts_paused_and_idle() {
        let ctl = controller();
        assert!(ctl.is_paused());
        assert!(!ctl.is_drawing());
        assert_eq!(ctl.pending_frame(), None);
        assert!(ctl.scheduler().pending().is_empty());
    }

    #[test]
    fn play_runs_a_frame_in_order_then_schedules() {
        let mut ctl = controller();
        ctl.clock().advance(16.0);
        ctl.play().unwrap();

        assert_eq!(
            ctl.universe().calls(),
            vec![UniverseCall::DrawGrid, UniverseCall::DrawCells, UniverseCall::Tick]
        );
        assert_eq!(ctl.scheduler().pending().len(), 1);
        assert_eq!(ctl.pending_frame(), ctl.scheduler().pending().first().copied());
        assert_eq!(ctl.view().label(), Some("⏸"));
        assert!(ctl.view().fps_text().unwrap().contains("latest = 63"));
    }

    #[test]
    fn play_while_playing_does_not_double_schedule() {
        let mut ctl = controller();
        ctl.play().unwrap();
        ctl.play().unwrap();
        assert_eq!(ctl.scheduler().pending().len(), 1);
        assert_eq!(ctl.scheduler().requested(), 1);
    }

    #[test]
    fn pause_cancels_the_pending_frame() {
        let mut ctl = controller();
        ctl.play().unwrap();
        let frame = ctl.pending_frame().unwrap();
        ctl.pause();

        assert_eq!(ctl.playback(), Playback::Paused);
        assert!(ctl.scheduler().pending().is_empty());
        assert_eq!(ctl.scheduler().cancelled(), &[frame]);
        assert_eq!(ctl.view().label(), Some("▶"));
    }

    #[test]
    fn toggle_alternates_states() {
        let mut ctl = controller();
        ctl.toggle_play_pause().unwrap();
        assert!(!ctl.is_paused());
        ctl.toggle_play_pause().unwrap();
        assert!(ctl.is_paused());
        ctl.toggle_play_pause().unwrap();
        assert!(!ctl.is_paused());
        assert_eq!(ctl.scheduler().pending().len(), 1);
    }

    #[test]
    fn stale_frame_after_pause_is_ignored() {
        let mut ctl = controller();
        ctl.play().unwrap();
        ctl.pause();
        ctl.universe_mut().clear_calls();

        ctl.on_animation_frame().unwrap();
        assert!(ctl.universe().calls().is_empty());
        assert!(ctl.scheduler().pending().is_empty());
    }

    #[test]
    fn schedule_failure_falls_back_to_paused() {
        let mut ctl = controller();
        ctl.scheduler_mut().fail_next_request();
        let err = ctl.play().unwrap_err();

        assert!(matches!(err, DriverError::Schedule(_)));
        assert!(ctl.is_paused());
        assert_eq!(ctl.view().label(), Some("▶"));
    }

    #[test]
    fn resize_forwards_width_then_height() {
        let mut ctl = controller();
        ctl.resize(32, 48);
        assert_eq!(
            ctl.universe().calls(),
            vec![UniverseCall::SetWidth(32), UniverseCall::SetHeight(48)]
        );
        assert_eq!(ctl.universe().height(), 48);
    }

    #[test]
    fn random_mutate_while_paused_only_changes_the_label() {
        let mut ctl = controller();
        ctl.random_mutate().unwrap();

        assert!(ctl.is_paused());
        assert_eq!(ctl.view().label(), Some("⏸"));
        assert_eq!(ctl.universe().calls(), vec![UniverseCall::RandomMutate]);
        assert!(ctl.scheduler().pending().is_empty());
    }

    #[test]
    fn random_mutate_can_resume_when_configured() {
        let config = DriverConfig {
            resume_on_random_mutate: true,
            ..DriverConfig::default()
        };
        let mut ctl = Controller::new(
            RecordingUniverse::new(8, 8),
            ManualScheduler::new(),
            ManualClock::new(0.0),
            RecordingView::default(),
            &config,
        );
        ctl.random_mutate().unwrap();

        assert!(!ctl.is_paused());
        assert_eq!(ctl.scheduler().pending().len(), 1);
        assert_eq!(ctl.universe().calls()[0], UniverseCall::RandomMutate);
    }

    #[test]
    fn pointer_down_pauses_and_opens_a_session() {
        let mut ctl = controller();
        ctl.play().unwrap();
        ctl.pointer_down();
        assert!(ctl.is_paused());
        assert!(ctl.is_drawing());
        ctl.pointer_up();
        assert!(!ctl.is_drawing());
        assert!(ctl.is_paused());
    }

    #[test]
    fn shutdown_stops_everything() {
        let mut ctl = controller();
        ctl.play().unwrap();
        ctl.pointer_down();
        ctl.play().unwrap();
        ctl.shutdown();
        assert!(ctl.is_paused());
        assert!(!ctl.is_drawing());
        assert!(ctl.scheduler().pending().is_empty());
    }
}
