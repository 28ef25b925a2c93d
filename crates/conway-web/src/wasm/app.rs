//! `startDriver`: resolve the page, wire its events, start the loop.

use std::cell::{RefCell, RefMut};
use std::rc::{Rc, Weak};

use conway_driver::{Controller, DriverConfig, DriverError, InstantClock};
use tracing::{debug, error, info, trace, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlCanvasElement, HtmlElement, HtmlInputElement, MouseEvent};

use super::dom::{self, describe, to_js};
use super::host::{DomView, FrameCallback, RafScheduler};
use super::logging;
use super::universe::Universe;
use crate::controls::coerce_dimension;

type WebController = Controller<Universe, RafScheduler, InstantClock, DomView>;

/// A registered DOM listener, kept so teardown can remove it.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

fn listen(
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<Listener, DriverError> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(|_| DriverError::HostUnavailable("addEventListener"))?;
    Ok(Listener {
        target: target.clone(),
        event,
        callback,
    })
}

/// Run `f` against the controller if it is still alive and not borrowed.
///
/// Events can race teardown, and a handler can fire while another holds the
/// controller; both are dropped rather than panicking.
fn with_controller(
    controller: &Weak<RefCell<WebController>>,
    source: &'static str,
    f: impl FnOnce(&mut WebController),
) {
    let Some(controller) = controller.upgrade() else {
        trace!(source, "driver gone; event ignored");
        return;
    };
    match controller.try_borrow_mut() {
        Ok(mut ctl) => f(&mut ctl),
        Err(_) => warn!(source, "controller busy; event dropped"),
    }
}

/// Handle returned to JS by [`start_driver`].
#[wasm_bindgen]
pub struct Driver {
    controller: Rc<RefCell<WebController>>,
    frame_callback: FrameCallback,
    listeners: Vec<Listener>,
}

/// Resolve the page's controls, start the render loop, and return its handle.
///
/// `config_json` is an optional JSON object overriding [`DriverConfig`]
/// fields. Throws if the config is invalid or any element is missing.
#[wasm_bindgen(js_name = startDriver)]
pub fn start_driver(config_json: Option<String>) -> Result<Driver, JsValue> {
    let config = match config_json.as_deref() {
        Some(json) => DriverConfig::from_json_str(json),
        None => Ok(DriverConfig::default()),
    }
    .map_err(to_js)?;
    logging::init(config.level().map_err(to_js)?);

    Driver::start(&config).map_err(|err| {
        error!(error = %err, "driver failed to start");
        to_js(err)
    })
}

impl Driver {
    fn start(config: &DriverConfig) -> Result<Self, DriverError> {
        let window = dom::window()?;
        let document = dom::document(&window)?;

        let canvas: HtmlCanvasElement =
            dom::element_by_id(&document, &config.canvas_id, "HtmlCanvasElement")?;
        let fps: HtmlElement = dom::element_by_id(&document, &config.fps_id, "HtmlElement")?;
        let play_pause: HtmlElement =
            dom::element_by_id(&document, &config.play_pause_id, "HtmlElement")?;
        let width_input: HtmlInputElement =
            dom::element_by_id(&document, &config.width_input_id, "HtmlInputElement")?;
        let height_input: HtmlInputElement =
            dom::element_by_id(&document, &config.height_input_id, "HtmlInputElement")?;
        let resize: HtmlElement = dom::element_by_id(&document, &config.resize_id, "HtmlElement")?;
        let random: HtmlElement = dom::element_by_id(&document, &config.random_id, "HtmlElement")?;

        let universe = Universe::attach(
            canvas.clone(),
            config.initial_width,
            config.initial_height,
        )?;
        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let controller = Rc::new(RefCell::new(Controller::new(
            universe,
            RafScheduler::new(window, Rc::clone(&frame_callback)),
            InstantClock::new(),
            DomView::new(fps, play_pause.clone()),
            config,
        )));

        let weak = Rc::downgrade(&controller);
        *frame_callback.borrow_mut() = Some(Closure::new(move || {
            with_controller(&weak, "animation-frame", |ctl| {
                // Failures are logged by the controller, which stays paused.
                let _ = ctl.on_animation_frame();
            });
        }));

        let mut driver = Self {
            controller,
            frame_callback,
            listeners: Vec::with_capacity(6),
        };
        driver.bind_controls(&play_pause, &resize, &random, width_input, height_input)?;
        driver.bind_canvas(canvas)?;

        driver.borrow()?.play()?;
        info!(listeners = driver.listeners.len(), "driver started");
        Ok(driver)
    }

    fn bind_controls(
        &mut self,
        play_pause: &HtmlElement,
        resize: &HtmlElement,
        random: &HtmlElement,
        width_input: HtmlInputElement,
        height_input: HtmlInputElement,
    ) -> Result<(), DriverError> {
        let weak = Rc::downgrade(&self.controller);
        self.listeners.push(listen(play_pause, "click", move |_| {
            with_controller(&weak, "play-pause", |ctl| {
                let _ = ctl.toggle_play_pause();
            });
        })?);

        let weak = Rc::downgrade(&self.controller);
        self.listeners.push(listen(resize, "click", move |_| {
            let width = coerce_dimension(width_input.value_as_number());
            let height = coerce_dimension(height_input.value_as_number());
            with_controller(&weak, "resize", |ctl| ctl.resize(width, height));
        })?);

        let weak = Rc::downgrade(&self.controller);
        self.listeners.push(listen(random, "click", move |_| {
            with_controller(&weak, "random-mutate", |ctl| {
                let _ = ctl.random_mutate();
            });
        })?);
        Ok(())
    }

    fn bind_canvas(&mut self, canvas: HtmlCanvasElement) -> Result<(), DriverError> {
        let weak = Rc::downgrade(&self.controller);
        self.listeners.push(listen(&canvas, "mousedown", move |_| {
            with_controller(&weak, "mousedown", WebController::pointer_down);
        })?);

        let weak = Rc::downgrade(&self.controller);
        self.listeners.push(listen(&canvas, "mouseup", move |_| {
            with_controller(&weak, "mouseup", WebController::pointer_up);
        })?);

        let weak = Rc::downgrade(&self.controller);
        let target = canvas.clone();
        self.listeners.push(listen(&canvas, "mousemove", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let metrics = dom::canvas_metrics(&target);
            let (x, y) = (f64::from(mouse.client_x()), f64::from(mouse.client_y()));
            with_controller(&weak, "mousemove", |ctl| {
                ctl.pointer_move(&metrics, x, y);
            });
        })?);
        Ok(())
    }

    fn borrow(&self) -> Result<RefMut<'_, WebController>, DriverError> {
        self.controller
            .try_borrow_mut()
            .map_err(|_| DriverError::HostUnavailable("controller is busy"))
    }

    /// Stop the loop, drop the frame closure, and unhook every listener.
    ///
    /// Returns `false` when there was nothing left to release.
    fn teardown(&mut self) -> bool {
        if self.listeners.is_empty() && self.frame_callback.borrow().is_none() {
            return false;
        }
        match self.controller.try_borrow_mut() {
            Ok(mut ctl) => ctl.shutdown(),
            Err(_) => warn!("controller busy during teardown; pending frame left to expire"),
        }
        self.frame_callback.borrow_mut().take();
        for listener in self.listeners.drain(..) {
            if let Err(err) = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            ) {
                warn!(event = listener.event, error = %describe(&err), "removeEventListener failed");
            }
        }
        true
    }
}

#[wasm_bindgen]
impl Driver {
    pub fn play(&self) -> Result<(), JsValue> {
        self.borrow().and_then(|mut ctl| ctl.play()).map_err(to_js)
    }

    pub fn pause(&self) -> Result<(), JsValue> {
        self.borrow().map(|mut ctl| ctl.pause()).map_err(to_js)
    }

    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&self) -> Result<(), JsValue> {
        self.borrow()
            .and_then(|mut ctl| ctl.toggle_play_pause())
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = isPaused)]
    pub fn is_paused(&self) -> bool {
        self.controller
            .try_borrow()
            .map_or(true, |ctl| ctl.is_paused())
    }

    #[wasm_bindgen(js_name = isDrawing)]
    pub fn is_drawing(&self) -> bool {
        self.controller
            .try_borrow()
            .is_ok_and(|ctl| ctl.is_drawing())
    }

    /// Repaint grid and cells without advancing the simulation.
    pub fn redraw(&self) -> Result<(), JsValue> {
        let ctl = self.borrow().map_err(to_js)?;
        ctl.universe().draw_grid();
        ctl.universe().draw_cells();
        Ok(())
    }

    /// Cancel the pending frame and remove every listener. Idempotent.
    pub fn destroy(&mut self) {
        if self.teardown() {
            debug!("driver destroyed");
        }
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.teardown();
    }
}
