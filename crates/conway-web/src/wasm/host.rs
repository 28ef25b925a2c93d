//! Browser implementations of the driver's host traits.

use std::cell::RefCell;
use std::rc::Rc;

use conway_driver::{ControlView, DriverError, FrameHandle, FrameScheduler};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlElement, Window};

use super::dom::describe;

/// Slot holding the closure every animation frame invokes.
///
/// Filled once the controller exists; emptied on teardown.
pub(crate) type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` / `cancelAnimationFrame` on the page's window.
pub(crate) struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl RafScheduler {
    pub(crate) fn new(window: Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, DriverError> {
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else {
            return Err(DriverError::Schedule(
                "frame callback not installed".to_string(),
            ));
        };
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(|err| DriverError::Schedule(describe(&err)))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(err) = self.window.cancel_animation_frame(handle.0) {
            warn!(frame = handle.0, error = %describe(&err), "cancelAnimationFrame failed");
        }
    }
}

/// FPS readout and play/pause label, written as plain text.
pub(crate) struct DomView {
    fps: HtmlElement,
    toggle: HtmlElement,
}

impl DomView {
    pub(crate) fn new(fps: HtmlElement, toggle: HtmlElement) -> Self {
        Self { fps, toggle }
    }
}

impl ControlView for DomView {
    fn set_fps_text(&mut self, text: &str) {
        self.fps.set_text_content(Some(text));
    }

    fn set_toggle_label(&mut self, label: &str) {
        self.toggle.set_text_content(Some(label));
    }
}
