//! DOM lookups that fail with a [`DriverError`] instead of `undefined`.

use conway_driver::{CanvasMetrics, DriverError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

pub(crate) fn window() -> Result<Window, DriverError> {
    web_sys::window().ok_or(DriverError::HostUnavailable("window"))
}

pub(crate) fn document(window: &Window) -> Result<Document, DriverError> {
    window
        .document()
        .ok_or(DriverError::HostUnavailable("document"))
}

/// Look up `id` and downcast it, naming `expected` in the error.
pub(crate) fn element_by_id<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> Result<T, DriverError> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| DriverError::MissingElement { id: id.to_string() })?;
    element
        .dyn_into::<T>()
        .map_err(|_| DriverError::WrongElementType {
            id: id.to_string(),
            expected,
        })
}

pub(crate) fn context_2d(
    canvas: &HtmlCanvasElement,
) -> Result<CanvasRenderingContext2d, DriverError> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or(DriverError::HostUnavailable("2d canvas context"))
}

/// Backing-store size plus the displayed rect, read at event time.
pub(crate) fn canvas_metrics(canvas: &HtmlCanvasElement) -> CanvasMetrics {
    let rect = canvas.get_bounding_client_rect();
    CanvasMetrics {
        backing_width: f64::from(canvas.width()),
        backing_height: f64::from(canvas.height()),
        css_width: rect.width(),
        css_height: rect.height(),
        left: rect.left(),
        top: rect.top(),
    }
}

/// Surface a driver error to JS as a thrown `Error`.
pub(crate) fn to_js(err: DriverError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Best-effort text for a value JS threw at us.
pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
