//! Browser console sink and one-time subscriber setup.

use std::sync::Once;

use tracing::Level;
use tracing_subscriber::prelude::*;
use wasm_bindgen::JsValue;
use web_sys::console;

use crate::console_layer::{ConsoleLayer, LogSink};

/// Writes each line with the `console` method matching its level.
struct BrowserConsole;

impl LogSink for BrowserConsole {
    fn write_line(&self, level: Level, line: &str) {
        let line = JsValue::from_str(line);
        match level {
            Level::ERROR => console::error_1(&line),
            Level::WARN => console::warn_1(&line),
            Level::INFO => console::info_1(&line),
            Level::DEBUG => console::debug_1(&line),
            Level::TRACE => console::log_1(&line),
        }
    }
}

static INIT: Once = Once::new();

/// Install the panic hook and the console subscriber.
///
/// Only the first call takes effect; later drivers on the same page keep the
/// first level.
pub(crate) fn init(max_level: Level) {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        let subscriber =
            tracing_subscriber::registry().with(ConsoleLayer::new(BrowserConsole, max_level));
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            console::warn_1(&JsValue::from_str(
                "conway: a global tracing subscriber is already installed",
            ));
        }
    });
}
