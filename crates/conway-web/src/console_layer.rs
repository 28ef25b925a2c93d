#![forbid(unsafe_code)]

//! Tracing layer that formats events as single console lines.
//!
//! Provides a `tracing_subscriber::Layer` implementation that renders each
//! event as `LEVEL target: message key=value ...` and hands the line to a
//! [`LogSink`]. On wasm32 the sink is the browser console; tests use a
//! capturing sink.
//!
//! ```
//! use conway_web::console_layer::{ConsoleLayer, MemorySink};
//! use tracing::Level;
//! use tracing_subscriber::prelude::*;
//!
//! let sink = MemorySink::default();
//! let subscriber = tracing_subscriber::registry()
//!     .with(ConsoleLayer::new(sink.clone(), Level::INFO));
//! tracing::subscriber::with_default(subscriber, || {
//!     tracing::info!(target: "conway", width = 64, "universe ready");
//! });
//! assert_eq!(sink.lines()[0].1, "INFO  conway: universe ready width=64");
//! ```

use std::fmt::{self, Write as FmtWrite};
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Destination for formatted log lines.
pub trait LogSink: Send + Sync + 'static {
    fn write_line(&self, level: Level, line: &str);
}

/// Sink that keeps every line in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl MemorySink {
    /// Snapshot of captured lines, oldest first.
    #[must_use]
    pub fn lines(&self) -> Vec<(Level, String)> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, level: Level, line: &str) {
        let mut lines = match self.lines.lock() {
            Ok(l) => l,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push((level, line.to_owned()));
    }
}

/// Format level as a fixed-width string.
fn level_str(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN ",
        Level::INFO => "INFO ",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

/// Extracts message and structured fields from a tracing event.
#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = Some(rendered);
        } else {
            self.fields.push((field.name().to_string(), rendered));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }
}

/// A `tracing_subscriber::Layer` writing one line per event to a [`LogSink`].
pub struct ConsoleLayer<S> {
    sink: S,
    max_level: Level,
}

impl<S: LogSink> ConsoleLayer<S> {
    /// Forward events at `max_level` or more severe.
    pub fn new(sink: S, max_level: Level) -> Self {
        Self { sink, max_level }
    }

    fn format_event(event: &Event<'_>) -> String {
        let metadata = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let mut line = String::new();
        let _ = write!(
            line,
            "{} {}: {}",
            level_str(*metadata.level()),
            metadata.target(),
            visitor.message.unwrap_or_default()
        );
        for (key, value) in &visitor.fields {
            let _ = write!(line, " {key}={value}");
        }
        line
    }
}

impl<S, Sub> Layer<Sub> for ConsoleLayer<S>
where
    S: LogSink,
    Sub: Subscriber,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, Sub>) -> bool {
        *metadata.level() <= self.max_level
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, Sub>) {
        let line = Self::format_event(event);
        self.sink.write_line(*event.metadata().level(), &line);
    }
}
