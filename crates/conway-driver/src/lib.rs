#![forbid(unsafe_code)]

//! `conway-driver` is the host-driven controller behind the Conway web
//! visualizer.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) delivers animation
//!   frames and pointer/button events; the driver never blocks or spawns.
//! - **Injectable time and scheduling**: [`MonotonicClock`] and
//!   [`FrameScheduler`] are traits, so N frames can be simulated in tests.
//! - **Opaque simulation**: the universe is reached only through
//!   [`UniverseHandle`]; its storage and rule stay behind that seam.
//!
//! This crate intentionally does not bind to `wasm-bindgen`. `conway-web`
//! implements the host traits against the DOM and wraps the controller in a
//! stable JS API.

pub mod config;
pub mod controller;
pub mod fps;
pub mod host;
pub mod pointer;
pub mod testing;

pub use config::DriverConfig;
pub use controller::{Controller, Playback};
pub use fps::{DEFAULT_FPS_WINDOW, FpsSampler, FpsStats};
pub use host::{
    ControlView, FrameHandle, FrameScheduler, InstantClock, MonotonicClock, UniverseHandle,
};
pub use pointer::{CanvasMetrics, CellCoord};

/// Driver error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// A required DOM element id is not present in the document.
    MissingElement { id: String },
    /// The element exists but is not of the expected kind.
    WrongElementType { id: String, expected: &'static str },
    /// Configuration could not be parsed or failed validation.
    InvalidConfig(String),
    /// The host refused to schedule an animation frame.
    Schedule(String),
    /// A host API the driver needs (window, document, 2D context) is missing.
    HostUnavailable(&'static str),
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingElement { id } => write!(f, "missing DOM element #{id}"),
            Self::WrongElementType { id, expected } => {
                write!(f, "DOM element #{id} is not a {expected}")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid driver config: {msg}"),
            Self::Schedule(msg) => write!(f, "failed to schedule animation frame: {msg}"),
            Self::HostUnavailable(what) => write!(f, "host API unavailable: {what}"),
        }
    }
}

impl std::error::Error for DriverError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_name_the_offending_element() {
        let err = DriverError::MissingElement {
            id: "fps".to_string(),
        };
        assert_eq!(err.to_string(), "missing DOM element #fps");

        let err = DriverError::WrongElementType {
            id: "width".to_string(),
            expected: "HtmlInputElement",
        };
        assert_eq!(err.to_string(), "DOM element #width is not a HtmlInputElement");
    }
}
