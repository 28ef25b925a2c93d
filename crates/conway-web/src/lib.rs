#![forbid(unsafe_code)]

//! WASM frontend for the Conway visualizer.
//!
//! This crate is host-specific (web/WASM). It provides a stable
//! `wasm-bindgen` API surface for:
//! - a canvas-bound [`Universe`] that paints itself with the 2D context,
//! - `startDriver`, which resolves the page's controls, wires DOM events into
//!   a [`conway_driver::Controller`], and starts the render loop,
//! - routing `tracing` output to the browser console.
//!
//! Paint plans, input coercion, and log formatting are platform-agnostic and
//! compiled on every target so they can be tested natively.

pub mod console_layer;
pub mod controls;
pub mod paint;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{Driver, Universe, start_driver};
