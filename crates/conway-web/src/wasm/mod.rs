#![forbid(unsafe_code)]

mod app;
mod dom;
mod host;
mod logging;
mod universe;

pub use app::{Driver, start_driver};
pub use universe::Universe;
