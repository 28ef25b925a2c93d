#![forbid(unsafe_code)]

//! Host-agnostic Game of Life engine.
//!
//! `conway-core` is the platform-independent simulation model behind the web
//! visualizer. It owns cell storage and the transition rule, and knows the
//! pixel geometry a canvas renderer needs, all without touching any host API.
//!
//! # Primary responsibilities
//!
//! - **Cell**: a single dead/alive grid position.
//! - **Universe**: row-major toroidal grid with the B3/S23 tick.
//! - **Geometry**: cell size, border pitch, and canvas extents.
//! - **Rng**: small deterministic PRNG used for random fills.
//!
//! # Design principles
//!
//! - **No I/O**: the host adapter paints and supplies entropy.
//! - **Deterministic**: identical seeds and inputs always produce identical state.
//! - **`#![forbid(unsafe_code)]`**: safety enforced at compile time.

pub mod cell;
pub mod geometry;
pub mod rng;
pub mod universe;

pub use cell::Cell;
pub use geometry::{CELL_PITCH, CELL_SIZE, canvas_extent, cell_origin};
pub use rng::XorShift64;
pub use universe::Universe;
