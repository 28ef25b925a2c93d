//! Canvas pixel geometry shared by the renderer and pointer hit-testing.
//!
//! Every cell is a `CELL_SIZE` square preceded by a one-pixel grid line, and
//! the canvas carries one extra trailing line so the last row/column is closed.

/// Edge length of one cell in canvas pixels.
pub const CELL_SIZE: u32 = 15;

/// Distance between the origins of two adjacent cells (cell + border).
pub const CELL_PITCH: u32 = CELL_SIZE + 1;

/// Canvas extent in pixels for `cells` cells along one axis.
#[must_use]
pub const fn canvas_extent(cells: u32) -> u32 {
    cells.saturating_mul(CELL_PITCH).saturating_add(1)
}

/// Pixel offset of the top-left corner of cell `index` along one axis.
#[must_use]
pub const fn cell_origin(index: u32) -> u32 {
    index.saturating_mul(CELL_PITCH).saturating_add(1)
}

/// Pixel offset of grid line `index` along one axis.
///
/// Lines share the offset of the following cell's origin.
#[must_use]
pub const fn grid_line_offset(index: u32) -> u32 {
    cell_origin(index)
}
