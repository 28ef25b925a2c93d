//! Platform-agnostic paint plans for the 2D canvas.
//!
//! The wasm universe turns these into `moveTo`/`lineTo`/`fillRect` calls; the
//! geometry itself is computed here so it can be checked without a browser.

use conway_core::geometry::grid_line_offset;
use conway_core::{CELL_SIZE, Cell, Universe, canvas_extent, cell_origin};

pub const GRID_COLOR: &str = "#CCCCCC";
pub const DEAD_COLOR: &str = "#FFFFFF";
pub const ALIVE_COLOR: &str = "#000000";

/// One stroked grid line, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// One filled cell square, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Vertical lines (one per column boundary) followed by horizontal lines.
#[must_use]
pub fn grid_lines(width: u32, height: u32) -> Vec<LineSegment> {
    let right = f64::from(canvas_extent(width));
    let bottom = f64::from(canvas_extent(height));
    let mut lines = Vec::with_capacity(width as usize + height as usize + 2);

    for i in 0..=width {
        let x = f64::from(grid_line_offset(i));
        lines.push(LineSegment {
            from: (x, 0.0),
            to: (x, bottom),
        });
    }
    for j in 0..=height {
        let y = f64::from(grid_line_offset(j));
        lines.push(LineSegment {
            from: (0.0, y),
            to: (right, y),
        });
    }
    lines
}

/// Squares for every cell currently in `state`, row-major.
pub fn cell_rects(universe: &Universe, state: Cell) -> impl Iterator<Item = CellRect> + '_ {
    let width = universe.width().max(1);
    universe
        .cells()
        .iter()
        .enumerate()
        .filter(move |&(_, &cell)| cell == state)
        .map(move |(idx, _)| {
            let row = (idx / width as usize) as u32;
            let col = (idx % width as usize) as u32;
            CellRect {
                x: f64::from(cell_origin(col)),
                y: f64::from(cell_origin(row)),
                size: f64::from(CELL_SIZE),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn grid_has_a_line_per_boundary() {
        let lines = grid_lines(3, 2);
        // 4 vertical + 3 horizontal.
        assert_eq!(lines.len(), 7);
        assert_eq!(
            lines[0],
            LineSegment {
                from: (1.0, 0.0),
                to: (1.0, 33.0),
            }
        );
        assert_eq!(
            lines[4],
            LineSegment {
                from: (0.0, 1.0),
                to: (49.0, 1.0),
            }
        );
    }

    #[test]
    fn vertical_lines_step_by_pitch() {
        let lines = grid_lines(2, 1);
        let xs: Vec<f64> = lines[..3].iter().map(|l| l.from.0).collect();
        assert_eq!(xs, vec![1.0, 17.0, 33.0]);
    }

    #[test]
    fn alive_and_dead_rects_partition_the_grid() {
        let mut universe = Universe::new(3, 2);
        universe.set_cells(&[(0, 1), (1, 2)]);

        let alive: Vec<CellRect> = cell_rects(&universe, Cell::Alive).collect();
        assert_eq!(
            alive,
            vec![
                CellRect {
                    x: 17.0,
                    y: 1.0,
                    size: 15.0,
                },
                CellRect {
                    x: 33.0,
                    y: 17.0,
                    size: 15.0,
                },
            ]
        );
        assert_eq!(cell_rects(&universe, Cell::Dead).count(), 4);
    }

    #[test]
    fn empty_universe_paints_no_cells() {
        let universe = Universe::new(0, 0);
        assert_eq!(cell_rects(&universe, Cell::Dead).count(), 0);
        assert_eq!(grid_lines(0, 0).len(), 2);
    }
}
