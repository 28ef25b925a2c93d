//! Pointer → cell hit-testing.
//!
//! The canvas backing store is sized in grid pixels while CSS may display it
//! at a different size, so a client-space pointer position is first scaled
//! into backing-store pixels and then divided by the cell pitch.

use conway_core::CELL_PITCH;

/// Geometry of the canvas element at the moment of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMetrics {
    /// Backing-store width (`canvas.width`).
    pub backing_width: f64,
    /// Backing-store height (`canvas.height`).
    pub backing_height: f64,
    /// Displayed width (bounding client rect).
    pub css_width: f64,
    /// Displayed height (bounding client rect).
    pub css_height: f64,
    /// Bounding client rect left edge.
    pub left: f64,
    /// Bounding client rect top edge.
    pub top: f64,
}

impl CanvasMetrics {
    /// Map a client-space point into backing-store pixels.
    ///
    /// Returns `None` when the canvas has no displayed area.
    #[must_use]
    pub fn client_to_canvas(&self, client_x: f64, client_y: f64) -> Option<(f64, f64)> {
        if !(self.css_width > 0.0 && self.css_height > 0.0) {
            return None;
        }
        let scale_x = self.backing_width / self.css_width;
        let scale_y = self.backing_height / self.css_height;
        let x = (client_x - self.left) * scale_x;
        let y = (client_y - self.top) * scale_y;
        (x.is_finite() && y.is_finite()).then_some((x, y))
    }
}

/// Grid position addressed by a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

/// Map a backing-store pixel to the cell containing it.
///
/// Both axes are clamped into `[0, extent - 1]`, so drags that leave the
/// canvas keep painting the nearest edge cell. Returns `None` for an empty
/// grid.
#[must_use]
pub fn canvas_to_cell(x: f64, y: f64, width: u32, height: u32) -> Option<CellCoord> {
    if width == 0 || height == 0 {
        return None;
    }
    Some(CellCoord {
        row: axis_cell(y, height),
        col: axis_cell(x, width),
    })
}

/// Map a client-space pointer position straight to a cell.
#[must_use]
pub fn cell_at(
    metrics: &CanvasMetrics,
    client_x: f64,
    client_y: f64,
    width: u32,
    height: u32,
) -> Option<CellCoord> {
    let (x, y) = metrics.client_to_canvas(client_x, client_y)?;
    canvas_to_cell(x, y, width, height)
}

fn axis_cell(pixel: f64, extent: u32) -> u32 {
    let index = (pixel / f64::from(CELL_PITCH)).floor();
    // `as` saturates: negatives land on 0, huge values on u32::MAX.
    (index as u32).min(extent - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn half_scale_canvas() -> CanvasMetrics {
        CanvasMetrics {
            backing_width: 960.0,
            backing_height: 960.0,
            css_width: 480.0,
            css_height: 480.0,
            left: 0.0,
            top: 0.0,
        }
    }

    #[test]
    fn scales_client_space_into_backing_pixels() {
        let metrics = half_scale_canvas();
        assert_eq!(metrics.client_to_canvas(100.0, 100.0), Some((200.0, 200.0)));
        assert_eq!(cell_at(&metrics, 100.0, 100.0, 64, 64), Some(CellCoord { row: 12, col: 12 }));
    }

    #[test]
    fn subtracts_the_bounding_rect_origin() {
        let metrics = CanvasMetrics {
            left: 40.0,
            top: 10.0,
            ..half_scale_canvas()
        };
        // (48 - 40) * 2 = 16 → col 1; (18 - 10) * 2 = 16 → row 1.
        assert_eq!(cell_at(&metrics, 48.0, 18.0, 64, 64), Some(CellCoord { row: 1, col: 1 }));
    }

    #[test]
    fn rows_follow_y_and_columns_follow_x() {
        assert_eq!(canvas_to_cell(40.0, 100.0, 64, 64), Some(CellCoord { row: 6, col: 2 }));
    }

    #[test]
    fn clamps_past_the_far_edge() {
        assert_eq!(canvas_to_cell(5_000.0, 5_000.0, 10, 20), Some(CellCoord { row: 19, col: 9 }));
    }

    #[test]
    fn clamps_before_the_near_edge() {
        assert_eq!(canvas_to_cell(-3.0, -40.0, 10, 10), Some(CellCoord { row: 0, col: 0 }));
    }

    #[test]
    fn empty_grid_has_no_cells() {
        assert_eq!(canvas_to_cell(1.0, 1.0, 0, 10), None);
        assert_eq!(canvas_to_cell(1.0, 1.0, 10, 0), None);
    }

    #[test]
    fn hidden_canvas_maps_nothing() {
        let metrics = CanvasMetrics {
            css_width: 0.0,
            ..half_scale_canvas()
        };
        assert_eq!(metrics.client_to_canvas(10.0, 10.0), None);
    }
}
