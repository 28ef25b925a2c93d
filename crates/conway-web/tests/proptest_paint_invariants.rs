#![cfg(not(target_arch = "wasm32"))]

//! Property-based invariant tests for canvas paint plans and input coercion.
//!
//! Verifies:
//! 1. the grid plan has one line per column and row boundary
//! 2. every grid line lies inside the canvas backing store
//! 3. alive and dead rectangles together cover each cell exactly once
//! 4. cell rectangles start on the cell pitch and end inside the canvas
//! 5. coerced input dimensions never exceed the input value

use std::collections::HashSet;

use conway_core::{Cell, Universe, XorShift64, canvas_extent};
use conway_web::controls::{MAX_DIMENSION, clamp_dimension, coerce_dimension};
use conway_web::paint::{cell_rects, grid_lines};
use proptest::prelude::*;

fn arb_universe() -> impl Strategy<Value = Universe> {
    (1u32..=32, 1u32..=32, any::<u64>())
        .prop_map(|(w, h, seed)| Universe::random(w, h, &mut XorShift64::new(seed)))
}

proptest! {
    #[test]
    fn grid_line_count_matches_boundaries(w in 0u32..=64, h in 0u32..=64) {
        prop_assert_eq!(grid_lines(w, h).len(), (w + h + 2) as usize);
    }

    #[test]
    fn grid_lines_stay_on_canvas(w in 0u32..=64, h in 0u32..=64) {
        let right = f64::from(canvas_extent(w));
        let bottom = f64::from(canvas_extent(h));
        for line in grid_lines(w, h) {
            for (x, y) in [line.from, line.to] {
                prop_assert!((0.0..=right).contains(&x));
                prop_assert!((0.0..=bottom).contains(&y));
            }
        }
    }

    #[test]
    fn rects_cover_each_cell_once(universe in arb_universe()) {
        let alive: Vec<_> = cell_rects(&universe, Cell::Alive).collect();
        let dead: Vec<_> = cell_rects(&universe, Cell::Dead).collect();
        prop_assert_eq!(alive.len(), universe.live_count());
        prop_assert_eq!(
            alive.len() + dead.len(),
            (universe.width() * universe.height()) as usize
        );

        let origins: HashSet<(u64, u64)> = alive
            .iter()
            .chain(&dead)
            .map(|r| (r.x as u64, r.y as u64))
            .collect();
        prop_assert_eq!(origins.len(), alive.len() + dead.len());
    }

    #[test]
    fn rects_align_to_cell_pitch(universe in arb_universe()) {
        for rect in cell_rects(&universe, Cell::Dead).chain(cell_rects(&universe, Cell::Alive)) {
            prop_assert_eq!((rect.x as u64 - 1) % 16, 0);
            prop_assert_eq!((rect.y as u64 - 1) % 16, 0);
            prop_assert!(rect.x + rect.size <= f64::from(canvas_extent(universe.width())));
            prop_assert!(rect.y + rect.size <= f64::from(canvas_extent(universe.height())));
        }
    }

    #[test]
    fn coercion_never_grows_the_value(value in -1e6f64..1e6) {
        let n = coerce_dimension(value);
        prop_assert!(f64::from(n) <= value.max(0.0));
        prop_assert!(clamp_dimension(n) <= MAX_DIMENSION);
    }
}
