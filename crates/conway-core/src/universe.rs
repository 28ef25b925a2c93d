//! Universe: the toroidal cell grid and its transition rule.
//!
//! Cells are stored row-major in a flat `Vec<Cell>`; `(row, col)` maps to
//! `row * width + col`. Edges wrap, so the top row neighbours the bottom row
//! and the left column neighbours the right column.

use std::fmt;

use crate::cell::Cell;
use crate::rng::XorShift64;

/// Game of Life universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universe {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    generation: u64,
}

impl Universe {
    /// Create a universe with every cell dead.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Dead; area(width, height)],
            generation: 0,
        }
    }

    /// Create a universe where each cell is alive with probability one half.
    #[must_use]
    pub fn random(width: u32, height: u32, rng: &mut XorShift64) -> Self {
        let mut universe = Self::new(width, height);
        universe.randomize(rng);
        universe
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of ticks applied since construction or the last resize.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Linear index of `(row, col)`. Does not bounds-check.
    #[must_use]
    pub fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Cell at `(row, col)`, or `None` if out of bounds.
    #[must_use]
    pub fn cell(&self, row: u32, col: u32) -> Option<Cell> {
        if row < self.height && col < self.width {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells as one byte each (`0` dead, `1` alive), row-major.
    #[must_use]
    pub fn as_bytes(&self) -> Vec<u8> {
        self.cells.iter().map(|&cell| cell as u8).collect()
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Count live cells among the eight toroidal neighbours of `(row, col)`.
    ///
    /// On axes shorter than three cells a neighbour can be reached through
    /// more than one offset and is counted once per offset.
    #[must_use]
    pub fn live_neighbor_count(&self, row: u32, col: u32) -> u8 {
        if self.width == 0 || self.height == 0 {
            return 0;
        }
        let mut count = 0;
        for delta_row in [self.height - 1, 0, 1] {
            for delta_col in [self.width - 1, 0, 1] {
                if delta_row == 0 && delta_col == 0 {
                    continue;
                }
                let neighbor_row = wrap_add(row, delta_row, self.height);
                let neighbor_col = wrap_add(col, delta_col, self.width);
                if self.cells[self.index(neighbor_row, neighbor_col)].is_alive() {
                    count += 1;
                }
            }
        }
        count
    }

    /// Advance the universe by one generation (B3/S23).
    ///
    /// Every cell's next state is computed from the previous generation, never
    /// from partially updated neighbours.
    pub fn tick(&mut self) {
        if self.cells.is_empty() {
            return;
        }
        let mut next = self.cells.clone();
        for row in 0..self.height {
            for col in 0..self.width {
                let idx = self.index(row, col);
                let live_neighbors = self.live_neighbor_count(row, col);
                next[idx] = match (self.cells[idx], live_neighbors) {
                    // Underpopulation.
                    (Cell::Alive, n) if n < 2 => Cell::Dead,
                    // Survival.
                    (Cell::Alive, 2 | 3) => Cell::Alive,
                    // Overpopulation.
                    (Cell::Alive, _) => Cell::Dead,
                    // Reproduction.
                    (Cell::Dead, 3) => Cell::Alive,
                    (Cell::Dead, _) => Cell::Dead,
                };
            }
        }
        self.cells = next;
        self.generation += 1;
    }

    /// Change the number of columns. Every cell is reset to dead.
    pub fn set_width(&mut self, width: u32) {
        self.width = width;
        self.reset();
    }

    /// Change the number of rows. Every cell is reset to dead.
    pub fn set_height(&mut self, height: u32) {
        self.height = height;
        self.reset();
    }

    /// Replace every cell with a fresh coin flip.
    pub fn randomize(&mut self, rng: &mut XorShift64) {
        for cell in &mut self.cells {
            *cell = Cell::from(rng.next_bool());
        }
    }

    /// Flip the cell at `(row, col)`. Returns `false` if out of bounds.
    pub fn toggle_cell(&mut self, row: u32, col: u32) -> bool {
        match self.cell_mut(row, col) {
            Some(cell) => {
                cell.toggle();
                true
            }
            None => false,
        }
    }

    /// Mark the cell at `(row, col)` alive. Returns `false` if out of bounds.
    pub fn set_alive_cell(&mut self, row: u32, col: u32) -> bool {
        match self.cell_mut(row, col) {
            Some(cell) => {
                cell.set_alive();
                true
            }
            None => false,
        }
    }

    /// Mark each `(row, col)` alive; out-of-bounds positions are skipped.
    pub fn set_cells(&mut self, cells: &[(u32, u32)]) {
        for &(row, col) in cells {
            self.set_alive_cell(row, col);
        }
    }

    /// Text rendering, one line per row.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn cell_mut(&mut self, row: u32, col: u32) -> Option<&mut Cell> {
        if row < self.height && col < self.width {
            let idx = self.index(row, col);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    fn reset(&mut self) {
        self.cells = vec![Cell::Dead; area(self.width, self.height)];
        self.generation = 0;
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        for line in self.cells.chunks(self.width as usize) {
            for &cell in line {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn area(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// `(value + delta) % modulus` without overflowing `u32`.
fn wrap_add(value: u32, delta: u32, modulus: u32) -> u32 {
    ((u64::from(value) + u64::from(delta)) % u64::from(modulus)) as u32
}
