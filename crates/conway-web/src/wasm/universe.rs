use conway_core::{Cell, XorShift64, canvas_extent};
use conway_driver::{DriverError, UniverseHandle};
use tracing::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::dom::{self, to_js};
use crate::controls::clamp_dimension;
use crate::paint::{self, ALIVE_COLOR, DEAD_COLOR, GRID_COLOR};

/// A Game of Life grid bound to a `<canvas>` it paints itself onto.
#[wasm_bindgen]
pub struct Universe {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    inner: conway_core::Universe,
    rng: XorShift64,
}

#[wasm_bindgen]
impl Universe {
    /// Bind the canvas with id `canvas_id` and fill a `width` x `height` grid
    /// at random.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, width: u32, height: u32) -> Result<Universe, JsValue> {
        let build = || -> Result<Self, DriverError> {
            let window = dom::window()?;
            let document = dom::document(&window)?;
            let canvas = dom::element_by_id(&document, canvas_id, "HtmlCanvasElement")?;
            Self::attach(canvas, width, height)
        };
        build().map_err(to_js)
    }

    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    pub fn generation(&self) -> f64 {
        self.inner.generation() as f64
    }

    #[wasm_bindgen(js_name = liveCount)]
    pub fn live_count(&self) -> usize {
        self.inner.live_count()
    }

    /// One byte per cell, row-major (`0` dead, `1` alive).
    pub fn cells(&self) -> Vec<u8> {
        self.inner.as_bytes()
    }

    /// Text rendering, one line per row.
    pub fn render(&self) -> String {
        self.inner.render()
    }

    #[wasm_bindgen(js_name = drawGrid)]
    pub fn draw_grid(&self) {
        let ctx = &self.context;
        ctx.begin_path();
        ctx.set_stroke_style_str(GRID_COLOR);
        for line in paint::grid_lines(self.inner.width(), self.inner.height()) {
            ctx.move_to(line.from.0, line.from.1);
            ctx.line_to(line.to.0, line.to.1);
        }
        ctx.stroke();
    }

    #[wasm_bindgen(js_name = drawCells)]
    pub fn draw_cells(&self) {
        let ctx = &self.context;
        ctx.begin_path();
        // Grouped by state so the fill style changes twice per frame.
        for (state, color) in [(Cell::Alive, ALIVE_COLOR), (Cell::Dead, DEAD_COLOR)] {
            ctx.set_fill_style_str(color);
            for rect in paint::cell_rects(&self.inner, state) {
                ctx.fill_rect(rect.x, rect.y, rect.size, rect.size);
            }
        }
        ctx.stroke();
    }

    pub fn tick(&mut self) {
        self.inner.tick();
    }

    /// Resize to `width` columns (capped), clearing every cell.
    #[wasm_bindgen(js_name = setWidth)]
    pub fn set_width(&mut self, width: u32) {
        self.inner.set_width(clamp_dimension(width));
        self.fit_canvas();
        debug!(width = self.inner.width(), "universe width set");
    }

    /// Resize to `height` rows (capped), clearing every cell.
    #[wasm_bindgen(js_name = setHeight)]
    pub fn set_height(&mut self, height: u32) {
        self.inner.set_height(clamp_dimension(height));
        self.fit_canvas();
        debug!(height = self.inner.height(), "universe height set");
    }

    #[wasm_bindgen(js_name = randomMutate)]
    pub fn random_mutate(&mut self) {
        self.inner.randomize(&mut self.rng);
    }

    /// Mark one cell alive. Returns `false` when the position is off-grid.
    #[wasm_bindgen(js_name = setAliveCell)]
    pub fn set_alive_cell(&mut self, row: u32, col: u32) -> bool {
        self.inner.set_alive_cell(row, col)
    }

    #[wasm_bindgen(js_name = toggleCell)]
    pub fn toggle_cell(&mut self, row: u32, col: u32) -> bool {
        self.inner.toggle_cell(row, col)
    }
}

impl Universe {
    /// Build a random universe over an already-resolved canvas.
    pub(crate) fn attach(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<Self, DriverError> {
        let context = dom::context_2d(&canvas)?;
        let mut rng = XorShift64::new(host_seed());
        let inner =
            conway_core::Universe::random(clamp_dimension(width), clamp_dimension(height), &mut rng);
        let universe = Self {
            canvas,
            context,
            inner,
            rng,
        };
        universe.fit_canvas();
        debug!(
            width = universe.inner.width(),
            height = universe.inner.height(),
            "universe attached"
        );
        Ok(universe)
    }

    fn fit_canvas(&self) {
        self.canvas.set_width(canvas_extent(self.inner.width()));
        self.canvas.set_height(canvas_extent(self.inner.height()));
    }
}

/// 53 bits of `Math.random()`.
fn host_seed() -> u64 {
    (js_sys::Math::random() * (1u64 << 53) as f64) as u64
}

impl UniverseHandle for Universe {
    fn draw_grid(&self) {
        Universe::draw_grid(self);
    }

    fn draw_cells(&self) {
        Universe::draw_cells(self);
    }

    fn tick(&mut self) {
        Universe::tick(self);
    }

    fn set_width(&mut self, width: u32) {
        Universe::set_width(self, width);
    }

    fn set_height(&mut self, height: u32) {
        Universe::set_height(self, height);
    }

    fn random_mutate(&mut self) {
        Universe::random_mutate(self);
    }

    fn set_alive_cell(&mut self, row: u32, col: u32) {
        Universe::set_alive_cell(self, row, col);
    }

    fn width(&self) -> u32 {
        Universe::width(self)
    }

    fn height(&self) -> u32 {
        Universe::height(self)
    }
}
