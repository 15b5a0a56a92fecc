//! Pixel <-> cell mapping for a letterboxed square-cell grid drawn on a 2D surface.

use crate::error::Result;
use crate::model::{GridSize, Position};
use crate::util::clog;

pub const MIN_CANVAS_WIDTH: u32 = 200;
pub const MAX_CANVAS_WIDTH: u32 = 1200;
pub const BACKGROUND: &str = "black";

/// A 2D drawing target plus the size of the element that contains it.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn set_size(&mut self, width: u32, height: u32);
    fn container_width(&self) -> u32;
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);

    fn fill_background(&mut self, color: &str) {
        let (w, h) = (self.width() as f64, self.height() as f64);
        self.fill_rect(0.0, 0.0, w, h, color);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub cell_size: u32,
    pub grid_width: u32,
    pub grid_height: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridMapper {
    canvas_width: u32,
    canvas_height: u32,
    size: GridSize,
    cell_size: u32,
    gutter: f64,
    offset_x: f64,
    offset_y: f64,
}

impl GridMapper {
    /// Bind to `surface` with a `width x height` logical grid and size the canvas.
    pub fn initialize(surface: &mut impl Surface, width: u32, height: u32, gutter: f64) -> Result<Self> {
        let size = GridSize::new(width, height)?;
        let mut mapper = Self {
            canvas_width: surface.width(),
            canvas_height: surface.height(),
            size,
            cell_size: 0,
            gutter,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        mapper.resize(surface);
        clog(&format!(
            "canvas init: grid={}x{} cell={}px canvas={}x{}",
            width, height, mapper.cell_size, mapper.canvas_width, mapper.canvas_height
        ));
        Ok(mapper)
    }

    /// Refit the canvas to its container. Returns the new cell size.
    pub fn resize(&mut self, surface: &mut impl Surface) -> u32 {
        let width = surface
            .container_width()
            .clamp(MIN_CANVAS_WIDTH, MAX_CANVAS_WIDTH);
        let per_cell = width as f64 / self.size.width as f64;
        let height = (per_cell * self.size.height as f64).floor() as u32;
        surface.set_size(width, height);
        self.canvas_width = width;
        self.canvas_height = height;
        self.refit();
        clog(&format!("canvas resize: {}x{} cell={}px", width, height, self.cell_size));
        self.cell_size
    }

    /// Change the logical dimensions (`None` keeps the current value). The canvas keeps its size.
    pub fn resize_grid(&mut self, width: Option<u32>, height: Option<u32>) -> Result<Layout> {
        self.size = GridSize::new(
            width.unwrap_or(self.size.width),
            height.unwrap_or(self.size.height),
        )?;
        self.refit();
        Ok(self.layout())
    }

    fn refit(&mut self) {
        self.cell_size =
            (self.canvas_width / self.size.width).min(self.canvas_height / self.size.height);
        self.offset_x = (self.canvas_width as f64 - (self.cell_size * self.size.width) as f64) / 2.0;
        self.offset_y =
            (self.canvas_height as f64 - (self.cell_size * self.size.height) as f64) / 2.0;
    }

    pub fn layout(&self) -> Layout {
        Layout {
            cell_size: self.cell_size,
            grid_width: self.size.width,
            grid_height: self.size.height,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    pub fn offsets(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    pub fn gutter(&self) -> f64 {
        self.gutter
    }

    pub fn set_gutter(&mut self, gutter: f64) {
        self.gutter = gutter.max(0.0);
    }

    /// Cell under a canvas-relative pixel, or `None` inside the letterbox margin.
    pub fn pixel_to_cell(&self, px: f64, py: f64) -> Option<Position> {
        if self.cell_size == 0 {
            return None;
        }
        let inside_x = px > self.offset_x && px < self.canvas_width as f64 - self.offset_x;
        let inside_y = py > self.offset_y && py < self.canvas_height as f64 - self.offset_y;
        if !(inside_x && inside_y) {
            return None;
        }
        let cs = self.cell_size as f64;
        let x = ((px - self.offset_x) / cs).floor() as i32;
        let y = ((py - self.offset_y) / cs).floor() as i32;
        self.size
            .contains(x, y)
            .then(|| Position::new(x as u32, y as u32))
    }

    /// Fill the surface with the background and recompute the centering offsets.
    pub fn clear(&mut self, surface: &mut impl Surface) {
        surface.fill_background(BACKGROUND);
        self.refit();
    }

    /// Clear to the background and paint every cell once, in column order.
    pub fn draw_grid<S, F>(&mut self, surface: &mut S, mut color_of: F)
    where
        S: Surface,
        F: FnMut(Position) -> &'static str,
    {
        self.clear(surface);
        if self.cell_size == 0 {
            return;
        }
        for x in 0..self.size.width {
            for y in 0..self.size.height {
                let color = color_of(Position::new(x, y));
                self.draw_cell(surface, x, y, color);
            }
        }
    }

    pub fn draw_cell(&self, surface: &mut impl Surface, x: u32, y: u32, color: &str) {
        let cs = self.cell_size as f64;
        let pos_x = x as f64 * cs + self.offset_x + self.gutter;
        let pos_y = y as f64 * cs + self.offset_y + self.gutter;
        let side = cs - self.gutter * 2.0;
        surface.fill_rect(
            pos_x.floor(),
            pos_y.floor(),
            side.floor(),
            side.floor(),
            color,
        );
    }

    /// Paint column `x` as a bar rising from the grid floor, `fraction` of the grid height tall.
    pub fn draw_bar(&self, surface: &mut impl Surface, x: u32, fraction: f64, color: &str) {
        let cs = self.cell_size as f64;
        let full = cs * self.size.height as f64;
        let bar = full * fraction.clamp(0.0, 1.0);
        let pos_x = x as f64 * cs + self.offset_x + self.gutter;
        let pos_y = self.offset_y + full - bar;
        surface.fill_rect(
            pos_x.floor(),
            pos_y.floor(),
            (cs - self.gutter * 2.0).floor(),
            bar.floor(),
            color,
        );
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FillRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub color: String,
}

/// In-memory surface for headless runs: records every fill.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub container_width: u32,
    pub fills: Vec<FillRect>,
}

impl RecordingSurface {
    pub fn with_container(container_width: u32) -> Self {
        Self {
            container_width,
            ..Default::default()
        }
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn container_width(&self) -> u32 {
        self.container_width
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.fills.push(FillRect {
            x,
            y,
            w,
            h,
            color: color.to_string(),
        });
    }
}
