#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

//! Cell-resolution drawing for the backdrop.
//!
//! The animator draws in CSS pixels; [`CellRaster`] folds every primitive
//! down onto the terminal grid. Each cell keeps an `ink` layer (a glyph and
//! its color) and a `tint` layer that only colors the cell background.

use crate::backdrop::env::{
    ColorStop, DrawContext, Glow, Point, Rgba, Surface, SurfaceSize,
};

const TRANSPARENT: Rgba = Rgba {
    r: 0,
    g: 0,
    b: 0,
    a: 0.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterCell {
    pub glyph: char,
    /// Alpha of the primitive that chose `glyph`.
    pub glyph_alpha: f32,
    pub ink: Rgba,
    pub tint: Rgba,
}

impl Default for RasterCell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            glyph_alpha: 0.0,
            ink: TRANSPARENT,
            tint: TRANSPARENT,
        }
    }
}

impl RasterCell {
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.ink.a <= 0.0 && self.tint.a <= 0.0
    }
}

#[derive(Debug, Clone)]
pub struct CellRaster {
    cols: u16,
    rows: u16,
    backing: (u32, u32),
    scale: f32,
    cells: Vec<RasterCell>,
}

impl Default for CellRaster {
    fn default() -> Self {
        Self {
            cols: 0,
            rows: 0,
            backing: (0, 0),
            scale: 1.0,
            cells: Vec::new(),
        }
    }
}

impl CellRaster {
    #[must_use]
    pub fn new(cols: u16, rows: u16, backing: (u32, u32)) -> Self {
        let mut raster = Self::default();
        raster.resize(cols, rows, backing);
        raster
    }

    /// Resizes the grid and blanks every cell.
    pub fn resize(&mut self, cols: u16, rows: u16, backing: (u32, u32)) {
        self.cols = cols;
        self.rows = rows;
        self.backing = backing;
        self.cells = vec![RasterCell::default(); usize::from(cols) * usize::from(rows)];
    }

    #[must_use]
    pub fn cols(&self) -> u16 {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    #[must_use]
    pub fn cell(&self, col: u16, row: u16) -> Option<&RasterCell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells
            .get(usize::from(row) * usize::from(self.cols) + usize::from(col))
    }

    /// Number of cells carrying any ink or tint.
    #[must_use]
    pub fn lit_cells(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_blank()).count()
    }

    /// Device pixels covered by one cell, per axis.
    fn cell_pixels(&self) -> Option<(f32, f32)> {
        if self.cols == 0 || self.rows == 0 || self.backing.0 == 0 || self.backing.1 == 0 {
            return None;
        }
        Some((
            self.backing.0 as f32 / f32::from(self.cols),
            self.backing.1 as f32 / f32::from(self.rows),
        ))
    }

    /// CSS pixel position to fractional cell coordinates.
    fn to_cell(&self, point: Point) -> Option<(f32, f32)> {
        let (cw, ch) = self.cell_pixels()?;
        Some((point.x * self.scale / cw, point.y * self.scale / ch))
    }

    fn index(&self, col: f32, row: f32) -> Option<usize> {
        if !(col.is_finite() && row.is_finite()) || col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= usize::from(self.cols) || row >= usize::from(self.rows) {
            return None;
        }
        Some(row * usize::from(self.cols) + col)
    }

    fn stamp_ink(&mut self, idx: usize, glyph: char, color: Rgba) {
        if color.a <= 0.0 {
            return;
        }
        if let Some(cell) = self.cells.get_mut(idx) {
            if color.a >= cell.glyph_alpha {
                cell.glyph = glyph;
                cell.glyph_alpha = color.a;
            }
            cell.ink = composite(cell.ink, color);
        }
    }

    fn stamp_tint(&mut self, idx: usize, color: Rgba) {
        if color.a <= 0.0 {
            return;
        }
        if let Some(cell) = self.cells.get_mut(idx) {
            cell.tint = composite(cell.tint, color);
        }
    }
}

impl DrawContext for CellRaster {
    fn reset_transform(&mut self) {
        self.scale = 1.0;
    }

    fn scale(&mut self, factor: f32) {
        self.scale *= factor;
    }

    fn clear(&mut self, width: f32, height: f32) {
        let Some((cols, rows)) = self.to_cell(Point::new(width, height)) else {
            return;
        };
        let cols = (cols.ceil().max(0.0) as usize).min(usize::from(self.cols));
        let rows = (rows.ceil().max(0.0) as usize).min(usize::from(self.rows));
        for row in 0..rows {
            let start = row * usize::from(self.cols);
            for cell in &mut self.cells[start..start + cols] {
                *cell = RasterCell::default();
            }
        }
    }

    fn stroke_gradient_line(&mut self, from: Point, to: Point, width: f32, stops: &[ColorStop]) {
        let (Some(a), Some(b)) = (self.to_cell(from), self.to_cell(to)) else {
            return;
        };
        let glyph = line_glyph(b.0 - a.0, b.1 - a.1, width * self.scale);
        let steps = ((b.0 - a.0).abs().max((b.1 - a.1).abs()) * 2.0).ceil().max(1.0) as usize;
        let mut last = None;
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let Some(idx) = self.index(a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t) else {
                continue;
            };
            if last == Some(idx) {
                continue;
            }
            last = Some(idx);
            self.stamp_ink(idx, glyph, sample_stops(stops, t));
        }
    }

    fn fill_disc(&mut self, center: Point, radius: f32, color: Rgba, glow: Option<Glow>) {
        let Some((col, row)) = self.to_cell(center) else {
            return;
        };
        let Some(idx) = self.index(col, row) else {
            return;
        };
        if let Some(glow) = glow {
            self.stamp_tint(idx, glow.color.with_alpha(glow.color.a * 0.5));
        }
        self.stamp_ink(idx, disc_glyph(radius * self.scale), color);
    }

    fn fill_radial_disc(&mut self, center: Point, radius: f32, stops: &[ColorStop]) {
        let Some((cw, ch)) = self.cell_pixels() else {
            return;
        };
        let Some((col, row)) = self.to_cell(center) else {
            return;
        };
        let device_radius = radius * self.scale;
        if device_radius <= 0.0 {
            return;
        }
        let reach_cols = (device_radius / cw).ceil() as i32;
        let reach_rows = (device_radius / ch).ceil() as i32;
        let center_idx = self.index(col, row);
        for dr in -reach_rows..=reach_rows {
            for dc in -reach_cols..=reach_cols {
                let cell_col = col.floor() + dc as f32;
                let cell_row = row.floor() + dr as f32;
                let Some(idx) = self.index(cell_col, cell_row) else {
                    continue;
                };
                if Some(idx) == center_idx {
                    self.stamp_ink(idx, '*', sample_stops(stops, 0.0));
                    continue;
                }
                let dx = (cell_col + 0.5 - col) * cw;
                let dy = (cell_row + 0.5 - row) * ch;
                let t = (dx * dx + dy * dy).sqrt() / device_radius;
                if t <= 1.0 {
                    self.stamp_tint(idx, sample_stops(stops, t));
                }
            }
        }
    }
}

/// Standard "over" compositing of `src` onto `dst`.
#[must_use]
pub fn composite(dst: Rgba, src: Rgba) -> Rgba {
    let a = src.a + dst.a * (1.0 - src.a);
    if a <= 0.0 {
        return TRANSPARENT;
    }
    let channel = |s: u8, d: u8| {
        ((f32::from(s) * src.a + f32::from(d) * dst.a * (1.0 - src.a)) / a)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgba {
        r: channel(src.r, dst.r),
        g: channel(src.g, dst.g),
        b: channel(src.b, dst.b),
        a: a.min(1.0),
    }
}

/// Color at `t` along piecewise-linear gradient stops.
#[must_use]
pub fn sample_stops(stops: &[ColorStop], t: f32) -> Rgba {
    let Some(first) = stops.first() else {
        return TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if t <= hi.offset {
            let span = hi.offset - lo.offset;
            let k = if span > 0.0 { (t - lo.offset) / span } else { 1.0 };
            let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * k).round() as u8;
            return Rgba {
                r: mix(lo.color.r, hi.color.r),
                g: mix(lo.color.g, hi.color.g),
                b: mix(lo.color.b, hi.color.b),
                a: lo.color.a + (hi.color.a - lo.color.a) * k,
            };
        }
    }
    stops.last().map_or(TRANSPARENT, |stop| stop.color)
}

fn line_glyph(dx: f32, dy: f32, device_width: f32) -> char {
    // Cells are roughly twice as tall as wide.
    let slope = dy.abs() / (dx.abs() * 2.0).max(f32::EPSILON);
    if slope > 2.5 {
        if device_width < 1.0 { '╎' } else { '│' }
    } else if slope < 0.4 {
        '─'
    } else if (dx > 0.0) == (dy > 0.0) {
        '╲'
    } else {
        '╱'
    }
}

fn disc_glyph(device_radius: f32) -> char {
    if device_radius < 2.0 {
        '·'
    } else if device_radius < 3.0 {
        '•'
    } else {
        '●'
    }
}

/// CSS pixels per terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width: f32,
    pub height: f32,
}

/// The terminal viewport as a backdrop surface.
///
/// `raster` is `None` when the backdrop is disabled, which the animator
/// sees as a surface without a drawing context.
#[derive(Debug)]
pub struct TerminalSurface {
    metrics: CellMetrics,
    pixel_ratio: f32,
    cols: u16,
    rows: u16,
    backing: (u32, u32),
    raster: Option<CellRaster>,
}

impl TerminalSurface {
    #[must_use]
    pub fn new(metrics: CellMetrics, pixel_ratio: f32, drawable: bool) -> Self {
        Self {
            metrics,
            pixel_ratio,
            cols: 0,
            rows: 0,
            backing: (0, 0),
            raster: drawable.then(CellRaster::default),
        }
    }

    /// Follows the terminal size. Takes effect on the next backing resize.
    pub fn set_area(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    #[must_use]
    pub fn area(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    #[must_use]
    pub fn raster(&self) -> Option<&CellRaster> {
        self.raster.as_ref()
    }
}

impl Surface for TerminalSurface {
    type Context = CellRaster;

    fn displayed_size(&self) -> SurfaceSize {
        SurfaceSize::new(
            f32::from(self.cols) * self.metrics.width,
            f32::from(self.rows) * self.metrics.height,
        )
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
        if let Some(raster) = self.raster.as_mut() {
            raster.resize(self.cols, self.rows, self.backing);
        }
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    fn context(&mut self) -> Option<&mut CellRaster> {
        self.raster.as_mut()
    }
}
