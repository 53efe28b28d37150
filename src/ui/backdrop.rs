#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::{
    backdrop::{Variant, env::Rgba},
    ui::raster::{CellRaster, RasterCell},
};

/// Vertical sky gradient for each effect, top then bottom.
#[must_use]
pub fn sky(variant: Variant) -> (Color, Color) {
    match variant {
        Variant::Hail => (Color::Rgb(28, 32, 44), Color::Rgb(58, 64, 80)),
        Variant::Rain => (Color::Rgb(12, 20, 38), Color::Rgb(30, 44, 70)),
        Variant::Snowfall => (Color::Rgb(18, 10, 14), Color::Rgb(40, 24, 30)),
    }
}

/// Sky gradient with the backdrop raster composited on top.
pub struct Backdrop<'a> {
    pub top: Color,
    pub bottom: Color,
    pub raster: Option<&'a CellRaster>,
}

impl Widget for Backdrop<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let top = color_to_rgb(self.top);
        let bottom = color_to_rgb(self.bottom);
        for y in area.top()..area.bottom() {
            let sky = lerp_rgb(top, bottom, gradient_ratio(area, y));
            for x in area.left()..area.right() {
                let Some(cell) = buf.cell_mut((x, y)) else {
                    continue;
                };
                let particle = self
                    .raster
                    .and_then(|raster| raster.cell(x - area.x, y - area.y));
                paint_cell(cell, sky, particle);
            }
        }
    }
}

fn paint_cell(cell: &mut ratatui::buffer::Cell, sky: (f32, f32, f32), particle: Option<&RasterCell>) {
    let Some(particle) = particle.filter(|p| !p.is_blank()) else {
        cell.set_char(' ').set_bg(to_color(sky));
        return;
    };
    let bg = blend(sky, particle.tint);
    cell.set_bg(to_color(bg));
    if particle.ink.a > 0.0 && particle.glyph != ' ' {
        let mut glyph = [0; 4];
        cell.set_symbol(particle.glyph.encode_utf8(&mut glyph))
            .set_fg(to_color(blend(bg, particle.ink)));
    } else {
        cell.set_char(' ');
    }
}

fn gradient_ratio(area: Rect, y: u16) -> f32 {
    if area.height <= 1 {
        0.0
    } else {
        f32::from(y - area.top()) / f32::from(area.height - 1)
    }
}

fn color_to_rgb(c: Color) -> (f32, f32, f32) {
    match c {
        Color::Rgb(r, g, b) => (f32::from(r), f32::from(g), f32::from(b)),
        Color::DarkGray => (85., 85., 85.),
        Color::Gray => (170., 170., 170.),
        Color::White => (255., 255., 255.),
        _ => (0., 0., 0.),
    }
}

fn lerp_rgb(a: (f32, f32, f32), b: (f32, f32, f32), t: f32) -> (f32, f32, f32) {
    (
        a.0 + (b.0 - a.0) * t,
        a.1 + (b.1 - a.1) * t,
        a.2 + (b.2 - a.2) * t,
    )
}

fn blend(base: (f32, f32, f32), over: Rgba) -> (f32, f32, f32) {
    lerp_rgb(
        base,
        (f32::from(over.r), f32::from(over.g), f32::from(over.b)),
        over.a.clamp(0.0, 1.0),
    )
}

fn to_color(rgb: (f32, f32, f32)) -> Color {
    Color::Rgb(
        rgb.0.clamp(0.0, 255.0).round() as u8,
        rgb.1.clamp(0.0, 255.0).round() as u8,
        rgb.2.clamp(0.0, 255.0).round() as u8,
    )
}
