//! RGB raster with the drawing primitives needed for line charts.

use super::font::{self, ADVANCE};

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pure white.
    pub const WHITE: Self = Self(0xFF, 0xFF, 0xFF);
    /// Pure black.
    pub const BLACK: Self = Self(0x00, 0x00, 0x00);
    /// Light grey used for grid lines.
    pub const GRID: Self = Self(0xDD, 0xDD, 0xDD);
}

/// How a line is drawn.
#[derive(Debug, Clone, Copy)]
pub struct Stroke {
    /// Line colour.
    pub color: Rgb,
    /// Line width in pixels.
    pub width: u32,
    /// `(on, off)` lengths in pixels for dashed lines.
    pub dash: Option<(u32, u32)>,
}

impl Stroke {
    /// A solid line.
    pub fn solid(color: Rgb, width: u32) -> Self {
        Self { color, width, dash: None }
    }

    /// A dashed line.
    pub fn dashed(color: Rgb, width: u32, on: u32, off: u32) -> Self {
        Self {
            color,
            width,
            dash: Some((on, off)),
        }
    }
}

/// A fixed-size RGB pixel buffer. Drawing outside the bounds is clipped.
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// A canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
        for _ in 0..width as usize * height as usize {
            pixels.extend_from_slice(&[background.0, background.1, background.2]);
        }
        Self { width, height, pixels }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGB bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Colour of the pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        Some(Rgb(
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ))
    }

    /// Set one pixel; coordinates outside the canvas are ignored.
    pub fn put_pixel(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        self.pixels[offset..offset + 3].copy_from_slice(&[color.0, color.1, color.2]);
    }

    /// Fill the rectangle with corners `(x0, y0)` and `(x1, y1)`, inclusive.
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb) {
        for y in y0.min(y1)..=y0.max(y1) {
            for x in x0.min(x1)..=x0.max(x1) {
                self.put_pixel(x, y, color);
            }
        }
    }

    /// Outline the rectangle with corners `(x0, y0)` and `(x1, y1)`.
    pub fn stroke_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb) {
        let stroke = Stroke::solid(color, 1);
        self.draw_polyline(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)], stroke);
    }

    /// Draw a square brush of `width` pixels centred on `(x, y)`.
    fn dab(&mut self, x: i64, y: i64, width: u32, color: Rgb) {
        let w = i64::from(width.max(1));
        let half = (w - 1) / 2;
        self.fill_rect(x - half, y - half, x - half + w - 1, y - half + w - 1, color);
    }

    /// Draw connected line segments through `points`.
    ///
    /// The dash pattern continues across segment joints.
    pub fn draw_polyline(&mut self, points: &[(i64, i64)], stroke: Stroke) {
        let mut phase = 0_u32;
        for pair in points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            self.draw_segment(x0, y0, x1, y1, stroke, &mut phase);
        }
    }

    /// Bresenham segment; `phase` counts pixels along the dash pattern.
    fn draw_segment(
        &mut self,
        mut x0: i64,
        mut y0: i64,
        x1: i64,
        y1: i64,
        stroke: Stroke,
        phase: &mut u32,
    ) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            let visible = match stroke.dash {
                Some((on, off)) => *phase % (on + off).max(1) < on,
                None => true,
            };
            if visible {
                self.dab(x0, y0, stroke.width, stroke.color);
            }
            *phase = phase.wrapping_add(1);

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Draw one glyph with its top-left corner at `(x, y)`.
    ///
    /// With `upright == false` the glyph is rotated a quarter turn
    /// counter-clockwise and `(x, y)` is its bottom-left corner.
    fn draw_glyph(&mut self, x: i64, y: i64, ch: char, color: Rgb, scale: u32, upright: bool) {
        let s = i64::from(scale.max(1));
        for (col, &bits) in font::glyph(ch).iter().enumerate() {
            for row in 0..font::GLYPH_HEIGHT {
                if bits >> row & 1 == 0 {
                    continue;
                }
                let (c, r) = (col as i64 * s, i64::from(row) * s);
                let (px, py) = if upright { (x + c, y + r) } else { (x + r, y - c) };
                if upright {
                    self.fill_rect(px, py, px + s - 1, py + s - 1, color);
                } else {
                    self.fill_rect(px, py, px + s - 1, py - s + 1, color);
                }
            }
        }
    }

    /// Draw `text` left to right with its top-left corner at `(x, y)`.
    pub fn draw_text(&mut self, x: i64, y: i64, text: &str, color: Rgb, scale: u32) {
        let step = i64::from(ADVANCE * scale.max(1));
        for (i, ch) in text.chars().enumerate() {
            self.draw_glyph(x + i as i64 * step, y, ch, color, scale, true);
        }
    }

    /// Draw `text` bottom to top, starting at `(x, y)`.
    pub fn draw_text_vertical(&mut self, x: i64, y: i64, text: &str, color: Rgb, scale: u32) {
        let step = i64::from(ADVANCE * scale.max(1));
        for (i, ch) in text.chars().enumerate() {
            self.draw_glyph(x, y - i as i64 * step, ch, color, scale, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_filled() {
        let canvas = Canvas::new(3, 2, Rgb::WHITE);
        assert_eq!(canvas.pixels().len(), 18);
        assert!(canvas.pixels().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn drawing_is_clipped() {
        let mut canvas = Canvas::new(4, 4, Rgb::WHITE);
        canvas.put_pixel(-1, 0, Rgb::BLACK);
        canvas.put_pixel(4, 4, Rgb::BLACK);
        canvas.fill_rect(-5, -5, 0, 0, Rgb::BLACK);
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(1, 0), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn solid_line_covers_endpoints() {
        let mut canvas = Canvas::new(10, 10, Rgb::WHITE);
        canvas.draw_polyline(&[(1, 1), (8, 5)], Stroke::solid(Rgb::BLACK, 1));
        assert_eq!(canvas.pixel(1, 1), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(8, 5), Some(Rgb::BLACK));
    }

    #[test]
    fn dashed_line_has_gaps() {
        let mut canvas = Canvas::new(20, 1, Rgb::WHITE);
        canvas.draw_polyline(&[(0, 0), (19, 0)], Stroke::dashed(Rgb::BLACK, 1, 4, 4));
        let inked: Vec<bool> = (0..20)
            .map(|x| canvas.pixel(x, 0) == Some(Rgb::BLACK))
            .collect();
        assert!(inked[0..4].iter().all(|&b| b));
        assert!(inked[4..8].iter().all(|&b| !b));
        assert!(inked[8..12].iter().all(|&b| b));
    }

    #[test]
    fn text_marks_pixels() {
        let mut canvas = Canvas::new(20, 10, Rgb::WHITE);
        canvas.draw_text(0, 0, "I", Rgb::BLACK, 1);
        // 'I' has a full-height middle column.
        for y in 0..7 {
            assert_eq!(canvas.pixel(2, y), Some(Rgb::BLACK), "row {y}");
        }
        assert_eq!(canvas.pixel(0, 3), Some(Rgb::WHITE));
    }

    #[test]
    fn vertical_text_is_rotated() {
        let mut canvas = Canvas::new(10, 20, Rgb::WHITE);
        canvas.draw_text_vertical(0, 19, "I", Rgb::BLACK, 1);
        // The middle column of 'I' becomes a horizontal run at y = 19 - 2.
        for x in 0..7 {
            assert_eq!(canvas.pixel(x, 17), Some(Rgb::BLACK), "col {x}");
        }
    }
}
