//! Graphics rendering functions
//!
//! Shapes are first generated as point arrays and then stamped onto an
//! image, clipped to its bounds:
//! - Lines (straight, with variable width)
//! - Boxes (outlines and filled)
//! - Circles (outlines and filled)

use super::{PixMut, PixelDepth};
use crate::box_::Box;
use crate::error::Result;
use crate::pta::Pta;

/// RGB color for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    /// White color
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Convert to grayscale value (0-255)
    pub fn to_gray(&self) -> u8 {
        ((self.r as u32 + self.g as u32 + self.b as u32) / 3) as u8
    }

    /// Compose as 32-bit RGBA pixel
    pub fn to_pixel32(&self) -> u32 {
        crate::color::compose_rgb(self.r, self.g, self.b)
    }

    /// Pixel value for an image of the given depth
    pub fn pixel_for_depth(&self, depth: PixelDepth) -> u32 {
        match depth {
            PixelDepth::Bit8 => self.to_gray() as u32,
            PixelDepth::Bit32 => self.to_pixel32(),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// =============================================================================
// Point array generation
// =============================================================================

/// Generate a point array for a line using Bresenham's integer algorithm.
///
/// The line connects `(x1, y1)` to `(x2, y2)` with 8-connectivity,
/// both endpoints included.
pub fn generate_line_pta(x1: i32, y1: i32, x2: i32, y2: i32) -> Pta {
    if x1 == x2 && y1 == y2 {
        let mut pta = Pta::with_capacity(1);
        pta.push(x1 as f32, y1 as f32);
        return pta;
    }

    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x2 > x1 { 1i32 } else { -1 };
    let sy = if y2 > y1 { 1i32 } else { -1 };

    let npts = dx.max(dy) + 1;
    let mut pta = Pta::with_capacity(npts as usize);

    let mut x = x1;
    let mut y = y1;

    if dx >= dy {
        let mut err = dx / 2;
        for _ in 0..npts {
            pta.push(x as f32, y as f32);
            err -= dy;
            if err < 0 {
                y += sy;
                err += dx;
            }
            x += sx;
        }
    } else {
        let mut err = dy / 2;
        for _ in 0..npts {
            pta.push(x as f32, y as f32);
            err -= dx;
            if err < 0 {
                x += sx;
                err += dy;
            }
            y += sy;
        }
    }

    pta
}

/// Generate a point array for a line with specified width.
///
/// For width > 1, parallel lines alternate on both sides of the base line.
pub fn generate_wide_line_pta(x1: i32, y1: i32, x2: i32, y2: i32, width: u32) -> Pta {
    let width = width.max(1);
    let base = generate_line_pta(x1, y1, x2, y2);
    if width == 1 {
        return base;
    }

    let mut result = Pta::with_capacity(base.len() * width as usize);
    result.append(&base);

    let is_horizontal = (x2 - x1).abs() > (y2 - y1).abs();

    for i in 1..width {
        let offset = (i + 1).div_ceil(2) as i32;
        let offset = if i % 2 == 1 { -offset } else { offset };

        let parallel = if is_horizontal {
            generate_line_pta(x1, y1 + offset, x2, y2 + offset)
        } else {
            generate_line_pta(x1 + offset, y1, x2 + offset, y2)
        };
        result.append(&parallel);
    }

    result
}

/// Generate a point array for a box outline.
pub fn generate_box_pta(b: &Box, width: u32) -> Pta {
    let width = width.max(1);
    let (x, y, w, h) = (b.x, b.y, b.w, b.h);
    if w <= 0 || h <= 0 {
        return Pta::new();
    }

    let half_w = (width / 2) as i32;
    let mut result = Pta::with_capacity((2 * (w + h) * width as i32) as usize);

    // Top and bottom edges span the corners
    result.append(&generate_wide_line_pta(
        x - half_w,
        y,
        x + w - 1 + half_w,
        y,
        width,
    ));
    result.append(&generate_wide_line_pta(
        x - half_w,
        y + h - 1,
        x + w - 1 + half_w,
        y + h - 1,
        width,
    ));

    if h > 2 + 2 * half_w {
        result.append(&generate_wide_line_pta(
            x,
            y + 1 + half_w,
            x,
            y + h - 2 - half_w,
            width,
        ));
        result.append(&generate_wide_line_pta(
            x + w - 1,
            y + 1 + half_w,
            x + w - 1,
            y + h - 2 - half_w,
            width,
        ));
    }

    result
}

/// Generate a point array for a filled circle.
///
/// The circle has diameter = 2 * radius + 1 and is centered at (radius, radius).
pub fn generate_filled_circle_pta(radius: u32) -> Pta {
    if radius == 0 {
        let mut pta = Pta::with_capacity(1);
        pta.push(0.0, 0.0);
        return pta;
    }

    let diameter = 2 * radius + 1;
    let mut pta = Pta::with_capacity((diameter * diameter) as usize);

    let r = radius as i32;
    let threshold = (radius as f32 + 0.5).powi(2);

    for y in 0..=2 * r {
        for x in 0..=2 * r {
            let dx = x - r;
            let dy = y - r;
            if ((dx * dx + dy * dy) as f32) <= threshold {
                pta.push(x as f32, y as f32);
            }
        }
    }

    pta
}

/// Generate a point array for a circle outline of the given line width.
pub fn generate_circle_outline_pta(cx: i32, cy: i32, radius: u32, width: u32) -> Pta {
    if radius == 0 {
        let mut pta = Pta::with_capacity(1);
        pta.push(cx as f32, cy as f32);
        return pta;
    }

    let width = width.max(1);
    let mut pta = Pta::with_capacity((8 * radius * width) as usize);

    let r_outer = radius as f32 + (width as f32 / 2.0);
    let r_inner = (radius as f32 - (width as f32 / 2.0)).max(0.0);
    let r_outer_sq = r_outer * r_outer;
    let r_inner_sq = r_inner * r_inner;

    let extent = (r_outer + 1.0) as i32;

    for dy in -extent..=extent {
        for dx in -extent..=extent {
            let dist_sq = (dx * dx + dy * dy) as f32;
            if dist_sq <= r_outer_sq && dist_sq >= r_inner_sq {
                pta.push((cx + dx) as f32, (cy + dy) as f32);
            }
        }
    }

    pta
}

// =============================================================================
// PixMut rendering
// =============================================================================

impl PixMut {
    /// Render a point array with a specific RGB color.
    ///
    /// For 8 bpp images, the color is converted to grayscale.
    /// Points outside the image bounds are clipped.
    pub fn render_pta_color(&mut self, pta: &Pta, color: Color) -> Result<()> {
        let w = self.width() as i32;
        let h = self.height() as i32;
        let pixel_val = color.pixel_for_depth(self.depth());

        for (x, y) in pta.iter() {
            let xi = x as i32;
            let yi = y as i32;
            if xi < 0 || xi >= w || yi < 0 || yi >= h {
                continue;
            }
            self.set_pixel_unchecked(xi as u32, yi as u32, pixel_val);
        }

        Ok(())
    }

    /// Render a line with a specific color.
    pub fn render_line_color(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        width: u32,
        color: Color,
    ) -> Result<()> {
        let pta = generate_wide_line_pta(x1, y1, x2, y2, width.max(1));
        self.render_pta_color(&pta, color)
    }

    /// Render a box outline with a specific color.
    pub fn render_box_color(&mut self, b: &Box, width: u32, color: Color) -> Result<()> {
        let pta = generate_box_pta(b, width.max(1));
        self.render_pta_color(&pta, color)
    }

    /// Fill a box with a specific color.
    pub fn render_filled_box_color(&mut self, b: &Box, color: Color) -> Result<()> {
        let val = color.pixel_for_depth(self.depth());
        self.set_in_rect_arbitrary(b, val);
        Ok(())
    }

    /// Render a circle outline with a specific color.
    pub fn render_circle_color(
        &mut self,
        cx: i32,
        cy: i32,
        radius: u32,
        width: u32,
        color: Color,
    ) -> Result<()> {
        let pta = generate_circle_outline_pta(cx, cy, radius, width.max(1));
        self.render_pta_color(&pta, color)
    }

    /// Render a filled circle with a specific color.
    pub fn render_filled_circle_color(
        &mut self,
        cx: i32,
        cy: i32,
        radius: u32,
        color: Color,
    ) -> Result<()> {
        let mut pta = generate_filled_circle_pta(radius);
        let r = radius as f32;
        pta.translate(cx as f32 - r, cy as f32 - r);
        self.render_pta_color(&pta, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pix;

    #[test]
    fn test_line_endpoints() {
        let pta = generate_line_pta(0, 0, 5, 2);
        assert_eq!(pta.len(), 6);
        assert_eq!(pta.get(0), Some((0.0, 0.0)));
        assert_eq!(pta.get(5), Some((5.0, 2.0)));

        let vertical = generate_line_pta(3, 7, 3, 1);
        assert_eq!(vertical.len(), 7);
        assert!(vertical.iter().all(|(x, _)| x == 3.0));
    }

    #[test]
    fn test_wide_line_count() {
        let pta = generate_wide_line_pta(0, 5, 9, 5, 3);
        assert_eq!(pta.len(), 30);
        let (_, y_min, _, y_max) = pta.bounding_box().unwrap();
        assert_eq!((y_min, y_max), (4.0, 6.0));
    }

    #[test]
    fn test_box_outline_on_gray() {
        let mut pm = Pix::new(10, 10, PixelDepth::Bit8).unwrap().to_mut();
        pm.render_box_color(&Box::new_unchecked(2, 2, 5, 4), 1, Color::WHITE)
            .unwrap();
        let pix: Pix = pm.into();
        assert_eq!(pix.get_pixel(2, 2), Some(255));
        assert_eq!(pix.get_pixel(6, 5), Some(255));
        assert_eq!(pix.get_pixel(4, 3), Some(0));
        assert_eq!(pix.get_pixel(7, 2), Some(0));
    }

    #[test]
    fn test_render_clips_outside_points() {
        let mut pm = Pix::new(4, 4, PixelDepth::Bit32).unwrap().to_mut();
        pm.render_line_color(-10, 1, 10, 1, 1, Color::new(1, 2, 3))
            .unwrap();
        let pix: Pix = pm.into();
        for x in 0..4 {
            assert_eq!(pix.get_rgb(x, 1), Some((1, 2, 3)));
        }
        assert_eq!(pix.get_rgb(0, 0), Some((0, 0, 0)));
    }

    #[test]
    fn test_filled_circle_centered() {
        let mut pm = Pix::new(11, 11, PixelDepth::Bit8).unwrap().to_mut();
        pm.render_filled_circle_color(5, 5, 2, Color::WHITE).unwrap();
        let pix: Pix = pm.into();
        assert_eq!(pix.get_pixel(5, 5), Some(255));
        assert_eq!(pix.get_pixel(7, 5), Some(255));
        assert_eq!(pix.get_pixel(8, 5), Some(0));
        assert_eq!(pix.get_pixel(7, 7), Some(0));
    }

    #[test]
    fn test_circle_outline_hollow() {
        let pta = generate_circle_outline_pta(0, 0, 4, 1);
        assert!(!pta.iter().any(|p| p == (0.0, 0.0)));
        assert!(pta.iter().any(|p| p == (4.0, 0.0)));
    }
}
