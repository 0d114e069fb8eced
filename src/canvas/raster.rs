use crate::canvas::model::{Color, Point};
use base64::{engine::general_purpose, Engine as _};
use std::io::Cursor;

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn opaque(color: Color) -> Self {
        Self {
            r: color.r,
            g: color.g,
            b: color.b,
            a: 255,
        }
    }
}

/// Straight-alpha RGBA pixel buffer backing the drawing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, fill: Rgba) -> Self {
        let len = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        let mut pixels = vec![0u8; len];
        for chunk in pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[fill.r, fill.g, fill.b, fill.a]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wrap an existing RGBA buffer. `None` when the length does not match.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.pixels.get(idx..idx + 4)?;
        Some(Rgba {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
    }

    /// True when no pixel carries any opacity.
    pub fn is_blank(&self) -> bool {
        self.pixels.chunks_exact(4).all(|px| px[3] == 0)
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Reallocate to a new size, keeping the overlapping top-left region.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == self.size() {
            return;
        }
        let mut next = Raster::new(width, height);
        let copy_w = self.width.min(width) as usize;
        let copy_h = self.height.min(height);
        for y in 0..copy_h {
            let src = (y * self.width) as usize * 4;
            let dst = (y * width) as usize * 4;
            next.pixels[dst..dst + copy_w * 4]
                .copy_from_slice(&self.pixels[src..src + copy_w * 4]);
        }
        *self = next;
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        self.pixels[idx..idx + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    /// Stamp a filled disc of diameter `stroke_width`.
    pub fn stamp_dot(&mut self, center: Point, color: Color, stroke_width: u32) {
        let radius = (stroke_width as f32 / 2.0).max(0.5);
        let radius_sq = radius * radius;
        let min_x = (center.x - radius).floor() as i32;
        let max_x = (center.x + radius).ceil() as i32;
        let min_y = (center.y - radius).floor() as i32;
        let max_y = (center.y + radius).ceil() as i32;
        let rgba = Rgba::opaque(color);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= radius_sq {
                    self.set_pixel(x, y, rgba);
                }
            }
        }
    }

    /// Round-capped line segment built from overlapping disc stamps.
    pub fn paint_segment(&mut self, start: Point, end: Point, color: Color, stroke_width: u32) {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp_dot(
                Point::new(start.x + dx * t, start.y + dy * t),
                color,
                stroke_width,
            );
        }
    }

    /// Clear an axis-aligned square of half-side `radius` to transparent.
    pub fn clear_square(&mut self, center: Point, radius: u32) {
        let cx = center.x.floor() as i32;
        let cy = center.y.floor() as i32;
        let r = radius as i32;
        let x0 = (cx - r).max(0);
        let y0 = (cy - r).max(0);
        let x1 = (cx + r).min(self.width as i32 - 1);
        let y1 = (cy + r).min(self.height as i32 - 1);
        if x1 < x0 || y1 < y0 {
            return;
        }
        for y in y0..=y1 {
            let row = (y as u32 * self.width) as usize * 4;
            let start = row + x0 as usize * 4;
            let end = row + (x1 as usize + 1) * 4;
            self.pixels[start..end].fill(0);
        }
    }

    /// Source-over composite of this raster onto a solid background.
    pub fn flattened_onto(&self, background: Color) -> Raster {
        let mut output = Raster::filled(self.width, self.height, Rgba::opaque(background));
        for (dst, src) in output
            .pixels
            .chunks_exact_mut(4)
            .zip(self.pixels.chunks_exact(4))
        {
            let blended = blend_pixel(
                Rgba {
                    r: dst[0],
                    g: dst[1],
                    b: dst[2],
                    a: dst[3],
                },
                Rgba {
                    r: src[0],
                    g: src[1],
                    b: src[2],
                    a: src[3],
                },
            );
            dst.copy_from_slice(&[blended.r, blended.g, blended.b, blended.a]);
        }
        output
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| {
                image::ImageError::Parameter(image::error::ParameterError::from_kind(
                    image::error::ParameterErrorKind::DimensionMismatch,
                ))
            })?;
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageOutputFormat::Png)?;
        Ok(buf)
    }

    /// `data:image/png;base64,...` snapshot of the raster.
    pub fn to_data_uri(&self) -> Result<String, image::ImageError> {
        let png = self.encode_png()?;
        Ok(format!(
            "{PNG_DATA_URI_PREFIX}{}",
            general_purpose::STANDARD.encode(png)
        ))
    }
}

fn blend_pixel(bottom: Rgba, top: Rgba) -> Rgba {
    let sa = top.a as f32 / 255.0;
    let da = bottom.a as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a <= f32::EPSILON {
        return Rgba::TRANSPARENT;
    }

    let blend = |s: u8, d: u8| -> u8 {
        (((s as f32 * sa) + (d as f32 * da * (1.0 - sa))) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Rgba {
        r: blend(top.r, bottom.r),
        g: blend(top.g, bottom.g),
        b: blend(top.b, bottom.b),
        a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    }
}
