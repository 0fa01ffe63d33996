//! Raster surfaces the scanner reads from.
//!
//! The drawing canvas itself lives in the host. The engine only needs point
//! read-back, expressed by [`Raster`]. [`RgbaBuffer`] is an owned RGBA8 image
//! laid out like browser `ImageData`, with a brush stamp for free-hand strokes.

use crate::error::SonifierError;
use crate::palette::Rgba;

/// Point read-back of pixel color.
pub trait Raster {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Pixel at `(x, y)`. Callers keep coordinates in bounds.
    fn pixel(&self, x: u32, y: u32) -> Rgba;
}

/// Row-major RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaBuffer {
    /// A fully transparent buffer. Dimensions whose byte size does not fit
    /// in memory give an empty 0x0 buffer.
    pub fn new(width: u32, height: u32) -> Self {
        match byte_len(width, height) {
            Some(len) => RgbaBuffer {
                width,
                height,
                data: vec![0; len],
            },
            None => RgbaBuffer {
                width: 0,
                height: 0,
                data: Vec::new(),
            },
        }
    }

    /// Wrap existing RGBA bytes (e.g. a copy of canvas `ImageData`).
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, SonifierError> {
        let Some(expected) = byte_len(width, height) else {
            return Err(SonifierError::RasterOverflow { width, height });
        };
        if data.len() != expected {
            return Err(SonifierError::RasterSize {
                expected,
                found: data.len(),
            });
        }
        Ok(RgbaBuffer {
            width,
            height,
            data,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize * self.width as usize + x as usize) * 4)
        } else {
            None
        }
    }

    /// Write one pixel; out-of-bounds writes are dropped.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Reset to fully transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Stamp a filled disc of `radius` pixels centred on `(cx, cy)`, clipped
    /// to the buffer. A stroke is a sequence of stamps.
    pub fn paint_dot(&mut self, cx: i32, cy: i32, radius: u32, color: Rgba) {
        let r = radius as i32;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let (x, y) = (cx + dx, cy + dy);
                if x >= 0 && y >= 0 {
                    self.set_pixel(x as u32, y as u32, color);
                }
            }
        }
    }
}

/// `width * height * 4`, or `None` when it overflows `usize`.
fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(4)
}

impl Raster for RgbaBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    /// Out-of-bounds reads come back transparent instead of panicking.
    fn pixel(&self, x: u32, y: u32) -> Rgba {
        match self.offset(x, y) {
            Some(i) => Rgba {
                r: self.data[i],
                g: self.data[i + 1],
                b: self.data[i + 2],
                a: self.data[i + 3],
            },
            None => Rgba::default(),
        }
    }
}
