//! Column sampler — per-color pixel counts along one vertical scan column.

use std::ops::Index;

use crate::palette::Palette;
use crate::raster::Raster;

/// Pixel count per palette entry, indexed like the palette.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnCounts(Vec<u32>);

impl ColumnCounts {
    pub fn zeroed(len: usize) -> Self {
        ColumnCounts(vec![0; len])
    }

    pub fn get(&self, index: usize) -> u32 {
        self.0.get(index).copied().unwrap_or(0)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

impl Index<usize> for ColumnCounts {
    type Output = u32;

    fn index(&self, index: usize) -> &u32 {
        &self.0[index]
    }
}

/// Count pixels of each color in column `x`, rows `y_top..=y_bottom`.
///
/// Pixels with alpha below `opacity_threshold` are skipped (anti-aliased
/// stroke edges), as are pixels whose nearest color is silent.
pub fn sample_column<R: Raster + ?Sized>(
    raster: &R,
    palette: &Palette,
    x: u32,
    y_top: u32,
    y_bottom: u32,
    opacity_threshold: u8,
) -> ColumnCounts {
    let mut counts = ColumnCounts::zeroed(palette.len());
    if palette.is_empty() || y_top > y_bottom {
        return counts;
    }

    for y in y_top..=y_bottom {
        let px = raster.pixel(x, y);
        if px.a < opacity_threshold {
            continue;
        }
        let Some(index) = palette.nearest_index(px.r, px.g, px.b) else {
            continue;
        };
        if palette.entries()[index].is_silent() {
            continue;
        }
        counts.0[index] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SonifierConfig;
    use crate::palette::{Rgb, Rgba};
    use crate::raster::RgbaBuffer;

    fn palette() -> Palette {
        SonifierConfig::default().palette().unwrap()
    }

    fn column(colors: &[Rgba]) -> RgbaBuffer {
        let mut buf = RgbaBuffer::new(3, colors.len() as u32);
        for (y, c) in colors.iter().enumerate() {
            buf.set_pixel(1, y as u32, *c);
        }
        buf
    }

    #[test]
    fn counts_each_color() {
        let p = palette();
        let red = Rgb::new(250, 5, 5).opaque();
        let blue = Rgb::new(0, 0, 240).opaque();
        let buf = column(&[red, red, blue, red, blue]);

        let counts = sample_column(&buf, &p, 1, 0, 4, 10);
        assert_eq!(counts.as_slice().len(), p.len());
        assert_eq!(counts[p.index_of("red").unwrap()], 3);
        assert_eq!(counts[p.index_of("blue").unwrap()], 2);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn row_range_is_inclusive() {
        let p = palette();
        let black = Rgb::new(0, 0, 0).opaque();
        let buf = column(&[black; 6]);
        let black_idx = p.index_of("black").unwrap();

        assert_eq!(sample_column(&buf, &p, 1, 1, 3, 10)[black_idx], 3);
        assert_eq!(sample_column(&buf, &p, 1, 2, 2, 10)[black_idx], 1);
        assert_eq!(sample_column(&buf, &p, 1, 4, 2, 10).total(), 0);
    }

    #[test]
    fn silent_color_is_not_counted() {
        let p = palette();
        let white = Rgb::new(255, 255, 255).opaque();
        let buf = column(&[white; 8]);
        let counts = sample_column(&buf, &p, 1, 0, 7, 10);
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn transparent_pixels_are_skipped() {
        let p = palette();
        let green = Rgb::new(0, 192, 0);
        let opaque = green.opaque();
        let faint = Rgba { a: 9, ..opaque };
        let buf = column(&[opaque, faint, opaque, faint, opaque, faint]);

        let counts = sample_column(&buf, &p, 1, 0, 5, 10);
        assert_eq!(counts[p.index_of("green").unwrap()], 3);
        assert_eq!(counts.total(), 3);

        // At the threshold itself the pixel counts.
        let edge = column(&[Rgba { a: 10, ..opaque }]);
        assert_eq!(sample_column(&edge, &p, 1, 0, 0, 10).total(), 1);
    }

    #[test]
    fn untouched_column_is_empty() {
        let p = palette();
        let buf = RgbaBuffer::new(4, 16);
        assert_eq!(sample_column(&buf, &p, 0, 0, 15, 10).total(), 0);
    }

    #[test]
    fn empty_palette_yields_no_counts() {
        let buf = column(&[Rgb::new(1, 2, 3).opaque()]);
        let counts = sample_column(&buf, &Palette::default(), 1, 0, 0, 0);
        assert!(counts.as_slice().is_empty());
    }
}
