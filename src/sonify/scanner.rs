//! Scan cursor. Moves the scan line across the drawing region and wraps at
//! the right edge, so the engine only ever sees in-bounds columns.

#[derive(Debug, Clone, PartialEq)]
pub struct ScanCursor {
    x: f64,
    /// Pixels advanced per frame.
    pub speed: f64,
    left: u32,
    right: u32,
}

impl ScanCursor {
    /// Cursor over columns `left..=right`, starting at `left`.
    /// A `right` below `left` collapses the region to the single column `left`.
    pub fn new(left: u32, right: u32, speed: f64) -> Self {
        ScanCursor {
            x: left as f64,
            speed,
            left,
            right: right.max(left),
        }
    }

    /// Current column.
    pub fn column(&self) -> u32 {
        (self.x.floor() as u32).clamp(self.left, self.right)
    }

    /// Step one frame and return the new column.
    pub fn advance(&mut self) -> u32 {
        let width = (self.right - self.left) as f64 + 1.0;
        let step = if self.speed.is_finite() { self.speed } else { 0.0 };
        let offset = (self.x - self.left as f64 + step).rem_euclid(width);
        self.x = self.left as f64 + offset;
        self.column()
    }

    pub fn reset(&mut self) {
        self.x = self.left as f64;
    }
}
