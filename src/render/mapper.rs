//! Value to pixel-row mapping
//!
//! `y = (1 - (value - min) / (max - min)) * height + top`: larger values sit
//! higher on screen. The caller guarantees `max > min` (see
//! [`Range::with_floor`]); nothing is guarded here.

use super::range::Range;

/// Linear, inverted mapping from a value range onto a band of pixel rows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelMapper {
    range: Range,
    height: f32,
    top: f32,
}

impl PixelMapper {
    pub fn new(range: Range, height: f32) -> Self {
        Self {
            range,
            height,
            top: 0.0,
        }
    }

    /// Shift the band down by `top` pixels
    pub fn with_offset(mut self, top: f32) -> Self {
        self.top = top;
        self
    }

    pub fn range(&self) -> Range {
        self.range
    }

    #[inline]
    pub fn map(&self, value: f64) -> f32 {
        map_value(value, self.range, self.height) + self.top
    }
}

/// Pixel row of `value` in a band of `height` rows starting at row 0
#[inline]
pub fn map_value(value: f64, range: Range, height: f32) -> f32 {
    let t = (value - range.min) / range.span();
    ((1.0 - t) * height as f64) as f32
}
