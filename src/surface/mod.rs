//! Drawing surfaces
//!
//! The renderers only ever talk to a [`Surface`]: rectangle fill, text,
//! polyline stroke and a self-blit. Coordinates are physical pixels with the
//! origin at the top-left, `y` growing downwards, as on a canvas.
//!
//! [`Framebuffer`] is the in-memory implementation used by the registry and
//! uploaded to the GPU by the egui overlay.

mod framebuffer;

pub use framebuffer::Framebuffer;

use crate::color::Rgba;

/// Axis-aligned rectangle in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Smallest whole-pixel rectangle containing this one
    ///
    /// These are the pixels a [`Surface::blit`] onto this rectangle writes.
    pub fn pixel_bounds(&self) -> Rect {
        let x = self.x.floor();
        let y = self.y.floor();
        Rect::new(x, y, self.right().ceil() - x, self.bottom().ceil() - y)
    }

    /// Half-open containment: left/top edges inclusive, right/bottom exclusive
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Horizontal anchoring of a text run relative to its `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
}

/// A single line of text positioned by its baseline anchor
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    /// Baseline
    pub y: f32,
    pub align: TextAlign,
    pub font_size: f32,
    pub color: Rgba,
    /// Stroke drawn behind the glyphs to keep them legible over the plot
    pub outline: Option<Rgba>,
    pub max_width: Option<f32>,
}

impl TextRun {
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32, color: Rgba) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            align: TextAlign::Left,
            font_size,
            color,
            outline: None,
            max_width: None,
        }
    }

    pub fn aligned(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_outline(mut self, outline: Rgba) -> Self {
        self.outline = Some(outline);
        self
    }

    pub fn with_max_width(mut self, max_width: f32) -> Self {
        self.max_width = Some(max_width);
        self
    }
}

/// A 2D raster target the renderers draw into
///
/// Implementations own their pixels exclusively; a plot holds one surface and
/// nothing else writes to it.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    fn fill_text(&mut self, run: TextRun);

    /// Straight segments between consecutive points
    fn stroke_polyline(&mut self, points: &[(f32, f32)], color: Rgba, width: f32);

    /// Copy the pixels under `src` onto `dst`, scaling to fit
    ///
    /// The source is read in full before anything is written, so `src` and
    /// `dst` may overlap. Every pixel `dst` touches is written, including
    /// partially covered edge pixels (see [`Rect::pixel_bounds`]).
    fn blit(&mut self, src: Rect, dst: Rect);
}
