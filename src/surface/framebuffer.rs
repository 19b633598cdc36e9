//! In-memory RGBA framebuffer
//!
//! Pixels are stored row-major. Text is not rasterized here: it is kept as a
//! list of [`TextRun`]s that the presenter draws on top of the pixels, and a
//! run disappears when a rectangle fill covers its anchor point.

use super::{Rect, Surface, TextRun};
use crate::color::Rgba;

/// Row-major RGBA raster with a text overlay
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    texts: Vec<TextRun>,
    /// Copy of the blit source, reused across blits
    scratch: Vec<Rgba>,
    /// Bumped on every mutation so presenters know when to re-upload
    generation: u64,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; width as usize * height as usize],
            texts: Vec::new(),
            scratch: Vec::new(),
            generation: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x as i64, y as i64).map(|i| self.pixels[i])
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixels flattened to `[r, g, b, a, r, g, b, a, ...]`
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.0).collect()
    }

    /// One column, top to bottom
    pub fn column(&self, x: u32) -> Vec<Rgba> {
        (0..self.height)
            .filter_map(|y| self.pixel(x, y))
            .collect()
    }

    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    /// Text runs whose anchor lies inside `rect`
    pub fn texts_in(&self, rect: Rect) -> impl Iterator<Item = &TextRun> {
        self.texts.iter().filter(move |t| rect.contains(t.x, t.y))
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Integer pixel span covered by `[start, start + len)`, clipped to `[0, limit)`
    fn span(start: f32, len: f32, limit: u32) -> std::ops::Range<i64> {
        if len.is_nan() || len <= 0.0 {
            return 0..0;
        }
        let lo = (start.round() as i64).max(0);
        let hi = ((start + len).round() as i64).min(limit as i64);
        lo..hi.max(lo)
    }

    /// Pixel indices `[floor(start), ceil(end))` clipped to `[0, limit)`
    fn covered(start: f32, end: f32, limit: u32) -> std::ops::Range<i64> {
        if start.is_nan() || end.is_nan() {
            return 0..0;
        }
        let lo = (start.floor() as i64).clamp(0, limit as i64);
        let hi = (end.ceil() as i64).min(limit as i64);
        lo..hi.max(lo)
    }

    /// Copy the pixels under `rect` into the scratch buffer
    fn snapshot(&mut self, rect: Rect) -> Window {
        let bounds = rect.pixel_bounds();
        let xs = Self::covered(bounds.x, bounds.right(), self.width);
        let ys = Self::covered(bounds.y, bounds.bottom(), self.height);
        let window = Window {
            x: xs.start,
            y: ys.start,
            width: xs.end - xs.start,
            height: ys.end - ys.start,
        };

        self.scratch.clear();
        for y in ys {
            let row = y as usize * self.width as usize;
            self.scratch
                .extend_from_slice(&self.pixels[row + xs.start as usize..row + xs.end as usize]);
        }
        window
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn brush(&mut self, x: f32, y: f32, width: f32, color: Rgba) {
        let half = width.max(1.0) / 2.0;
        for py in Self::span(y - half, half * 2.0, self.height) {
            for px in Self::span(x - half, half * 2.0, self.width) {
                self.put(px, py, color);
            }
        }
    }
}

impl Surface for Framebuffer {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        for y in Self::span(rect.y, rect.height, self.height) {
            for x in Self::span(rect.x, rect.width, self.width) {
                self.put(x, y, color);
            }
        }
        self.texts.retain(|t| !rect.contains(t.x, t.y));
        self.generation += 1;
    }

    fn fill_text(&mut self, run: TextRun) {
        self.texts.push(run);
        self.generation += 1;
    }

    fn stroke_polyline(&mut self, points: &[(f32, f32)], color: Rgba, width: f32) {
        match points {
            [] => {}
            [(x, y)] => self.brush(*x, *y, width, color),
            _ => {
                for pair in points.windows(2) {
                    let (x0, y0) = pair[0];
                    let (x1, y1) = pair[1];
                    let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
                    for step in 0..=steps {
                        let t = step as f32 / steps as f32;
                        self.brush(x0 + (x1 - x0) * t, y0 + (y1 - y0) * t, width, color);
                    }
                }
            }
        }
        self.generation += 1;
    }

    fn blit(&mut self, src: Rect, dst: Rect) {
        let degenerate =
            |r: &Rect| r.width.is_nan() || r.height.is_nan() || r.width <= 0.0 || r.height <= 0.0;
        if degenerate(&src) || degenerate(&dst) {
            return;
        }

        let window = self.snapshot(src);
        let x_scale = src.width / dst.width;
        let y_scale = src.height / dst.height;
        let x_axis = Axis::new(dst.x, src.x, x_scale, src.right().min(self.width as f32));
        let y_axis = Axis::new(dst.y, src.y, y_scale, src.bottom().min(self.height as f32));

        let covered = dst.pixel_bounds();
        for dy in Self::covered(covered.y, covered.bottom(), self.height) {
            if y_axis.coverage(dy).next().is_none() {
                continue;
            }
            for dx in Self::covered(covered.x, covered.right(), self.width) {
                let mut acc = [0.0f32; 4];
                let mut total = 0.0f32;
                for (sy, wy) in y_axis.coverage(dy) {
                    for (sx, wx) in x_axis.coverage(dx) {
                        if let Some(pixel) = window.get(sx, sy, &self.scratch) {
                            let w = wx * wy;
                            for (a, c) in acc.iter_mut().zip(pixel.0) {
                                *a += w * c as f32;
                            }
                            total += w;
                        }
                    }
                }
                if total > 0.0 {
                    let color = acc.map(|a| (a / total).round().clamp(0.0, 255.0) as u8);
                    self.put(dx, dy, Rgba(color));
                }
            }
        }
        self.generation += 1;
    }
}

/// Whole-pixel region of the surface copied into the scratch buffer
#[derive(Debug, Clone, Copy)]
struct Window {
    x: i64,
    y: i64,
    width: i64,
    height: i64,
}

impl Window {
    fn get(&self, x: i64, y: i64, scratch: &[Rgba]) -> Option<Rgba> {
        let (cx, cy) = (x - self.x, y - self.y);
        if cx < 0 || cy < 0 || cx >= self.width || cy >= self.height {
            return None;
        }
        scratch.get((cy * self.width + cx) as usize).copied()
    }
}

/// Mapping from destination pixels to source pixels along one axis
#[derive(Debug, Clone, Copy)]
struct Axis {
    dst_start: f32,
    src_start: f32,
    scale: f32,
    src_end: f32,
}

impl Axis {
    fn new(dst_start: f32, src_start: f32, scale: f32, src_end: f32) -> Self {
        Self {
            dst_start,
            src_start,
            scale,
            src_end,
        }
    }

    /// Source pixels under destination pixel `d`, with overlap weights
    ///
    /// Compressing averages every covered source pixel, so thin marks fade
    /// instead of disappearing. A destination pixel only partly inside the
    /// blit takes the source pixels its covered part maps to.
    fn coverage(&self, d: i64) -> impl Iterator<Item = (i64, f32)> {
        let s0 = (self.src_start + (d as f32 - self.dst_start) * self.scale)
            .max(self.src_start)
            .max(0.0);
        let s1 = (self.src_start + (d as f32 + 1.0 - self.dst_start) * self.scale).min(self.src_end);

        let first = s0.floor() as i64;
        let last = if s1 > s0 { s1.ceil() as i64 } else { first };
        (first..last).filter_map(move |s| {
            let overlap = (s as f32 + 1.0).min(s1) - (s as f32).max(s0);
            (overlap > 0.0).then_some((s, overlap))
        })
    }
}
