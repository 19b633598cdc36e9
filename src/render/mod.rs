//! Rolling-graph renderers
//!
//! A plot surface is split into a header (title on the left, latest value on
//! the right, separator bar underneath) and a plot band below it. Two
//! strategies fill the plot band:
//!
//! - [`BufferedRenderer`]: keeps the last `graph_width` samples in a ring
//!   buffer and replays all of them on each update.
//! - [`IncrementalRenderer`]: keeps only running extrema and treats the pixels
//!   already on the surface as its history, scrolling and rescaling them with
//!   a self-blit.
//!
//! Both implement [`Renderer`] and share the [`range`] and [`mapper`] helpers.
//! The strategy is picked once per registry through
//! [`GraphOptions::renderer`](crate::config::GraphOptions::renderer).

pub mod buffered;
pub mod incremental;
pub mod mapper;
pub mod range;

pub use buffered::{BufferState, BufferedRenderer, CircularBuffer};
pub use incremental::IncrementalRenderer;
pub use mapper::{map_value, PixelMapper};
pub use range::{scan_range, Range, RunningExtrema};

use crate::config::{GraphOptions, PlotSettings, RendererKind};
use crate::surface::{Rect, Surface, TextAlign, TextRun};

/// Pixel geometry shared by both renderers
///
/// With `p` the pixel ratio, `W`/`H` the surface size and `hh = font + 2p`
/// the header height:
///
/// ```text
/// 0        title ...              value |
/// hh - p   ===== separator =============|
/// hh       (plot band clear region)     |
/// hh + p   plot_top: value == max       |
///          ...                          |
/// H - 2p   plot_top + plot_height: min  |
/// H
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
    pub padding: f32,
    pub font_size: f32,
    pub header_height: f32,
    pub plot_top: f32,
    pub plot_height: f32,
    pub title_to_value_ratio: f32,
}

impl Layout {
    pub fn new(options: &GraphOptions) -> Self {
        let (width, height) = options.surface_size();
        let (width, height) = (width as f32, height as f32);
        let p = options.pixel_ratio;
        let font_size = options.font_size * p;
        let header_height = font_size + 2.0 * p;

        Self {
            width,
            height,
            pixel_ratio: p,
            padding: p,
            font_size,
            header_height,
            plot_top: header_height + p,
            plot_height: height - header_height - 3.0 * p,
            title_to_value_ratio: options.title_to_value_ratio,
        }
    }

    /// Width of one sample column
    pub fn column_width(&self) -> f32 {
        self.pixel_ratio
    }

    /// Rows `[plot_top, plot_top + plot_height + p)`: where samples are drawn
    pub fn plot_band(&self) -> Rect {
        Rect::new(0.0, self.plot_top, self.width, self.plot_height + self.padding)
    }

    /// Everything under the separator; cleared before a full redraw
    pub fn plot_clear_rect(&self) -> Rect {
        Rect::new(0.0, self.header_height, self.width, self.height - self.header_height)
    }

    /// Value label area in the header; overhangs the right edge so a
    /// right-aligned anchor at `x == width` falls inside it
    pub fn label_rect(&self) -> Rect {
        let x = self.width * self.title_to_value_ratio;
        Rect::new(x, 0.0, self.width, self.header_height - self.padding)
    }

    pub fn separator_rect(&self) -> Rect {
        Rect::new(0.0, self.header_height - self.padding, self.width, self.padding)
    }

    /// Height shown when the plot is collapsed to its header
    pub fn collapsed_height(&self) -> f32 {
        self.header_height
    }

    pub fn mapper(&self, range: Range) -> PixelMapper {
        PixelMapper::new(range, self.plot_height).with_offset(self.plot_top)
    }
}

/// Everything a renderer needs to draw one update
pub struct Frame<'a> {
    pub surface: &'a mut dyn Surface,
    pub layout: &'a Layout,
    pub settings: &'a PlotSettings,
    /// When set, only the value label is redrawn
    pub collapsed: bool,
    pub rounding_factor: f64,
}

impl Frame<'_> {
    /// Clear the value label area and write `text` right-aligned into it
    pub fn draw_value_label(&mut self, text: String) {
        let layout = self.layout;
        self.surface
            .fill_rect(layout.label_rect(), self.settings.background);

        let label = format!(
            "{}{}{}",
            self.settings.value_prefix, text, self.settings.value_suffix
        );
        self.surface.fill_text(
            TextRun::new(
                label,
                layout.width,
                layout.header_height - 2.0 * layout.padding,
                layout.font_size,
                self.settings.foreground,
            )
            .aligned(TextAlign::Right)
            .with_max_width(layout.width * (1.0 - layout.title_to_value_ratio)),
        );
    }

    /// Write the min/max annotations at the bottom and top of the plot band
    pub fn draw_range_labels(&mut self, range: Range) {
        let layout = self.layout;
        let max_width = layout.width / 2.0;
        let min_y = layout.height - layout.padding;
        let max_y = layout.plot_top + layout.header_height / 2.0;

        for (value, y) in [(range.min, min_y), (range.max, max_y)] {
            self.surface.fill_text(
                TextRun::new(
                    format_value(value, self.rounding_factor),
                    layout.padding,
                    y,
                    layout.font_size,
                    self.settings.foreground,
                )
                .with_outline(self.settings.background)
                .with_max_width(max_width),
            );
        }
    }
}

/// Rendering strategy for one plot
pub trait Renderer: std::fmt::Debug {
    fn kind(&self) -> RendererKind;

    /// Feed one sample and redraw whatever it affects
    fn update(&mut self, value: f64, frame: &mut Frame<'_>);

    /// Range the plot band currently shows, after the floor is applied
    fn range(&self) -> Option<Range>;
}

/// Build the renderer selected by `options`
pub fn create_renderer(options: &GraphOptions, settings: &PlotSettings) -> Box<dyn Renderer> {
    match options.renderer {
        RendererKind::Buffered => Box::new(BufferedRenderer::new(
            options.window_len(),
            settings.min_graph_range,
        )),
        RendererKind::Incremental => Box::new(IncrementalRenderer::new(settings.min_graph_range)),
    }
}

/// Paint the static parts of a fresh surface: background, title, separator
pub fn draw_chrome(surface: &mut dyn Surface, layout: &Layout, settings: &PlotSettings) {
    surface.fill_rect(
        Rect::new(0.0, 0.0, layout.width, layout.height),
        settings.background,
    );
    surface.fill_text(TextRun::new(
        settings.title.clone(),
        layout.padding,
        layout.font_size,
        layout.font_size,
        settings.foreground,
    ));
    surface.fill_rect(layout.separator_rect(), settings.foreground);
}

/// `round(value * factor) / factor`, printed without trailing zeros
///
/// A factor of zero or less prints the value unrounded.
pub fn format_value(value: f64, rounding_factor: f64) -> String {
    let rounded = if rounding_factor > 0.0 && value.is_finite() {
        (value * rounding_factor).round() / rounding_factor
    } else {
        value
    };
    // avoid printing "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}", rounded)
}

/// Shortest round-trip form of `value`, in exponent notation below `1e-6`
/// and from `1e21` up
///
/// Keeps extreme values short enough for the value label.
pub fn format_raw(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude == 0.0 {
        return "0".to_string();
    }
    if !(1e-6..1e21).contains(&magnitude) {
        let exponent = format!("{:e}", value);
        return match exponent.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exponent,
        };
    }
    format!("{}", value)
}
