//! Incremental-blit renderer
//!
//! No sample history is kept: the plot band itself is the state. Each update
//! scrolls the band one column left with a self-blit, squeezing it vertically
//! when the new sample widens the range, then paints a single new column on
//! the right edge.
//!
//! Costs O(1) memory per plot. The price is that repeated resampling blurs
//! older columns and the scale never tightens again after a spike.

use super::range::{Range, RunningExtrema};
use super::{Frame, Layout, Renderer};
use crate::config::{PlotStyle, RendererKind};
use crate::surface::Rect;

/// Destination of the scroll blit for one update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rescale {
    pub src: Rect,
    pub dst: Rect,
}

impl Rescale {
    /// Where the plot band's pixels go when the shown range changes from
    /// `old` to `new`, shifted one column left
    ///
    /// `new` must contain `old`. Rows above the old maximum and below the old
    /// minimum are given up in proportion to how far the new bounds moved, so
    /// every already-drawn mark lands where the new range would place it.
    pub fn compute(layout: &Layout, old: Option<Range>, new: Range) -> Self {
        let src = layout.plot_band();
        let mut dst = Rect::new(-layout.column_width(), src.y, src.width, src.height);

        if let Some(old) = old {
            if old != new {
                let span = new.span();
                let grew_up = (new.max - old.max).max(0.0) / span;
                let scale = old.span() / span;
                dst.y += (grew_up * layout.plot_height as f64) as f32;
                dst.height = (src.height as f64 * scale) as f32;
            }
        }

        Self { src, dst }
    }

    /// Rows inside the band that the blit left uncovered
    ///
    /// Measured from the whole pixels the blit wrote, so filling these never
    /// overwrites a partially covered edge row.
    pub fn vacated(&self) -> impl Iterator<Item = Rect> {
        let written = self.dst.pixel_bounds();
        let above = Rect::new(0.0, self.src.y, self.src.width, written.y - self.src.y);
        let below = Rect::new(
            0.0,
            written.bottom(),
            self.src.width,
            self.src.bottom() - written.bottom(),
        );
        [above, below].into_iter().filter(|r| r.height > 0.0)
    }

    /// Stretch of the lowest written row over the band vacated below it
    ///
    /// Filled columns keep reaching the baseline after the minimum drops.
    pub fn baseline_extension(&self) -> Option<Rescale> {
        let written = self.dst.pixel_bounds();
        let below = self.src.bottom() - written.bottom();
        let last_row = written.bottom() - 1.0;
        if below <= 0.0 || last_row < self.src.y {
            return None;
        }
        Some(Self {
            src: Rect::new(0.0, last_row, self.src.width, 1.0),
            dst: Rect::new(0.0, written.bottom(), self.src.width, below),
        })
    }
}

/// Scrolls and rescales existing pixels instead of replaying history
#[derive(Debug, Clone)]
pub struct IncrementalRenderer {
    extrema: RunningExtrema,
    /// Range the band is drawn at; only ever widens, like the extrema
    shown: Option<Range>,
    min_graph_range: f64,
    /// Set while collapsed: the band no longer matches the extrema
    stale: bool,
}

impl IncrementalRenderer {
    pub fn new(min_graph_range: f64) -> Self {
        Self {
            extrema: RunningExtrema::new(),
            shown: None,
            min_graph_range,
            stale: false,
        }
    }

    pub fn extrema(&self) -> &RunningExtrema {
        &self.extrema
    }

    /// Floored range for `extrema`, never narrower than what is already shown
    fn shown_for(&self, extrema: Range) -> Range {
        let floored = extrema.with_floor(self.min_graph_range);
        match self.shown {
            Some(old) => floored.including(old.min).including(old.max),
            None => floored,
        }
    }

    fn draw_column(&mut self, value: f64, old: Option<Range>, new: Range, frame: &mut Frame<'_>) {
        let layout = frame.layout;
        let settings = frame.settings;

        if self.stale {
            frame
                .surface
                .fill_rect(layout.plot_clear_rect(), settings.background);
            self.stale = false;
        }

        let rescale = Rescale::compute(layout, old, new);
        frame.surface.blit(rescale.src, rescale.dst);
        for band in rescale.vacated() {
            frame.surface.fill_rect(band, settings.background);
        }
        if settings.style == PlotStyle::Fill {
            if let Some(extension) = rescale.baseline_extension() {
                frame.surface.blit(extension.src, extension.dst);
            }
        }

        let column = layout.column_width();
        let x = layout.width - column;
        frame.surface.fill_rect(
            Rect::new(x, layout.header_height, column, layout.height - layout.header_height),
            settings.background,
        );

        let y = layout.mapper(new).map(value);
        let mark_height = match settings.style {
            PlotStyle::Line => column,
            PlotStyle::Fill => layout.plot_band().bottom() - y,
        };
        frame
            .surface
            .fill_rect(Rect::new(x, y, column, mark_height), settings.foreground);
    }
}

impl Renderer for IncrementalRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Incremental
    }

    fn update(&mut self, value: f64, frame: &mut Frame<'_>) {
        let old = self.shown;
        let widened = self.extrema.widened(value);
        let new = self.shown_for(widened);

        frame.draw_value_label(super::format_raw(value));

        if frame.collapsed {
            self.stale = true;
        } else {
            self.draw_column(value, old, new, frame);
        }

        self.extrema.commit(widened);
        self.shown = Some(new);
    }

    fn range(&self) -> Option<Range> {
        self.shown
    }
}
