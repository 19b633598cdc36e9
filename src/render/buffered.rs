//! Buffered-replay renderer
//!
//! Keeps the last `capacity` samples in a [`CircularBuffer`] that is allocated
//! once and overwritten in place. Every update rescans the buffer for its
//! range and redraws the whole plot band, so the scale always matches exactly
//! what is on screen.

use super::range::{scan_range, Range};
use super::{Frame, Renderer};
use crate::config::{PlotStyle, RendererKind};
use crate::surface::Rect;

/// Fill level of a [`CircularBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferState {
    Empty,
    Filling,
    /// Stays full: new samples overwrite the oldest
    Full,
}

/// Fixed-capacity ring buffer that reads oldest-first
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    values: Vec<T>,
    capacity: usize,
    /// Slot the next sample goes to once full; also the oldest sample
    next_index: usize,
}

impl<T: Copy> CircularBuffer<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            capacity,
            next_index: 0,
        }
    }

    /// Append while filling, overwrite the oldest slot once full
    ///
    /// A zero-capacity buffer drops everything.
    pub fn push(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        if self.values.len() < self.capacity {
            self.values.push(value);
        } else {
            self.values[self.next_index] = value;
        }
        self.next_index = (self.next_index + 1) % self.capacity;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn state(&self) -> BufferState {
        match self.values.len() {
            0 => BufferState::Empty,
            n if n < self.capacity => BufferState::Filling,
            _ => BufferState::Full,
        }
    }

    /// Samples oldest-first, whatever the wrap position
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        let len = self.values.len();
        (0..len).map(move |i| self.values[(i + self.next_index) % len])
    }

    /// Most recent sample
    pub fn last(&self) -> Option<T> {
        if self.values.is_empty() {
            return None;
        }
        let newest = (self.next_index + self.capacity - 1) % self.capacity;
        self.values.get(newest).copied()
    }
}

/// Replays the whole visible window on every update
#[derive(Debug, Clone)]
pub struct BufferedRenderer {
    buffer: CircularBuffer<f64>,
    min_graph_range: f64,
    range: Option<Range>,
    /// Polyline scratch, sized to the window once
    points: Vec<(f32, f32)>,
}

impl BufferedRenderer {
    pub fn new(window_len: usize, min_graph_range: f64) -> Self {
        Self {
            buffer: CircularBuffer::with_capacity(window_len),
            min_graph_range,
            range: None,
            points: Vec::with_capacity(window_len),
        }
    }

    pub fn buffer(&self) -> &CircularBuffer<f64> {
        &self.buffer
    }

    fn draw_plot(&mut self, range: Range, frame: &mut Frame<'_>) {
        let layout = frame.layout;
        let settings = frame.settings;
        let mapper = layout.mapper(range);
        let column = layout.column_width();

        frame
            .surface
            .fill_rect(layout.plot_clear_rect(), settings.background);

        self.points.clear();
        self.points.extend(
            self.buffer
                .iter()
                .enumerate()
                .map(|(i, v)| (column * i as f32, mapper.map(v))),
        );

        match settings.style {
            PlotStyle::Line => {
                frame
                    .surface
                    .stroke_polyline(&self.points, settings.foreground, column);
            }
            PlotStyle::Fill => {
                let baseline = layout.plot_band().bottom();
                for &(x, y) in &self.points {
                    frame.surface.fill_rect(
                        Rect::new(x, y, column, baseline - y),
                        settings.foreground,
                    );
                }
            }
        }

        if settings.show_range {
            frame.draw_range_labels(range);
        }
    }
}

impl Renderer for BufferedRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Buffered
    }

    fn update(&mut self, value: f64, frame: &mut Frame<'_>) {
        self.buffer.push(value);

        let range = scan_range(self.buffer.iter()).map(|r| r.with_floor(self.min_graph_range));
        self.range = range;

        frame.draw_value_label(super::format_value(value, frame.rounding_factor));

        if let (Some(range), false) = (range, frame.collapsed) {
            self.draw_plot(range, frame);
        }
    }

    fn range(&self) -> Option<Range> {
        self.range
    }
}
