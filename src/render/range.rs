//! Range tracking
//!
//! Two ways of deciding which value interval a plot shows:
//!
//! - [`scan_range`]: memoryless, recomputed from every sample still on screen.
//!   O(W) per update, always exact.
//! - [`RunningExtrema`]: O(1), widens as samples arrive and never narrows, so a
//!   spike keeps the scale stretched after it has scrolled away.
//!
//! Both paths pass through [`Range::with_floor`] so a constant signal still
//! gets a visible line.

/// Value interval mapped onto a plot's vertical extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Widen to include `value`
    pub fn including(self, value: f64) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    /// Push both bounds out by `floor / 2` when the span is below `floor`
    pub fn with_floor(self, floor: f64) -> Self {
        if self.span() < floor {
            let half = floor / 2.0;
            Self {
                min: self.min - half,
                max: self.max + half,
            }
        } else {
            self
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Exact `{min, max}` of `values`, or `None` when empty
pub fn scan_range<I>(values: I) -> Option<Range>
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some(Range::new(v, v)),
        Some(range) => Some(range.including(v)),
    })
}

/// Running min/max for renderers that keep no history
///
/// Seeded from the first sample as `value - 1 .. value + 1`; afterwards the
/// bounds only move outwards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningExtrema {
    bounds: Option<Range>,
}

/// Half-width of the interval seeded from the first sample
pub const SEED_HALF_SPAN: f64 = 1.0;

impl RunningExtrema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(&self) -> Option<f64> {
        self.bounds.map(|r| r.min)
    }

    pub fn max(&self) -> Option<f64> {
        self.bounds.map(|r| r.max)
    }

    /// Committed bounds, `None` before the first sample
    pub fn bounds(&self) -> Option<Range> {
        self.bounds
    }

    /// Bounds after taking `value` into account, without committing them
    pub fn widened(&self, value: f64) -> Range {
        match self.bounds {
            Some(range) => range.including(value),
            None => Range::new(value - SEED_HALF_SPAN, value + SEED_HALF_SPAN),
        }
    }

    /// Store new bounds; anything narrower than the current bounds is widened back
    pub fn commit(&mut self, range: Range) {
        self.bounds = Some(match self.bounds {
            Some(current) => current.including(range.min).including(range.max),
            None => range,
        });
    }

    /// Widen and commit in one step
    pub fn observe(&mut self, value: f64) -> Range {
        let range = self.widened(value);
        self.commit(range);
        range
    }
}
