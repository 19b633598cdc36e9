//! A single named plot
//!
//! A [`Plot`] owns one renderer, one resolved settings record and one surface.
//! Nothing else writes to the surface; the overlay only reads it.

use crate::config::{GraphOptions, PlotSettings, RendererKind};
use crate::render::{create_renderer, draw_chrome, Frame, Layout, Range, Renderer};
use crate::surface::{Framebuffer, Surface};

/// Whether the plot band is shown
///
/// A presentation toggle only: the renderer keeps consuming samples and the
/// value label keeps updating while collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayState {
    #[default]
    Expanded,
    Collapsed,
}

impl DisplayState {
    pub fn toggle(self) -> Self {
        match self {
            DisplayState::Expanded => DisplayState::Collapsed,
            DisplayState::Collapsed => DisplayState::Expanded,
        }
    }

    pub fn is_collapsed(self) -> bool {
        self == DisplayState::Collapsed
    }
}

#[derive(Debug)]
pub struct Plot<S: Surface = Framebuffer> {
    key: String,
    settings: PlotSettings,
    renderer: Box<dyn Renderer>,
    surface: S,
    layout: Layout,
    display: DisplayState,
    rounding_factor: f64,
    last_value: Option<f64>,
    samples: u64,
}

impl Plot<Framebuffer> {
    /// Create a plot backed by an in-memory framebuffer
    pub fn new(key: impl Into<String>, settings: PlotSettings, options: &GraphOptions) -> Self {
        let (width, height) = options.surface_size();
        Self::with_surface(key, settings, options, Framebuffer::new(width, height))
    }
}

impl<S: Surface> Plot<S> {
    /// Create a plot drawing into `surface`, which should be
    /// `options.surface_size()` pixels large
    ///
    /// The header (background, title, separator) is painted immediately.
    pub fn with_surface(
        key: impl Into<String>,
        settings: PlotSettings,
        options: &GraphOptions,
        mut surface: S,
    ) -> Self {
        let layout = Layout::new(options);
        draw_chrome(&mut surface, &layout, &settings);

        let display = if settings.collapse {
            DisplayState::Collapsed
        } else {
            DisplayState::Expanded
        };

        Self {
            key: key.into(),
            renderer: create_renderer(options, &settings),
            settings,
            surface,
            layout,
            display,
            rounding_factor: options.rounding_factor,
            last_value: None,
            samples: 0,
        }
    }

    /// Feed one sample to the renderer
    pub fn update(&mut self, value: f64) {
        let mut frame = Frame {
            surface: &mut self.surface,
            layout: &self.layout,
            settings: &self.settings,
            collapsed: self.display.is_collapsed(),
            rounding_factor: self.rounding_factor,
        };
        self.renderer.update(value, &mut frame);
        self.last_value = Some(value);
        self.samples += 1;
    }

    /// Flip between expanded and collapsed, returning the new state
    pub fn toggle_collapsed(&mut self) -> DisplayState {
        self.display = self.display.toggle();
        self.display
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn settings(&self) -> &PlotSettings {
        &self.settings
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn display(&self) -> DisplayState {
        self.display
    }

    pub fn is_collapsed(&self) -> bool {
        self.display.is_collapsed()
    }

    /// Range the plot band currently shows
    pub fn range(&self) -> Option<Range> {
        self.renderer.range()
    }

    pub fn renderer_kind(&self) -> RendererKind {
        self.renderer.kind()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.last_value
    }

    /// Samples received since registration
    pub fn samples(&self) -> u64 {
        self.samples
    }
}
