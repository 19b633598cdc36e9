//! Per-plot settings
//!
//! Callers hand [`GraphSettings`] to `Registry::add`; every field is optional.
//! The registry resolves it into an immutable [`PlotSettings`] by overlaying the
//! supplied fields onto the defaults of the active renderer mode.
//!
//! # Defaults
//!
//! | field             | buffered   | incremental |
//! |-------------------|------------|-------------|
//! | `title`           | `"Graph"`  | `"Graph"`   |
//! | `foreground`      | `#FF00FF`  | `#0000FF`   |
//! | `background`      | `#220022`  | `#FF0000`   |
//! | `show_range`      | `true`     | `false`     |
//! | `style`           | `line`     | `line`      |
//! | `min_graph_range` | options    | options     |
//! | `collapse`        | `false`    | `false`     |

use super::{GraphOptions, RendererKind};
use crate::color::Rgba;
use serde::{Deserialize, Serialize};

/// How the latest sample is marked on the plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlotStyle {
    /// Thin line / single-pixel mark (default)
    #[default]
    Line,
    /// Column filled from the sample down to the bottom of the plot
    Fill,
}

/// Caller-supplied settings for a plot; unset fields take the mode default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    pub title: Option<String>,
    /// Section grouping key; plots sharing it are stacked under one header
    pub section: Option<String>,
    pub foreground: Option<Rgba>,
    pub background: Option<Rgba>,
    /// Draw min/max annotations inside the plot
    pub show_range: Option<bool>,
    pub style: Option<PlotStyle>,
    /// Minimum visible value span before the range is padded out
    pub min_graph_range: Option<f64>,
    /// Start collapsed (header only)
    pub collapse: Option<bool>,
    pub value_prefix: Option<String>,
    pub value_suffix: Option<String>,
}

impl GraphSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn with_colors(mut self, foreground: Rgba, background: Rgba) -> Self {
        self.foreground = Some(foreground);
        self.background = Some(background);
        self
    }

    pub fn with_show_range(mut self, show: bool) -> Self {
        self.show_range = Some(show);
        self
    }

    pub fn with_style(mut self, style: PlotStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_min_graph_range(mut self, floor: f64) -> Self {
        self.min_graph_range = Some(floor);
        self
    }

    pub fn with_collapse(mut self, collapse: bool) -> Self {
        self.collapse = Some(collapse);
        self
    }

    /// Text placed before and after the numeric value label
    pub fn with_affixes(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.value_prefix = Some(prefix.into());
        self.value_suffix = Some(suffix.into());
        self
    }

    /// Overlay these settings onto the defaults for `options.renderer`
    pub fn resolve(&self, options: &GraphOptions) -> PlotSettings {
        let defaults = PlotSettings::defaults_for(options);
        PlotSettings {
            title: self.title.clone().unwrap_or(defaults.title),
            section: self.section.clone().or(defaults.section),
            foreground: self.foreground.unwrap_or(defaults.foreground),
            background: self.background.unwrap_or(defaults.background),
            show_range: self.show_range.unwrap_or(defaults.show_range),
            style: self.style.unwrap_or(defaults.style),
            min_graph_range: self.min_graph_range.unwrap_or(defaults.min_graph_range),
            collapse: self.collapse.unwrap_or(defaults.collapse),
            value_prefix: self.value_prefix.clone().unwrap_or(defaults.value_prefix),
            value_suffix: self.value_suffix.clone().unwrap_or(defaults.value_suffix),
        }
    }
}

/// Fully resolved plot settings, fixed once the plot is registered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSettings {
    pub title: String,
    pub section: Option<String>,
    pub foreground: Rgba,
    pub background: Rgba,
    pub show_range: bool,
    pub style: PlotStyle,
    pub min_graph_range: f64,
    /// Initial display state; the live state is tracked by the plot itself
    pub collapse: bool,
    pub value_prefix: String,
    pub value_suffix: String,
}

impl PlotSettings {
    /// Defaults for the renderer mode selected in `options`
    pub fn defaults_for(options: &GraphOptions) -> Self {
        let (foreground, background, show_range) = match options.renderer {
            RendererKind::Buffered => (Rgba::rgb(0xFF, 0x00, 0xFF), Rgba::rgb(0x22, 0x00, 0x22), true),
            RendererKind::Incremental => (Rgba::rgb(0x00, 0x00, 0xFF), Rgba::rgb(0xFF, 0x00, 0x00), false),
        };

        Self {
            title: String::from("Graph"),
            section: None,
            foreground,
            background,
            show_range,
            style: PlotStyle::Line,
            min_graph_range: options.min_graph_range,
            collapse: false,
            value_prefix: String::new(),
            value_suffix: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_empty_takes_buffered_defaults() {
        let settings = GraphSettings::new().resolve(&GraphOptions::default());
        assert_eq!(settings.title, "Graph");
        assert_eq!(settings.foreground, Rgba::rgb(0xFF, 0x00, 0xFF));
        assert_eq!(settings.background, Rgba::rgb(0x22, 0x00, 0x22));
        assert!(settings.show_range);
        assert_eq!(settings.min_graph_range, 1.5);
        assert!(settings.section.is_none());
    }

    #[test]
    fn test_resolve_incremental_defaults() {
        let options = GraphOptions {
            renderer: RendererKind::Incremental,
            ..Default::default()
        };
        let settings = GraphSettings::new().resolve(&options);
        assert_eq!(settings.foreground, Rgba::rgb(0, 0, 0xFF));
        assert_eq!(settings.background, Rgba::rgb(0xFF, 0, 0));
        assert!(!settings.show_range);
    }

    #[test]
    fn test_resolve_is_field_by_field() {
        let settings = GraphSettings::new()
            .with_title("FPS")
            .with_style(PlotStyle::Fill)
            .resolve(&GraphOptions::default());

        assert_eq!(settings.title, "FPS");
        assert_eq!(settings.style, PlotStyle::Fill);
        // untouched fields keep their defaults
        assert_eq!(settings.background, Rgba::rgb(0x22, 0x00, 0x22));
        assert!(settings.value_suffix.is_empty());
    }

    #[test]
    fn test_plot_option_floor_flows_into_defaults() {
        let options = GraphOptions {
            min_graph_range: 4.0,
            ..Default::default()
        };
        assert_eq!(GraphSettings::new().resolve(&options).min_graph_range, 4.0);
        let overridden = GraphSettings::new().with_min_graph_range(0.5).resolve(&options);
        assert_eq!(overridden.min_graph_range, 0.5);
    }

    #[test]
    fn test_settings_deserialize_partial_toml() {
        let settings: GraphSettings = toml::from_str(
            r##"
            title = "Frame time"
            foreground = "#00FF00"
            style = "fill"
            value_suffix = " ms"
            "##,
        )
        .unwrap();

        assert_eq!(settings.title.as_deref(), Some("Frame time"));
        assert_eq!(settings.foreground, Some(Rgba::rgb(0, 255, 0)));
        assert_eq!(settings.style, Some(PlotStyle::Fill));
        assert!(settings.background.is_none());
    }
}
