//! Configuration module for debug-graphs
//!
//! This module handles:
//! - [`GraphOptions`], the registry-wide options record (surface size, fonts,
//!   rounding, renderer strategy)
//! - Per-plot [`GraphSettings`] and their resolved form [`PlotSettings`]
//! - [`GraphConfig`] files that predeclare options and plots
//!
//! # Config Location
//!
//! The demo looks for `debug-graphs.toml` in the working directory first and
//! then in the platform config directory:
//! - **Linux**: `~/.config/dev.hxyulin.debug-graphs/`
//! - **macOS**: `~/Library/Application Support/dev.hxyulin.debug-graphs/`
//! - **Windows**: `%APPDATA%\dev.hxyulin.debug-graphs\`
//!
//! # Example
//!
//! ```toml
//! [options]
//! graph_width = 120
//! renderer = "incremental"
//!
//! [[plots]]
//! key = "fps"
//! title = "FPS"
//! section = "Timing"
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{DebugGraphError, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for config directories
pub const APP_ID: &str = "dev.hxyulin.debug-graphs";

/// Config filename looked up by [`GraphConfig::discover`]
pub const CONFIG_FILE: &str = "debug-graphs.toml";

/// Which rendering strategy plots use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Keep the last `graph_width` samples and redraw the whole path each update
    #[default]
    Buffered,
    /// Keep no history; scroll and rescale the already-drawn pixels
    Incremental,
}

impl std::fmt::Display for RendererKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RendererKind::Buffered => write!(f, "buffered"),
            RendererKind::Incremental => write!(f, "incremental"),
        }
    }
}

/// Registry-wide options, fixed when the registry is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Window width in samples (one logical pixel per sample)
    pub graph_width: u32,
    /// Plot height in logical pixels, header included
    pub graph_height: u32,
    /// Header font size in logical pixels
    pub font_size: f32,
    /// Fraction of the width given to the title; the value label gets the rest
    pub title_to_value_ratio: f32,
    /// Value labels show `round(v * rounding_factor) / rounding_factor`
    pub rounding_factor: f64,
    /// Default minimum visible span, overridable per plot
    pub min_graph_range: f64,
    /// Physical pixels per logical pixel
    pub pixel_ratio: f32,
    pub renderer: RendererKind,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            graph_width: 75,
            graph_height: 25,
            font_size: 5.0,
            title_to_value_ratio: 0.6,
            rounding_factor: 100.0,
            min_graph_range: 1.5,
            pixel_ratio: 1.0,
            renderer: RendererKind::Buffered,
        }
    }
}

impl GraphOptions {
    /// Surface size in physical pixels
    pub fn surface_size(&self) -> (u32, u32) {
        let scale = |v: u32| (v as f32 * self.pixel_ratio).round() as u32;
        (scale(self.graph_width), scale(self.graph_height))
    }

    /// Number of samples kept by the buffered renderer
    pub fn window_len(&self) -> usize {
        self.graph_width as usize
    }

    pub fn with_renderer(mut self, renderer: RendererKind) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.graph_width = width;
        self.graph_height = height;
        self
    }
}

/// A predeclared plot in a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotEntry {
    pub key: String,
    #[serde(flatten)]
    pub settings: GraphSettings,
}

/// Config file contents: options plus plots to register up front
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub options: GraphOptions,
    pub plots: Vec<PlotEntry>,
}

impl GraphConfig {
    /// Load a config file; `.json` files are parsed as JSON, anything else as TOML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            serde_json::from_str(&content).map_err(DebugGraphError::from)
        } else {
            toml::from_str(&content).map_err(DebugGraphError::from)
        };

        parsed.map_err(|e| e.with_context(format!("Failed to parse config file {:?}", path)))
    }

    /// Load a config file, returning defaults if any error occurs
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Falling back to default graph config: {}", e);
                Self::default()
            }
        }
    }

    /// Save the config as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| DebugGraphError::Serialization(e.to_string()))?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {:?}", path))
    }

    /// Find the first existing config file: working directory, then config dir
    pub fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }
        config_dir()
            .map(|dir| dir.join(CONFIG_FILE))
            .filter(|p| p.exists())
    }
}

/// Platform config directory for debug-graphs
pub fn config_dir() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID))
}
