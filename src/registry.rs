//! Plot registry
//!
//! The [`Registry`] is the public entry point: it owns every [`Plot`] keyed by
//! name, routes samples to them, and records how they are stacked for
//! presentation.
//!
//! Invariants:
//! - keys are unique; the first `add` for a key wins and later ones are ignored
//! - insertion order is stacking order, both at the root and inside sections
//! - a section is created the first time a plot names it and is placed in the
//!   root order at that point

use crate::config::{GraphConfig, GraphOptions, GraphSettings};
use crate::plot::{DisplayState, Plot};
use crate::surface::{Framebuffer, Surface};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Screen corner the overlay is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Where the overlay is attached on its host surface
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Anchor {
    pub corner: Corner,
    /// Offset from the corner in logical points, pointing inwards
    pub offset: [f32; 2],
}

impl Anchor {
    pub fn new(corner: Corner) -> Self {
        Self {
            corner,
            offset: [0.0, 0.0],
        }
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = [x, y];
        self
    }
}

/// A named group of plots stacked under a header
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    plots: Vec<usize>,
}

impl Section {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.plots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Plot(usize),
    Section(usize),
}

/// One top-level item in stacking order
#[derive(Debug)]
pub enum LayoutItem<'a, S: Surface = Framebuffer> {
    Plot(&'a Plot<S>),
    Section {
        name: &'a str,
        plots: Vec<&'a Plot<S>>,
    },
}

/// Keyed collection of plots sharing one set of [`GraphOptions`]
#[derive(Debug)]
pub struct Registry<S: Surface = Framebuffer> {
    options: GraphOptions,
    new_surface: fn(u32, u32) -> S,
    plots: Vec<Plot<S>>,
    index: HashMap<String, usize>,
    sections: Vec<Section>,
    section_index: HashMap<String, usize>,
    root: Vec<Entry>,
    attachment: Option<Anchor>,
}

impl Registry<Framebuffer> {
    /// Create an empty registry whose plots draw into framebuffers
    pub fn new(options: GraphOptions) -> Self {
        Self::with_surfaces(options, Framebuffer::new)
    }

    /// Create a registry and register every plot listed in `config`
    pub fn from_config(config: &GraphConfig) -> Self {
        let mut registry = Self::new(config.options.clone());
        for entry in &config.plots {
            registry.add(&entry.key, &entry.settings);
        }
        registry
    }
}

impl Default for Registry<Framebuffer> {
    fn default() -> Self {
        Self::new(GraphOptions::default())
    }
}

impl<S: Surface> Registry<S> {
    /// Create an empty registry; `new_surface(width, height)` allocates each
    /// plot's surface in physical pixels
    pub fn with_surfaces(options: GraphOptions, new_surface: fn(u32, u32) -> S) -> Self {
        tracing::debug!(
            "Creating graph registry ({}x{}, {} renderer)",
            options.graph_width,
            options.graph_height,
            options.renderer
        );
        Self {
            options,
            new_surface,
            plots: Vec::new(),
            index: HashMap::new(),
            sections: Vec::new(),
            section_index: HashMap::new(),
            root: Vec::new(),
            attachment: None,
        }
    }

    /// Register a plot under `key`
    ///
    /// Does nothing if `key` is already registered; the first registration's
    /// settings stay in effect.
    pub fn add(&mut self, key: &str, settings: &GraphSettings) {
        if self.index.contains_key(key) {
            tracing::trace!("Ignoring duplicate registration of graph '{}'", key);
            return;
        }

        let resolved = settings.resolve(&self.options);
        let section = resolved.section.clone();
        let (width, height) = self.options.surface_size();
        let surface = (self.new_surface)(width, height);

        let id = self.plots.len();
        self.plots
            .push(Plot::with_surface(key, resolved, &self.options, surface));
        self.index.insert(key.to_string(), id);

        match section {
            Some(name) => {
                let section_id = self.section_for(&name);
                self.sections[section_id].plots.push(id);
                tracing::debug!("Registered graph '{}' in section '{}'", key, name);
            }
            None => {
                self.root.push(Entry::Plot(id));
                tracing::debug!("Registered graph '{}'", key);
            }
        }
    }

    fn section_for(&mut self, name: &str) -> usize {
        if let Some(&id) = self.section_index.get(name) {
            return id;
        }
        let id = self.sections.len();
        self.sections.push(Section {
            name: name.to_string(),
            plots: Vec::new(),
        });
        self.section_index.insert(name.to_string(), id);
        self.root.push(Entry::Section(id));
        tracing::debug!("Created graph section '{}'", name);
        id
    }

    /// Feed a sample to the plot registered under `key`
    ///
    /// Unknown keys are ignored so callers can update metrics that may not
    /// have been registered.
    pub fn update(&mut self, key: &str, value: f64) {
        match self.index.get(key) {
            Some(&id) => self.plots[id].update(value),
            None => tracing::trace!("Ignoring update for unknown graph '{}'", key),
        }
    }

    /// Flip a plot between expanded and collapsed
    pub fn toggle_collapsed(&mut self, key: &str) -> Option<DisplayState> {
        let id = *self.index.get(key)?;
        let state = self.plots[id].toggle_collapsed();
        tracing::debug!("Graph '{}' is now {:?}", key, state);
        Some(state)
    }

    pub fn get(&self, key: &str) -> Option<&Plot<S>> {
        self.index.get(key).map(|&id| &self.plots[id])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Plots in registration order, ignoring sections
    pub fn plots(&self) -> impl Iterator<Item = &Plot<S>> {
        self.plots.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.plots.iter().map(|p| p.key())
    }

    pub fn len(&self) -> usize {
        self.plots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Top-level items in stacking order
    pub fn layout(&self) -> Vec<LayoutItem<'_, S>> {
        self.root
            .iter()
            .map(|entry| match *entry {
                Entry::Plot(id) => LayoutItem::Plot(&self.plots[id]),
                Entry::Section(id) => {
                    let section = &self.sections[id];
                    LayoutItem::Section {
                        name: &section.name,
                        plots: section.plots.iter().map(|&p| &self.plots[p]).collect(),
                    }
                }
            })
            .collect()
    }

    /// Attach the overlay; `None` pins it to the top-left corner
    pub fn attach(&mut self, anchor: Option<Anchor>) {
        let anchor = anchor.unwrap_or_default();
        tracing::debug!("Attaching graph overlay at {:?}", anchor.corner);
        self.attachment = Some(anchor);
    }

    pub fn detach(&mut self) {
        self.attachment = None;
    }

    /// Anchor the overlay is drawn at, `None` while detached
    pub fn attachment(&self) -> Option<Anchor> {
        self.attachment
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }
}
