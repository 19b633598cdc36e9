//! Test data builders for creating registries

use debug_graphs::{GraphOptions, GraphSettings, Registry, RendererKind};

/// Builder for registries with a few plots already registered
pub struct RegistryBuilder {
    options: GraphOptions,
    plots: Vec<(String, GraphSettings)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            options: GraphOptions::default(),
            plots: Vec::new(),
        }
    }

    pub fn renderer(mut self, renderer: RendererKind) -> Self {
        self.options.renderer = renderer;
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.options = self.options.with_size(width, height);
        self
    }

    pub fn plot(mut self, key: &str, settings: GraphSettings) -> Self {
        self.plots.push((key.to_string(), settings));
        self
    }

    pub fn build(self) -> Registry {
        let mut registry = Registry::new(self.options);
        for (key, settings) in &self.plots {
            registry.add(key, settings);
        }
        registry
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_builder() {
        let registry = RegistryBuilder::new()
            .renderer(RendererKind::Incremental)
            .size(40, 20)
            .plot("a", GraphSettings::new())
            .plot("b", GraphSettings::new().with_section("S"))
            .build();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.options().graph_width, 40);
        assert_eq!(registry.options().renderer, RendererKind::Incremental);
    }
}
