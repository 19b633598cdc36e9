//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod mock_helpers;

use debug_graphs::render::Range;
use debug_graphs::{Framebuffer, Registry, Rgba};

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Feed `values` to `key` in order
pub fn feed(registry: &mut Registry, key: &str, values: &[f64]) {
    for &value in values {
        registry.update(key, value);
    }
}

/// Range currently shown by `key`, panicking if it has none
pub fn range_of(registry: &Registry, key: &str) -> Range {
    registry
        .get(key)
        .and_then(|plot| plot.range())
        .unwrap_or_else(|| panic!("graph '{}' has no range", key))
}

/// Text of the value label in the header of `key`
pub fn value_label(registry: &Registry, key: &str) -> Option<String> {
    let plot = registry.get(key)?;
    let label = plot.surface().texts_in(plot.layout().label_rect()).next()?;
    Some(label.text.clone())
}

/// Pixels of the plot band, row by row
pub fn band_pixels(surface: &Framebuffer, top: u32, bottom: u32) -> Vec<Rgba> {
    (top..bottom)
        .flat_map(|y| (0..surface.width()).filter_map(move |x| surface.pixel(x, y)))
        .collect()
}
