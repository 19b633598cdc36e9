//! End-to-end scenarios through the public registry API

mod common;

use common::builders::RegistryBuilder;
use common::{band_pixels, feed, range_of, value_label};
use debug_graphs::registry::LayoutItem;
use debug_graphs::render::Range;
use debug_graphs::{DisplayState, GraphSettings, PlotStyle, RendererKind};

#[test]
fn test_fps_scenario() {
    let mut registry = RegistryBuilder::new()
        .plot("fps", GraphSettings::new().with_title("FPS"))
        .build();

    feed(&mut registry, "fps", &[60.0, 58.0, 61.0]);

    // span 3 is above the default floor of 1.5
    assert_eq!(range_of(&registry, "fps"), Range::new(58.0, 61.0));
    assert_eq!(value_label(&registry, "fps").as_deref(), Some("61"));
}

#[test]
fn test_update_on_missing_key_changes_nothing() {
    let mut registry = RegistryBuilder::new()
        .plot("fps", GraphSettings::new())
        .build();
    feed(&mut registry, "fps", &[1.0, 2.0]);
    let before = registry.get("fps").unwrap().surface().clone();

    registry.update("missing", 5.0);

    let after = registry.get("fps").unwrap().surface();
    assert_eq!(after.generation(), before.generation());
    assert_eq!(after.pixels(), before.pixels());
    assert_eq!(registry.len(), 1);
    assert!(!registry.contains("missing"));
}

#[test]
fn test_first_registration_wins() {
    let mut registry = RegistryBuilder::new()
        .plot("k", GraphSettings::new().with_title("A").with_style(PlotStyle::Fill))
        .plot("k", GraphSettings::new().with_title("B"))
        .build();
    registry.add("k", &GraphSettings::new().with_title("C"));

    let plot = registry.get("k").unwrap();
    assert_eq!(plot.settings().title, "A");
    assert_eq!(plot.settings().style, PlotStyle::Fill);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_value_label_uses_affixes_and_rounding() {
    let mut registry = RegistryBuilder::new()
        .plot("frame", GraphSettings::new().with_affixes("t=", " ms"))
        .build();
    registry.update("frame", 16.66666);
    assert_eq!(value_label(&registry, "frame").as_deref(), Some("t=16.67 ms"));
}

#[test]
fn test_incremental_label_is_unrounded() {
    let mut registry = RegistryBuilder::new()
        .renderer(RendererKind::Incremental)
        .plot("frame", GraphSettings::new())
        .build();
    registry.update("frame", 16.66666);
    assert_eq!(value_label(&registry, "frame").as_deref(), Some("16.66666"));
}

#[test]
fn test_buffered_window_forgets_old_spike() {
    let mut registry = RegistryBuilder::new()
        .size(4, 25)
        .plot("k", GraphSettings::new())
        .build();

    feed(&mut registry, "k", &[100.0, 1.0, 2.0, 3.0]);
    assert_eq!(range_of(&registry, "k"), Range::new(1.0, 100.0));

    registry.update("k", 4.0);
    assert_eq!(range_of(&registry, "k"), Range::new(1.0, 4.0));
}

#[test]
fn test_incremental_range_keeps_old_spike() {
    let mut registry = RegistryBuilder::new()
        .renderer(RendererKind::Incremental)
        .size(4, 25)
        .plot("k", GraphSettings::new())
        .build();

    feed(&mut registry, "k", &[100.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    let range = range_of(&registry, "k");
    assert_eq!(range.max, 101.0);
    assert_eq!(range.min, 1.0);
}

#[test]
fn test_collapsed_plot_freezes_band() {
    for renderer in [RendererKind::Buffered, RendererKind::Incremental] {
        let mut registry = RegistryBuilder::new()
            .renderer(renderer)
            .plot("k", GraphSettings::new())
            .build();
        feed(&mut registry, "k", &[1.0, 5.0, 3.0]);

        assert_eq!(registry.toggle_collapsed("k"), Some(DisplayState::Collapsed));
        let plot = registry.get("k").unwrap();
        let band = plot.layout().plot_band();
        let (top, bottom) = (band.y as u32, band.bottom() as u32);
        let frozen = band_pixels(plot.surface(), top, bottom);

        feed(&mut registry, "k", &[9.0, -4.0]);

        let plot = registry.get("k").unwrap();
        assert_eq!(band_pixels(plot.surface(), top, bottom), frozen, "{renderer}");
        // the label still follows the data
        assert_eq!(value_label(&registry, "k").as_deref(), Some("-4"), "{renderer}");
    }
}

#[test]
fn test_expanding_again_redraws() {
    let mut registry = RegistryBuilder::new()
        .plot("k", GraphSettings::new().with_collapse(true))
        .build();
    feed(&mut registry, "k", &[1.0, 2.0]);
    let fg = registry.get("k").unwrap().settings().foreground;

    let plot = registry.get("k").unwrap();
    let band = plot.layout().plot_band();
    let pixels = band_pixels(plot.surface(), band.y as u32, band.bottom() as u32);
    assert!(!pixels.contains(&fg));

    registry.toggle_collapsed("k");
    registry.update("k", 3.0);

    let plot = registry.get("k").unwrap();
    let pixels = band_pixels(plot.surface(), band.y as u32, band.bottom() as u32);
    assert!(pixels.contains(&fg));
}

#[test]
fn test_stacking_order_with_sections() {
    let registry = RegistryBuilder::new()
        .plot("fps", GraphSettings::new().with_section("Timing"))
        .plot("entities", GraphSettings::new())
        .plot("frame", GraphSettings::new().with_section("Timing"))
        .build();

    let order: Vec<String> = registry
        .layout()
        .iter()
        .map(|item| match item {
            LayoutItem::Plot(plot) => plot.key().to_string(),
            LayoutItem::Section { name, plots } => format!(
                "{}[{}]",
                name,
                plots.iter().map(|p| p.key()).collect::<Vec<_>>().join(",")
            ),
        })
        .collect();

    assert_eq!(order, vec!["Timing[fps,frame]", "entities"]);
    assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["fps", "entities", "frame"]);
}

#[test]
fn test_constant_signal_gets_visible_range() {
    let mut registry = RegistryBuilder::new()
        .plot("k", GraphSettings::new().with_min_graph_range(10.0))
        .build();
    feed(&mut registry, "k", &[7.0; 20]);
    assert_eq!(range_of(&registry, "k"), Range::new(2.0, 12.0));
}

#[test]
fn test_incremental_history_survives_min_then_max_rescale() {
    let mut registry = RegistryBuilder::new()
        .renderer(RendererKind::Incremental)
        .plot("k", GraphSettings::new())
        .build();
    feed(&mut registry, "k", &[0.0, -3.0, 10.0]);

    assert_eq!(range_of(&registry, "k"), Range::new(-3.0, 10.0));
    let plot = registry.get("k").unwrap();
    let band = plot.layout().plot_band();
    let bg = plot.settings().background;
    let empty: Vec<u32> = (72..75)
        .filter(|&x| {
            (band.y as u32..band.bottom() as u32)
                .all(|y| plot.surface().pixel(x, y) == Some(bg))
        })
        .collect();
    assert!(empty.is_empty(), "columns without a mark: {empty:?}");
}

#[test]
fn test_incremental_label_uses_exponent_for_tiny_values() {
    let mut registry = RegistryBuilder::new()
        .renderer(RendererKind::Incremental)
        .plot("k", GraphSettings::new().with_affixes("", " s"))
        .build();
    registry.update("k", 1e-7);
    assert_eq!(value_label(&registry, "k").as_deref(), Some("1e-7 s"));
}
