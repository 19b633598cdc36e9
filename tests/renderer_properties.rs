//! Property-based checks of range tracking, ring order and pixel mapping

mod common;

use common::builders::RegistryBuilder;
use common::{assert_float_eq, feed, range_of};
use debug_graphs::render::{map_value, scan_range, CircularBuffer, Range, RunningExtrema};
use debug_graphs::{GraphSettings, RendererKind};
use proptest::prelude::*;

const WINDOW: usize = 75;
const FLOOR: f64 = 1.5;

fn expected_range(values: &[f64]) -> Option<Range> {
    let start = values.len().saturating_sub(WINDOW);
    scan_range(values[start..].iter().copied()).map(|r| r.with_floor(FLOOR))
}

#[test]
fn test_ring_order_example() {
    let mut buffer = CircularBuffer::with_capacity(2);
    for v in [1, 2, 3] {
        buffer.push(v);
    }
    assert_eq!(buffer.iter().collect::<Vec<_>>(), vec![2, 3]);
}

#[test]
fn test_mapper_bounds_example() {
    let range = Range::new(-3.0, 12.0);
    assert_float_eq(map_value(-3.0, range, 40.0) as f64, 40.0, 1e-4);
    assert_float_eq(map_value(12.0, range, 40.0) as f64, 0.0, 1e-4);
}

proptest! {
    #[test]
    fn test_buffered_range_matches_visible_window(
        values in prop::collection::vec(-1000.0f64..1000.0, 1..200)
    ) {
        let mut registry = RegistryBuilder::new()
            .plot("k", GraphSettings::new())
            .build();
        feed(&mut registry, "k", &values);

        // Property: the range is exactly the floored extent of the last W samples
        prop_assert_eq!(Some(range_of(&registry, "k")), expected_range(&values));
    }

    #[test]
    fn test_ring_keeps_newest_in_order(
        values in prop::collection::vec(any::<i32>(), 0..64),
        capacity in 1usize..16
    ) {
        let mut buffer = CircularBuffer::with_capacity(capacity);
        for &v in &values {
            buffer.push(v);
        }

        let start = values.len().saturating_sub(capacity);
        prop_assert_eq!(buffer.iter().collect::<Vec<_>>(), values[start..].to_vec());
        prop_assert_eq!(buffer.last(), values.last().copied());
        prop_assert!(buffer.len() <= capacity);
    }

    #[test]
    fn test_running_extrema_only_widen(
        values in prop::collection::vec(-1e6f64..1e6, 1..100)
    ) {
        let mut extrema = RunningExtrema::new();
        let mut previous: Option<Range> = None;

        for &v in &values {
            let range = extrema.observe(v);
            prop_assert!(range.contains(v));
            if let Some(prev) = previous {
                // Property: min never increases, max never decreases
                prop_assert!(range.min <= prev.min);
                prop_assert!(range.max >= prev.max);
            }
            previous = Some(range);
        }
    }

    #[test]
    fn test_incremental_shown_range_covers_every_sample(
        values in prop::collection::vec(-500.0f64..500.0, 1..120)
    ) {
        let mut registry = RegistryBuilder::new()
            .renderer(RendererKind::Incremental)
            .plot("k", GraphSettings::new())
            .build();

        let mut previous: Option<Range> = None;
        for &v in &values {
            registry.update("k", v);
            let range = range_of(&registry, "k");
            prop_assert!(range.span() >= FLOOR);
            if let Some(prev) = previous {
                prop_assert!(range.min <= prev.min && range.max >= prev.max);
            }
            previous = Some(range);
        }

        let shown = range_of(&registry, "k");
        prop_assert!(values.iter().all(|&v| shown.contains(v)));
    }

    #[test]
    fn test_mapper_is_affine(
        min in -1000.0f64..1000.0,
        span in 0.01f64..1000.0,
        height in 1.0f32..500.0,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0
    ) {
        let range = Range::new(min, min + span);
        let tolerance = 1e-3 * height as f64;

        // Property: bounds land on the band edges
        prop_assert!((map_value(range.min, range, height) as f64 - height as f64).abs() < tolerance);
        prop_assert!((map_value(range.max, range, height) as f64).abs() < tolerance);

        // Property: the midpoint of two values maps to the midpoint of their rows
        let va = min + a * span;
        let vb = min + b * span;
        let mid = map_value((va + vb) / 2.0, range, height) as f64;
        let expected = (map_value(va, range, height) as f64 + map_value(vb, range, height) as f64) / 2.0;
        prop_assert!((mid - expected).abs() < tolerance);
    }

    #[test]
    fn test_add_is_first_writer_wins(first in "[a-z]{1,8}", second in "[a-z]{1,8}") {
        let registry = RegistryBuilder::new()
            .plot("k", GraphSettings::new().with_title(first.clone()))
            .plot("k", GraphSettings::new().with_title(second))
            .build();
        prop_assert_eq!(&registry.get("k").unwrap().settings().title, &first);
    }
}
