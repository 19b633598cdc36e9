//! Mock construction helpers

use debug_graphs::surface::{Rect, Surface, TextRun};
use debug_graphs::Rgba;
use mockall::mock;

mock! {
    /// Surface that records the drawing primitives issued against it
    pub Canvas {}

    impl Surface for Canvas {
        fn fill_rect(&mut self, rect: Rect, color: Rgba);
        fn fill_text(&mut self, run: TextRun);
        fn stroke_polyline(&mut self, points: &[(f32, f32)], color: Rgba, width: f32);
        fn blit(&mut self, src: Rect, dst: Rect);
    }
}

/// A canvas that accepts any call
pub fn permissive_canvas() -> MockCanvas {
    let mut canvas = MockCanvas::new();
    canvas.expect_fill_rect().return_const(());
    canvas.expect_fill_text().return_const(());
    canvas.expect_stroke_polyline().return_const(());
    canvas.expect_blit().return_const(());
    canvas
}
