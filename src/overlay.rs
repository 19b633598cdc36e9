//! egui presentation of a [`Registry`]
//!
//! Each plot's framebuffer is uploaded as a texture (re-uploaded only when its
//! generation changes) and drawn inside a foreground [`egui::Area`] pinned to
//! the registry's attachment corner. Text runs are painted on top with egui's
//! fonts. Clicking a plot toggles it between expanded and collapsed.

use crate::plot::Plot;
use crate::registry::{Anchor, Corner, LayoutItem, Registry};
use crate::surface::{Framebuffer, TextAlign, TextRun};
use egui::{Align2, Color32, Pos2, Rect, Response, Sense, TextureId, Ui, Vec2, Widget};
use std::collections::HashMap;

/// Opacity of the whole overlay
const OVERLAY_OPACITY: f32 = 0.9;

/// Section header fill
const SECTION_COLOR: Color32 = Color32::from_rgb(0, 0, 255);

struct CachedTexture {
    handle: egui::TextureHandle,
    generation: u64,
}

/// Draws attached registries and forwards clicks back to them
#[derive(Default)]
pub struct Overlay {
    textures: HashMap<String, CachedTexture>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `registry` if it is attached; does nothing otherwise
    pub fn show(&mut self, ctx: &egui::Context, registry: &mut Registry<Framebuffer>) {
        let Some(anchor) = registry.attachment() else {
            return;
        };
        let (align, offset) = placement(anchor);
        let options = registry.options();
        let size = egui::vec2(options.graph_width as f32, options.graph_height as f32);
        let scale = 1.0 / options.pixel_ratio;

        let mut clicked = Vec::new();
        egui::Area::new(egui::Id::new("debug_graphs_overlay"))
            .anchor(align, offset)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.set_opacity(OVERLAY_OPACITY);
                ui.spacing_mut().item_spacing = Vec2::ZERO;

                for item in registry.layout() {
                    match item {
                        LayoutItem::Plot(plot) => {
                            self.plot_ui(ui, plot, size, scale, &mut clicked);
                        }
                        LayoutItem::Section { name, plots } => {
                            section_header(ui, name, size.x);
                            for plot in plots {
                                self.plot_ui(ui, plot, size, scale, &mut clicked);
                            }
                        }
                    }
                }
            });

        for key in clicked {
            registry.toggle_collapsed(&key);
        }
    }

    /// Number of plot textures currently uploaded
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    fn plot_ui(
        &mut self,
        ui: &mut Ui,
        plot: &Plot,
        size: Vec2,
        scale: f32,
        clicked: &mut Vec<String>,
    ) {
        let texture = self.texture_for(ui.ctx(), plot);
        let height = if plot.is_collapsed() {
            plot.layout().collapsed_height() * scale
        } else {
            size.y
        };

        let response = ui.add(PlotImage {
            texture,
            surface: plot.surface(),
            visible: egui::vec2(size.x, height),
            full: size,
            scale,
        });
        if response.clicked() {
            clicked.push(plot.key().to_string());
        }
    }

    fn texture_for(&mut self, ctx: &egui::Context, plot: &Plot) -> TextureId {
        let surface = plot.surface();
        let generation = surface.generation();

        if let Some(cached) = self.textures.get_mut(plot.key()) {
            if cached.generation != generation {
                cached
                    .handle
                    .set(color_image(surface), egui::TextureOptions::NEAREST);
                cached.generation = generation;
            }
            return cached.handle.id();
        }

        let handle = ctx.load_texture(
            format!("debug-graph-{}", plot.key()),
            color_image(surface),
            egui::TextureOptions::NEAREST,
        );
        let id = handle.id();
        self.textures
            .insert(plot.key().to_string(), CachedTexture { handle, generation });
        id
    }
}

/// Area alignment and inward offset for an anchor
fn placement(anchor: Anchor) -> (Align2, Vec2) {
    let [x, y] = anchor.offset;
    match anchor.corner {
        Corner::TopLeft => (Align2::LEFT_TOP, egui::vec2(x, y)),
        Corner::TopRight => (Align2::RIGHT_TOP, egui::vec2(-x, y)),
        Corner::BottomLeft => (Align2::LEFT_BOTTOM, egui::vec2(x, -y)),
        Corner::BottomRight => (Align2::RIGHT_BOTTOM, egui::vec2(-x, -y)),
    }
}

fn color_image(surface: &Framebuffer) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [surface.width() as usize, surface.height() as usize],
        &surface.to_rgba_bytes(),
    )
}

fn section_header(ui: &mut Ui, name: &str, width: f32) {
    egui::Frame::new().fill(SECTION_COLOR).show(ui, |ui| {
        ui.set_width(width);
        ui.label(egui::RichText::new(name).color(Color32::WHITE));
    });
}

/// One plot surface: the framebuffer texture plus its text runs
struct PlotImage<'a> {
    texture: TextureId,
    surface: &'a Framebuffer,
    /// Allocated size; shorter than `full` while collapsed
    visible: Vec2,
    full: Vec2,
    /// Logical points per physical surface pixel
    scale: f32,
}

impl Widget for PlotImage<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(self.visible, Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter_at(rect);
            let uv = Rect::from_min_max(Pos2::ZERO, egui::pos2(1.0, 1.0));
            painter.image(
                self.texture,
                Rect::from_min_size(rect.min, self.full),
                uv,
                Color32::WHITE,
            );
            for run in self.surface.texts() {
                paint_text(&painter, rect.min, run, self.scale);
            }
        }

        response.on_hover_cursor(egui::CursorIcon::PointingHand)
    }
}

fn paint_text(painter: &egui::Painter, origin: Pos2, run: &TextRun, scale: f32) {
    let pos = origin + egui::vec2(run.x, run.y) * scale;
    let align = match run.align {
        TextAlign::Left => Align2::LEFT_BOTTOM,
        TextAlign::Right => Align2::RIGHT_BOTTOM,
    };
    let font = egui::FontId::proportional(run.font_size * scale);

    let painter = match run.max_width {
        Some(max_width) => {
            let clip = painter.clip_rect();
            let (left, right) = match run.align {
                TextAlign::Left => (pos.x, pos.x + max_width * scale),
                TextAlign::Right => (pos.x - max_width * scale, pos.x),
            };
            let bounds = Rect::from_x_y_ranges(left..=right, clip.y_range());
            painter.with_clip_rect(bounds.intersect(clip))
        }
        None => painter.clone(),
    };

    if let Some(outline) = run.outline {
        let outline = Color32::from(outline);
        for offset in [
            egui::vec2(-1.0, 0.0),
            egui::vec2(1.0, 0.0),
            egui::vec2(0.0, -1.0),
            egui::vec2(0.0, 1.0),
        ] {
            painter.text(pos + offset, align, &run.text, font.clone(), outline);
        }
    }
    painter.text(pos, align, &run.text, font, run.color.into());
}
