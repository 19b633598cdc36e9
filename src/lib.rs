//! # debug-graphs: rolling strip charts for live telemetry
//!
//! Small fixed-size plots that show a scalar signal (frame time, entity
//! counts, queue depth...) as it changes, drawn on top of an application.
//! Every plot advances one column per `update` call and never reallocates.
//!
//! ## Architecture
//!
//! - **Render**: two interchangeable strategies behind [`render::Renderer`].
//!   The buffered renderer replays a ring buffer of the visible window; the
//!   incremental renderer keeps no history and scrolls its own pixels with a
//!   self-blit.
//! - **Surface**: the only drawing dependency of the renderers. [`Framebuffer`]
//!   is the in-memory implementation.
//! - **Registry**: keyed plots, sections and attachment. This is the API
//!   callers use.
//! - **Overlay**: egui presentation of an attached registry.
//!
//! ## Example
//!
//! ```
//! use debug_graphs::{GraphOptions, GraphSettings, Registry};
//!
//! let mut graphs = Registry::new(GraphOptions::default());
//! graphs.add("fps", &GraphSettings::new().with_title("FPS"));
//!
//! for fps in [60.0, 58.0, 61.0] {
//!     graphs.update("fps", fps);
//! }
//! // metrics that were never registered are ignored
//! graphs.update("missing", 5.0);
//!
//! let range = graphs.get("fps").and_then(|p| p.range()).unwrap();
//! assert_eq!((range.min, range.max), (58.0, 61.0));
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod overlay;
pub mod plot;
pub mod registry;
pub mod render;
pub mod surface;

// Re-export commonly used types
pub use color::Rgba;
pub use config::{GraphConfig, GraphOptions, GraphSettings, PlotSettings, PlotStyle, RendererKind};
pub use error::{DebugGraphError, Result};
pub use overlay::Overlay;
pub use plot::{DisplayState, Plot};
pub use registry::{Anchor, Corner, Registry};
pub use surface::{Framebuffer, Surface};
