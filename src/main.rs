//! debug-graphs demo
//!
//! Opens a window with a few graphs attached: frame timing measured by the UI
//! thread itself, plus synthetic signals produced on a background thread and
//! delivered over a channel.

use crossbeam_channel::{bounded, Receiver, Sender};
use debug_graphs::{
    Anchor, Corner, GraphConfig, GraphSettings, Overlay, PlotStyle, Registry, Rgba,
};
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How often the producer thread emits a batch of samples
const PRODUCER_INTERVAL: Duration = Duration::from_millis(16);

/// A sample for one graph, sent from the producer thread
#[derive(Debug, Clone, Copy)]
struct Sample {
    key: &'static str,
    value: f64,
}

/// Synthetic waveforms for the demo graphs
#[derive(Debug, Clone, Copy)]
enum Signal {
    Sine { frequency: f64, amplitude: f64 },
    Square { period: f64, amplitude: f64 },
    Sawtooth { period: f64, amplitude: f64 },
}

impl Signal {
    fn value_at(&self, t: f64) -> f64 {
        match *self {
            Signal::Sine {
                frequency,
                amplitude,
            } => amplitude * (2.0 * std::f64::consts::PI * frequency * t).sin(),
            Signal::Square { period, amplitude } => {
                if t % period < period / 2.0 {
                    amplitude
                } else {
                    -amplitude
                }
            }
            Signal::Sawtooth { period, amplitude } => amplitude * ((t % period) / period),
        }
    }
}

const SIGNALS: [(&str, Signal); 3] = [
    (
        "sine",
        Signal::Sine {
            frequency: 0.5,
            amplitude: 10.0,
        },
    ),
    (
        "square",
        Signal::Square {
            period: 3.0,
            amplitude: 1.0,
        },
    ),
    (
        "saw",
        Signal::Sawtooth {
            period: 2.0,
            amplitude: 100.0,
        },
    ),
];

/// Emit every signal each interval until the receiving side goes away
fn run_producer(tx: Sender<Sample>) {
    let start = Instant::now();
    loop {
        let t = start.elapsed().as_secs_f64();
        for (key, signal) in SIGNALS {
            let sample = Sample {
                key,
                value: signal.value_at(t),
            };
            if tx.send(sample).is_err() {
                tracing::debug!("Sample receiver dropped, stopping producer");
                return;
            }
        }
        std::thread::sleep(PRODUCER_INTERVAL);
    }
}

fn register_demo_graphs(registry: &mut Registry) {
    registry.add(
        "fps",
        &GraphSettings::new().with_title("FPS").with_section("Timing"),
    );
    registry.add(
        "frame_ms",
        &GraphSettings::new()
            .with_title("Frame")
            .with_section("Timing")
            .with_style(PlotStyle::Fill)
            .with_affixes("", " ms"),
    );
    registry.add("sine", &GraphSettings::new().with_title("Sine"));
    registry.add(
        "square",
        &GraphSettings::new()
            .with_title("Square")
            .with_section("Signals")
            .with_colors(Rgba::rgb(0x00, 0xFF, 0x88), Rgba::rgb(0x00, 0x22, 0x11)),
    );
    registry.add(
        "saw",
        &GraphSettings::new()
            .with_title("Saw")
            .with_section("Signals")
            .with_collapse(true),
    );
}

struct DemoApp {
    registry: Registry,
    overlay: Overlay,
    samples: Receiver<Sample>,
    last_frame: Instant,
    corner: Corner,
}

impl DemoApp {
    fn new(registry: Registry, samples: Receiver<Sample>) -> Self {
        Self {
            registry,
            overlay: Overlay::new(),
            samples,
            last_frame: Instant::now(),
            corner: Corner::TopLeft,
        }
    }

    fn record_frame_time(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;

        if dt > 0.0 {
            self.registry.update("frame_ms", dt * 1000.0);
            self.registry.update("fps", 1.0 / dt);
        }
    }

    fn drain_samples(&mut self) {
        for sample in self.samples.try_iter() {
            self.registry.update(sample.key, sample.value);
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("debug-graphs");
        ui.label(format!(
            "{} graphs, {} renderer",
            self.registry.len(),
            self.registry.options().renderer
        ));
        ui.label("Click a graph to collapse or expand it.");

        let before = self.corner;
        egui::ComboBox::from_label("Corner")
            .selected_text(format!("{:?}", self.corner))
            .show_ui(ui, |ui| {
                for corner in [
                    Corner::TopLeft,
                    Corner::TopRight,
                    Corner::BottomLeft,
                    Corner::BottomRight,
                ] {
                    ui.selectable_value(&mut self.corner, corner, format!("{:?}", corner));
                }
            });
        if self.corner != before {
            self.registry
                .attach(Some(Anchor::new(self.corner).with_offset(8.0, 8.0)));
        }
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.record_frame_time();
        self.drain_samples();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
                self.controls(ui);
            });
        });

        self.overlay.show(ctx, &mut self.registry);
        ctx.request_repaint();
    }
}

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,debug_graphs=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting debug-graphs demo");

    let config = match GraphConfig::discover() {
        Some(path) => {
            tracing::info!("Loading graph config from {:?}", path);
            GraphConfig::load_or_default(path)
        }
        None => GraphConfig::default(),
    };

    let mut registry = Registry::from_config(&config);
    register_demo_graphs(&mut registry);
    registry.attach(Some(Anchor::new(Corner::TopLeft).with_offset(8.0, 8.0)));

    let (tx, rx) = bounded::<Sample>(1024);
    let producer = std::thread::spawn(move || run_producer(tx));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 480.0])
            .with_title("debug-graphs demo"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "debug-graphs demo",
        native_options,
        Box::new(|_cc| Ok(Box::new(DemoApp::new(registry, rx)))),
    );

    // The producer exits on its next send once the receiver is gone
    tracing::info!("Shutting down...");
    drop(producer);

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_alternates() {
        let signal = Signal::Square {
            period: 2.0,
            amplitude: 1.0,
        };
        assert_eq!(signal.value_at(0.5), 1.0);
        assert_eq!(signal.value_at(1.5), -1.0);
    }

    #[test]
    fn test_producer_stops_when_receiver_drops() {
        let (tx, rx) = bounded(4);
        let handle = std::thread::spawn(move || run_producer(tx));
        let first = rx.recv().unwrap();
        assert_eq!(first.key, "sine");
        drop(rx);
        handle.join().unwrap();
    }
}
