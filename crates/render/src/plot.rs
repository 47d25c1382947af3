//! Interactive window showing a packing.
//!
//! See [`show`].

use std::f64::consts::TAU;

use circlepack_core::{Packing, PlacedCircle};
use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

/// Segments used to approximate each circle outline.
const SEGMENTS: usize = 96;

/// Opens a blocking egui window displaying `packing`.
///
/// Axes use equal scaling and always include `[0, width] × [0, height]`.
/// Blocks until the window is closed by the user.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn show(packing: &Packing) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    let title = format!("Area = {:.3}", packing.area());
    let app = PackingApp {
        outline: box_outline(packing.width, packing.height),
        circles: packing
            .circles
            .iter()
            .map(|c| (format!("circle {}", c.index), circle_outline(c, SEGMENTS)))
            .collect(),
        width: packing.width,
        height: packing.height,
    };

    eframe::run_native(&title, options, Box::new(move |_cc| Ok(Box::new(app))))
}

/// Closed polygon approximating a circle.
fn circle_outline(circle: &PlacedCircle, segments: usize) -> Vec<[f64; 2]> {
    (0..=segments)
        .map(|k| {
            #[allow(clippy::cast_precision_loss)]
            let angle = TAU * k as f64 / segments as f64;
            [
                circle.x + circle.radius * angle.cos(),
                circle.y + circle.radius * angle.sin(),
            ]
        })
        .collect()
}

/// Closed rectangle from the origin to `(width, height)`.
fn box_outline(width: f64, height: f64) -> Vec<[f64; 2]> {
    vec![
        [0.0, 0.0],
        [width, 0.0],
        [width, height],
        [0.0, height],
        [0.0, 0.0],
    ]
}

/// The egui [`eframe::App`] that renders a packing.
struct PackingApp {
    outline: Vec<[f64; 2]>,
    circles: Vec<(String, Vec<[f64; 2]>)>,
    width: f64,
    height: f64,
}

impl eframe::App for PackingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let plot = Plot::new("packing")
                .data_aspect(1.0)
                .include_x(0.0)
                .include_x(self.width)
                .include_y(0.0)
                .include_y(self.height);

            plot.show(ui, |plot_ui| {
                let outline: PlotPoints = self.outline.iter().copied().collect();
                plot_ui.line(Line::new(outline).name("box"));
                for (name, points) in &self.circles {
                    let points: PlotPoints = points.iter().copied().collect();
                    plot_ui.line(Line::new(points).name(name));
                }
            });
        });
    }
}
