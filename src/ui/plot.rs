use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints};

use crate::color::to_egui;
use crate::diagram::region::Classification;
use crate::state::AppState;

const CIRCLE_SEGMENTS: usize = 100;

// ---------------------------------------------------------------------------
// Region plot (central panel)
// ---------------------------------------------------------------------------

/// Render the selected region's subplot in the central panel.
pub fn region_plot(ui: &mut Ui, state: &AppState) {
    let (Some(plot), Some(subplot)) = (&state.plot, state.selected_subplot()) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view the diagram  (File → Open…)");
        });
        return;
    };

    let config = plot.config();
    let r_max = subplot.r_max;

    Plot::new("region_plot")
        .legend(egui_plot::Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .include_x(-r_max)
        .include_x(r_max)
        .include_y(-r_max)
        .include_y(r_max)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for trace in &subplot.traces {
                let tip = [
                    trace.magnitude * trace.angle.cos(),
                    trace.magnitude * trace.angle.sin(),
                ];
                let points: PlotPoints = vec![[0.0, 0.0], tip].into();
                // Legend entries merge by name, one per class.
                let name = match trace.class {
                    Classification::Region(r) => r.to_string(),
                    Classification::Unmatched => "unmatched".to_string(),
                };
                plot_ui.line(
                    Line::new(points)
                        .name(name)
                        .color(to_egui(trace.color, config.alpha))
                        .width(config.line_width as f32),
                );
            }

            if state.show_scale_circle && config.scale_circle > 0.0 {
                let r = config.scale_circle;
                let circle: PlotPoints = (0..=CIRCLE_SEGMENTS)
                    .map(|i| {
                        let t = i as f64 / CIRCLE_SEGMENTS as f64 * std::f64::consts::TAU;
                        [r * t.cos(), r * t.sin()]
                    })
                    .collect();
                plot_ui.line(
                    Line::new(circle)
                        .color(Color32::BLACK)
                        .style(egui_plot::LineStyle::dotted_dense())
                        .width(1.0),
                );
            }
        });
}
