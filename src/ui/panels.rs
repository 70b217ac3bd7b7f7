use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::to_egui;
use crate::diagram::region::{Classification, Region};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – region selector
// ---------------------------------------------------------------------------

/// Render the left region panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Regions");
    ui.separator();

    let Some(plot) = &state.plot else {
        ui.label("No dataset loaded.");
        return;
    };

    let swatches: Vec<(Region, Color32)> = Region::ALL
        .into_iter()
        .map(|r| (r, to_egui(plot.class_color(Classification::Region(r)), 1.0)))
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (region, color) in swatches {
                let count = state.region_count(region);
                let text = RichText::new(format!("■ {region}  ({count})")).color(color);
                if ui
                    .selectable_label(state.selected_region == region, text)
                    .clicked()
                {
                    state.selected_region = region;
                }
            }

            if let Some(summary) = &state.summary {
                ui.separator();
                ui.label(format!("Unmatched: {}", summary.unmatched));
                ui.label(format!("Excluded (all zero): {}", summary.excluded));
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(summary) = &state.summary {
            ui.label(format!(
                "{} rows loaded, {} plotted",
                summary.rows, summary.plotted
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.show_scale_circle, "Scale Circle")
            .clicked()
        {
            state.show_scale_circle = !state.show_scale_circle;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open modality data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match state.load_path(&path) {
            Ok(()) => log::info!("Loaded {} into viewer", path.display()),
            Err(e) => log::error!("Failed to load file: {e:#}"),
        }
    }
}
