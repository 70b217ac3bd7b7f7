mod app;
mod cli;
mod color;
mod config;
mod data;
mod diagram;
mod error;
mod render;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;

use app::ModalityViewerApp;
use cli::Args;
use config::PlotConfig;
use data::loader::load_csv;
use data::model::ModalityDataset;
use diagram::plot::ModalityPlot;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PlotConfig::load(path)?,
        None => PlotConfig::default(),
    };
    args.apply(&mut config);

    let (data, binarization) = load_csv(&args.csv_path)?;
    let dataset = ModalityDataset::new(data, binarization)?;
    let plot = ModalityPlot::new(dataset, config)?;

    let summary = plot.summary();
    log::info!(
        "{} rows: {} plotted, {} excluded, {} unmatched",
        summary.rows,
        summary.plotted,
        summary.excluded,
        summary.unmatched
    );

    render::save(&plot, &args.output_stem(), args.image_format(), args.transparent)?;

    if let Some(path) = &args.summary {
        let text = serde_json::to_string_pretty(&summary).context("serialising summary")?;
        std::fs::write(path, text)
            .with_context(|| format!("writing summary {}", path.display()))?;
        log::info!("Wrote summary to {}", path.display());
    }

    if args.show {
        show(plot)?;
    }
    Ok(())
}

/// Open the interactive viewer on an already built diagram.
fn show(plot: ModalityPlot) -> Result<()> {
    let title = if plot.config().title.is_empty() {
        "Modality Diagram".to_string()
    } else {
        plot.config().title.clone()
    };

    let mut state = AppState::new(plot.config().clone());
    state.set_plot(plot);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([500.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(ModalityViewerApp::new(state)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
