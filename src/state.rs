use std::path::Path;

use anyhow::Result;

use crate::config::PlotConfig;
use crate::data::loader::load_csv;
use crate::data::model::ModalityDataset;
use crate::diagram::plot::{DiagramSummary, ModalityPlot, Subplot};
use crate::diagram::region::Region;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    /// Config applied to every loaded file.
    pub config: PlotConfig,

    /// Current diagram (None until a file is loaded).
    pub plot: Option<ModalityPlot>,

    /// Cached subplots of `plot`, in [`Region::ALL`] order.
    pub subplots: Vec<Subplot>,

    /// Cached summary of `plot`.
    pub summary: Option<DiagramSummary>,

    /// Region shown in the central panel.
    pub selected_region: Region,

    /// Whether to draw the scale circle.
    pub show_scale_circle: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            config: PlotConfig::default(),
            plot: None,
            subplots: Vec::new(),
            summary: None,
            selected_region: Region::ABC,
            show_scale_circle: true,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    pub fn new(config: PlotConfig) -> Self {
        Self {
            show_scale_circle: config.scale_circle > 0.0,
            config,
            ..Default::default()
        }
    }

    /// Ingest a newly built diagram and refresh the caches.
    pub fn set_plot(&mut self, plot: ModalityPlot) {
        self.subplots = plot.subplots();
        self.summary = Some(plot.summary());
        self.plot = Some(plot);
        self.status_message = None;
        self.loading = false;
    }

    /// Load a CSV with the current config and replace the diagram.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        self.loading = true;
        let built = load_csv(path).and_then(|(data, binarization)| {
            let dataset = ModalityDataset::new(data, binarization)?;
            Ok(ModalityPlot::new(dataset, self.config.clone())?)
        });
        match built {
            Ok(plot) => {
                self.set_plot(plot);
                Ok(())
            }
            Err(e) => {
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
                Err(e)
            }
        }
    }

    pub fn selected_subplot(&self) -> Option<&Subplot> {
        self.subplots.get(self.selected_region.index())
    }

    pub fn region_count(&self, region: Region) -> usize {
        self.summary
            .as_ref()
            .map_or(0, |s| s.regions[region.index()].rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_a_file_fills_caches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        std::fs::write(&path, "1.2,0.1,0.2,1,,\n0.3,0.5,0.1,,1,\n1.5,0.5,1.0,1,1,1\n").unwrap();

        let mut state = AppState::new(PlotConfig::default());
        state.load_path(&path).unwrap();

        assert_eq!(state.subplots.len(), 7);
        assert_eq!(state.selected_subplot().unwrap().region, Region::ABC);
        assert_eq!(state.selected_subplot().unwrap().traces.len(), 3);
        assert_eq!(state.region_count(Region::B), 1);
        assert!(!state.loading);
    }

    #[test]
    fn failed_load_keeps_previous_plot_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.csv");
        let empty = dir.path().join("empty.csv");
        std::fs::write(&good, "1,0,0,1,,\n").unwrap();
        std::fs::write(&empty, "").unwrap();

        let mut state = AppState::new(PlotConfig::default());
        state.load_path(&good).unwrap();
        assert!(state.load_path(&empty).is_err());

        assert!(state.plot.is_some());
        let msg = state.status_message.as_deref().unwrap();
        assert!(msg.contains("data array must not be empty"));
    }
}
