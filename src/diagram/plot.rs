use num_complex::Complex64;
use palette::Srgb;
use serde::Serialize;

use super::region::{Classification, PatternCounts, Region};
use super::vector::{normalize, row_resultant};
use crate::color::{from_hsv, parse_color};
use crate::config::{ColorMode, PlotConfig};
use crate::data::model::ModalityDataset;
use crate::error::ModalityError;

// ---------------------------------------------------------------------------
// Trace / Subplot
// ---------------------------------------------------------------------------

/// One vector from the origin to `(angle, magnitude)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// Index of the source row.
    pub row: usize,
    pub angle: f64,
    pub magnitude: f64,
    pub class: Classification,
    pub color: Srgb<u8>,
}

/// Everything needed to draw one region's polar subplot.
#[derive(Debug, Clone)]
pub struct Subplot {
    pub region: Region,
    /// Sorted by z-order, lowest first.
    pub traces: Vec<Trace>,
    pub counts: PatternCounts,
    /// Radial value mapped to the frame edge.
    pub r_max: f64,
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionCount {
    pub region: Region,
    pub rows: usize,
}

/// Row accounting for a whole diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramSummary {
    pub rows: usize,
    pub plotted: usize,
    /// Rows whose measurements are all zero.
    pub excluded: usize,
    pub regions: Vec<RegionCount>,
    pub unmatched: usize,
}

// ---------------------------------------------------------------------------
// ModalityPlot
// ---------------------------------------------------------------------------

/// A dataset together with its resolved resultants, classes and colours.
#[derive(Debug, Clone)]
pub struct ModalityPlot {
    dataset: ModalityDataset,
    config: PlotConfig,
    resultants: Vec<Option<Complex64>>,
    classes: Vec<Classification>,
    region_colors: [Srgb<u8>; 7],
    unmatched_color: Srgb<u8>,
    /// Per-row colours when colouring by HSV.
    row_colors: Option<Vec<Srgb<u8>>>,
}

impl ModalityPlot {
    pub fn new(dataset: ModalityDataset, config: PlotConfig) -> Result<Self, ModalityError> {
        config.validate()?;
        let region_colors = config.colors.resolve()?;
        let unmatched_color = match &config.unmatched_color {
            Some(color) => parse_color(color)?,
            None => region_colors[Region::A.index()],
        };

        let angles = config.angles_rad();
        let (resultants, classes): (Vec<Option<Complex64>>, Vec<Classification>) = dataset
            .rows()
            .map(|(point, flags)| (row_resultant(point, &angles), Classification::of(flags)))
            .unzip();

        let row_colors = match config.color_mode {
            ColorMode::Region => None,
            ColorMode::Hsv => {
                let args: Vec<f64> = resultants
                    .iter()
                    .map(|r| r.map_or(0.0, |c| c.arg()))
                    .collect();
                let norms: Vec<f64> = resultants
                    .iter()
                    .map(|r| r.map_or(0.0, |c| c.norm()))
                    .collect();
                let hue = normalize(&args, config.normalization);
                let value = normalize(&norms, config.normalization);
                Some(
                    hue.iter()
                        .zip(value.iter())
                        .map(|(&h, &v)| from_hsv(h, v))
                        .collect(),
                )
            }
        };

        let plot = Self {
            dataset,
            config,
            resultants,
            classes,
            region_colors,
            unmatched_color,
            row_colors,
        };
        log::debug!(
            "Resolved {} rows, {} excluded",
            plot.dataset.len(),
            plot.excluded_rows()
        );
        Ok(plot)
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// One entry per input row; `None` marks an excluded all-zero row.
    pub fn resultants(&self) -> &[Option<Complex64>] {
        &self.resultants
    }

    pub fn excluded_rows(&self) -> usize {
        self.resultants.iter().filter(|r| r.is_none()).count()
    }

    /// Display colour of a class in region colour mode.
    pub fn class_color(&self, class: Classification) -> Srgb<u8> {
        match class {
            Classification::Region(r) => self.region_colors[r.index()],
            Classification::Unmatched => self.unmatched_color,
        }
    }

    fn row_color(&self, row: usize, class: Classification) -> Srgb<u8> {
        match &self.row_colors {
            Some(colors) => colors[row],
            None => self.class_color(class),
        }
    }

    fn traces_for(&self, region: Region) -> (Vec<Trace>, PatternCounts) {
        let mut counts = PatternCounts::default();
        let mut traces: Vec<Trace> = self
            .resultants
            .iter()
            .zip(self.classes.iter())
            .enumerate()
            .filter_map(|(row, (resultant, &class))| {
                let r = (*resultant)?;
                if !class.belongs_to(region) {
                    return None;
                }
                counts.record(class);
                Some(Trace {
                    row,
                    angle: r.arg(),
                    magnitude: r.norm(),
                    class,
                    color: self.row_color(row, class),
                })
            })
            .collect();
        traces.sort_by_key(|t| t.class.z_order());
        (traces, counts)
    }

    fn radial_limit<'a>(&self, magnitudes: impl Iterator<Item = &'a Trace>) -> f64 {
        let max = magnitudes
            .map(|t| t.magnitude)
            .fold(self.config.scale_circle, f64::max);
        if max > 0.0 { max } else { 1.0 }
    }

    /// Assemble a region's subplot.
    pub fn subplot(&self, region: Region) -> Subplot {
        let (traces, counts) = self.traces_for(region);
        let r_max = if self.config.same_scale && !region.is_overview() {
            let (overview, _) = self.traces_for(Region::ABC);
            self.radial_limit(overview.iter())
        } else {
            self.radial_limit(traces.iter())
        };
        log::debug!("Subplot {region}: {} vectors, r_max {r_max:.3}", traces.len());
        Subplot {
            region,
            traces,
            counts,
            r_max,
        }
    }

    /// All seven subplots in drawing order.
    pub fn subplots(&self) -> Vec<Subplot> {
        Region::ALL.into_iter().map(|r| self.subplot(r)).collect()
    }

    pub fn summary(&self) -> DiagramSummary {
        let (_, counts) = self.traces_for(Region::ABC);
        DiagramSummary {
            rows: self.dataset.len(),
            plotted: counts.total(),
            excluded: self.excluded_rows(),
            regions: Region::ALL
                .into_iter()
                .map(|region| RegionCount {
                    region,
                    rows: counts.get(Classification::Region(region)),
                })
                .collect(),
            unmatched: counts.get(Classification::Unmatched),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot_of(rows: &[([f64; 3], [bool; 3])], config: PlotConfig) -> ModalityPlot {
        let data = rows.iter().map(|(d, _)| *d).collect();
        let bin = rows.iter().map(|(_, b)| *b).collect();
        ModalityPlot::new(ModalityDataset::new(data, bin).unwrap(), config).unwrap()
    }

    fn sample() -> ModalityPlot {
        plot_of(
            &[
                ([1.2, 0.1, 0.2], [true, false, false]),
                ([0.0, 0.0, 0.0], [true, false, false]),
                ([0.3, 0.5, 0.1], [false, true, false]),
                ([1.5, 0.5, 1.0], [true, true, true]),
                ([0.2, 0.1, 0.3], [false, false, false]),
                ([1.1, 0.2, 1.6], [true, false, true]),
            ],
            PlotConfig::default(),
        )
    }

    #[test]
    fn zero_row_keeps_position_but_is_not_plotted() {
        let plot = sample();
        assert_eq!(plot.resultants().len(), 6);
        assert!(plot.resultants()[1].is_none());
        for sub in plot.subplots() {
            assert!(sub.traces.iter().all(|t| t.row != 1));
        }
    }

    #[test]
    fn singleton_row_goes_to_its_region_and_overview() {
        let plot = sample();
        let a = plot.subplot(Region::A);
        assert_eq!(a.traces.iter().map(|t| t.row).collect::<Vec<_>>(), vec![0]);
        for region in [Region::B, Region::C, Region::AB, Region::AC, Region::BC] {
            assert!(plot.subplot(region).traces.iter().all(|t| t.row != 0));
        }
        assert!(plot.subplot(Region::ABC).traces.iter().any(|t| t.row == 0));
    }

    #[test]
    fn overview_is_sorted_by_z_order() {
        let plot = sample();
        let overview = plot.subplot(Region::ABC);
        assert_eq!(overview.traces.len(), 5);
        let z: Vec<i32> = overview.traces.iter().map(|t| t.class.z_order()).collect();
        let mut sorted = z.clone();
        sorted.sort();
        assert_eq!(z, sorted);
        let rows: Vec<usize> = overview.traces.iter().map(|t| t.row).collect();
        assert_eq!(rows, vec![0, 4, 2, 5, 3]);
    }

    #[test]
    fn unmatched_rows_default_to_region_a_color() {
        let plot = sample();
        let overview = plot.subplot(Region::ABC);
        let unmatched = overview
            .traces
            .iter()
            .find(|t| t.class == Classification::Unmatched)
            .unwrap();
        assert_eq!(unmatched.color, Srgb::new(44, 160, 44));
        assert_eq!(unmatched.color, plot.class_color(Classification::Region(Region::A)));
    }

    #[test]
    fn unmatched_color_can_be_set() {
        let plot = plot_of(
            &[
                ([1.0, 0.0, 0.0], [true, false, false]),
                ([0.2, 0.1, 0.3], [false, false, false]),
            ],
            PlotConfig {
                unmatched_color: Some("tab:gray".into()),
                ..Default::default()
            },
        );
        assert_eq!(
            plot.class_color(Classification::Unmatched),
            Srgb::new(0x7f, 0x7f, 0x7f)
        );
        let overview = plot.subplot(Region::ABC);
        assert_eq!(overview.traces[1].color, Srgb::new(0x7f, 0x7f, 0x7f));
    }

    #[test]
    fn traces_carry_region_colors() {
        let plot = sample();
        let ac = plot.subplot(Region::AC);
        assert_eq!(ac.traces.len(), 1);
        assert_eq!(ac.traces[0].color, parse_color("tab:olive").unwrap());
    }

    #[test]
    fn radial_limit_respects_scale_circle_and_same_scale() {
        let plot = sample();
        let b = plot.subplot(Region::B);
        assert_eq!(b.r_max, 1.0);

        let shared = plot_of(
            &[
                ([0.1, 0.0, 0.0], [true, false, false]),
                ([3.0, 0.0, 0.0], [true, true, true]),
            ],
            PlotConfig {
                same_scale: true,
                scale_circle: 0.0,
                ..Default::default()
            },
        );
        assert!((shared.subplot(Region::A).r_max - 3.0).abs() < 1e-9);
        assert!((shared.subplot(Region::ABC).r_max - 3.0).abs() < 1e-9);
    }

    #[test]
    fn summary_counts_every_plotted_row_once() {
        let summary = sample().summary();
        assert_eq!(summary.rows, 6);
        assert_eq!(summary.excluded, 1);
        assert_eq!(summary.plotted, 5);
        assert_eq!(summary.unmatched, 1);
        assert_eq!(summary.regions[Region::A.index()].rows, 1);
        assert_eq!(summary.regions[Region::BC.index()].rows, 0);
    }

    #[test]
    fn hsv_mode_assigns_per_row_colors() {
        let plot = plot_of(
            &[
                ([1.0, 0.0, 0.0], [true, false, false]),
                ([0.0, 1.0, 0.0], [true, false, false]),
            ],
            PlotConfig {
                color_mode: ColorMode::Hsv,
                ..Default::default()
            },
        );
        let a = plot.subplot(Region::A);
        assert_eq!(a.traces.len(), 2);
        assert_ne!(a.traces[0].color, a.traces[1].color);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let ds = ModalityDataset::new(vec![[1.0, 0.0, 0.0]], vec![[true, false, false]]).unwrap();
        let cfg = PlotConfig {
            unmatched_color: Some("nope".into()),
            ..Default::default()
        };
        assert_eq!(
            ModalityPlot::new(ds, cfg).unwrap_err(),
            ModalityError::UnknownColor("nope".into())
        );
    }
}
