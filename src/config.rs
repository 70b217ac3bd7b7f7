use std::path::Path;

use anyhow::{Context, Result};
use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::color::parse_color;
use crate::diagram::region::Region;
use crate::error::ModalityError;

// ---------------------------------------------------------------------------
// Style enums
// ---------------------------------------------------------------------------

/// Marker drawn at the tip of every vector.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Marker {
    #[default]
    None,
    Circle,
    Point,
    Cross,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// How vector colours are chosen.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    /// One fixed colour per region.
    #[default]
    Region,
    /// Hue from the resultant angle, value from its magnitude.
    Hsv,
}

/// Mapping of angles/magnitudes into `[0, 1]` for [`ColorMode::Hsv`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Normalization {
    Linear,
    #[default]
    Sigmoid,
}

// ---------------------------------------------------------------------------
// Region colour table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegionColors {
    pub a: String,
    pub b: String,
    pub c: String,
    pub ab: String,
    pub ac: String,
    pub bc: String,
    pub abc: String,
}

impl Default for RegionColors {
    fn default() -> Self {
        Self {
            a: "tab:green".into(),
            b: "tab:blue".into(),
            c: "tab:red".into(),
            ab: "tab:cyan".into(),
            ac: "tab:olive".into(),
            bc: "tab:purple".into(),
            abc: "black".into(),
        }
    }
}

impl RegionColors {
    pub fn get(&self, region: Region) -> &str {
        match region {
            Region::A => &self.a,
            Region::B => &self.b,
            Region::C => &self.c,
            Region::AB => &self.ab,
            Region::AC => &self.ac,
            Region::BC => &self.bc,
            Region::ABC => &self.abc,
        }
    }

    /// Resolve every entry, in [`Region::ALL`] order.
    pub fn resolve(&self) -> Result<[Srgb<u8>; 7], ModalityError> {
        let mut out = [Srgb::new(0, 0, 0); 7];
        for region in Region::ALL {
            out[region.index()] = parse_color(self.get(region))?;
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// PlotConfig
// ---------------------------------------------------------------------------

/// Everything that shapes a modality diagram apart from its data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlotConfig {
    /// Axis names, shown as tick labels.
    pub modalities: [String; 3],
    /// Axis directions in degrees.
    pub angles: [f64; 3],
    pub labels: bool,
    /// Radius of the dotted reference circle; `0` disables it.
    pub scale_circle: f64,
    pub marker: Marker,
    pub line_style: LineStyle,
    /// Line width in points.
    pub line_width: f64,
    pub alpha: f64,
    /// Use the overview subplot's radial limit everywhere.
    pub same_scale: bool,
    /// Figure size in inches.
    pub fig_size: [f64; 2],
    pub dpi: u32,
    pub title: String,
    /// Colour for rows whose flags are all false (overview only).
    /// Unset, they take region A's colour.
    pub unmatched_color: Option<String>,
    pub color_mode: ColorMode,
    pub normalization: Normalization,
    /// Overlay the layout grid and frame outlines.
    pub debug_grid: bool,
    pub colors: RegionColors,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            modalities: ["A".into(), "B".into(), "C".into()],
            angles: [90.0, 210.0, 330.0],
            labels: true,
            scale_circle: 1.0,
            marker: Marker::None,
            line_style: LineStyle::Solid,
            line_width: 0.5,
            alpha: 0.8,
            same_scale: false,
            fig_size: [10.0, 10.0],
            dpi: 100,
            title: String::new(),
            unmatched_color: None,
            color_mode: ColorMode::Region,
            normalization: Normalization::Sigmoid,
            debug_grid: false,
            colors: RegionColors::default(),
        }
    }
}

impl PlotConfig {
    /// Read a TOML file. Keys that are absent keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: Self = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.validate()?;
        log::info!("Loaded plot config from {}", path.display());
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ModalityError> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(ModalityError::InvalidConfig(format!(
                "alpha must be within [0, 1], got {}",
                self.alpha
            )));
        }
        if self.fig_size.iter().any(|&s| !(s > 0.0)) {
            return Err(ModalityError::InvalidConfig(format!(
                "fig_size must be positive, got {:?}",
                self.fig_size
            )));
        }
        if self.dpi == 0 {
            return Err(ModalityError::InvalidConfig("dpi must be positive".into()));
        }
        if !(self.line_width > 0.0) {
            return Err(ModalityError::InvalidConfig(format!(
                "line_width must be positive, got {}",
                self.line_width
            )));
        }
        if self.scale_circle < 0.0 {
            return Err(ModalityError::InvalidConfig(format!(
                "scale_circle must not be negative, got {}",
                self.scale_circle
            )));
        }
        self.colors.resolve()?;
        if let Some(color) = &self.unmatched_color {
            parse_color(color)?;
        }
        Ok(())
    }

    /// Axis angles in radians.
    pub fn angles_rad(&self) -> [f64; 3] {
        self.angles.map(f64::to_radians)
    }

    /// Figure size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.fig_size[0] * self.dpi as f64).round() as u32,
            (self.fig_size[1] * self.dpi as f64).round() as u32,
        )
    }

    /// Line width converted from points to pixels, at least one pixel.
    pub fn line_width_px(&self) -> u32 {
        ((self.line_width * self.dpi as f64 / 72.0).round() as u32).max(1)
    }
}
