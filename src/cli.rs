use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::PlotConfig;
use crate::render::ImageFormat;

/// Image format of the saved figure.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Scalable vector graphics
    #[default]
    Svg,
    /// Raster image at the configured dpi
    Png,
}

impl From<FormatArg> for ImageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Svg => ImageFormat::Svg,
            FormatArg::Png => ImageFormat::Png,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Headless CSV: three measurement columns, then three flag columns
    #[arg(value_name = "CSV_PATH")]
    pub csv_path: PathBuf,

    /// Output path without extension (defaults to the CSV path minus its extension)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Image format of the saved figure
    #[arg(long, value_enum, default_value_t = FormatArg::Svg)]
    pub format: FormatArg,

    /// Leave the figure background transparent (SVG only)
    #[arg(long, default_value_t = false)]
    pub transparent: bool,

    /// Path to plot config TOML
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Figure title (overrides config)
    #[arg(long)]
    pub title: Option<String>,

    /// Draw every subplot with the overview's radial scale (overrides config)
    #[arg(long, default_value_t = false)]
    pub same_scale: bool,

    /// Overlay the layout grid (overrides config)
    #[arg(long, default_value_t = false)]
    pub debug_grid: bool,

    /// Write per-region row counts as JSON
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Open the interactive viewer after saving
    #[arg(long, default_value_t = false)]
    pub show: bool,
}

impl Args {
    /// Fold command-line overrides into a loaded config.
    pub fn apply(&self, config: &mut PlotConfig) {
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        if self.same_scale {
            config.same_scale = true;
        }
        if self.debug_grid {
            config.debug_grid = true;
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        self.format.into()
    }

    pub fn output_stem(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.csv_path.with_extension(""))
    }
}
