use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{bail, Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};

use crate::color::to_plotters;
use crate::config::{LineStyle, Marker, PlotConfig};
use crate::diagram::layout::{PolarFrame, GRID_SIZE};
use crate::diagram::plot::{ModalityPlot, Subplot};
use crate::diagram::region::Region;

/// Tick labels sit this far outside the frame, relative to its radius.
const LABEL_OFFSET: f64 = 0.09;
const SCALE_CIRCLE_SEGMENTS: usize = 100;
const FONT_FAMILY: &str = "sans-serif";

static FONT_REGISTERED: OnceLock<bool> = OnceLock::new();

/// Make the embedded font available to plotters under [`FONT_FAMILY`].
/// Must run before any `TextStyle` is built.
fn register_fonts() -> Result<()> {
    let ok = *FONT_REGISTERED.get_or_init(|| {
        register_font(
            FONT_FAMILY,
            FontStyle::Normal,
            epaint_default_fonts::UBUNTU_LIGHT,
        )
        .is_ok()
    });
    if !ok {
        bail!("embedded {FONT_FAMILY} font could not be loaded");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Output format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageFormat {
    #[default]
    Svg,
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }
}

/// `<stem>.<ext>`; the stem keeps any dots it already has.
pub fn output_path(stem: &Path, format: ImageFormat) -> PathBuf {
    let mut name = stem.as_os_str().to_owned();
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Render the diagram to `<stem>.<ext>` and return the written path.
pub fn save(
    plot: &ModalityPlot,
    stem: &Path,
    format: ImageFormat,
    transparent: bool,
) -> Result<PathBuf> {
    let path = output_path(stem, format);
    let size = plot.config().pixel_size();

    match format {
        ImageFormat::Svg => {
            let root = SVGBackend::new(&path, size).into_drawing_area();
            draw_figure(&root, plot, transparent)?;
            root.present()
                .with_context(|| format!("writing {}", path.display()))?;
        }
        ImageFormat::Png => {
            if transparent {
                log::warn!("PNG output has no alpha channel; drawing on white");
            }
            let root = BitMapBackend::new(&path, size).into_drawing_area();
            draw_figure(&root, plot, false)?;
            root.present()
                .with_context(|| format!("writing {}", path.display()))?;
        }
    }

    log::info!("Saved modality diagram to {}", path.display());
    Ok(path)
}

// ---------------------------------------------------------------------------
// Figure drawing
// ---------------------------------------------------------------------------

/// Draw the whole figure onto any plotters backend.
pub fn draw_figure<DB>(
    root: &DrawingArea<DB, Shift>,
    plot: &ModalityPlot,
    transparent: bool,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    register_fonts()?;
    let config = plot.config();
    let (w, h) = root.dim_in_pixel();
    let (w, h) = (w as f64, h as f64);

    if !transparent {
        root.fill(&WHITE)?;
    }

    for subplot in plot.subplots() {
        log::debug!(
            "Drawing {}: {} vectors",
            subplot.region,
            subplot.counts.total()
        );
        let frame = subplot.region.grid_span().frame(w, h);
        draw_subplot(root, &frame, &subplot, config)?;
    }

    if !config.title.is_empty() {
        let style = text_style(config, 14.0);
        root.draw(&Text::new(
            config.title.clone(),
            ((w / 2.0) as i32, (h / GRID_SIZE as f64 / 2.0) as i32),
            style,
        ))?;
    }

    if config.debug_grid {
        draw_debug_grid(root, w, h)?;
    }
    Ok(())
}

fn draw_subplot<DB>(
    root: &DrawingArea<DB, Shift>,
    frame: &PolarFrame,
    subplot: &Subplot,
    config: &PlotConfig,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let width = config.line_width_px();

    for trace in &subplot.traces {
        let tip = frame.project(trace.angle, trace.magnitude, subplot.r_max);
        let style = to_plotters(trace.color).mix(config.alpha).stroke_width(width);
        draw_styled_path(root, &[frame.center, tip], config.line_style, width, style)?;
        draw_marker(root, tip, config.marker, width, style)?;
    }

    if config.scale_circle > 0.0 {
        let circle = frame.circle(config.scale_circle, subplot.r_max, SCALE_CIRCLE_SEGMENTS);
        draw_styled_path(root, &circle, LineStyle::Dotted, 1, BLACK.stroke_width(1))?;
    }

    if config.labels {
        let mask = subplot.region.label_mask();
        for (i, angle) in config.angles_rad().into_iter().enumerate() {
            if !mask[i] {
                continue;
            }
            let (x, y) = frame.project(angle, 1.0 + LABEL_OFFSET, 1.0);
            root.draw(&Text::new(
                config.modalities[i].clone(),
                (x.round() as i32, y.round() as i32),
                text_style(config, 12.0),
            ))?;
        }
    }
    Ok(())
}

fn draw_styled_path<DB>(
    root: &DrawingArea<DB, Shift>,
    points: &[(f64, f64)],
    line_style: LineStyle,
    width: u32,
    style: ShapeStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let unit = width as f64;
    let pieces = match line_style {
        LineStyle::Solid => vec![points.to_vec()],
        LineStyle::Dashed => dash_polyline(points, 6.0 * unit, 4.0 * unit),
        LineStyle::Dotted => dash_polyline(points, 1.5 * unit, 2.5 * unit),
    };
    for piece in pieces {
        root.draw(&PathElement::new(to_pixels(&piece), style))?;
    }
    Ok(())
}

fn draw_marker<DB>(
    root: &DrawingArea<DB, Shift>,
    at: (f64, f64),
    marker: Marker,
    width: u32,
    style: ShapeStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let at = (at.0.round() as i32, at.1.round() as i32);
    let size = 2 * width + 1;
    match marker {
        Marker::None => {}
        Marker::Circle => root.draw(&Circle::new(at, size, style))?,
        Marker::Point => root.draw(&Circle::new(at, width, style.filled()))?,
        Marker::Cross => root.draw(&Cross::new(at, size, style))?,
    }
    Ok(())
}

fn draw_debug_grid<DB>(
    root: &DrawingArea<DB, Shift>,
    w: f64,
    h: f64,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let cw = w / GRID_SIZE as f64;
    let ch = h / GRID_SIZE as f64;
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let top_left = ((col as f64 * cw) as i32, (row as f64 * ch) as i32);
            let bottom_right = (((col + 1) as f64 * cw) as i32, ((row + 1) as f64 * ch) as i32);
            root.draw(&Rectangle::new([top_left, bottom_right], BLACK.stroke_width(1)))?;
        }
    }
    // polar spines
    for region in Region::ALL {
        let frame = region.grid_span().frame(w, h);
        let outline = frame.circle(1.0, 1.0, SCALE_CIRCLE_SEGMENTS);
        root.draw(&PathElement::new(to_pixels(&outline), BLACK.stroke_width(1)))?;
    }
    Ok(())
}

fn text_style(config: &PlotConfig, points: f64) -> TextStyle<'static> {
    let px = points * config.dpi as f64 / 72.0;
    TextStyle::from((FONT_FAMILY, px).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center))
}

fn to_pixels(points: &[(f64, f64)]) -> Vec<(i32, i32)> {
    points
        .iter()
        .map(|&(x, y)| (x.round() as i32, y.round() as i32))
        .collect()
}

/// Split a polyline into "on" pieces of length `on`, separated by gaps of `off`.
fn dash_polyline(points: &[(f64, f64)], on: f64, off: f64) -> Vec<Vec<(f64, f64)>> {
    let mut dashes = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    let mut drawing = true;
    let mut left = on;

    for pair in points.windows(2) {
        let (mut x0, mut y0) = pair[0];
        let (x1, y1) = pair[1];
        let mut seg = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
        if drawing && current.is_empty() {
            current.push((x0, y0));
        }
        while seg > left {
            let t = left / seg;
            let (xm, ym) = (x0 + (x1 - x0) * t, y0 + (y1 - y0) * t);
            current.push((xm, ym));
            if drawing {
                dashes.push(std::mem::take(&mut current));
            }
            drawing = !drawing;
            seg -= left;
            (x0, y0) = (xm, ym);
            left = if drawing { on } else { off };
        }
        left -= seg;
        if drawing {
            current.push((x1, y1));
        }
    }
    if current.len() > 1 {
        dashes.push(current);
    }
    dashes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ModalityDataset;

    fn plot(config: PlotConfig) -> ModalityPlot {
        let ds = ModalityDataset::new(
            vec![
                [1.2, 0.1, 0.2],
                [0.0, 0.0, 0.0],
                [0.3, 0.5, 0.1],
                [1.5, 0.5, 1.0],
            ],
            vec![
                [true, false, false],
                [false, true, false],
                [false, true, false],
                [true, true, true],
            ],
        )
        .unwrap();
        ModalityPlot::new(ds, config).unwrap()
    }

    fn quiet() -> PlotConfig {
        PlotConfig {
            labels: false,
            scale_circle: 0.0,
            ..Default::default()
        }
    }

    fn render_svg(plot: &ModalityPlot, transparent: bool) -> String {
        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, plot.config().pixel_size())
                .into_drawing_area();
            draw_figure(&root, plot, transparent).unwrap();
            root.present().unwrap();
        }
        buf
    }

    fn strokes(svg: &str) -> usize {
        svg.matches("<polyline").count() + svg.matches("<line").count()
    }

    #[test]
    fn one_stroke_per_plotted_vector() {
        let plot = plot(quiet());
        let expected: usize = Region::ALL
            .into_iter()
            .map(|r| plot.subplot(r).traces.len())
            .sum();
        // row 0 in A, row 2 in B, rows 0, 2, 3 in the overview
        assert_eq!(expected, 5);
        assert_eq!(strokes(&render_svg(&plot, false)), expected);
    }

    #[test]
    fn transparent_skips_background() {
        let plot = plot(quiet());
        assert!(render_svg(&plot, false).contains("<rect"));
        assert!(!render_svg(&plot, true).contains("<rect"));
    }

    #[test]
    fn scale_circle_adds_dotted_strokes() {
        let with_circle = plot(PlotConfig {
            scale_circle: 0.3,
            ..quiet()
        });
        assert!(strokes(&render_svg(&with_circle, false)) > 5 + 7);
    }

    #[test]
    fn debug_grid_draws_every_cell() {
        let plot = plot(PlotConfig {
            debug_grid: true,
            ..quiet()
        });
        let svg = render_svg(&plot, true);
        assert_eq!(svg.matches("<rect").count(), (GRID_SIZE * GRID_SIZE) as usize);
    }

    #[test]
    fn writes_svg_file_with_appended_extension() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("modality_data");
        let path = save(&plot(quiet()), &stem, ImageFormat::Svg, true).unwrap();
        assert_eq!(path, dir.path().join("modality_data.svg"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("<svg"));
    }

    fn labelled() -> PlotConfig {
        PlotConfig {
            modalities: ["Set 1".into(), "Set 2".into(), "Set 3".into()],
            labels: true,
            scale_circle: 0.0,
            title: "Modality Diagram Example".into(),
            ..Default::default()
        }
    }

    fn text_items(svg: &str, content: &str) -> usize {
        svg.matches(&format!(">\n{content}\n</text>")).count()
    }

    #[test]
    fn labels_and_title_are_written_as_text() {
        let svg = render_svg(&plot(labelled()), false);
        // three singletons with one label, three pairs with two, overview none
        assert_eq!(svg.matches("<text").count(), 3 + 3 * 2 + 1);
        assert_eq!(text_items(&svg, "Modality Diagram Example"), 1);
        for name in ["Set 1", "Set 2", "Set 3"] {
            assert_eq!(text_items(&svg, name), 3, "{name}");
        }
    }

    #[test]
    fn each_subplot_labels_only_its_own_axes() {
        register_fonts().unwrap();
        let plot = plot(labelled());
        let config = plot.config();
        for region in Region::ALL {
            let mut buf = String::new();
            {
                let root =
                    SVGBackend::with_string(&mut buf, config.pixel_size()).into_drawing_area();
                let (w, h) = root.dim_in_pixel();
                let frame = region.grid_span().frame(w as f64, h as f64);
                draw_subplot(&root, &frame, &plot.subplot(region), config).unwrap();
                root.present().unwrap();
            }
            let mask = region.label_mask();
            for (i, name) in config.modalities.iter().enumerate() {
                let expected = usize::from(mask[i]);
                assert_eq!(text_items(&buf, name), expected, "{region} / {name}");
            }
        }
    }

    #[test]
    fn writes_png_with_labels_and_title() {
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("modality_data");
        let config = PlotConfig {
            fig_size: [4.0, 4.0],
            dpi: 50,
            title: "Modality Diagram Example".into(),
            ..Default::default()
        };
        assert!(config.labels);
        let path = save(&plot(config), &stem, ImageFormat::Png, false).unwrap();
        assert_eq!(path, dir.path().join("modality_data.png"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn output_path_keeps_existing_dots() {
        assert_eq!(
            output_path(Path::new("out/data.v2"), ImageFormat::Png),
            PathBuf::from("out/data.v2.png")
        );
    }

    #[test]
    fn dashes_alternate_along_a_line() {
        let dashes = dash_polyline(&[(0.0, 0.0), (10.0, 0.0)], 2.0, 3.0);
        assert_eq!(dashes.len(), 2);
        assert_eq!(dashes[0], vec![(0.0, 0.0), (2.0, 0.0)]);
        assert_eq!(dashes[1], vec![(5.0, 0.0), (7.0, 0.0)]);
    }

    #[test]
    fn dashes_continue_across_vertices() {
        let dashes = dash_polyline(&[(0.0, 0.0), (1.0, 0.0), (1.0, 3.0)], 2.0, 10.0);
        assert_eq!(dashes.len(), 1);
        assert_eq!(dashes[0], vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    }
}
