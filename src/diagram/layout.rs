use super::region::Region;

/// The figure is divided into a square grid of cells.
pub const GRID_SIZE: u32 = 20;

/// Fraction of a frame's half-extent left free for tick labels.
const LABEL_MARGIN: f64 = 0.12;

// ---------------------------------------------------------------------------
// Grid placement
// ---------------------------------------------------------------------------

/// A half-open rectangle of grid cells: `rows.0..rows.1` × `cols.0..cols.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpan {
    pub rows: (u32, u32),
    pub cols: (u32, u32),
}

impl Region {
    /// Placement of this region's subplot; the overlaps between spans mirror
    /// the set overlaps.
    pub fn grid_span(self) -> GridSpan {
        let (rows, cols) = match self {
            Region::A => ((1, 11), (5, 15)),
            Region::B => ((7, 17), (1, 11)),
            Region::C => ((7, 17), (9, 19)),
            Region::AB => ((4, 14), (3, 13)),
            Region::AC => ((4, 14), (7, 17)),
            Region::BC => ((7, 17), (5, 15)),
            Region::ABC => ((5, 15), (5, 15)),
        };
        GridSpan { rows, cols }
    }
}

impl GridSpan {
    /// Pixel rectangle `(left, top, right, bottom)` for a figure of the given size.
    pub fn pixel_rect(&self, width: f64, height: f64) -> (f64, f64, f64, f64) {
        let cw = width / GRID_SIZE as f64;
        let ch = height / GRID_SIZE as f64;
        (
            self.cols.0 as f64 * cw,
            self.rows.0 as f64 * ch,
            self.cols.1 as f64 * cw,
            self.rows.1 as f64 * ch,
        )
    }

    /// The polar frame inscribed in this span.
    pub fn frame(&self, width: f64, height: f64) -> PolarFrame {
        let (l, t, r, b) = self.pixel_rect(width, height);
        let half = (r - l).min(b - t) / 2.0;
        PolarFrame {
            center: ((l + r) / 2.0, (t + b) / 2.0),
            radius: half * (1.0 - LABEL_MARGIN),
        }
    }
}

// ---------------------------------------------------------------------------
// PolarFrame – pixel geometry of one polar subplot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarFrame {
    pub center: (f64, f64),
    pub radius: f64,
}

impl PolarFrame {
    /// Project `(angle, r)` to pixels, with `r_max` landing on the frame edge.
    ///
    /// Angle 0 points right and angles grow counter-clockwise; the pixel
    /// y axis grows downwards.
    pub fn project(&self, angle: f64, r: f64, r_max: f64) -> (f64, f64) {
        let scaled = if r_max > 0.0 { r / r_max * self.radius } else { 0.0 };
        (
            self.center.0 + scaled * angle.cos(),
            self.center.1 - scaled * angle.sin(),
        )
    }

    /// Closed polyline approximating a circle of radius `r`.
    pub fn circle(&self, r: f64, r_max: f64, segments: usize) -> Vec<(f64, f64)> {
        (0..=segments)
            .map(|i| {
                let theta = i as f64 / segments as f64 * std::f64::consts::TAU;
                self.project(theta, r, r_max)
            })
            .collect()
    }
}
