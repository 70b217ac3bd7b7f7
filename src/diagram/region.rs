use std::fmt;

use serde::Serialize;

use crate::data::model::BinarizationFlags;

// ---------------------------------------------------------------------------
// Region – one displayed subset of {A, B, C}
// ---------------------------------------------------------------------------

/// The seven non-empty modality subsets, in classification order.
///
/// The discriminant is the classification index, which doubles as z-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    A = 0,
    B = 1,
    C = 2,
    AB = 3,
    AC = 4,
    BC = 5,
    ABC = 6,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::A,
        Region::B,
        Region::C,
        Region::AB,
        Region::AC,
        Region::BC,
        Region::ABC,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn pattern(self) -> BinarizationFlags {
        match self {
            Region::A => [true, false, false],
            Region::B => [false, true, false],
            Region::C => [false, false, true],
            Region::AB => [true, true, false],
            Region::AC => [true, false, true],
            Region::BC => [false, true, true],
            Region::ABC => [true, true, true],
        }
    }

    /// Exact match of a binarization triple against the seven patterns.
    pub fn from_flags(flags: &BinarizationFlags) -> Option<Region> {
        Region::ALL.into_iter().find(|r| r.pattern() == *flags)
    }

    /// Which axes carry a tick label in this region's subplot.
    ///
    /// Member axes are labelled; the overview carries none.
    pub fn label_mask(self) -> [bool; 3] {
        match self {
            Region::ABC => [false; 3],
            other => other.pattern(),
        }
    }

    /// The overview subplot receives every plotted row.
    pub fn is_overview(self) -> bool {
        self == Region::ABC
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::A => "A",
            Region::B => "B",
            Region::C => "C",
            Region::AB => "A∩B",
            Region::AC => "A∩C",
            Region::BC => "B∩C",
            Region::ABC => "A∩B∩C",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Classification – one of the eight patterns
// ---------------------------------------------------------------------------

/// Where a row's flags place it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Region(Region),
    /// All flags false: drawn in the overview only.
    Unmatched,
}

impl Classification {
    pub fn of(flags: &BinarizationFlags) -> Self {
        Region::from_flags(flags).map_or(Classification::Unmatched, Classification::Region)
    }

    /// Slot in a [`PatternCounts`] table.
    pub fn slot(self) -> usize {
        match self {
            Classification::Region(r) => r.index(),
            Classification::Unmatched => 7,
        }
    }

    /// Drawing order. Unmatched rows share region A's level.
    pub fn z_order(self) -> i32 {
        match self {
            Classification::Region(r) => r.index() as i32,
            Classification::Unmatched => 0,
        }
    }

    /// Whether a row of this class is drawn in `subplot`.
    pub fn belongs_to(self, subplot: Region) -> bool {
        subplot.is_overview() || self == Classification::Region(subplot)
    }
}

// ---------------------------------------------------------------------------
// PatternCounts
// ---------------------------------------------------------------------------

/// Row counts per pattern: seven regions plus the unmatched pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PatternCounts([usize; 8]);

impl PatternCounts {
    pub fn record(&mut self, class: Classification) {
        self.0[class.slot()] += 1;
    }

    pub fn get(&self, class: Classification) -> usize {
        self.0[class.slot()]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}
