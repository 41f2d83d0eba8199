//! Named color scales used by the chart specs.
//!
//! Stops follow the plotly / ColorBrewer definitions of the same name.

use crate::error::DashError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
        Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
    }
}

/// ColorBrewer "Set1", used for per-country colors.
pub const SET1: [Rgb; 9] = [
    Rgb::new(228, 26, 28),   // #e41a1c
    Rgb::new(55, 126, 184),  // #377eb8
    Rgb::new(77, 175, 74),   // #4daf4a
    Rgb::new(152, 78, 163),  // #984ea3
    Rgb::new(255, 127, 0),   // #ff7f00
    Rgb::new(255, 255, 51),  // #ffff33
    Rgb::new(166, 86, 40),   // #a65628
    Rgb::new(247, 129, 191), // #f781bf
    Rgb::new(153, 153, 153), // #999999
];

const SUNSETDARK: [Rgb; 7] = [
    Rgb::new(252, 222, 156),
    Rgb::new(250, 164, 118),
    Rgb::new(240, 116, 110),
    Rgb::new(227, 79, 111),
    Rgb::new(220, 57, 119),
    Rgb::new(185, 37, 122),
    Rgb::new(124, 29, 111),
];

const VIRIDIS: [Rgb; 10] = [
    Rgb::new(68, 1, 84),
    Rgb::new(72, 40, 120),
    Rgb::new(62, 73, 137),
    Rgb::new(49, 104, 142),
    Rgb::new(38, 130, 142),
    Rgb::new(31, 158, 137),
    Rgb::new(53, 183, 121),
    Rgb::new(110, 206, 88),
    Rgb::new(181, 222, 43),
    Rgb::new(253, 231, 37),
];

const BLUES: [Rgb; 9] = [
    Rgb::new(247, 251, 255),
    Rgb::new(222, 235, 247),
    Rgb::new(198, 219, 239),
    Rgb::new(158, 202, 225),
    Rgb::new(107, 174, 214),
    Rgb::new(66, 146, 198),
    Rgb::new(33, 113, 181),
    Rgb::new(8, 81, 156),
    Rgb::new(8, 48, 107),
];

const REDS: [Rgb; 9] = [
    Rgb::new(255, 245, 240),
    Rgb::new(254, 224, 210),
    Rgb::new(252, 187, 161),
    Rgb::new(252, 146, 114),
    Rgb::new(251, 106, 74),
    Rgb::new(239, 59, 44),
    Rgb::new(203, 24, 29),
    Rgb::new(165, 15, 21),
    Rgb::new(103, 0, 13),
];

/// Sequential scales for continuous encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorScale {
    #[default]
    Sunsetdark,
    Viridis,
    Blues,
    Reds,
}

impl ColorScale {
    pub const ALL: [ColorScale; 4] = [
        ColorScale::Sunsetdark,
        ColorScale::Viridis,
        ColorScale::Blues,
        ColorScale::Reds,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColorScale::Sunsetdark => "Sunsetdark",
            ColorScale::Viridis => "Viridis",
            ColorScale::Blues => "Blues",
            ColorScale::Reds => "Reds",
        }
    }

    pub fn stops(&self) -> &'static [Rgb] {
        match self {
            ColorScale::Sunsetdark => &SUNSETDARK,
            ColorScale::Viridis => &VIRIDIS,
            ColorScale::Blues => &BLUES,
            ColorScale::Reds => &REDS,
        }
    }

    /// Color at position `t` in `[0, 1]`; out-of-range and NaN inputs are clamped.
    pub fn at(&self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (stops.len() - 1) as f64;
        let i = (pos.floor() as usize).min(stops.len() - 2);
        Rgb::lerp(stops[i], stops[i + 1], pos - i as f64)
    }

    /// Color of `value` on the domain `[lo, hi]`. A degenerate domain maps to the top stop.
    pub fn for_value(&self, value: f64, lo: f64, hi: f64) -> Rgb {
        if hi - lo <= f64::EPSILON {
            return self.at(1.0);
        }
        self.at((value - lo) / (hi - lo))
    }
}

impl fmt::Display for ColorScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorScale {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorScale::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DashError::UnknownColorScale(s.to_string()))
    }
}

/// Qualitative color for the `idx`-th category.
pub fn set1(idx: usize) -> Rgb {
    SET1[idx % SET1.len()]
}
