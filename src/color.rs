use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsv, IntoColor, Srgb};
use plotters::style::RGBColor;

use crate::error::ModalityError;

// ---------------------------------------------------------------------------
// Named colours
// ---------------------------------------------------------------------------

/// The ten-colour "tab:" palette, addressable as `tab:<name>`.
const TABLEAU: [(&str, (u8, u8, u8)); 10] = [
    ("blue", (0x1f, 0x77, 0xb4)),
    ("orange", (0xff, 0x7f, 0x0e)),
    ("green", (0x2c, 0xa0, 0x2c)),
    ("red", (0xd6, 0x27, 0x28)),
    ("purple", (0x94, 0x67, 0xbd)),
    ("brown", (0x8c, 0x56, 0x4b)),
    ("pink", (0xe3, 0x77, 0xc2)),
    ("gray", (0x7f, 0x7f, 0x7f)),
    ("olive", (0xbc, 0xbd, 0x22)),
    ("cyan", (0x17, 0xbe, 0xcf)),
];

/// Resolve a colour name to sRGB.
///
/// Accepted forms:
/// * `tab:green`, `tab:grey` – tableau palette
/// * `#2ca02c` – hex
/// * `navy`, `darkorange`, ... – CSS colour keywords
pub fn parse_color(name: &str) -> Result<Srgb<u8>, ModalityError> {
    let key = name.trim().to_ascii_lowercase();

    if let Some(tab) = key.strip_prefix("tab:") {
        let tab = if tab == "grey" { "gray" } else { tab };
        return TABLEAU
            .iter()
            .find(|(n, _)| *n == tab)
            .map(|(_, (r, g, b))| Srgb::new(*r, *g, *b))
            .ok_or_else(|| ModalityError::UnknownColor(name.to_string()));
    }

    if key.starts_with('#') {
        return Srgb::<u8>::from_str(&key)
            .map_err(|_| ModalityError::UnknownColor(name.to_string()));
    }

    palette::named::from_str(&key).ok_or_else(|| ModalityError::UnknownColor(name.to_string()))
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Colour from hue/value in `[0, 1]` at full saturation.
pub fn from_hsv(hue: f64, value: f64) -> Srgb<u8> {
    let hsv: Hsv = Hsv::new(
        (hue.clamp(0.0, 1.0) * 360.0) as f32,
        1.0,
        value.clamp(0.0, 1.0) as f32,
    );
    let rgb: Srgb = hsv.into_color();
    rgb.into_format()
}

pub fn to_plotters(color: Srgb<u8>) -> RGBColor {
    RGBColor(color.red, color.green, color.blue)
}

pub fn to_egui(color: Srgb<u8>, alpha: f64) -> Color32 {
    Color32::from_rgba_unmultiplied(
        color.red,
        color.green,
        color.blue,
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}
