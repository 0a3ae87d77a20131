use egui::Color32;
use image::Rgba;
use thiserror::Error;

/// Errors produced while parsing a color specification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color specification")]
    Empty,

    #[error("invalid hex digits in color: {0}")]
    InvalidHex(String),

    #[error("hex color must have 6 or 8 digits, got {0}")]
    InvalidLength(usize),

    #[error("unknown color name: {0}")]
    UnknownName(String),
}

/// Named colors accepted by [`parse_color`], stored as 0xAARRGGBB.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0xFF00_0000),
    ("darkgray", 0xFF44_4444),
    ("gray", 0xFF88_8888),
    ("lightgray", 0xFFCC_CCCC),
    ("white", 0xFFFF_FFFF),
    ("red", 0xFFFF_0000),
    ("green", 0xFF00_FF00),
    ("blue", 0xFF00_00FF),
    ("yellow", 0xFFFF_FF00),
    ("cyan", 0xFF00_FFFF),
    ("magenta", 0xFFFF_00FF),
    ("aqua", 0xFF00_FFFF),
    ("fuchsia", 0xFFFF_00FF),
    ("darkgrey", 0xFF44_4444),
    ("grey", 0xFF88_8888),
    ("lightgrey", 0xFFCC_CCCC),
    ("lime", 0xFF00_FF00),
    ("maroon", 0xFF80_0000),
    ("navy", 0xFF00_0080),
    ("olive", 0xFF80_8000),
    ("purple", 0xFF80_0080),
    ("silver", 0xFFC0_C0C0),
    ("teal", 0xFF00_8080),
];

/// Parse a color specification into a packed, unmultiplied RGBA color.
///
/// Accepts `#RRGGBB`, `#AARRGGBB` (alpha first) and a fixed set of
/// case-insensitive color names such as `red` or `lightgray`.
pub fn parse_color(spec: &str) -> Result<Rgba<u8>, ColorParseError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(ColorParseError::Empty);
    }

    if let Some(hex) = spec.strip_prefix('#') {
        return parse_hex(hex);
    }

    let name = spec.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, argb)| from_argb(*argb))
        .ok_or_else(|| ColorParseError::UnknownName(spec.to_owned()))
}

fn parse_hex(hex: &str) -> Result<Rgba<u8>, ColorParseError> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidHex(hex.to_owned()));
    }

    let opaque = match hex.len() {
        6 => true,
        8 => false,
        len => return Err(ColorParseError::InvalidLength(len)),
    };

    let value = u32::from_str_radix(hex, 16).map_err(|_| ColorParseError::InvalidHex(hex.to_owned()))?;
    if opaque {
        Ok(from_argb(0xFF00_0000 | value))
    } else {
        Ok(from_argb(value))
    }
}

fn from_argb(argb: u32) -> Rgba<u8> {
    let [a, r, g, b] = argb.to_be_bytes();
    Rgba([r, g, b, a])
}

/// Convert for egui widgets, which store premultiplied alpha
pub fn to_color32(color: Rgba<u8>) -> Color32 {
    let [r, g, b, a] = color.0;
    Color32::from_rgba_unmultiplied(r, g, b, a)
}
