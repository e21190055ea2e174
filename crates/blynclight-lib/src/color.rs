//! Colors — RGB triples, preset colors, and parsing for user input.

use std::fmt;

use serde::Serialize;

/// An RGB color. Channels are passed to the vendor layer unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Rgb { red, green, blue }
    }

    /// Build from a packed `0xRRGGBB` value (the top byte is ignored).
    pub const fn from_hex(value: u32) -> Self {
        Rgb {
            red: (value >> 16) as u8,
            green: (value >> 8) as u8,
            blue: value as u8,
        }
    }

    pub fn is_off(&self) -> bool {
        *self == Rgb::OFF
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_color(*self))
    }
}

/// The single-color convenience set offered by the framework SDK, expressed
/// as RGB presets over the generic light-on command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Preset {
    Red,
    Green,
    Blue,
    Cyan,
    Magenta,
    Yellow,
    White,
    Orange,
    Purple,
}

impl Preset {
    pub const ALL: [Preset; 9] = [
        Preset::Red,
        Preset::Green,
        Preset::Blue,
        Preset::Cyan,
        Preset::Magenta,
        Preset::Yellow,
        Preset::White,
        Preset::Orange,
        Preset::Purple,
    ];

    pub const fn rgb(self) -> Rgb {
        match self {
            Preset::Red => Rgb::new(255, 0, 0),
            Preset::Green => Rgb::new(0, 255, 0),
            Preset::Blue => Rgb::new(0, 0, 255),
            Preset::Cyan => Rgb::new(0, 255, 255),
            Preset::Magenta => Rgb::new(255, 0, 255),
            Preset::Yellow => Rgb::new(255, 255, 0),
            Preset::White => Rgb::new(255, 255, 255),
            Preset::Orange => Rgb::new(255, 127, 0),
            Preset::Purple => Rgb::new(148, 0, 211),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Red => "red",
            Preset::Green => "green",
            Preset::Blue => "blue",
            Preset::Cyan => "cyan",
            Preset::Magenta => "magenta",
            Preset::Yellow => "yellow",
            Preset::White => "white",
            Preset::Orange => "orange",
            Preset::Purple => "purple",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

impl From<Preset> for Rgb {
    fn from(preset: Preset) -> Self {
        preset.rgb()
    }
}

/// Parse a color string.
///
/// Accepts:
/// - Preset names: `"red"`, `"Orange"`, ... plus `"off"` / `"black"`
/// - Hex: `"#FF0000"`, `"FF0000"`, `"0xff0000"`
pub fn parse_color(s: &str) -> crate::error::Result<Rgb> {
    let s = s.trim();

    if let Some(preset) = Preset::from_name(s) {
        return Ok(preset.rgb());
    }
    if s.eq_ignore_ascii_case("off") || s.eq_ignore_ascii_case("black") {
        return Ok(Rgb::OFF);
    }

    let hex = s
        .strip_prefix('#')
        .or_else(|| s.strip_prefix("0x"))
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if hex.len() != 6 {
        return Err(crate::BlyncError::Color(format!(
            "Invalid color: {s} (use #RRGGBB or a color name)"
        )));
    }
    // from_str_radix alone would take a leading sign.
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(crate::BlyncError::Color(format!("Invalid hex color: {s}")));
    }
    let val = u32::from_str_radix(hex, 16)
        .map_err(|_| crate::BlyncError::Color(format!("Invalid hex color: {s}")))?;
    Ok(Rgb::from_hex(val))
}

/// Format a color as `#RRGGBB`.
pub fn format_color(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── presets ──

    #[test]
    fn preset_triples() {
        assert_eq!(Preset::Red.rgb(), Rgb::new(255, 0, 0));
        assert_eq!(Preset::Cyan.rgb(), Rgb::new(0, 255, 255));
        assert_eq!(Preset::Magenta.rgb(), Rgb::new(255, 0, 255));
        assert_eq!(Preset::Orange.rgb(), Rgb::new(255, 127, 0));
        assert_eq!(Preset::Purple.rgb(), Rgb::new(148, 0, 211));
    }

    #[test]
    fn preset_from_name_case_insensitive() {
        assert_eq!(Preset::from_name("YELLOW"), Some(Preset::Yellow));
        assert_eq!(Preset::from_name("White"), Some(Preset::White));
        assert_eq!(Preset::from_name("chartreuse"), None);
    }

    #[test]
    fn every_preset_name_resolves_to_itself() {
        for p in Preset::ALL {
            assert_eq!(Preset::from_name(p.name()), Some(p));
        }
    }

    // ── parse_color ──

    #[test]
    fn parse_named() {
        assert_eq!(parse_color("red").unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(parse_color("  Blue ").unwrap(), Rgb::new(0, 0, 255));
    }

    #[test]
    fn parse_off_and_black() {
        assert!(parse_color("off").unwrap().is_off());
        assert!(parse_color("BLACK").unwrap().is_off());
    }

    #[test]
    fn parse_hex_forms() {
        let expected = Rgb::new(0x12, 0x34, 0x56);
        assert_eq!(parse_color("#123456").unwrap(), expected);
        assert_eq!(parse_color("123456").unwrap(), expected);
        assert_eq!(parse_color("0x123456").unwrap(), expected);
        assert_eq!(parse_color("0X123456").unwrap(), expected);
    }

    #[test]
    fn parse_invalid_length() {
        assert!(parse_color("#FFF").is_err());
        assert!(parse_color("#FF000000").is_err());
    }

    #[test]
    fn parse_invalid_hex_chars() {
        let err = parse_color("#GGHHII").unwrap_err();
        assert_eq!(err.to_string(), "Color error: Invalid hex color: #GGHHII");
    }

    #[test]
    fn parse_rejects_signed_hex() {
        for input in ["+12345", "#+12345", "0X+ABCDE"] {
            let err = parse_color(input).unwrap_err();
            assert_eq!(err.to_string(), format!("Color error: Invalid hex color: {input}"));
        }
    }

    #[test]
    fn parse_unknown_name() {
        assert!(parse_color("chartreuse").is_err());
    }

    // ── format_color ──

    #[test]
    fn format_pads_channels() {
        assert_eq!(format_color(Rgb::new(1, 2, 3)), "#010203");
    }

    #[test]
    fn display_matches_format() {
        assert_eq!(Preset::Orange.rgb().to_string(), "#FF7F00");
    }

    #[test]
    fn from_hex_ignores_top_byte() {
        assert_eq!(Rgb::from_hex(0xAA11_2233), Rgb::new(0x11, 0x22, 0x33));
    }
}
