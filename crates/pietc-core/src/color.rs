//! The Piet color palette.
//!
//! Six hues at three lightness levels, plus white, black, and a catch-all
//! `Undefined` for anything outside the palette. Hue and lightness indices
//! drive the command table in [`crate::command`].

use serde::{Deserialize, Serialize};

/// One codel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    LightRed,
    LightYellow,
    LightGreen,
    LightCyan,
    LightBlue,
    LightMagenta,
    Red,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
    DarkRed,
    DarkYellow,
    DarkGreen,
    DarkCyan,
    DarkBlue,
    DarkMagenta,
    White,
    Black,
    Undefined,
}

impl Color {
    /// Classify a six-digit hex code (case-insensitive). Codes outside the
    /// 20-color palette map to `Undefined`.
    pub fn from_hex(hex: &str) -> Color {
        match hex.to_ascii_uppercase().as_str() {
            "FFC0C0" => Color::LightRed,
            "FFFFC0" => Color::LightYellow,
            "C0FFC0" => Color::LightGreen,
            "C0FFFF" => Color::LightCyan,
            "C0C0FF" => Color::LightBlue,
            "FFC0FF" => Color::LightMagenta,
            "FF0000" => Color::Red,
            "FFFF00" => Color::Yellow,
            "00FF00" => Color::Green,
            "00FFFF" => Color::Cyan,
            "0000FF" => Color::Blue,
            "FF00FF" => Color::Magenta,
            "C00000" => Color::DarkRed,
            "C0C000" => Color::DarkYellow,
            "00C000" => Color::DarkGreen,
            "00C0C0" => Color::DarkCyan,
            "0000C0" => Color::DarkBlue,
            "C000C0" => Color::DarkMagenta,
            "FFFFFF" => Color::White,
            "000000" => Color::Black,
            _ => Color::Undefined,
        }
    }

    /// Classify an RGB triple by exact palette lookup.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Color {
        Color::from_hex(&rgb_to_hex(r, g, b))
    }

    /// Hue index 0..5 (Red, Yellow, Green, Cyan, Blue, Magenta), or `None`
    /// for white, black, and undefined.
    pub fn hue(self) -> Option<u8> {
        match self {
            Color::LightRed | Color::Red | Color::DarkRed => Some(0),
            Color::LightYellow | Color::Yellow | Color::DarkYellow => Some(1),
            Color::LightGreen | Color::Green | Color::DarkGreen => Some(2),
            Color::LightCyan | Color::Cyan | Color::DarkCyan => Some(3),
            Color::LightBlue | Color::Blue | Color::DarkBlue => Some(4),
            Color::LightMagenta | Color::Magenta | Color::DarkMagenta => Some(5),
            Color::White | Color::Black | Color::Undefined => None,
        }
    }

    /// Lightness index 0..2 (light, normal, dark), or `None` for white,
    /// black, and undefined.
    pub fn lightness(self) -> Option<u8> {
        match self {
            Color::LightRed
            | Color::LightYellow
            | Color::LightGreen
            | Color::LightCyan
            | Color::LightBlue
            | Color::LightMagenta => Some(0),
            Color::Red
            | Color::Yellow
            | Color::Green
            | Color::Cyan
            | Color::Blue
            | Color::Magenta => Some(1),
            Color::DarkRed
            | Color::DarkYellow
            | Color::DarkGreen
            | Color::DarkCyan
            | Color::DarkBlue
            | Color::DarkMagenta => Some(2),
            Color::White | Color::Black | Color::Undefined => None,
        }
    }
}

/// Format an RGB triple as an uppercase six-digit hex code, e.g. `FFC0C0`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("{r:02X}{g:02X}{b:02X}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_lookup_is_case_insensitive() {
        assert_eq!(Color::from_hex("FFC0C0"), Color::LightRed);
        assert_eq!(Color::from_hex("ffc0c0"), Color::LightRed);
        assert_eq!(Color::from_hex("c000c0"), Color::DarkMagenta);
    }

    #[test]
    fn unknown_hex_is_undefined() {
        assert_eq!(Color::from_hex("123456"), Color::Undefined);
        assert_eq!(Color::from_hex(""), Color::Undefined);
        assert_eq!(Color::from_hex("FF0000FF"), Color::Undefined);
    }

    #[test]
    fn white_and_black() {
        assert_eq!(Color::from_hex("FFFFFF"), Color::White);
        assert_eq!(Color::from_hex("000000"), Color::Black);
        assert_eq!(Color::White.hue(), None);
        assert_eq!(Color::Black.lightness(), None);
    }

    #[test]
    fn rgb_round_trip_matches_palette_classification() {
        let cases = [
            ((0xFF, 0xC0, 0xC0), Color::LightRed),
            ((0xFF, 0x00, 0x00), Color::Red),
            ((0xC0, 0x00, 0x00), Color::DarkRed),
            ((0x00, 0xC0, 0xC0), Color::DarkCyan),
            ((0xFF, 0xFF, 0xFF), Color::White),
            ((0x00, 0x00, 0x00), Color::Black),
            ((0x12, 0x34, 0x56), Color::Undefined),
        ];
        for ((r, g, b), expected) in cases {
            assert_eq!(Color::from_hex(&rgb_to_hex(r, g, b)), expected);
            assert_eq!(Color::from_rgb(r, g, b), expected);
        }
    }

    #[test]
    fn hue_and_lightness_coordinates() {
        assert_eq!(Color::LightRed.hue(), Some(0));
        assert_eq!(Color::LightRed.lightness(), Some(0));
        assert_eq!(Color::Magenta.hue(), Some(5));
        assert_eq!(Color::Magenta.lightness(), Some(1));
        assert_eq!(Color::DarkBlue.hue(), Some(4));
        assert_eq!(Color::DarkBlue.lightness(), Some(2));
        assert_eq!(Color::Undefined.hue(), None);
    }
}
