use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Text used for [`Color::Transparent`] in saved drawings.
pub const TRANSPARENT_TEXT: &str = "transparent";

/// The color of a single cell.
///
/// `Transparent` means "no contribution from this layer at this cell" and is distinct from every
/// concrete color, including an `Rgba` value whose alpha happens to be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Transparent,
    Rgba([u8; 4]),
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0xFF, 0x00);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xFF);
    pub const YELLOW: Color = Color::rgb(0xFF, 0xFF, 0x00);
    pub const CYAN: Color = Color::rgb(0x00, 0xFF, 0xFF);
    pub const MAGENTA: Color = Color::rgb(0xFF, 0x00, 0xFF);
    pub const GRAY: Color = Color::rgb(0x80, 0x80, 0x80);
    pub const SILVER: Color = Color::rgb(0xC0, 0xC0, 0xC0);

    /// Creates an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgba([r, g, b, 0xFF])
    }

    /// Creates a color with an explicit alpha channel
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::Rgba([r, g, b, a])
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, Self::Transparent)
    }

    /// Returns the channels, or `None` for the transparent sentinel
    pub fn to_array(self) -> Option<[u8; 4]> {
        match self {
            Self::Transparent => None,
            Self::Rgba(rgba) => Some(rgba),
        }
    }

    /// Parses `#RGB`, `#RRGGBB`, `#RRGGBBAA` or the `transparent` sentinel.
    pub fn parse(text: &str) -> Result<Self, ParseColorError> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case(TRANSPARENT_TEXT) {
            return Ok(Self::Transparent);
        }

        let hex = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ParseColorError(text.to_owned()))?;
        if !hex.is_ascii() {
            return Err(ParseColorError(text.to_owned()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ParseColorError(text.to_owned()))
        };

        match hex.len() {
            3 => {
                // #RGB expands each digit, so "F80" becomes "FF8800"
                let mut rgb = [0u8; 3];
                for (i, value) in rgb.iter_mut().enumerate() {
                    *value = channel(i..i + 1)? * 0x11;
                }
                Ok(Self::rgb(rgb[0], rgb[1], rgb[2]))
            }
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(ParseColorError(text.to_owned())),
        }
    }
}

/// The quick-pick palette offered next to the color picker.
pub const DEFAULT_PALETTE: [Color; 10] = [
    Color::BLACK,
    Color::WHITE,
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::CYAN,
    Color::MAGENTA,
    Color::GRAY,
    Color::SILVER,
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}, expected #RRGGBB, #RRGGBBAA or \"transparent\"")]
pub struct ParseColorError(String);

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transparent => f.write_str(TRANSPARENT_TEXT),
            Self::Rgba([r, g, b, 0xFF]) => write!(f, "#{r:02X}{g:02X}{b:02X}"),
            Self::Rgba([r, g, b, a]) => write!(f, "#{r:02X}{g:02X}{b:02X}{a:02X}"),
        }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
