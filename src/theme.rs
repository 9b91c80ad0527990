//! Divider colours.
//!
//! The engine does not paint anything, but it tells the host which colours
//! each divider should use.  Colours come from a
//! [`ThemeProvider`](crate::traits::ThemeProvider) when the host supplies
//! one and fall back to the defaults below otherwise.

use crate::traits::ThemeProvider;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An RGBA colour, written as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Parse `#rrggbb` / `#rrggbbaa` (the `#` is optional).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a: if hex.len() == 8 { byte(6)? } else { 0xff },
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::parse_hex(&s).ok_or_else(|| DeError::custom(format!("invalid colour: {:?}", s)))
    }
}

/// Divider colour when no theme provides one.
pub const DEFAULT_DIVIDER_COLOR: Color = Color::rgb(0x3c, 0x3c, 0x46);
/// Divider hover colour when no theme provides one.
pub const DEFAULT_DIVIDER_HOVER_COLOR: Color = Color::rgb(0x50, 0x64, 0x8c);

/// Colours attached to every divider the engine reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DividerStyle {
    pub color: Color,
    pub hover_color: Color,
}

impl Default for DividerStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_DIVIDER_COLOR,
            hover_color: DEFAULT_DIVIDER_HOVER_COLOR,
        }
    }
}

impl DividerStyle {
    /// Resolve against an optional theme, falling back per colour.
    pub fn from_theme(theme: Option<&dyn ThemeProvider>) -> Self {
        let fallback = Self::default();
        match theme {
            Some(t) => Self {
                color: t.border_color().unwrap_or(fallback.color),
                hover_color: t.hover_color().unwrap_or(fallback.hover_color),
            },
            None => fallback,
        }
    }
}

/// Theme section of the configuration file.  Both colours are optional.
///
/// ```json
/// { "divider_color": "#202020", "divider_hover_color": "#4080ff" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub divider_color: Option<Color>,
    pub divider_hover_color: Option<Color>,
}

/// A [`ThemeProvider`] with fixed colours, usually built from
/// [`ThemeConfig`].
#[derive(Debug, Clone, Default)]
pub struct StaticTheme {
    border: Option<Color>,
    hover: Option<Color>,
}

impl StaticTheme {
    pub fn new(border: Option<Color>, hover: Option<Color>) -> Self {
        Self { border, hover }
    }
}

impl From<&ThemeConfig> for StaticTheme {
    fn from(config: &ThemeConfig) -> Self {
        Self::new(config.divider_color, config.divider_hover_color)
    }
}

impl ThemeProvider for StaticTheme {
    fn border_color(&self) -> Option<Color> {
        self.border
    }

    fn hover_color(&self) -> Option<Color> {
        self.hover
    }
}
