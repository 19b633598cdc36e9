//! Colors for plot foreground/background
//!
//! Colors are written the way CSS writes them (`#FF00FF`, optionally with an
//! alpha byte `#FF00FF80`) and serialize back to that form, so a config file
//! stays readable.

use crate::error::{DebugGraphError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);
    pub const TRANSPARENT: Rgba = Rgba([0, 0, 0, 0]);

    /// Opaque color from RGB components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba([r, g, b, 255])
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }

    pub fn a(&self) -> u8 {
        self.0[3]
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional)
    pub fn parse(input: &str) -> Result<Self> {
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if hex.len() != 6 && hex.len() != 8 {
            return Err(DebugGraphError::color(input, "expected 6 or 8 hex digits"));
        }
        if !hex.is_ascii() {
            return Err(DebugGraphError::color(input, "non-ASCII characters"));
        }

        let mut out = [0u8, 0, 0, 255];
        for (i, slot) in out.iter_mut().enumerate().take(hex.len() / 2) {
            let byte = &hex[i * 2..i * 2 + 2];
            *slot = u8::from_str_radix(byte, 16)
                .map_err(|e| DebugGraphError::color(input, format!("{byte:?}: {e}")))?;
        }

        Ok(Rgba(out))
    }
}

impl FromStr for Rgba {
    type Err = DebugGraphError;

    fn from_str(s: &str) -> Result<Self> {
        Rgba::parse(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = DebugGraphError;

    fn try_from(value: String) -> Result<Self> {
        Rgba::parse(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        if a == 255 {
            write!(f, "#{r:02X}{g:02X}{b:02X}")
        } else {
            write!(f, "#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl From<Rgba> for egui::Color32 {
    fn from(color: Rgba) -> Self {
        let [r, g, b, a] = color.0;
        egui::Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}
