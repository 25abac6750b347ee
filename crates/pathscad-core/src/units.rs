//! SVG length parsing.
//!
//! Converts attribute values like `"210mm"` or `"4in"` into pixel
//! counts. The pixel basis is 90 dpi, matching the 25.4/90 scale the
//! emitter applies when converting document units to millimeters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A length value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid length {0:?}")]
pub struct ParseLengthError(pub String);

/// Recognized SVG length units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Px,
    Pt,
    Pc,
    Mm,
    Cm,
    In,
}

impl LengthUnit {
    /// Pixels per one of this unit at the 90 dpi basis.
    pub fn px_factor(self) -> f64 {
        match self {
            Self::Px => 1.0,
            Self::Pt => 1.25,
            Self::Pc => 15.0,
            Self::Mm => 90.0 / 25.4,
            Self::Cm => 900.0 / 25.4,
            Self::In => 90.0,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px => write!(f, "px"),
            Self::Pt => write!(f, "pt"),
            Self::Pc => write!(f, "pc"),
            Self::Mm => write!(f, "mm"),
            Self::Cm => write!(f, "cm"),
            Self::In => write!(f, "in"),
        }
    }
}

impl FromStr for LengthUnit {
    type Err = ParseLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "px" | "" => Ok(Self::Px),
            "pt" => Ok(Self::Pt),
            "pc" => Ok(Self::Pc),
            "mm" => Ok(Self::Mm),
            "cm" => Ok(Self::Cm),
            "in" => Ok(Self::In),
            _ => Err(ParseLengthError(s.to_string())),
        }
    }
}

/// A number with an optional unit suffix, as found in `width`/`height`
/// document attributes. Bare numbers are pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub fn to_px(self) -> f64 {
        self.value * self.unit.px_factor()
    }
}

impl FromStr for Length {
    type Err = ParseLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseLengthError(s.to_string()));
        }
        let split = trimmed
            .char_indices()
            .find(|(_, c)| c.is_ascii_alphabetic() || *c == '%')
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());
        let (number, suffix) = trimmed.split_at(split);
        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| ParseLengthError(s.to_string()))?;
        let unit: LengthUnit = suffix.trim().parse()?;
        Ok(Length::new(value, unit))
    }
}
