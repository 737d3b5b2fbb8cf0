use crate::geometry::Insets;
use derive_more::{Deref, From, Into};
use palette::Srgba;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// 8-bit sRGB colour with alpha. Parses `#RRGGBB` and `#AARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, SerializeDisplay, DeserializeFromStr)]
pub struct Color(Srgba<u8>);

impl Color {
    pub const TRANSPARENT: Color = Color::from_argb(0x0000_0000);

    pub const fn from_argb(argb: u32) -> Self {
        Self(Srgba::new(
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
            (argb >> 24) as u8,
        ))
    }

    pub fn from_rgba_f64(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self(Srgba::new(r, g, b, a).into_format())
    }

    pub fn to_rgba_f64(self) -> Srgba<f64> {
        self.0.into_format()
    }

    /// `#rrggbb` without alpha, as Pango markup expects.
    pub fn rgb_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.0.alpha, self.0.red, self.0.green, self.0.blue
        )
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ColorParseError {
    #[error("Colour must start with '#': {0}")]
    MissingHash(String),
    #[error("Colour must have 6 or 8 hex digits, got {0}")]
    Length(usize),
    #[error("Invalid hex digits: {0}")]
    Digits(String),
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        let opaque = match digits.len() {
            6 => true,
            8 => false,
            n => return Err(ColorParseError::Length(n)),
        };
        // from_str_radix alone would let a leading sign through
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::Digits(digits.to_string()));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParseError::Digits(digits.to_string()))?;
        Ok(Self::from_argb(if opaque { 0xFF00_0000 | value } else { value }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawableState {
    pub enabled: bool,
    pub pressed: bool,
}

/// Colour that varies with the drawable state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatefulColor {
    pub pressed: Option<Color>,
    pub disabled: Option<Color>,
    pub default: Color,
}

impl StatefulColor {
    pub fn single(color: Color) -> Self {
        Self {
            pressed: None,
            disabled: None,
            default: color,
        }
    }

    pub fn for_state(&self, state: DrawableState) -> Color {
        if state.pressed
            && let Some(color) = self.pressed
        {
            return color;
        }
        if !state.enabled
            && let Some(color) = self.disabled
        {
            return color;
        }
        self.default
    }
}

/// Colours the host's theme supplies when configuration leaves them unset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub highlight: Color,
    pub activated: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            highlight: Color::from_argb(0x1F00_0000),
            activated: Color::from_argb(0xFF00_8577),
        }
    }
}

impl Theme {
    pub fn sweep_color(&self) -> Color {
        self.highlight
    }

    pub fn progress_color(&self) -> StatefulColor {
        StatefulColor {
            pressed: Some(self.activated),
            disabled: Some(Color::TRANSPARENT),
            default: self.highlight,
        }
    }
}

/// What to paint at the thumb position.
#[derive(Debug, Clone, PartialEq, Eq, Default, SerializeDisplay, DeserializeFromStr)]
pub enum ThumbVisual {
    /// A light disc over two soft shadow rings.
    #[default]
    Default,
    None,
    /// An image file the host loads and scales into the thumb bounds.
    Image(PathBuf),
}

#[derive(Error, Debug, PartialEq)]
pub enum ThumbParseError {
    #[error("Thumb must be 'default', 'none' or an image path")]
    Empty,
}

impl FromStr for ThumbVisual {
    type Err = ThumbParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(ThumbParseError::Empty),
            s if s.eq_ignore_ascii_case("default") => Ok(Self::Default),
            s if s.eq_ignore_ascii_case("none") => Ok(Self::None),
            s => Ok(Self::Image(PathBuf::from(s))),
        }
    }
}

impl fmt::Display for ThumbVisual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::None => f.write_str("none"),
            Self::Image(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One oval of a layered thumb. `padding` (in dp) shrinks every layer
/// stacked after this one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbLayer {
    pub color: Color,
    pub padding: Insets,
}

pub const DEFAULT_THUMB_COLOR: Color = Color::from_argb(0xFFEC_ECEC);

pub fn default_thumb_layers() -> [ThumbLayer; 4] {
    [
        // spacer
        ThumbLayer {
            color: Color::TRANSPARENT,
            padding: Insets::new(1.0, 1.0, 1.0, 0.0),
        },
        // ambient shadow
        ThumbLayer {
            color: Color::from_argb(0x1000_0000),
            padding: Insets::new(1.0, 1.0, 1.0, 1.0),
        },
        // key shadow
        ThumbLayer {
            color: Color::from_argb(0x2000_0000),
            padding: Insets::new(0.0, 0.0, 0.0, 1.0),
        },
        ThumbLayer {
            color: DEFAULT_THUMB_COLOR,
            padding: Insets::default(),
        },
    ]
}
