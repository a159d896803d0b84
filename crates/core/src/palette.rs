//! Palette: symbolic colour names to stable indices and display codes.
//!
//! The index of a colour is its position in the registration list, so the
//! same table always yields the same indices. Codes are ANSI 256-colour
//! values, painted as the cell background.

use crate::error::DisplayError;
use crate::types::ColorIndex;

/// Colours the renderer draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorName {
    Net,
    Ball,
    PaddleLeft,
    PaddleRight,
    Text,
}

impl ColorName {
    pub const ALL: [ColorName; 5] = [
        ColorName::Net,
        ColorName::Ball,
        ColorName::PaddleLeft,
        ColorName::PaddleRight,
        ColorName::Text,
    ];

    /// Name as it appears in a palette table.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorName::Net => "net",
            ColorName::Ball => "ball",
            ColorName::PaddleLeft => "paddleLeft",
            ColorName::PaddleRight => "paddleRight",
            ColorName::Text => "text",
        }
    }
}

/// Built-in colour table: (name, ANSI 256-colour code).
pub const DEFAULT_COLOURS: [(&str, u8); 5] = [
    ("net", 7),
    ("ball", 15),
    ("paddleLeft", 12),
    ("paddleRight", 9),
    ("text", 11),
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct PaletteEntry {
    name: String,
    code: u8,
}

/// Ordered colour table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Build a palette from ordered `(name, code)` pairs.
    ///
    /// A repeated name keeps its first position.
    pub fn new(entries: &[(&str, u8)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|&(name, code)| PaletteEntry {
                    name: name.to_string(),
                    code,
                })
                .collect(),
        }
    }

    /// Look up the index registered for `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pong_display_core::{ColorIndex, Palette};
    ///
    /// let palette = Palette::default();
    /// assert_eq!(palette.index_of("ball").unwrap(), ColorIndex(1));
    /// assert!(palette.index_of("grass").is_err());
    /// ```
    pub fn index_of(&self, name: &str) -> Result<ColorIndex, DisplayError> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .map(|i| ColorIndex(i as u8))
            .ok_or_else(|| DisplayError::UnknownColorName(name.to_string()))
    }

    /// Display code for `index`, if it belongs to this palette.
    pub fn code(&self, index: ColorIndex) -> Option<u8> {
        self.entries.get(index.get()).map(|e| e.code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(&DEFAULT_COLOURS)
    }
}

/// Every renderer colour resolved to its index, once, up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColors {
    pub net: ColorIndex,
    pub ball: ColorIndex,
    pub paddle_left: ColorIndex,
    pub paddle_right: ColorIndex,
    pub text: ColorIndex,
}

impl ResolvedColors {
    /// Fails with [`DisplayError::UnknownColorName`] if any renderer colour
    /// is missing from `palette`.
    pub fn resolve(palette: &Palette) -> Result<Self, DisplayError> {
        Ok(Self {
            net: palette.index_of(ColorName::Net.as_str())?,
            ball: palette.index_of(ColorName::Ball.as_str())?,
            paddle_left: palette.index_of(ColorName::PaddleLeft.as_str())?,
            paddle_right: palette.index_of(ColorName::PaddleRight.as_str())?,
            text: palette.index_of(ColorName::Text.as_str())?,
        })
    }

    pub fn get(&self, name: ColorName) -> ColorIndex {
        match name {
            ColorName::Net => self.net,
            ColorName::Ball => self.ball,
            ColorName::PaddleLeft => self.paddle_left,
            ColorName::PaddleRight => self.paddle_right,
            ColorName::Text => self.text,
        }
    }
}
