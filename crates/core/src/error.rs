//! Display errors.
//!
//! Writes outside the grid are not errors: entities routinely leave the
//! screen, so those writes are dropped without a report.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DisplayError {
    /// A palette lookup named a colour that was never registered.
    #[error("unknown colour name: {0:?}")]
    UnknownColorName(String),
    /// The glyph renderer only has digits 0 through 9.
    #[error("digit glyphs cover 0-9 only (got {0})")]
    InvalidDigitValue(i64),
    #[error("failed to open output sink {target}: {source}")]
    SinkOpen {
        target: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write frame to output sink: {0}")]
    SinkWrite(#[source] io::Error),
    #[error("failed to query display dimensions: {0}")]
    Dimensions(#[source] io::Error),
}

impl DisplayError {
    /// Returns whether the render loop can go on after this error.
    ///
    /// Only a bad digit is isolated to its own draw call; everything else
    /// means there is no usable display.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, DisplayError::InvalidDigitValue(_))
    }

    /// Returns the operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            DisplayError::UnknownColorName(_) => "palette",
            DisplayError::InvalidDigitValue(_) => "draw_digit",
            DisplayError::SinkOpen { .. } => "open",
            DisplayError::SinkWrite(_) => "write",
            DisplayError::Dimensions(_) => "size",
        }
    }
}
