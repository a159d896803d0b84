//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types shared by the rendering engine,
//! the byte encoders and the game-state collaborators that feed them.
//! All types are pure data structures with no external dependencies.
//!
//! # Grid Space
//!
//! Everything the renderer draws lands on an integer character grid:
//!
//! - **x**: column, `0 <= x < width`
//! - **y**: row, `0 <= y < height`
//! - **origin**: top-left corner of the output surface
//!
//! Game entities live in floating-point space and are converted with
//! [`Coordinate::from_position`], which rounds half-to-even.
//!
//! # Fixed Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FONT_CHAR_WIDTH` | 3 | Digit glyph width in cells |
//! | `FONT_CHAR_HEIGHT` | 5 | Digit glyph height in cells |
//! | `NET_DASH_PERIOD` | 3 | One row in every three is left out of the net |
//! | `SERIAL_BAUD_RATE` | 115200 | Serial display link speed |
//! | `SERIAL_DEVICE_PATH` | `/dev/ttyAMA0` | Serial display device |
//!
//! # Examples
//!
//! ```
//! use pong_display_types::{Coordinate, Paddle, Side};
//!
//! let paddle = Paddle::new((10.4, 20.6), 4.0, Side::Left);
//! assert_eq!(paddle.center(), Coordinate::new(10, 21));
//! assert_eq!(Side::Right.index(), 1);
//! ```

/// Digit glyph width in cells.
pub const FONT_CHAR_WIDTH: i32 = 3;

/// Digit glyph height in cells.
pub const FONT_CHAR_HEIGHT: i32 = 5;

/// Net rows repeat with this period; one row per period is skipped.
pub const NET_DASH_PERIOD: i32 = 3;

/// Character printed for a filled cell. The colour comes from the background.
pub const FILL_CHARACTER: char = ' ';

/// Serial display link speed.
pub const SERIAL_BAUD_RATE: u32 = 115_200;

/// Serial display device.
pub const SERIAL_DEVICE_PATH: &str = "/dev/ttyAMA0";

/// Integer position in grid space.
///
/// Coordinates are signed so off-screen entity positions survive conversion;
/// the grid drops writes that fall outside its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert a floating-point entity position to grid space.
    ///
    /// Rounds half-to-even, so `(10.5, 11.5)` lands on `(10, 12)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pong_display_types::Coordinate;
    ///
    /// assert_eq!(Coordinate::from_position((10.4, 20.6)), Coordinate::new(10, 21));
    /// assert_eq!(Coordinate::from_position((10.5, 11.5)), Coordinate::new(10, 12));
    /// ```
    pub fn from_position(position: (f64, f64)) -> Self {
        Self {
            x: position.0.round_ties_even() as i32,
            y: position.1.round_ties_even() as i32,
        }
    }

    /// Return a new coordinate shifted by `(dx, dy)`, saturating at the
    /// `i32` range.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Which half of the court a player defends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Zero-based side index (`Left` = 0, `Right` = 1).
    pub const fn index(self) -> u8 {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// A paddle as reported by the game state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    /// Centre of the paddle in floating-point grid space.
    pub position: (f64, f64),
    /// Paddle height in cells. Truncated toward zero when drawn.
    pub size: f64,
    pub side: Side,
}

impl Paddle {
    pub fn new(position: (f64, f64), size: f64, side: Side) -> Self {
        Self {
            position,
            size,
            side,
        }
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::from_position(self.position)
    }
}

/// The ball as reported by the game state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub position: (f64, f64),
}

impl Ball {
    pub fn new(position: (f64, f64)) -> Self {
        Self { position }
    }

    pub fn cell(&self) -> Coordinate {
        Coordinate::from_position(self.position)
    }
}

/// Stable palette position of a colour.
///
/// Indices are assigned by registration order and never change for the
/// lifetime of a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorIndex(pub u8);

impl ColorIndex {
    pub const fn get(self) -> usize {
        self.0 as usize
    }
}

/// A cell in the rendering grid
///
/// - `None`: background; nothing is emitted and the display's own
///   background shows through
/// - `Some(ColorIndex)`: cell filled with that palette colour
pub type Cell = Option<ColorIndex>;
