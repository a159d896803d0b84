//! Core rendering engine - pure, deterministic, and testable
//!
//! This crate holds everything about a frame that is independent of how the
//! frame reaches a display. It has **no I/O**, which keeps it:
//!
//! - **Deterministic**: the same draw calls always produce the same grid
//! - **Testable**: every primitive can be checked cell by cell
//! - **Transport-agnostic**: terminal and serial output share one buffer model
//!
//! # Module Structure
//!
//! - [`palette`]: symbolic colour names to stable indices and display codes
//! - [`glyphs`]: 3x5 digit font and the run-length encoded win artwork
//! - [`grid`]: colour-index grid and the front/back double buffer
//! - [`layout`]: placement constants and draw-primitive translation
//! - [`error`]: the display error taxonomy
//!
//! # Example
//!
//! ```
//! use pong_display_core::{layout, CellGrid, Layout, Palette, ResolvedColors};
//! use pong_display_core::types::{Ball, Coordinate};
//!
//! let palette = Palette::default();
//! let colors = ResolvedColors::resolve(&palette).unwrap();
//! let layout = Layout::new(80, 24);
//! let mut grid = CellGrid::new(80, 24);
//!
//! grid.clear();
//! for &cell in layout.net_cells() {
//!     grid.set_cell(colors.net, cell);
//! }
//! grid.set_cell(colors.ball, layout::ball_cell(&Ball::new((12.0, 5.0))));
//!
//! assert_eq!(grid.back().get(Coordinate::new(12, 5)), Some(Some(colors.ball)));
//! grid.swap();
//! ```

pub mod error;
pub mod glyphs;
pub mod grid;
pub mod layout;
pub mod palette;

pub use pong_display_types as types;

pub use error::DisplayError;
pub use grid::{CellGrid, Grid};
pub use layout::Layout;
pub use palette::{ColorName, Palette, ResolvedColors, DEFAULT_COLOURS};
pub use types::{Cell, ColorIndex, Coordinate};
