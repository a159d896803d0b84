//! Terminal and serial output for the character-grid renderer.
//!
//! The core crate decides what a frame looks like; this crate turns that
//! into bytes and gets them to a display. Terminal and serial displays speak
//! the same escape vocabulary, so one encoder serves both and the sink is
//! only a choice of byte destination.
//!
//! Modules:
//! - `encode`: crossterm-based full and diff frame encoders
//! - `display`: the renderer and its frame cycle
//! - `sink`: terminal stdout or serial device
//! - `mirror`: replays emitted bytes onto a model screen

pub mod config;
pub mod display;
pub mod encode;
pub mod mirror;
#[cfg(unix)]
pub mod serial;
pub mod sink;

pub use pong_display_core as core;
pub use pong_display_types as types;

pub use config::{DisplayConfig, OutputKind, RenderMode};
pub use display::{Display, Frame};
pub use encode::{encode_diff_into, encode_full_into};
pub use mirror::ScreenMirror;
pub use sink::Sink;
