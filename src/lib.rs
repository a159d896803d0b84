//! Pong display (workspace facade crate).
//!
//! Re-exports the workspace crates as `pong_display::{types, core, term}` so
//! callers and integration tests need a single dependency. The rendering
//! engine lives in `crates/core`, the byte-level output side in
//! `crates/term`.

pub use pong_display_core as core;
pub use pong_display_term as term;
pub use pong_display_types as types;
