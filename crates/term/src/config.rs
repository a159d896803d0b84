//! Display configuration, fixed for the lifetime of a display.

use std::path::PathBuf;

use crate::types::{SERIAL_BAUD_RATE, SERIAL_DEVICE_PATH};

/// Where frames are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    /// This process's stdout, read by a terminal emulator.
    #[default]
    Terminal,
    /// A character display on the end of a serial line.
    Serial,
}

/// How each frame is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Emit only cells that changed since the previous frame.
    #[default]
    Diff,
    /// Clear and repaint every frame.
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    pub output: OutputKind,
    /// Send frames to the terminal even when `output` is `Serial`.
    pub force_terminal: bool,
    pub serial_path: PathBuf,
    pub baud_rate: u32,
    pub render_mode: RenderMode,
    /// Grid size. `None` asks the controlling terminal.
    pub dimensions: Option<(u16, u16)>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            output: OutputKind::Terminal,
            force_terminal: false,
            serial_path: PathBuf::from(SERIAL_DEVICE_PATH),
            baud_rate: SERIAL_BAUD_RATE,
            render_mode: RenderMode::Diff,
            dimensions: None,
        }
    }
}

impl DisplayConfig {
    /// Output actually used once `force_terminal` is applied.
    pub fn effective_output(&self) -> OutputKind {
        if self.force_terminal {
            OutputKind::Terminal
        } else {
            self.output
        }
    }
}
