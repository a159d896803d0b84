use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use pong_display::term::{DisplayConfig, OutputKind, RenderMode};
use pong_display::types::{SERIAL_BAUD_RATE, SERIAL_DEVICE_PATH};

#[derive(Parser, Debug)]
#[command(name = "pong-display")]
#[command(author, version)]
#[command(about = "Two-player paddle game display for terminals and serial character displays")]
pub struct Cli {
    /// Send frames to the serial display instead of this terminal
    #[arg(long)]
    pub serial: bool,

    /// Keep frames on the terminal even with --serial (no hardware attached)
    #[arg(long, env = "PONG_FORCE_TERMINAL")]
    pub force_terminal: bool,

    /// Serial display device
    #[arg(long, default_value = SERIAL_DEVICE_PATH)]
    pub serial_path: PathBuf,

    /// Serial line speed
    #[arg(long, default_value_t = SERIAL_BAUD_RATE)]
    pub baud: u32,

    /// Frame encoding
    #[arg(long, value_enum, default_value_t = RenderModeArg::Diff)]
    pub render_mode: RenderModeArg,

    /// Grid size as COLSxROWS (default: size of the controlling terminal)
    #[arg(long, value_parser = parse_size)]
    pub size: Option<(u16, u16)>,

    /// Frames per second
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Points needed to win a match
    #[arg(long, default_value_t = 5)]
    pub win_score: u64,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderModeArg {
    /// Only cells that changed since the last frame
    Diff,
    /// Clear and repaint every frame
    Full,
}

impl Cli {
    pub fn display_config(&self) -> DisplayConfig {
        DisplayConfig {
            output: if self.serial {
                OutputKind::Serial
            } else {
                OutputKind::Terminal
            },
            force_terminal: self.force_terminal,
            serial_path: self.serial_path.clone(),
            baud_rate: self.baud,
            render_mode: match self.render_mode {
                RenderModeArg::Diff => RenderMode::Diff,
                RenderModeArg::Full => RenderMode::Full,
            },
            dimensions: self.size,
        }
    }
}

fn parse_size(s: &str) -> Result<(u16, u16), String> {
    let (cols, rows) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected COLSxROWS, got {s:?}"))?;
    let cols = cols.trim().parse().map_err(|e| format!("bad column count: {e}"))?;
    let rows = rows.trim().parse().map_err(|e| format!("bad row count: {e}"))?;
    Ok((cols, rows))
}
