//! Frame encoders: grid state to display bytes.
//!
//! Both transports receive the same bytes. They are built as crossterm
//! commands queued into a caller-owned `Vec<u8>`, so nothing here touches a
//! device.

use std::fmt;
use std::io;

use crossterm::{
    cursor,
    style::{Print, ResetColor},
    terminal, Command, QueueableCommand,
};

use crate::core::grid::{for_each_changed_run, for_each_filled_run, Grid};
use crate::core::Palette;
use crate::types::{Coordinate, FILL_CHARACTER};

/// Encode a full-frame redraw into `out`.
///
/// Clears the screen, then paints each run of same-coloured filled cells.
/// Background cells produce no bytes.
pub fn encode_full_into(grid: &Grid, palette: &Palette, out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut current: Option<Option<u8>> = None;
    for_each_filled_run(grid, |x, y, len, index| -> io::Result<()> {
        let Some(code) = palette.code(index) else {
            return Ok(());
        };
        out.queue(cursor::MoveTo(x, y))?;
        if current != Some(Some(code)) {
            apply_colour_into(out, Some(code))?;
            current = Some(Some(code));
        }
        for _ in 0..len {
            out.queue(Print(FILL_CHARACTER))?;
        }
        Ok(())
    })?;

    if current.is_some() {
        out.queue(ResetColor)?;
    }
    Ok(())
}

/// Encode only the cells of `next` that differ from `prev` into `out`.
///
/// Cells that went back to background are repainted with the default
/// colour.
pub fn encode_diff_into(
    prev: &Grid,
    next: &Grid,
    palette: &Palette,
    out: &mut Vec<u8>,
) -> io::Result<()> {
    let mut current: Option<Option<u8>> = None;

    for_each_changed_run(prev, next, |x, y, len| -> io::Result<()> {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let pos = Coordinate::new((x + dx) as i32, y as i32);
            let code = next
                .get(pos)
                .flatten()
                .and_then(|index| palette.code(index));
            if current != Some(code) {
                apply_colour_into(out, code)?;
                current = Some(code);
            }
            out.queue(Print(FILL_CHARACTER))?;
        }
        Ok(())
    })?;

    if current.is_some() {
        out.queue(ResetColor)?;
    }
    Ok(())
}

/// Bytes sent once when a display is opened.
pub fn encode_setup_into(out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(ResetColor)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(cursor::Hide)?;
    Ok(())
}

/// Bytes sent once when a display is closed.
pub fn encode_teardown_into(out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(cursor::Show)?;
    out.queue(ResetColor)?;
    out.queue(cursor::MoveTo(0, 0))?;
    Ok(())
}

/// 256-colour background SGR (`ESC[48;5;nm`).
///
/// crossterm's `SetBackgroundColor` drops the colour when the host sets
/// `NO_COLOR`. Far-end bytes must not depend on the host environment, so
/// palette colours go through this command instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPaletteBackground(pub u8);

impl Command for SetPaletteBackground {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b[48;5;{}m", self.0)
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "palette colours need an ANSI terminal",
        ))
    }
}

fn apply_colour_into(out: &mut Vec<u8>, code: Option<u8>) -> io::Result<()> {
    match code {
        Some(code) => out.queue(SetPaletteBackground(code))?,
        None => out.queue(ResetColor)?,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ColorIndex;

    fn palette() -> Palette {
        Palette::new(&[("net", 7), ("ball", 15)])
    }

    fn encode_full(grid: &Grid) -> String {
        let mut out = Vec::new();
        encode_full_into(grid, &palette(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn encode_diff(prev: &Grid, next: &Grid) -> String {
        let mut out = Vec::new();
        encode_diff_into(prev, next, &palette(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_full_frame_is_just_a_clear() {
        let grid = Grid::new(10, 4);
        assert_eq!(encode_full(&grid), "\x1b[2J");
    }

    #[test]
    fn full_frame_coalesces_runs() {
        let mut grid = Grid::new(10, 4);
        for x in 2..5 {
            grid.set(ColorIndex(1), Coordinate::new(x, 1));
        }
        grid.set(ColorIndex(0), Coordinate::new(0, 3));
        assert_eq!(
            encode_full(&grid),
            "\x1b[2J\x1b[2;3H\x1b[48;5;15m   \x1b[4;1H\x1b[48;5;7m \x1b[0m"
        );
    }

    #[test]
    fn full_frame_skips_redundant_colour_sets() {
        let mut grid = Grid::new(10, 2);
        grid.set(ColorIndex(0), Coordinate::new(4, 0));
        grid.set(ColorIndex(0), Coordinate::new(4, 1));
        assert_eq!(
            encode_full(&grid),
            "\x1b[2J\x1b[1;5H\x1b[48;5;7m \x1b[2;5H \x1b[0m"
        );
    }

    #[test]
    fn diff_frame_with_no_changes_is_empty() {
        let mut grid = Grid::new(6, 2);
        grid.set(ColorIndex(0), Coordinate::new(1, 1));
        assert_eq!(encode_diff(&grid, &grid.clone()), "");
    }

    #[test]
    fn diff_frame_erases_and_paints() {
        let mut prev = Grid::new(6, 1);
        prev.set(ColorIndex(1), Coordinate::new(2, 0));
        let mut next = Grid::new(6, 1);
        next.set(ColorIndex(1), Coordinate::new(3, 0));
        assert_eq!(
            encode_diff(&prev, &next),
            "\x1b[1;3H\x1b[0m \x1b[48;5;15m \x1b[0m"
        );
    }

    #[test]
    fn palette_background_is_a_256_colour_sgr() {
        let mut out = Vec::new();
        out.queue(SetPaletteBackground(208)).unwrap();
        assert_eq!(out, b"\x1b[48;5;208m");
    }

    #[test]
    fn setup_and_teardown_sequences() {
        let mut out = Vec::new();
        encode_setup_into(&mut out).unwrap();
        assert_eq!(out, b"\x1b[0m\x1b[2J\x1b[1;1H\x1b[?25l");

        out.clear();
        encode_teardown_into(&mut out).unwrap();
        assert_eq!(out, b"\x1b[?25h\x1b[0m\x1b[1;1H");
    }
}
