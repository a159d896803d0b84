//! ScreenMirror: replays display bytes onto a model screen.
//!
//! It understands exactly the vocabulary the encoders emit (cursor moves,
//! 256-colour background, colour reset, screen clear, cursor visibility) and
//! ignores anything else. Feeding it everything written to a sink gives the
//! picture the far end is showing.

use crate::core::{Grid, Palette};
use crate::types::Coordinate;

const ESC: u8 = 0x1b;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Ground,
    Escape,
    Csi,
}

#[derive(Debug, Clone)]
pub struct ScreenMirror {
    width: u16,
    height: u16,
    /// Background colour code per cell; `None` is the default background.
    cells: Vec<Option<u8>>,
    cursor: (u16, u16),
    colour: Option<u8>,
    cursor_visible: bool,
    state: ParseState,
    params: Vec<u8>,
}

impl ScreenMirror {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; (width as usize) * (height as usize)],
            cursor: (0, 0),
            colour: None,
            cursor_visible: true,
            state: ParseState::Ground,
            params: Vec::with_capacity(16),
        }
    }

    /// Apply a chunk of bytes. Sequences may be split across calls.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &b in bytes {
            match self.state {
                ParseState::Ground => match b {
                    ESC => self.state = ParseState::Escape,
                    b'\r' => self.cursor.0 = 0,
                    b'\n' => self.cursor.1 = self.cursor.1.saturating_add(1),
                    0x20..=0x7e => self.print(),
                    _ => {}
                },
                ParseState::Escape => {
                    if b == b'[' {
                        self.params.clear();
                        self.state = ParseState::Csi;
                    } else {
                        self.state = ParseState::Ground;
                    }
                }
                ParseState::Csi => {
                    if (0x40..=0x7e).contains(&b) {
                        self.dispatch(b);
                        self.state = ParseState::Ground;
                    } else {
                        self.params.push(b);
                    }
                }
            }
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Colour code shown at `pos`; `None` when out of bounds.
    pub fn get(&self, pos: Coordinate) -> Option<Option<u8>> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width as i32 || pos.y >= self.height as i32 {
            return None;
        }
        Some(self.cells[(pos.y as usize) * (self.width as usize) + (pos.x as usize)])
    }

    /// Every cell showing a non-default colour, row by row.
    pub fn filled(&self) -> Vec<(Coordinate, u8)> {
        let w = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|code| (Coordinate::new((i % w) as i32, (i / w) as i32), code)))
            .collect()
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Whether this screen shows exactly what `grid` holds under `palette`.
    pub fn shows(&self, grid: &Grid, palette: &Palette) -> bool {
        grid.width() == self.width
            && grid.height() == self.height
            && grid
                .cells()
                .iter()
                .zip(&self.cells)
                .all(|(cell, shown)| cell.and_then(|index| palette.code(index)) == *shown)
    }

    fn print(&mut self) {
        let (x, y) = self.cursor;
        if x < self.width && y < self.height {
            self.cells[(y as usize) * (self.width as usize) + (x as usize)] = self.colour;
        }
        self.cursor.0 = x.saturating_add(1);
    }

    fn dispatch(&mut self, final_byte: u8) {
        let params = std::str::from_utf8(&self.params).unwrap_or("");
        match final_byte {
            b'H' => {
                let mut parts = params.split(';').map(|p| p.parse::<u16>().unwrap_or(1).max(1));
                let row = parts.next().unwrap_or(1);
                let col = parts.next().unwrap_or(1);
                self.cursor = (col - 1, row - 1);
            }
            b'J' if params == "2" => self.cells.fill(None),
            b'm' => {
                let parts: Vec<&str> = params.split(';').collect();
                self.colour = match parts.as_slice() {
                    ["48", "5", code] => code.parse().ok(),
                    _ => None,
                };
            }
            b'l' if params == "?25" => self.cursor_visible = false,
            b'h' if params == "?25" => self.cursor_visible = true,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paints_with_background_colour() {
        let mut m = ScreenMirror::new(10, 3);
        m.feed(b"\x1b[2;3H\x1b[48;5;15m  \x1b[0m ");
        assert_eq!(m.get(Coordinate::new(2, 1)), Some(Some(15)));
        assert_eq!(m.get(Coordinate::new(3, 1)), Some(Some(15)));
        assert_eq!(m.get(Coordinate::new(4, 1)), Some(None));
        assert_eq!(m.filled_count(), 2);
    }

    #[test]
    fn clear_resets_every_cell() {
        let mut m = ScreenMirror::new(4, 2);
        m.feed(b"\x1b[48;5;9m    \x1b[2J");
        assert_eq!(m.filled_count(), 0);
    }

    #[test]
    fn sequences_may_split_across_chunks() {
        let mut m = ScreenMirror::new(4, 2);
        m.feed(b"\x1b[2;");
        m.feed(b"2H\x1b[48;");
        m.feed(b"5;7m ");
        assert_eq!(m.filled(), vec![(Coordinate::new(1, 1), 7)]);
    }

    #[test]
    fn tracks_cursor_visibility() {
        let mut m = ScreenMirror::new(4, 2);
        assert!(m.cursor_visible());
        m.feed(b"\x1b[?25l");
        assert!(!m.cursor_visible());
        m.feed(b"\x1b[?25h");
        assert!(m.cursor_visible());
    }

    #[test]
    fn writes_past_the_edge_are_dropped() {
        let mut m = ScreenMirror::new(2, 1);
        m.feed(b"\x1b[1;2H\x1b[48;5;1m   ");
        assert_eq!(m.filled(), vec![(Coordinate::new(1, 0), 1)]);
    }
}
