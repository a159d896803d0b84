//! Static glyph assets: the 3x5 digit font and the win-screen artwork.

use crate::types::{FONT_CHAR_HEIGHT, FONT_CHAR_WIDTH};

const GLYPH_LEN: usize = (FONT_CHAR_WIDTH * FONT_CHAR_HEIGHT) as usize;

/// Digit bitmaps, row-major, 3 columns by 5 rows.
#[rustfmt::skip]
pub static DIGIT_GLYPHS: [[u8; GLYPH_LEN]; 10] = [
    // 0
    [1, 1, 1,
     1, 0, 1,
     1, 0, 1,
     1, 0, 1,
     1, 1, 1],
    // 1
    [0, 1, 0,
     1, 1, 0,
     0, 1, 0,
     0, 1, 0,
     1, 1, 1],
    // 2
    [1, 1, 1,
     0, 0, 1,
     1, 1, 1,
     1, 0, 0,
     1, 1, 1],
    // 3
    [1, 1, 1,
     0, 0, 1,
     1, 1, 1,
     0, 0, 1,
     1, 1, 1],
    // 4
    [1, 0, 1,
     1, 0, 1,
     1, 1, 1,
     0, 0, 1,
     0, 0, 1],
    // 5
    [1, 1, 1,
     1, 0, 0,
     1, 1, 1,
     0, 0, 1,
     1, 1, 1],
    // 6
    [1, 1, 1,
     1, 0, 0,
     1, 1, 1,
     1, 0, 1,
     1, 1, 1],
    // 7
    [1, 1, 1,
     0, 0, 1,
     0, 0, 1,
     0, 0, 1,
     0, 0, 1],
    // 8
    [1, 1, 1,
     1, 0, 1,
     1, 1, 1,
     1, 0, 1,
     1, 1, 1],
    // 9
    [1, 1, 1,
     1, 0, 1,
     1, 1, 1,
     0, 0, 1,
     1, 1, 1],
];

/// Glyph for `value`, or `None` outside 0..=9.
pub fn digit_glyph(value: i64) -> Option<&'static [u8; GLYPH_LEN]> {
    usize::try_from(value)
        .ok()
        .and_then(|v| DIGIT_GLYPHS.get(v))
}

/// Offsets `(x, y)` of the lit pixels of a glyph, row by row.
pub fn glyph_offsets(glyph: &[u8; GLYPH_LEN]) -> impl Iterator<Item = (i32, i32)> + '_ {
    glyph.iter().enumerate().filter_map(|(i, &bit)| {
        (bit == 1).then(|| {
            let i = i as i32;
            (i % FONT_CHAR_WIDTH, i / FONT_CHAR_WIDTH)
        })
    })
}

/// Win-screen artwork bounding box width.
pub const WIN_ART_WIDTH: i32 = 53;

/// Win-screen artwork bounding box height.
pub const WIN_ART_HEIGHT: i32 = 5;

/// "PLAYER _ WINS", run-length encoded over the bounding box.
///
/// Runs alternate on, off, on, ... starting with an on-run. The gap in the
/// middle of the box is where the winning side's digit goes.
#[rustfmt::skip]
pub static WIN_ART_RLE: [u16; 139] = [
    3, 1, 1, 3, 3, 1, 1, 1, 1, 1, 3, 1, 3, 7, 1, 3, 1, 1, 3, 1,
    1, 2, 1, 1, 3, 5, 1, 1, 1, 1, 1, 3, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 3, 1, 1, 1, 7, 1, 3, 1, 2, 1, 2, 2, 1, 1, 1, 1, 7, 3, 1,
    1, 3, 3, 1, 3, 1, 3, 1, 2, 8, 1, 1, 1, 1, 1, 2, 1, 2, 1, 1,
    2, 1, 3, 5, 1, 3, 1, 3, 1, 1, 1, 2, 1, 2, 1, 3, 1, 1, 1, 7,
    2, 1, 2, 2, 1, 2, 1, 2, 1, 3, 1, 5, 1, 3, 3, 1, 1, 1, 1, 2,
    1, 2, 3, 1, 1, 1, 1, 7, 1, 3, 1, 1, 3, 1, 1, 2, 1, 1, 3,
];

/// Decode [`WIN_ART_RLE`] into lit `(x, y)` offsets inside the bounding box.
///
/// The decode is lazy and allocation-free; offsets come out in row-major
/// order.
pub fn win_art_offsets() -> impl Iterator<Item = (i32, i32)> {
    let mut counter: i32 = 0;
    WIN_ART_RLE
        .iter()
        .enumerate()
        .flat_map(move |(i, &run)| {
            let start = counter;
            counter += run as i32;
            let lit = if i % 2 == 0 { start..counter } else { start..start };
            lit.map(|c| (c % WIN_ART_WIDTH, c / WIN_ART_WIDTH))
        })
}
