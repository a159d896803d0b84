//! Layout: fixed placement constants and draw-primitive translation.
//!
//! Everything here is pure. Each primitive turns game state into the grid
//! coordinates it covers; nothing here touches a buffer.

use arrayvec::ArrayVec;

use crate::error::DisplayError;
use crate::glyphs::{digit_glyph, glyph_offsets, win_art_offsets, WIN_ART_HEIGHT, WIN_ART_WIDTH};
use crate::types::{
    Ball, Coordinate, Paddle, FONT_CHAR_HEIGHT, FONT_CHAR_WIDTH, NET_DASH_PERIOD,
};

/// Enough digits for any `u64`.
pub const MAX_SCORE_DIGITS: usize = 20;

/// Placement constants for one output surface, computed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    width: u16,
    height: u16,
    net_x: i32,
    digit_spacing: i32,
    net_cells: Vec<Coordinate>,
    win_origin: Coordinate,
}

impl Layout {
    pub fn new(width: u16, height: u16) -> Self {
        let net_x = width as i32 / 2;
        let net_cells = (1..height as i32)
            .filter(|&y| is_net_row(y))
            .map(|y| Coordinate::new(net_x, y))
            .collect();

        Self {
            width,
            height,
            net_x,
            digit_spacing: (FONT_CHAR_WIDTH / 2) * 2 + 2,
            net_cells,
            win_origin: Coordinate::new(
                (width as i32 - WIN_ART_WIDTH).div_euclid(2),
                (height as i32 - WIN_ART_HEIGHT).div_euclid(2),
            ),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Column the net is drawn in.
    pub fn net_x(&self) -> i32 {
        self.net_x
    }

    /// Distance between the centres of neighbouring score digits.
    pub fn digit_spacing(&self) -> i32 {
        self.digit_spacing
    }

    pub fn net_cells(&self) -> &[Coordinate] {
        &self.net_cells
    }

    /// Top-left corner of the win-art bounding box.
    pub fn win_origin(&self) -> Coordinate {
        self.win_origin
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.width as i32 / 2, self.height as i32 / 2)
    }

    /// Centres of each decimal digit of `value`, left to right, spaced
    /// evenly around `center.x`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pong_display_core::{Coordinate, Layout};
    ///
    /// let layout = Layout::new(80, 24);
    /// let centres = layout.score_digit_centers(105, Coordinate::new(40, 10));
    /// let xs: Vec<i32> = centres.iter().map(|(_, c)| c.x).collect();
    /// assert_eq!(xs, vec![36, 40, 44]);
    /// ```
    pub fn score_digit_centers(
        &self,
        value: u64,
        center: Coordinate,
    ) -> ArrayVec<(u8, Coordinate), MAX_SCORE_DIGITS> {
        let digits = decimal_digits(value);
        let n = digits.len() as i32;
        let first = center.offset(-((n - 1) * self.digit_spacing).div_euclid(2), 0);
        digits
            .into_iter()
            .enumerate()
            .map(|(i, d)| (d, first.offset(i as i32 * self.digit_spacing, 0)))
            .collect()
    }

    /// Win-art cells placed on this surface.
    pub fn win_art_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let origin = self.win_origin;
        win_art_offsets().map(move |(x, y)| origin.offset(x + 1, y + 1))
    }
}

/// Whether row `y` carries a net dash. Row 0 never does.
pub fn is_net_row(y: i32) -> bool {
    y >= 1 && y.rem_euclid(NET_DASH_PERIOD) != 1
}

/// Cells covered by a paddle: a vertical run of `size` cells around its
/// rounded centre.
pub fn paddle_cells(paddle: &Paddle) -> impl Iterator<Item = Coordinate> {
    let center = paddle.center();
    // Negative sizes draw nothing either way; clamping keeps the negation in range.
    let size = (paddle.size as i32).max(0);
    ((-size).div_euclid(2)..size.div_euclid(2)).map(move |dy| center.offset(0, dy))
}

pub fn ball_cell(ball: &Ball) -> Coordinate {
    ball.cell()
}

/// Cells lit by digit `value` with its 3x5 block centred on `center`.
pub fn digit_cells(
    value: i64,
    center: Coordinate,
) -> Result<impl Iterator<Item = Coordinate>, DisplayError> {
    let glyph = digit_glyph(value).ok_or(DisplayError::InvalidDigitValue(value))?;
    let origin = digit_origin(center);
    Ok(glyph_offsets(glyph).map(move |(x, y)| origin.offset(x + 1, y + 1)))
}

/// Glyph origin for a digit centred on `center`. Lit pixels sit at
/// origin + (x + 1, y + 1).
pub fn digit_origin(center: Coordinate) -> Coordinate {
    center.offset(-(FONT_CHAR_WIDTH / 2 + 1), -(FONT_CHAR_HEIGHT / 2 + 1))
}

/// Decimal digits of `value`, most significant first.
pub fn decimal_digits(mut value: u64) -> ArrayVec<u8, MAX_SCORE_DIGITS> {
    let mut digits = ArrayVec::new();
    loop {
        digits.push((value % 10) as u8);
        value /= 10;
        if value == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}
