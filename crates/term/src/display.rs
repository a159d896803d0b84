//! Display: owns the double buffer and the sink, and runs the frame cycle.
//!
//! ```text
//! open/with_sink ──> begin ──> Frame::draw_* ──> Frame::end ──> begin ...
//!                                                          └──> close
//! ```
//!
//! Draw calls only exist on [`Frame`], so drawing outside a frame does not
//! compile. `close` consumes the display, so it runs at most once.

use std::io::Write;

use tracing::{debug, trace, warn};

use crate::config::{DisplayConfig, RenderMode};
use crate::core::{layout, CellGrid, DisplayError, Layout, Palette, ResolvedColors};
use crate::encode::{encode_diff_into, encode_full_into, encode_setup_into, encode_teardown_into};
use crate::sink::Sink;
use crate::types::{Ball, Coordinate, Paddle, Side};

pub struct Display<W: Write> {
    sink: W,
    palette: Palette,
    colors: ResolvedColors,
    layout: Layout,
    grid: CellGrid,
    mode: RenderMode,
    needs_full: bool,
    out: Vec<u8>,
    frames: u64,
}

impl Display<Sink> {
    /// Open the configured sink and size the grid to the output surface.
    ///
    /// Any failure after the sink is opened drops it before returning.
    pub fn open(config: &DisplayConfig) -> Result<Self, DisplayError> {
        let sink = Sink::open(config)?;
        let (width, height) = match config.dimensions {
            Some(dims) => dims,
            None => crossterm::terminal::size().map_err(DisplayError::Dimensions)?,
        };
        Self::with_sink(sink, width, height, Palette::default(), config.render_mode)
    }
}

impl<W: Write> Display<W> {
    /// Build a display over an already-open sink.
    ///
    /// Resolves every renderer colour in `palette`, then resets the far end:
    /// default colours, cleared screen, cursor home and hidden.
    pub fn with_sink(
        sink: W,
        width: u16,
        height: u16,
        palette: Palette,
        mode: RenderMode,
    ) -> Result<Self, DisplayError> {
        let colors = ResolvedColors::resolve(&palette)?;
        let mut display = Self {
            sink,
            palette,
            colors,
            layout: Layout::new(width, height),
            grid: CellGrid::new(width, height),
            mode,
            needs_full: true,
            out: Vec::with_capacity(16 * 1024),
            frames: 0,
        };

        display.out.clear();
        encode_setup_into(&mut display.out).map_err(DisplayError::SinkWrite)?;
        display.flush_out()?;

        debug!(width, height, ?mode, "display ready");
        Ok(display)
    }

    pub fn width(&self) -> u16 {
        self.layout.width()
    }

    pub fn height(&self) -> u16 {
        self.layout.height()
    }

    pub fn net_x(&self) -> i32 {
        self.layout.net_x()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn colors(&self) -> &ResolvedColors {
        &self.colors
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn render_mode(&self) -> RenderMode {
        self.mode
    }

    /// Frames emitted so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Force the next frame to be a full redraw.
    ///
    /// Useful when the far end may have lost what it was showing.
    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }

    /// Start a frame: the back grid is cleared and draw calls open up.
    pub fn begin(&mut self) -> Frame<'_, W> {
        self.grid.clear();
        Frame { display: self }
    }

    /// Restore the far end (cursor shown, colours reset, cursor home) and
    /// hand back the sink.
    pub fn close(mut self) -> Result<W, DisplayError> {
        self.out.clear();
        encode_teardown_into(&mut self.out).map_err(DisplayError::SinkWrite)?;
        self.flush_out()?;
        debug!(frames = self.frames, "display closed");
        Ok(self.sink)
    }

    fn finish_frame(&mut self) -> Result<(), DisplayError> {
        let full = self.needs_full || self.mode == RenderMode::Full;

        self.out.clear();
        let encoded = if full {
            encode_full_into(self.grid.back(), &self.palette, &mut self.out)
        } else {
            encode_diff_into(self.grid.front(), self.grid.back(), &self.palette, &mut self.out)
        };
        encoded.map_err(DisplayError::SinkWrite)?;
        self.flush_out()?;

        self.grid.swap();
        self.needs_full = false;
        self.frames += 1;
        trace!(frame = self.frames, bytes = self.out.len(), full, "frame written");
        Ok(())
    }

    fn flush_out(&mut self) -> Result<(), DisplayError> {
        self.sink
            .write_all(&self.out)
            .and_then(|()| self.sink.flush())
            .map_err(DisplayError::SinkWrite)
    }
}

/// One frame being drawn.
///
/// Dropping a frame without calling [`Frame::end`] discards it; nothing is
/// emitted and the front grid keeps the previous frame.
#[must_use = "a frame is only emitted by Frame::end"]
pub struct Frame<'a, W: Write> {
    display: &'a mut Display<W>,
}

impl<W: Write> Frame<'_, W> {
    pub fn draw_background(&mut self) {
        self.draw_net();
    }

    /// Dashed centre line.
    pub fn draw_net(&mut self) {
        let d = &mut *self.display;
        for &cell in d.layout.net_cells() {
            d.grid.set_cell(d.colors.net, cell);
        }
    }

    pub fn draw_paddle(&mut self, paddle: &Paddle) {
        let d = &mut *self.display;
        let color = match paddle.side {
            Side::Left => d.colors.paddle_left,
            Side::Right => d.colors.paddle_right,
        };
        for cell in layout::paddle_cells(paddle) {
            d.grid.set_cell(color, cell);
        }
    }

    pub fn draw_ball(&mut self, ball: &Ball) {
        let d = &mut *self.display;
        d.grid.set_cell(d.colors.ball, layout::ball_cell(ball));
    }

    /// Draw one digit with its glyph block centred on `center`.
    ///
    /// A value outside 0..=9 is logged and returned as
    /// [`DisplayError::InvalidDigitValue`]; the frame is left as it was.
    pub fn draw_digit(&mut self, value: i64, center: Coordinate) -> Result<(), DisplayError> {
        let cells = match layout::digit_cells(value, center) {
            Ok(cells) => cells,
            Err(err) => {
                warn!(value, x = center.x, y = center.y, "skipping digit: {err}");
                return Err(err);
            }
        };
        let d = &mut *self.display;
        for cell in cells {
            d.grid.set_cell(d.colors.text, cell);
        }
        Ok(())
    }

    /// Draw a non-negative number, digits evenly spaced around `center.x`.
    pub fn draw_score(&mut self, value: u64, center: Coordinate) -> Result<(), DisplayError> {
        let digits = self.display.layout.score_digit_centers(value, center);
        for (digit, digit_center) in digits {
            self.draw_digit(digit.into(), digit_center)?;
        }
        Ok(())
    }

    /// Win artwork centred on the surface, with the winner's number
    /// (1 for left, 2 for right) in its gap.
    pub fn draw_win_screen(&mut self, winner: Side) -> Result<(), DisplayError> {
        let d = &mut *self.display;
        for cell in d.layout.win_art_cells() {
            d.grid.set_cell(d.colors.text, cell);
        }
        let center = d.layout.center();
        self.draw_digit(i64::from(winner.index()) + 1, center)
    }

    /// Emit the frame to the sink and promote it to the front grid.
    pub fn end(self) -> Result<(), DisplayError> {
        self.display.finish_frame()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn display(width: u16, height: u16) -> Display<Vec<u8>> {
        Display::with_sink(Vec::new(), width, height, Palette::default(), RenderMode::Diff)
            .unwrap()
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn construction_resets_the_far_end() {
        let d = display(10, 5);
        assert_eq!(d.sink().as_slice(), b"\x1b[0m\x1b[2J\x1b[1;1H\x1b[?25l");
        assert_eq!(d.net_x(), 5);
    }

    #[test]
    fn construction_fails_on_incomplete_palette() {
        let palette = Palette::new(&[("net", 7)]);
        let result = Display::with_sink(Vec::new(), 10, 5, palette, RenderMode::Diff);
        assert!(matches!(result, Err(DisplayError::UnknownColorName(_))));
    }

    #[test]
    fn construction_fails_on_dead_sink() {
        let result = Display::with_sink(BrokenPipe, 10, 5, Palette::default(), RenderMode::Diff);
        assert!(matches!(result, Err(DisplayError::SinkWrite(_))));
    }

    #[test]
    fn end_promotes_back_to_front() {
        let mut d = display(20, 10);
        let mut frame = d.begin();
        frame.draw_ball(&Ball::new((3.0, 4.0)));
        frame.end().unwrap();

        let ball = d.colors().ball;
        assert_eq!(d.grid().front().get(Coordinate::new(3, 4)), Some(Some(ball)));
        assert_eq!(d.grid().front().filled_count(), 1);
        assert_eq!(d.frames_rendered(), 1);
    }

    #[test]
    fn begin_clears_previous_drawing() {
        let mut d = display(20, 10);
        let mut frame = d.begin();
        frame.draw_net();
        frame.end().unwrap();

        let frame = d.begin();
        drop(frame);
        assert_eq!(d.grid().back().filled_count(), 0);
    }

    #[test]
    fn paddle_colour_follows_side() {
        let mut d = display(20, 10);
        let mut frame = d.begin();
        frame.draw_paddle(&Paddle::new((1.0, 5.0), 2.0, Side::Left));
        frame.draw_paddle(&Paddle::new((18.0, 5.0), 2.0, Side::Right));
        frame.end().unwrap();

        let front = d.grid().front();
        assert_eq!(front.get(Coordinate::new(1, 4)), Some(Some(d.colors().paddle_left)));
        assert_eq!(front.get(Coordinate::new(18, 4)), Some(Some(d.colors().paddle_right)));
    }

    #[test]
    fn invalid_digit_is_reported_and_frame_continues() {
        let mut d = display(20, 10);
        let mut frame = d.begin();
        let err = frame.draw_digit(12, Coordinate::new(5, 5)).unwrap_err();
        assert!(matches!(err, DisplayError::InvalidDigitValue(12)));
        frame.draw_ball(&Ball::new((1.0, 1.0)));
        frame.end().unwrap();
        assert_eq!(d.grid().front().filled_count(), 1);
    }

    #[test]
    fn off_screen_entities_are_ignored() {
        let mut d = display(20, 10);
        let mut frame = d.begin();
        frame.draw_ball(&Ball::new((-4.0, 2.0)));
        frame.draw_paddle(&Paddle::new((25.0, 5.0), 4.0, Side::Right));
        frame.draw_paddle(&Paddle::new((0.0, 0.4), 4.0, Side::Left));
        frame.end().unwrap();
        // Only the two on-screen paddle rows remain.
        assert_eq!(d.grid().front().filled_count(), 2);
    }

    #[test]
    fn far_off_screen_entities_do_not_overflow() {
        let mut d = display(20, 10);
        let mut frame = d.begin();
        frame.draw_paddle(&Paddle::new((5.0, 1e10), 4.0, Side::Left));
        frame.draw_paddle(&Paddle::new((-1e12, -1e12), 4.0, Side::Right));
        frame.draw_ball(&Ball::new((f64::MAX, f64::MIN)));
        frame.draw_score(105, Coordinate::new(i32::MAX - 1, 3)).unwrap();
        frame.draw_score(u64::MAX, Coordinate::new(i32::MIN, i32::MIN)).unwrap();
        frame.end().unwrap();
        assert_eq!(d.grid().front().filled_count(), 0);
    }

    #[test]
    fn win_screen_overlays_winner_digit() {
        let mut d = display(80, 24);
        let mut frame = d.begin();
        frame.draw_win_screen(Side::Right).unwrap();
        frame.end().unwrap();

        let two = layout::digit_cells(2, Coordinate::new(40, 12)).unwrap().count();
        assert_eq!(d.grid().front().filled_count(), 105 + two);
    }

    #[test]
    fn write_failure_is_fatal_to_end() {
        let d = display(20, 10);
        // Replace the sink with one that fails from here on.
        let mut broken = Display {
            sink: BrokenPipe,
            palette: d.palette.clone(),
            colors: d.colors,
            layout: d.layout.clone(),
            grid: d.grid.clone(),
            mode: d.mode,
            needs_full: false,
            out: Vec::new(),
            frames: 0,
        };
        let mut frame = broken.begin();
        frame.draw_net();
        let err = frame.end().unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, DisplayError::SinkWrite(_)));
        // Nothing was promoted.
        assert_eq!(broken.grid().front().filled_count(), 0);
    }

    #[test]
    fn close_restores_cursor() {
        let d = display(10, 5);
        let out = d.close().unwrap();
        assert!(out.ends_with(b"\x1b[?25h\x1b[0m\x1b[1;1H"));
    }

    #[test]
    fn full_mode_clears_every_frame() {
        let mut d =
            Display::with_sink(Vec::new(), 10, 5, Palette::default(), RenderMode::Full).unwrap();
        for _ in 0..3 {
            d.sink_mut().clear();
            d.begin().end().unwrap();
            assert_eq!(d.sink().as_slice(), b"\x1b[2J");
        }
    }
}
