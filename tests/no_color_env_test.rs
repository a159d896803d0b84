//! Frame bytes must not change with the host's `NO_COLOR` setting.
//!
//! Kept in its own test binary: the variable is process-wide.

use pong_display::core::Palette;
use pong_display::term::{Display, RenderMode, ScreenMirror};
use pong_display::types::Ball;

#[test]
fn no_color_does_not_strip_palette_colours() {
    std::env::set_var("NO_COLOR", "1");

    let mut display =
        Display::with_sink(Vec::new(), 10, 6, Palette::default(), RenderMode::Full).unwrap();
    display.sink_mut().clear();
    let mut frame = display.begin();
    frame.draw_ball(&Ball::new((3.0, 4.0)));
    frame.end().unwrap();

    assert_eq!(
        display.sink().as_slice(),
        b"\x1b[2J\x1b[5;4H\x1b[48;5;15m \x1b[0m"
    );

    let mut mirror = ScreenMirror::new(10, 6);
    mirror.feed(display.sink());
    assert!(mirror.shows(display.grid().front(), display.palette()));
    assert_eq!(mirror.filled_count(), 1);
}
