//! Pong display runner (default binary).
//!
//! Opens the configured display (terminal or serial) and plays an attract
//! mode match on it. Quit with `q`, Esc or Ctrl-C.

mod attract;
mod cli;
mod telemetry;

use std::io::{self, IsTerminal};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::{error, info};

use pong_display::term::{Display, Sink};

use attract::Attract;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _telemetry = telemetry::init_tracing(&cli.log_level);

    let config = cli.display_config();
    let mut renderer = Display::open(&config).context("failed to open display")?;
    info!(
        width = renderer.width(),
        height = renderer.height(),
        output = ?config.effective_output(),
        "display open"
    );

    let poll_input = io::stdin().is_terminal() && terminal::enable_raw_mode().is_ok();

    let result = run(&mut renderer, &cli, poll_input);
    if let Err(err) = &result {
        error!("render loop stopped: {err:#}");
    }

    // Always try to restore terminal state.
    if poll_input {
        let _ = terminal::disable_raw_mode();
    }
    let closed = renderer.close().map(drop);

    result?;
    closed.context("failed to restore display")?;
    Ok(())
}

fn run(renderer: &mut Display<Sink>, cli: &Cli, poll_input: bool) -> Result<()> {
    let mut game = Attract::new(renderer.width(), renderer.height(), cli.win_score);
    let frame_duration = Duration::from_secs_f64(1.0 / cli.fps.max(1) as f64);

    loop {
        let started = Instant::now();

        let mut frame = renderer.begin();
        if let Err(err) = game.draw(&mut frame) {
            if err.is_fatal() {
                return Err(err.into());
            }
        }
        frame.end().context("failed to emit frame")?;

        if cli.frames.is_some_and(|n| renderer.frames_rendered() >= n) {
            info!(frames = renderer.frames_rendered(), "frame limit reached");
            return Ok(());
        }

        game.step();

        let timeout = frame_duration.saturating_sub(started.elapsed());
        if poll_input {
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if should_quit(key) {
                        return Ok(());
                    }
                }
            }
        } else {
            thread::sleep(timeout);
        }
    }
}

fn should_quit(key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pong_display::core::Palette;
    use pong_display::term::RenderMode;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn quit_keys() {
        assert!(should_quit(press(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(should_quit(press(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(should_quit(press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(press(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn attract_frames_drive_a_renderer() {
        let mut renderer =
            Display::with_sink(Vec::new(), 80, 24, Palette::default(), RenderMode::Diff).unwrap();
        let mut game = Attract::new(renderer.width(), renderer.height(), 3);
        for _ in 0..50 {
            let mut frame = renderer.begin();
            game.draw(&mut frame).unwrap();
            frame.end().unwrap();
            game.step();
        }
        info!(frames = renderer.frames_rendered(), "rendered");
        assert_eq!(renderer.frames_rendered(), 50);
    }
}
