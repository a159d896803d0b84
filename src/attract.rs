//! Attract mode: a self-playing match that drives the display.
//!
//! The rules are minimal: enough to put every draw primitive on screen.

use std::io::Write;

use pong_display::core::DisplayError;
use pong_display::term::Frame;
use pong_display::types::{Ball, Coordinate, Paddle, Side};

const PADDLE_SIZE: f64 = 4.0;
const PADDLE_SPEED: f64 = 0.5;
const PADDLE_INSET: f64 = 2.0;
const SERVE_VELOCITY: (f64, f64) = (1.0, 0.35);
const MAX_DEFLECTION: f64 = 0.8;
const WIN_HOLD_FRAMES: u32 = 90;

#[derive(Debug, Clone)]
pub struct Attract {
    width: f64,
    height: f64,
    ball: (f64, f64),
    velocity: (f64, f64),
    paddles: [f64; 2],
    scores: [u64; 2],
    win_score: u64,
    winner: Option<Side>,
    hold: u32,
}

impl Attract {
    pub fn new(width: u16, height: u16, win_score: u64) -> Self {
        let mut game = Self {
            width: width as f64,
            height: height as f64,
            ball: (0.0, 0.0),
            velocity: SERVE_VELOCITY,
            paddles: [height as f64 / 2.0; 2],
            scores: [0; 2],
            win_score: win_score.max(1),
            winner: None,
            hold: 0,
        };
        game.serve(Side::Right);
        game
    }

    pub fn scores(&self) -> [u64; 2] {
        self.scores
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    fn paddle_x(&self, side: Side) -> f64 {
        match side {
            Side::Left => PADDLE_INSET,
            Side::Right => self.width - 1.0 - PADDLE_INSET,
        }
    }

    fn serve(&mut self, toward: Side) {
        self.ball = (self.width / 2.0, self.height / 2.0);
        let dx = match toward {
            Side::Left => -SERVE_VELOCITY.0,
            Side::Right => SERVE_VELOCITY.0,
        };
        self.velocity = (dx, SERVE_VELOCITY.1);
    }

    /// Advance one frame.
    pub fn step(&mut self) {
        if self.winner.is_some() {
            self.hold = self.hold.saturating_sub(1);
            if self.hold == 0 {
                self.winner = None;
                self.scores = [0; 2];
                self.serve(Side::Right);
            }
            return;
        }

        self.move_paddles();

        self.ball.0 += self.velocity.0;
        self.ball.1 += self.velocity.1;

        let bottom = (self.height - 1.0).max(0.0);
        if self.ball.1 < 0.0 {
            self.ball.1 = -self.ball.1;
            self.velocity.1 = -self.velocity.1;
        } else if self.ball.1 > bottom {
            self.ball.1 = 2.0 * bottom - self.ball.1;
            self.velocity.1 = -self.velocity.1;
        }

        for side in [Side::Left, Side::Right] {
            self.deflect(side);
        }

        if self.ball.0 < 0.0 {
            self.point(Side::Right);
        } else if self.ball.0 > self.width - 1.0 {
            self.point(Side::Left);
        }
    }

    fn move_paddles(&mut self) {
        let half = PADDLE_SIZE / 2.0;
        let heading = if self.velocity.0 < 0.0 {
            Side::Left
        } else {
            Side::Right
        };
        for side in [Side::Left, Side::Right] {
            let i = side.index() as usize;
            // The paddle under attack tracks the ball only in its own third
            // of the court; the other one drifts back to the middle.
            let near = (self.ball.0 - self.paddle_x(side)).abs() < self.width / 3.0;
            let target = if side == heading && near {
                self.ball.1
            } else {
                self.height / 2.0
            };
            let delta = (target - self.paddles[i]).clamp(-PADDLE_SPEED, PADDLE_SPEED);
            self.paddles[i] = (self.paddles[i] + delta).clamp(half, (self.height - half).max(half));
        }
    }

    fn deflect(&mut self, side: Side) {
        let x = self.paddle_x(side);
        let i = side.index() as usize;
        let approaching = match side {
            Side::Left => self.velocity.0 < 0.0 && self.ball.0 <= x + 0.5 && self.ball.0 >= x - 0.5,
            Side::Right => self.velocity.0 > 0.0 && self.ball.0 >= x - 0.5 && self.ball.0 <= x + 0.5,
        };
        let offset = self.ball.1 - self.paddles[i];
        if approaching && offset.abs() <= PADDLE_SIZE / 2.0 {
            self.velocity.0 = -self.velocity.0;
            self.velocity.1 = offset / (PADDLE_SIZE / 2.0) * MAX_DEFLECTION;
        }
    }

    fn point(&mut self, scorer: Side) {
        let i = scorer.index() as usize;
        self.scores[i] += 1;
        tracing::info!(side = scorer.as_str(), score = self.scores[i], "point");
        if self.scores[i] >= self.win_score {
            self.winner = Some(scorer);
            self.hold = WIN_HOLD_FRAMES;
        } else {
            self.serve(scorer.opposite());
        }
    }

    /// Issue this frame's draw calls.
    pub fn draw<W: Write>(&self, frame: &mut Frame<'_, W>) -> Result<(), DisplayError> {
        if let Some(winner) = self.winner {
            return frame.draw_win_screen(winner);
        }

        frame.draw_background();
        for side in [Side::Left, Side::Right] {
            let paddle = Paddle::new(
                (self.paddle_x(side), self.paddles[side.index() as usize]),
                PADDLE_SIZE,
                side,
            );
            frame.draw_paddle(&paddle);
        }
        frame.draw_ball(&Ball::new(self.ball));

        let quarter = (self.width / 4.0) as i32;
        frame.draw_score(self.scores[0], Coordinate::new(quarter, 3))?;
        frame.draw_score(self.scores[1], Coordinate::new(quarter * 3, 3))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ball_stays_between_top_and_bottom() {
        let mut game = Attract::new(80, 24, 100);
        for _ in 0..2_000 {
            game.step();
            assert!((0.0..=23.0).contains(&game.ball.1), "ball at {:?}", game.ball);
        }
    }

    #[test]
    fn missed_ball_scores_for_the_other_side() {
        let mut game = Attract::new(80, 24, 5);
        game.ball = (0.5, 2.0);
        game.velocity = (-1.0, 0.0);
        game.paddles = [20.0, 12.0];
        game.step();
        assert_eq!(game.scores(), [0, 1]);
        // Served toward the side that conceded.
        assert!(game.velocity.0 < 0.0);
    }

    #[test]
    fn paddle_in_reach_returns_the_ball() {
        let mut game = Attract::new(80, 24, 5);
        game.ball = (3.0, 12.0);
        game.velocity = (-1.0, 0.0);
        game.paddles = [12.0, 12.0];
        game.step();
        assert!(game.velocity.0 > 0.0);
        assert_eq!(game.scores(), [0, 0]);
    }

    #[test]
    fn reaching_win_score_holds_then_restarts() {
        let mut game = Attract::new(80, 24, 1);
        game.ball = (78.5, 2.0);
        game.velocity = (1.0, 0.0);
        game.paddles = [12.0, 20.0];
        game.step();
        assert_eq!(game.winner(), Some(Side::Left));

        for _ in 0..WIN_HOLD_FRAMES {
            game.step();
        }
        assert_eq!(game.winner(), None);
        assert_eq!(game.scores(), [0, 0]);
    }
}
