//! Game state and core simulation types

use glam::Vec2;

use crate::consts::*;
use crate::settings::Settings;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Vertical paddle movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// A point was just scored by the given side; entities are already reset
    Scored(Side),
    /// The given side reached the winning score; awaiting the full reset
    MatchWon(Side),
}

/// Fixed bounds of the playing area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Distance covered by one step (pixels per tick)
    pub vel: f32,
    /// Spawn position, restored on reset
    origin: Vec2,
}

impl Paddle {
    pub fn new(pos: Vec2, width: f32, height: f32, vel: f32) -> Self {
        Self {
            pos,
            width,
            height,
            vel,
            origin: pos,
        }
    }

    /// Move one step. Bounds are the caller's concern.
    pub fn step(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.pos.y -= self.vel,
            Direction::Down => self.pos.y += self.vel,
        }
    }

    /// Restore the spawn position
    pub fn reset(&mut self) {
        self.pos = self.origin;
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Vertical center of the paddle
    #[inline]
    pub fn middle_y(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    /// x coordinate of the right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    /// True if `y` lies within the paddle's vertical span (inclusive)
    #[inline]
    pub fn spans(&self, y: f32) -> bool {
        y >= self.pos.y && y <= self.bottom()
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Horizontal speed, and the bound on the vertical component after a paddle hit
    pub max_vel: f32,
    /// Spawn position, restored on reset
    origin: Vec2,
}

impl Ball {
    /// Create a ball at `pos` serving to the right
    pub fn new(pos: Vec2, radius: f32, max_vel: f32) -> Self {
        Self {
            pos,
            vel: Vec2::new(max_vel, 0.0),
            radius,
            max_vel,
            origin: pos,
        }
    }

    /// Integrate one tick of motion
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Return to spawn, flip horizontal direction, drop vertical velocity.
    ///
    /// The flip is unconditional, so the serve after a point heads opposite
    /// to the way the ball was travelling when the point ended.
    pub fn reset(&mut self) {
        self.pos = self.origin;
        self.vel.x = -self.vel.x;
        self.vel.y = 0.0;
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }
}

/// Scores and win threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchState {
    pub left_score: u32,
    pub right_score: u32,
    pub winning_score: u32,
}

impl MatchState {
    pub fn new(winning_score: u32) -> Self {
        Self {
            left_score: 0,
            right_score: 0,
            winning_score,
        }
    }

    /// Give one point to `side`
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left_score += 1,
            Side::Right => self.right_score += 1,
        }
    }

    /// Side that has reached the winning score, if any.
    ///
    /// Left is checked first, so left wins if both have reached it.
    pub fn winner(&self) -> Option<Side> {
        if self.left_score >= self.winning_score {
            Some(Side::Left)
        } else if self.right_score >= self.winning_score {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Zero both scores together
    pub fn reset(&mut self) {
        self.left_score = 0;
        self.right_score = 0;
    }
}

/// Complete game state, owned exclusively by the driver
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub playfield: Playfield,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub score: MatchState,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Spawn paddles at their side walls, vertically centered, and the ball at the center.
    ///
    /// Geometry and speeds come from `crate::consts`; settings only supply
    /// the winning score.
    pub fn new(settings: &Settings) -> Self {
        let playfield = Playfield {
            width: WIDTH,
            height: HEIGHT,
        };
        // Spawn rows snap to whole pixels
        let paddle_y = (HEIGHT / 2.0).floor() - (PADDLE_HEIGHT / 2.0).floor();
        let left = Paddle::new(
            Vec2::new(PADDLE_MARGIN, paddle_y),
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
            PADDLE_VEL,
        );
        let right = Paddle::new(
            Vec2::new(WIDTH - PADDLE_MARGIN - PADDLE_WIDTH, paddle_y),
            PADDLE_WIDTH,
            PADDLE_HEIGHT,
            PADDLE_VEL,
        );
        let ball = Ball::new(playfield.center().floor(), BALL_RADIUS, BALL_MAX_VEL);

        Self {
            playfield,
            left,
            right,
            ball,
            score: MatchState::new(settings.winning_score),
            phase: GamePhase::Playing,
            time_ticks: 0,
        }
    }

    /// Reset ball and both paddles to spawn. Scores are untouched.
    pub fn reset_entities(&mut self) {
        self.ball.reset();
        self.left.reset();
        self.right.reset();
    }
}
