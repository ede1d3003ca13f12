//! Collision detection and response
//!
//! Walls flip the vertical velocity. Paddles flip the horizontal velocity
//! and set a new vertical velocity from where on the paddle the ball landed.

use super::state::{Ball, Paddle, Playfield, Side};

/// Result of a collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    /// Ball touched the top or bottom wall
    pub wall: bool,
    /// Paddle the ball bounced off, if any
    pub paddle: Option<Side>,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self::default()
    }
}

/// Resolve wall and paddle contacts for the ball's current position.
///
/// Only the paddle the ball is travelling toward is tested: leftward motion
/// checks the left paddle, anything else checks the right paddle. This is
/// decided by the sign of `vel.x`, not by which half the ball is in.
pub fn handle_collision(
    ball: &mut Ball,
    left: &Paddle,
    right: &Paddle,
    playfield: &Playfield,
) -> CollisionResult {
    let mut result = CollisionResult::miss();

    if ball_wall_collision(ball, playfield) {
        ball.vel.y = -ball.vel.y;
        result.wall = true;
    }

    if ball.vel.x < 0.0 {
        if left.spans(ball.pos.y) && ball.pos.x - ball.radius <= left.right() {
            ball.vel.x = -ball.vel.x;
            ball.vel.y = calculate_y_vel(left, ball);
            result.paddle = Some(Side::Left);
        }
    } else if right.spans(ball.pos.y) && ball.pos.x + ball.radius >= right.pos.x {
        ball.vel.x = -ball.vel.x;
        ball.vel.y = calculate_y_vel(right, ball);
        result.paddle = Some(Side::Right);
    }

    result
}

/// True if the ball's edge reaches or crosses the top or bottom wall
#[inline]
pub fn ball_wall_collision(ball: &Ball, playfield: &Playfield) -> bool {
    ball.pos.y + ball.radius >= playfield.height || ball.pos.y - ball.radius <= 0.0
}

/// Vertical velocity after bouncing off `paddle`.
///
/// Linear in the offset from the paddle's middle: zero at the middle,
/// `-max_vel` at the top edge and `+max_vel` at the bottom edge (screen y
/// grows downward, so a hit on the upper half sends the ball up).
pub fn calculate_y_vel(paddle: &Paddle, ball: &Ball) -> f32 {
    let middle_y = paddle.middle_y();
    let difference_in_y = middle_y - ball.pos.y;
    let reduction_factor = (paddle.height / 2.0) / ball.max_vel;

    -(difference_in_y / reduction_factor)
}
