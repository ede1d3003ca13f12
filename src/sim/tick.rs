//! Fixed timestep simulation tick
//!
//! One call advances the match by exactly one frame: paddle input,
//! ball motion, collisions, then scoring and the win check.

use super::collision::handle_collision;
use super::state::{Direction, GamePhase, GameState, Paddle, Side};

/// Held controls sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    WallBounce,
    PaddleHit(Side),
    /// The given side won the point
    PointScored(Side),
    /// The given side reached the winning score
    MatchWon(Side),
}

/// Events produced by one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub events: Vec<GameEvent>,
}

impl TickOutcome {
    /// Side that scored this tick, if any
    pub fn point_scored(&self) -> Option<Side> {
        self.events.iter().find_map(|e| match e {
            GameEvent::PointScored(side) => Some(*side),
            _ => None,
        })
    }

    /// Side that won the match this tick, if any
    pub fn match_won(&self) -> Option<Side> {
        self.events.iter().find_map(|e| match e {
            GameEvent::MatchWon(side) => Some(*side),
            _ => None,
        })
    }
}

/// Move a paddle only where the step keeps it fully on the playfield.
///
/// Up and down are tested independently and in that order, so holding both
/// applies each one that stays in bounds.
pub fn apply_movement_gate(paddle: &mut Paddle, up: bool, down: bool, field_height: f32) {
    if up && paddle.pos.y - paddle.vel >= 0.0 {
        paddle.step(Direction::Up);
    }
    if down && paddle.pos.y + paddle.vel + paddle.height <= field_height {
        paddle.step(Direction::Down);
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    // Scored and MatchWon wait for `resume`
    if state.phase != GamePhase::Playing {
        return outcome;
    }

    state.time_ticks += 1;

    let height = state.playfield.height;
    apply_movement_gate(&mut state.left, input.left_up, input.left_down, height);
    apply_movement_gate(&mut state.right, input.right_up, input.right_down, height);

    state.ball.advance();

    let contact = handle_collision(&mut state.ball, &state.left, &state.right, &state.playfield);
    if contact.wall {
        log::debug!("Wall bounce at y={:.1}", state.ball.pos.y);
        outcome.events.push(GameEvent::WallBounce);
    }
    if let Some(side) = contact.paddle {
        log::debug!(
            "{} paddle hit, ball vel ({:.2}, {:.2})",
            side.as_str(),
            state.ball.vel.x,
            state.ball.vel.y
        );
        outcome.events.push(GameEvent::PaddleHit(side));
    }

    // Ball left the field: the opposite side takes the point
    let scorer = if state.ball.pos.x < 0.0 {
        Some(Side::Right)
    } else if state.ball.pos.x > state.playfield.width {
        Some(Side::Left)
    } else {
        None
    };

    if let Some(side) = scorer {
        state.score.award(side);
        state.reset_entities();
        state.phase = GamePhase::Scored(side);
        log::info!(
            "Point to {}: {} - {}",
            side.as_str(),
            state.score.left_score,
            state.score.right_score
        );
        outcome.events.push(GameEvent::PointScored(side));
    }

    if let Some(winner) = state.score.winner() {
        state.phase = GamePhase::MatchWon(winner);
        log::info!("{} player wins the match", winner.as_str());
        outcome.events.push(GameEvent::MatchWon(winner));
    }

    outcome
}

/// Leave a post-point or post-match phase and return to play.
///
/// After a match win this resets every entity and zeroes both scores.
pub fn resume(state: &mut GameState) {
    match state.phase {
        GamePhase::Playing => {}
        GamePhase::Scored(_) => state.phase = GamePhase::Playing,
        GamePhase::MatchWon(_) => {
            state.reset_entities();
            state.score.reset();
            state.phase = GamePhase::Playing;
            log::info!("New match");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use glam::Vec2;
    use proptest::prelude::*;

    fn new_state() -> GameState {
        GameState::new(&Settings::default())
    }

    #[test]
    fn test_gate_blocks_top_edge() {
        let mut paddle = Paddle::new(Vec2::new(10.0, 3.0), 20.0, 100.0, 4.0);
        apply_movement_gate(&mut paddle, true, false, 500.0);
        assert_eq!(paddle.pos.y, 3.0);

        paddle.pos.y = 4.0;
        apply_movement_gate(&mut paddle, true, false, 500.0);
        assert_eq!(paddle.pos.y, 0.0);
    }

    #[test]
    fn test_gate_blocks_bottom_edge() {
        let mut paddle = Paddle::new(Vec2::new(10.0, 397.0), 20.0, 100.0, 4.0);
        apply_movement_gate(&mut paddle, false, true, 500.0);
        assert_eq!(paddle.pos.y, 397.0);

        paddle.pos.y = 396.0;
        apply_movement_gate(&mut paddle, false, true, 500.0);
        assert_eq!(paddle.pos.y, 400.0);
    }

    #[test]
    fn test_gate_up_and_down_held_together() {
        let mut paddle = Paddle::new(Vec2::new(10.0, 200.0), 20.0, 100.0, 4.0);
        apply_movement_gate(&mut paddle, true, true, 500.0);
        assert_eq!(paddle.pos.y, 200.0);

        // At the top only the down step is allowed
        paddle.pos.y = 0.0;
        apply_movement_gate(&mut paddle, true, true, 500.0);
        assert_eq!(paddle.pos.y, 4.0);
    }

    #[test]
    fn test_tick_moves_ball_and_paddles() {
        let mut state = new_state();
        let input = TickInput {
            left_up: true,
            right_down: true,
            ..Default::default()
        };
        let outcome = tick(&mut state, &input);
        assert!(outcome.events.is_empty());
        assert_eq!(state.ball.pos, Vec2::new(355.0, 250.0));
        assert_eq!(state.left.pos.y, 196.0);
        assert_eq!(state.right.pos.y, 204.0);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_ball_past_left_edge_scores_right() {
        let mut state = new_state();
        state.ball.pos = Vec2::new(2.0, 50.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);
        state.left.pos.y = 300.0;

        let outcome = tick(&mut state, &TickInput::default());

        assert_eq!(outcome.point_scored(), Some(Side::Right));
        assert_eq!(outcome.match_won(), None);
        assert_eq!(state.score.right_score, 1);
        assert_eq!(state.score.left_score, 0);
        assert_eq!(state.phase, GamePhase::Scored(Side::Right));
        assert_eq!(state.ball.pos, state.ball.origin());
        assert_eq!(state.ball.vel, Vec2::new(5.0, 0.0));
        assert_eq!(state.left.pos, state.left.origin());
    }

    #[test]
    fn test_ball_past_right_edge_scores_left() {
        let mut state = new_state();
        state.ball.pos = Vec2::new(698.0, 50.0);
        state.ball.vel = Vec2::new(5.0, 0.0);

        let outcome = tick(&mut state, &TickInput::default());

        assert_eq!(outcome.point_scored(), Some(Side::Left));
        assert_eq!(state.score.left_score, 1);
        assert_eq!(state.ball.vel, Vec2::new(-5.0, 0.0));
    }

    #[test]
    fn test_scored_phase_freezes_until_resume() {
        let mut state = new_state();
        state.phase = GamePhase::Scored(Side::Left);
        let before = state.clone();

        let outcome = tick(&mut state, &TickInput::default());
        assert!(outcome.events.is_empty());
        assert_eq!(state, before);

        resume(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_winning_point_enters_match_won() {
        let mut state = new_state();
        state.score.left_score = 2;
        state.ball.pos = Vec2::new(698.0, 50.0);
        state.ball.vel = Vec2::new(5.0, 0.0);

        let outcome = tick(&mut state, &TickInput::default());

        assert_eq!(outcome.point_scored(), Some(Side::Left));
        assert_eq!(outcome.match_won(), Some(Side::Left));
        assert_eq!(state.phase, GamePhase::MatchWon(Side::Left));
        assert_eq!(state.score.left_score, 3);

        resume(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score.left_score, 0);
        assert_eq!(state.score.right_score, 0);
        // Point reset and match reset each flip the serve
        assert_eq!(state.ball.vel, Vec2::new(5.0, 0.0));
        assert_eq!(state.ball.pos, state.ball.origin());
    }

    #[test]
    fn test_simultaneous_threshold_goes_left() {
        let mut state = new_state();
        state.score.left_score = 3;
        state.score.right_score = 3;
        let outcome = tick(&mut state, &TickInput::default());
        assert_eq!(outcome.match_won(), Some(Side::Left));
    }

    #[test]
    fn test_rally_flat_returns() {
        let mut state = new_state();
        let idle = TickInput::default();

        // Ball travels right at (5, 0) until it meets the right paddle's middle
        let mut right_hit = false;
        for _ in 0..100 {
            let outcome = tick(&mut state, &idle);
            if outcome.events.contains(&GameEvent::PaddleHit(Side::Right)) {
                right_hit = true;
                break;
            }
        }
        assert!(right_hit);
        assert_eq!(state.ball.vel, Vec2::new(-5.0, 0.0));

        // Flat return meets the left paddle's middle as well
        let mut left_hit = false;
        for _ in 0..200 {
            let outcome = tick(&mut state, &idle);
            if outcome.events.contains(&GameEvent::PaddleHit(Side::Left)) {
                left_hit = true;
                break;
            }
        }
        assert!(left_hit);
    }

    #[test]
    fn test_paddle_hit_never_scores_same_tick() {
        // Every approach that reaches the left paddle face this tick
        for offset in 0..=10 {
            let mut state = new_state();
            let front = state.left.right() + state.ball.radius;
            state.ball.pos = Vec2::new(front + offset as f32 * 0.5, 250.0);
            state.ball.vel = Vec2::new(-state.ball.max_vel, 0.0);

            let outcome = tick(&mut state, &TickInput::default());

            assert_eq!(outcome.events, vec![GameEvent::PaddleHit(Side::Left)]);
            assert_eq!(state.phase, GamePhase::Playing);
            assert!(state.ball.pos.x > 0.0);
        }
    }

    #[test]
    fn test_rally_missed_paddle_scores() {
        let mut state = new_state();
        let idle = TickInput::default();
        // Move the left paddle out of the ball's path
        state.left.pos.y = 0.0;
        state.ball.vel = Vec2::new(-5.0, 0.0);

        let mut scored = None;
        for _ in 0..200 {
            let outcome = tick(&mut state, &idle);
            if let Some(side) = outcome.point_scored() {
                scored = Some(side);
                break;
            }
        }
        assert_eq!(scored, Some(Side::Right));
        assert_eq!(state.score.right_score, 1);
        assert_eq!(state.left.pos, state.left.origin());
        assert_eq!(state.right.pos, state.right.origin());
        assert_eq!(state.ball.pos, state.ball.origin());
    }

    proptest! {
        #[test]
        fn prop_gate_keeps_paddle_on_field(
            start in 0u32..=400,
            moves in prop::collection::vec((any::<bool>(), any::<bool>()), 0..300),
        ) {
            let mut paddle = Paddle::new(Vec2::new(10.0, start as f32), 20.0, 100.0, 4.0);
            for (up, down) in moves {
                apply_movement_gate(&mut paddle, up, down, 500.0);
                prop_assert!(paddle.pos.y >= 0.0);
                prop_assert!(paddle.bottom() <= 500.0);
            }
        }
    }
}
