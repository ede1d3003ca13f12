//! Pong scene composition

use std::io;

use glam::Vec2;

use super::{BLACK, Canvas, WHITE};
use crate::driver::Frame;
use crate::sim::{Paddle, Playfield};

/// Top of the score labels
const SCORE_TOP: f32 = 20.0;
/// Width of a center line dash
const DASH_WIDTH: f32 = 10.0;
/// First dash row
const DASH_START: usize = 10;

/// Draw a complete frame and present it
pub fn draw_frame<C: Canvas + ?Sized>(canvas: &mut C, frame: &Frame<'_>) -> io::Result<()> {
    let state = frame.state;
    let field = &state.playfield;

    canvas.fill(BLACK);

    draw_score(canvas, field.width / 4.0, state.score.left_score);
    draw_score(canvas, field.width * 0.75, state.score.right_score);

    draw_paddle(canvas, &state.left);
    draw_paddle(canvas, &state.right);

    draw_center_line(canvas, field);

    canvas.fill_circle(state.ball.pos, state.ball.radius, WHITE);

    if let Some(text) = frame.announcement {
        let size = canvas.text_size(text);
        let pos = field.center() - size / 2.0;
        canvas.draw_text(pos.floor(), text, WHITE);
    }

    canvas.present()
}

/// Score label horizontally centered on `center_x`
fn draw_score<C: Canvas + ?Sized>(canvas: &mut C, center_x: f32, score: u32) {
    let text = score.to_string();
    let width = canvas.text_size(&text).x;
    canvas.draw_text(
        Vec2::new((center_x - width / 2.0).floor(), SCORE_TOP),
        &text,
        WHITE,
    );
}

fn draw_paddle<C: Canvas + ?Sized>(canvas: &mut C, paddle: &Paddle) {
    canvas.fill_rect(paddle.pos, Vec2::new(paddle.width, paddle.height), WHITE);
}

/// Dashes of height `height / 20` down the middle, skipping odd rows
fn draw_center_line<C: Canvas + ?Sized>(canvas: &mut C, field: &Playfield) {
    let step = (field.height / 20.0).floor().max(1.0) as usize;
    let x = (field.width / 2.0).floor() - DASH_WIDTH / 2.0;
    for row in (DASH_START..field.height as usize).step_by(step) {
        if row % 2 == 1 {
            continue;
        }
        canvas.fill_rect(
            Vec2::new(x, row as f32),
            Vec2::new(DASH_WIDTH, step as f32),
            WHITE,
        );
    }
}
