//! Rendering module
//!
//! `Canvas` is the drawing capability a backend provides; `scene` composes
//! a full Pong frame out of those primitives.

pub mod scene;

use std::io;

use glam::Vec2;

use crate::driver::{Frame, FrameSink};

pub use scene::draw_frame;

/// RGB color
pub type Color = [u8; 3];

pub const WHITE: Color = [255, 255, 255];
pub const BLACK: Color = [0, 0, 0];

/// Drawing surface in playfield coordinates (pixels, y grows downward)
pub trait Canvas {
    /// Fill the whole surface
    fn fill(&mut self, color: Color);

    /// Filled axis-aligned rectangle with top-left corner `pos`
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);

    /// Filled circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Size of `text` once drawn
    fn text_size(&self, text: &str) -> Vec2;

    /// Draw `text` with its top-left corner at `pos`
    fn draw_text(&mut self, pos: Vec2, text: &str, color: Color);

    /// Show everything drawn since the last present
    fn present(&mut self) -> io::Result<()>;
}

/// Frame sink that draws each frame onto a canvas
#[derive(Debug)]
pub struct SceneRenderer<C> {
    canvas: C,
}

impl<C: Canvas> SceneRenderer<C> {
    pub fn new(canvas: C) -> Self {
        Self { canvas }
    }
}

impl<C: Canvas> FrameSink for SceneRenderer<C> {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        draw_frame(&mut self.canvas, frame)
    }
}
