//! Terminal backend
//!
//! `TerminalSession` puts the terminal into raw, alternate-screen mode and
//! restores it on drop. `TerminalCanvas` scales the playfield onto the
//! character grid and redraws it with crossterm.

use std::io::{self, Stdout, Write};
use std::ops::Range;

use crossterm::cursor::{self, MoveTo};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use crossterm::{execute, queue};
use glam::Vec2;

use crate::renderer::{BLACK, Canvas, Color};

const BLOCK: char = '█';

/// Raw-mode terminal for the lifetime of the game
#[derive(Debug)]
pub struct TerminalSession {
    keyboard_enhanced: bool,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen
    pub fn enter(title: &str) -> io::Result<Self> {
        // Built first so a failure below still restores the terminal
        let mut session = Self {
            keyboard_enhanced: false,
        };
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All),
            SetTitle(title)
        )?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            session.keyboard_enhanced = true;
        }
        log::debug!(
            "Terminal session started (key release events: {})",
            session.keyboard_enhanced
        );
        Ok(session)
    }

    /// Whether key release events will be reported
    pub fn reports_key_release(&self) -> bool {
        self.keyboard_enhanced
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.keyboard_enhanced {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(stdout, ResetColor, LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    fn blank(bg: Color) -> Self {
        Self { ch: ' ', fg: bg, bg }
    }
}

/// Character-grid canvas over any writer
#[derive(Debug)]
pub struct TerminalCanvas<W: Write> {
    out: W,
    /// Playfield size in pixels
    field: Vec2,
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
    /// Re-read the terminal size on every present
    follow_terminal: bool,
}

impl TerminalCanvas<Stdout> {
    /// Canvas filling the current terminal, resizing along with it
    pub fn stdout(field: Vec2) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut canvas = Self::new(io::stdout(), field, cols, rows);
        canvas.follow_terminal = true;
        Ok(canvas)
    }
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, field: Vec2, cols: u16, rows: u16) -> Self {
        let cols = cols.max(1) as usize;
        let rows = rows.max(1) as usize;
        Self {
            out,
            field,
            cols,
            rows,
            cells: vec![Cell::blank(BLACK); cols * rows],
            follow_terminal: false,
        }
    }

    /// Character at a grid position
    pub fn char_at(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col].ch)
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1) as usize;
        self.rows = rows.max(1) as usize;
        self.cells = vec![Cell::blank(BLACK); self.cols * self.rows];
    }

    /// Pixels per character cell
    fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.field.x / self.cols as f32,
            self.field.y / self.rows as f32,
        )
    }

    fn set(&mut self, col: usize, row: usize, ch: char, fg: Color) {
        let cell = &mut self.cells[row * self.cols + col];
        cell.ch = ch;
        cell.fg = fg;
    }

    fn poll_size(&mut self) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        if cols as usize != self.cols || rows as usize != self.rows {
            log::debug!("Terminal resized to {cols}x{rows}");
            self.resize(cols, rows);
            queue!(self.out, Clear(ClearType::All))?;
        }
        Ok(())
    }
}

/// Cells whose centers fall in `[start, start + len)`, at least one
fn span(start: f32, len: f32, cell: f32, limit: usize) -> Range<usize> {
    let first = (start / cell).round().max(0.0) as usize;
    let last = ((start + len) / cell).round().max(0.0) as usize;
    let range = first.min(limit)..last.min(limit);
    if range.is_empty() {
        let mid = ((start + len / 2.0) / cell).floor();
        if mid < 0.0 || mid as usize >= limit {
            return 0..0;
        }
        return mid as usize..mid as usize + 1;
    }
    range
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn fill(&mut self, color: Color) {
        self.cells.fill(Cell::blank(color));
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        let cell = self.cell_size();
        let cols = span(pos.x, size.x, cell.x, self.cols);
        let rows = span(pos.y, size.y, cell.y, self.rows);
        for row in rows {
            for col in cols.clone() {
                self.set(col, row, BLOCK, color);
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let cell = self.cell_size();
        let cols = span(center.x - radius, 2.0 * radius, cell.x, self.cols);
        let rows = span(center.y - radius, 2.0 * radius, cell.y, self.rows);
        let mut drawn = false;
        for row in rows.clone() {
            for col in cols.clone() {
                let cell_center = Vec2::new(col as f32 + 0.5, row as f32 + 0.5) * cell;
                if cell_center.distance(center) <= radius {
                    self.set(col, row, BLOCK, color);
                    drawn = true;
                }
            }
        }
        // Ball smaller than a cell: mark the cell it sits in
        if !drawn && !cols.is_empty() && !rows.is_empty() {
            let col = ((center.x / cell.x) as usize).clamp(cols.start, cols.end - 1);
            let row = ((center.y / cell.y) as usize).clamp(rows.start, rows.end - 1);
            self.set(col, row, BLOCK, color);
        }
    }

    fn text_size(&self, text: &str) -> Vec2 {
        let cell = self.cell_size();
        Vec2::new(text.chars().count() as f32 * cell.x, cell.y)
    }

    fn draw_text(&mut self, pos: Vec2, text: &str, color: Color) {
        let cell = self.cell_size();
        if pos.y < 0.0 {
            return;
        }
        let row = (pos.y / cell.y).round() as usize;
        if row >= self.rows {
            return;
        }
        let start = (pos.x / cell.x).round().max(0.0) as usize;
        for (col, ch) in (start..self.cols).zip(text.chars()) {
            self.set(col, row, ch, color);
        }
    }

    fn present(&mut self) -> io::Result<()> {
        let mut colors: Option<(Color, Color)> = None;
        for row in 0..self.rows {
            queue!(self.out, MoveTo(0, row as u16))?;
            for col in 0..self.cols {
                let cell = self.cells[row * self.cols + col];
                if colors != Some((cell.fg, cell.bg)) {
                    queue!(
                        self.out,
                        SetForegroundColor(term_color(cell.fg)),
                        SetBackgroundColor(term_color(cell.bg))
                    )?;
                    colors = Some((cell.fg, cell.bg));
                }
                queue!(self.out, Print(cell.ch))?;
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()?;

        if self.follow_terminal {
            self.poll_size()?;
        }
        Ok(())
    }
}

fn term_color([r, g, b]: Color) -> style::Color {
    style::Color::Rgb { r, g, b }
}
