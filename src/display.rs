/// Rendering layer: all terminal I/O lives here.
///
/// The engine hands over a [`Frame`] in world units. This module scales it
/// onto the terminal grid, rasterises each command into a cell buffer and
/// writes the buffer out. No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use temple_shooter::assets::{AssetRole, ImageHandle, ResourceProvider, Sprite};
use temple_shooter::entities::Rect;
use temple_shooter::high_scores::ScoreRecord;
use temple_shooter::render::{self, DrawCommand, Frame, Layer};

const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Cyan;
const C_STAR: Color = Color::DarkGrey;

// ── World ↔ terminal mapping ─────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    world_w: f32,
    world_h: f32,
}

impl Viewport {
    /// The last row is kept for the controls hint.
    pub fn new(cols: u16, rows: u16, world_w: f32, world_h: f32) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.saturating_sub(1).max(1),
            world_w,
            world_h,
        }
    }

    fn sx(&self) -> f32 {
        self.cols as f32 / self.world_w
    }

    fn sy(&self) -> f32 {
        self.rows as f32 / self.world_h
    }

    fn to_cell(&self, x: f32, y: f32) -> (i32, i32) {
        ((x * self.sx()).floor() as i32, (y * self.sy()).floor() as i32)
    }

    /// Centre of a terminal cell in world units.
    pub fn to_world(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) / self.sx(),
            (row as f32 + 0.5) / self.sy(),
        )
    }

    /// Cells covered by `rect`; anything visible gets at least one cell.
    fn cell_span(&self, rect: Rect) -> (i32, i32, i32, i32) {
        let (c0, r0) = self.to_cell(rect.x, rect.y);
        let c1 = ((rect.right() * self.sx()).ceil() as i32).max(c0 + 1);
        let r1 = ((rect.bottom() * self.sy()).ceil() as i32).max(r0 + 1);
        (c0, r0, c1, r1)
    }
}

// ── Terminal sprites ─────────────────────────────────────────────────────────

/// Resource provider for the terminal: every role gets a themed key that
/// [`glyph_for`] knows how to draw.
pub struct GlyphResources;

fn theme(level: u32) -> &'static str {
    match level {
        2 => "desert",
        3 => "ice",
        _ => "forest",
    }
}

impl ResourceProvider for GlyphResources {
    fn bitmap_for(&self, level: u32, role: AssetRole) -> Option<ImageHandle> {
        let (name, w, h) = match role {
            AssetRole::Background => ("background", 1080, 1920),
            AssetRole::Player => ("ship", 100, 100),
            AssetRole::Enemy => ("enemy", 80, 80),
            AssetRole::Bullet => ("bullet", 8, 16),
            AssetRole::Laser => ("laser", 6, 20),
            AssetRole::PowerUp(_) => ("crate", 40, 40),
            AssetRole::Explosion => ("explosion", 80, 80),
            // Drawn from text and fills instead.
            AssetRole::Boss | AssetRole::Buttons | AssetRole::GameOver | AssetRole::Win => {
                return None
            }
        };
        Some(ImageHandle::new(format!("{}/{}", theme(level), name), w, h))
    }
}

fn theme_color(theme: &str) -> Color {
    match theme {
        "desert" => Color::Yellow,
        "ice" => Color::Cyan,
        _ => Color::Green,
    }
}

fn glyph_for(sprite: &Sprite, layer: Layer) -> (char, Color) {
    match sprite {
        Sprite::Image(handle) => {
            let (theme, name) = handle
                .key
                .split_once('/')
                .unwrap_or(("forest", handle.key.as_str()));
            match name {
                "ship" => ('▲', Color::White),
                "enemy" => ('▼', theme_color(theme)),
                "bullet" => ('│', Color::Yellow),
                "laser" => ('║', Color::Cyan),
                "crate" => ('◆', Color::Magenta),
                "explosion" => ('✶', Color::DarkYellow),
                _ => ('?', Color::White),
            }
        }
        Sprite::Placeholder { color, .. } => {
            let ch = match layer {
                Layer::Player => '█',
                Layer::Bullets => '│',
                Layer::Enemies => '▓',
                Layer::PowerUps => '◆',
                Layer::Explosions => '*',
                _ => '▒',
            };
            (ch, to_term(*color))
        }
    }
}

fn to_term(c: render::Color) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

// ── Cell buffer ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::Reset,
};

struct Canvas {
    cols: i32,
    rows: i32,
    cells: Vec<Cell>,
}

impl Canvas {
    fn new(view: &Viewport) -> Self {
        let (cols, rows) = (view.cols as i32, view.rows as i32);
        Self {
            cols,
            rows,
            cells: vec![BLANK; (cols * rows) as usize],
        }
    }

    fn set(&mut self, col: i32, row: i32, cell: Cell) {
        if col >= 0 && row >= 0 && col < self.cols && row < self.rows {
            self.cells[(row * self.cols + col) as usize] = cell;
        }
    }

    fn fill(&mut self, span: (i32, i32, i32, i32), cell: Cell) {
        let (c0, r0, c1, r1) = span;
        for row in r0..r1 {
            for col in c0..c1 {
                self.set(col, row, cell);
            }
        }
    }

    fn text(&mut self, col: i32, row: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.set(col + i as i32, row, Cell { ch, fg });
        }
    }
}

fn rasterise(canvas: &mut Canvas, view: &Viewport, layer: Layer, command: &DrawCommand) {
    match command {
        DrawCommand::Clear(_) => canvas.cells.fill(BLANK),
        DrawCommand::Blit { sprite, rect } if layer == Layer::Background => {
            // Sparse starfield anchored to the tile so it scrolls with it.
            let (c0, r0, c1, r1) = view.cell_span(*rect);
            for row in r0..r1 {
                for col in c0..c1 {
                    let local = row - r0;
                    if (local * 7 + col * 13) % 29 == 0 {
                        let fg = match sprite {
                            Sprite::Placeholder { color, .. } => to_term(*color),
                            Sprite::Image(_) => C_STAR,
                        };
                        canvas.set(col, row, Cell { ch: '·', fg });
                    }
                }
            }
        }
        DrawCommand::Blit { sprite, rect } => {
            let (ch, fg) = glyph_for(sprite, layer);
            canvas.fill(view.cell_span(*rect), Cell { ch, fg });
        }
        DrawCommand::FillRect { rect, color } => {
            let ch = if layer == Layer::Overlay && *color == render::Color::BLACK {
                ' '
            } else {
                '░'
            };
            canvas.fill(view.cell_span(*rect), Cell { ch, fg: to_term(*color) });
        }
        DrawCommand::Circle { cx, cy, radius, color } => {
            let steps = 32;
            for i in 0..steps {
                let a = i as f32 / steps as f32 * std::f32::consts::TAU;
                let (col, row) = view.to_cell(cx + radius * a.cos(), cy + radius * a.sin());
                canvas.set(col, row, Cell { ch: '○', fg: to_term(*color) });
            }
        }
        DrawCommand::Text { x, y, color, text, .. } => {
            let (col, row) = view.to_cell(*x, *y);
            // HUD text is anchored left, everything else centred.
            let col = if layer == Layer::Hud {
                col
            } else {
                col - text.chars().count() as i32 / 2
            };
            canvas.text(col, row, text, to_term(*color));
        }
    }
}

// ── Public entry points ──────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &Frame, view: &Viewport) -> std::io::Result<()> {
    let mut canvas = Canvas::new(view);
    for (layer, command) in frame.iter() {
        rasterise(&mut canvas, view, *layer, command);
    }

    let mut current = Color::Reset;
    out.queue(style::SetForegroundColor(current))?;
    for row in 0..canvas.rows {
        out.queue(cursor::MoveTo(0, row as u16))?;
        let start = (row * canvas.cols) as usize;
        let mut line = String::with_capacity(canvas.cols as usize);
        for cell in &canvas.cells[start..start + canvas.cols as usize] {
            if cell.fg != current {
                out.queue(Print(std::mem::take(&mut line)))?;
                out.queue(style::SetForegroundColor(cell.fg))?;
                current = cell.fg;
            }
            line.push(cell.ch);
        }
        out.queue(Print(line))?;
    }

    draw_controls_hint(out, view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows))?;
    out.flush()?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.queue(Print(
        "Mouse / ← ↑ → ↓ : Move + Shoot   P : Pause   R M H : Buttons   Q : Quit",
    ))?;
    Ok(())
}

/// Title screen.
pub fn draw_menu<W: Write>(out: &mut W, best: u32) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let lines: &[(&str, Color)] = &[
        ("▲  TEMPLE  SHOOTER  ▲", C_TITLE),
        ("", C_HINT),
        ("[Enter] Start", Color::White),
        ("[H]     High scores", Color::White),
        ("[Q]     Quit", Color::White),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        let row = cy.saturating_sub(4) + i as u16;
        out.queue(cursor::MoveTo(
            cx.saturating_sub(text.chars().count() as u16 / 2),
            row,
        ))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*text))?;
    }

    if best > 0 {
        let best_line = format!("Best Score: {}", best);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(best_line.chars().count() as u16 / 2),
            cy + 3,
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&best_line))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

pub fn draw_high_scores<W: Write>(out: &mut W, records: &[ScoreRecord]) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let top = (height / 2).saturating_sub(6);

    let title = "★  HIGH  SCORES  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        top,
    ))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;

    if records.is_empty() {
        out.queue(cursor::MoveTo(cx.saturating_sub(7), top + 2))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print("No scores yet"))?;
    }
    for (i, record) in records.iter().enumerate() {
        let line = format!("{}. {:>6}   level {}", i + 1, record.score, record.level);
        out.queue(cursor::MoveTo(cx.saturating_sub(11), top + 2 + i as u16))?;
        out.queue(style::SetForegroundColor(if i == 0 {
            Color::Yellow
        } else {
            Color::White
        }))?;
        out.queue(Print(line))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(14), top + 12))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("C : Clear   any other key : Back"))?;
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
