//! Rendering layer. All terminal drawing lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only translates
//! state into terminal commands. Play-field pixels map onto terminal cells
//! at a fixed `CELL_WIDTH_PX` x `CELL_HEIGHT_PX`.

use std::f32::consts::TAU;
use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use galaxy_defender::compute::GameState;
use galaxy_defender::config::{BUTTON_ROWS, CELL_HEIGHT_PX, CELL_WIDTH_PX, HUD_ROWS};
use galaxy_defender::entities::{
    Bullet, Enemy, EnemyVariant, Particle, Player, Rgb, Star, BULLET_COLOR, PLAYER_COLOR,
};
use galaxy_defender::game::{OverlayController, RenderAdapter};
use galaxy_defender::input::{
    overlay_origin, TouchButton, OVERLAY_INNER_WIDTH, RESTART_LABEL,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_STAR_DIM: Color = Color::DarkGrey;
const C_STAR_BRIGHT: Color = Color::White;
const C_BUTTON: Color = Color::Grey;
const C_OVERLAY: Color = Color::White;
const C_OVERLAY_ACTION: Color = Color::Rgb { r: 0x00, g: 0xFF, b: 0xAA };
const WING: Rgb = Rgb::from_hex(0x0088FF);
const FLAME_HOT: Rgb = Rgb::from_hex(0xFF5500);
const FLAME_TIP: Rgb = Rgb::from_hex(0xFFAA00);

fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

/// Field-clipped drawing surface. Rows are field rows; the HUD offset is
/// added when writing.
struct Canvas<'a, W: Write> {
    out: &'a mut W,
    cols: i32,
    rows: i32,
}

impl<'a, W: Write> Canvas<'a, W> {
    fn new(out: &'a mut W, state: &GameState, term_cols: u16, term_rows: u16) -> Self {
        let play_rows = term_rows.saturating_sub(HUD_ROWS + BUTTON_ROWS) as i32;
        Self {
            out,
            cols: ((state.width / CELL_WIDTH_PX) as i32).min(term_cols as i32),
            rows: ((state.height / CELL_HEIGHT_PX) as i32).min(play_rows),
        }
    }

    /// Print `text` starting at a field cell. Spaces are transparent.
    fn put(&mut self, col: i32, row: i32, text: &str, color: Color) -> io::Result<()> {
        if row < 0 || row >= self.rows {
            return Ok(());
        }
        self.out.queue(style::SetForegroundColor(color))?;
        for (i, ch) in text.chars().enumerate() {
            let c = col + i as i32;
            if ch == ' ' || c < 0 || c >= self.cols {
                continue;
            }
            self.out
                .queue(cursor::MoveTo(c as u16, (row + HUD_ROWS as i32) as u16))?;
            self.out.queue(Print(ch))?;
        }
        Ok(())
    }
}

/// Field cell containing a play-field point.
fn cell(x: f32, y: f32) -> (i32, i32) {
    (
        (x / CELL_WIDTH_PX).floor() as i32,
        (y / CELL_HEIGHT_PX).floor() as i32,
    )
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Anything the renderer knows how to paint.
trait Sprite {
    fn paint<W: Write>(&self, canvas: &mut Canvas<'_, W>) -> io::Result<()>;
}

impl Sprite for Star {
    fn paint<W: Write>(&self, canvas: &mut Canvas<'_, W>) -> io::Result<()> {
        let (col, row) = cell(self.x, self.y);
        if self.size < 2.0 {
            canvas.put(col, row, "·", C_STAR_DIM)
        } else {
            canvas.put(col, row, ".", C_STAR_BRIGHT)
        }
    }
}

impl Sprite for Particle {
    fn paint<W: Write>(&self, canvas: &mut Canvas<'_, W>) -> io::Result<()> {
        let (col, row) = cell(self.x, self.y);
        // Fades out as it burns down.
        let glyph = match self.life {
            l if l > 30 => "*",
            l if l > 15 => "+",
            _ => ".",
        };
        canvas.put(col, row, glyph, rgb(self.color))
    }
}

impl Sprite for Player {
    fn paint<W: Write>(&self, canvas: &mut Canvas<'_, W>) -> io::Result<()> {
        let (cx, _) = self.center();
        let (center_col, top) = cell(cx, self.y);
        let left = center_col - 3;

        canvas.put(left, top, "  /\\  ", rgb(PLAYER_COLOR))?;
        canvas.put(left, top + 1, " /██\\ ", rgb(PLAYER_COLOR))?;
        canvas.put(left, top + 2, "<", rgb(WING))?;
        canvas.put(left + 1, top + 2, "█▀▀█", rgb(PLAYER_COLOR))?;
        canvas.put(left + 5, top + 2, ">", rgb(WING))?;

        if self.thruster > 0 {
            canvas.put(left, top + 3, " ▼  ▼ ", rgb(FLAME_HOT))?;
            canvas.put(left, top + 4, " '  ' ", rgb(FLAME_TIP))
        } else {
            canvas.put(left, top + 3, " ˙  ˙ ", rgb(FLAME_TIP))
        }
    }
}

impl Sprite for Bullet {
    fn paint<W: Write>(&self, canvas: &mut Canvas<'_, W>) -> io::Result<()> {
        let (col, row) = cell(self.x + self.width / 2.0, self.y);
        canvas.put(col, row, "┃", rgb(BULLET_COLOR))?;
        if self.age > 2 {
            canvas.put(col, row + 1, "╎", C_HINT)?;
        }
        Ok(())
    }
}

impl Sprite for Enemy {
    fn paint<W: Write>(&self, canvas: &mut Canvas<'_, W>) -> io::Result<()> {
        let (cx, _) = self.center();
        let (center_col, top) = cell(cx, self.y);
        let left = center_col - 2;
        let color = rgb(self.color);

        // Quarter-turn frame of the spin.
        let quarter = ((self.rotation.rem_euclid(TAU) / TAU) * 4.0) as usize % 4;
        match self.variant {
            EnemyVariant::Round => {
                let eye = ['◐', '◓', '◑', '◒'][quarter];
                canvas.put(left, top, &format!("╭{eye}─{eye}╮"), color)?;
                canvas.put(left, top + 1, "╰───╯", color)
            }
            EnemyVariant::Triangular => {
                let tip = ['▼', '◀', '▲', '▶'][quarter];
                canvas.put(left, top, &format!("\\▀{tip}▀/"), color)?;
                canvas.put(left, top + 1, " \\_/ ", color)
            }
            EnemyVariant::XShaped => {
                let core = ['x', '+', 'x', '+'][quarter];
                canvas.put(left, top, &format!("\\ {core} /"), color)?;
                canvas.put(left, top + 1, "/   \\", color)
            }
        }
    }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> RenderAdapter for TerminalRenderer<W> {
    /// Render one complete frame.
    fn draw(&mut self, state: &GameState) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;

        {
            let mut canvas = Canvas::new(&mut self.out, state, cols, rows);
            for star in &state.stars {
                star.paint(&mut canvas)?;
            }
            for particle in &state.particles {
                particle.paint(&mut canvas)?;
            }
            if !state.is_game_over() {
                state.player.paint(&mut canvas)?;
            }
            for bullet in &state.bullets {
                bullet.paint(&mut canvas)?;
            }
            for enemy in &state.enemies {
                enemy.paint(&mut canvas)?;
            }
        }

        draw_hud(&mut self.out, state, cols)?;
        // Touch buttons are hidden while the game-over screen is up.
        if !state.is_game_over() {
            draw_buttons(&mut self.out, cols, rows)?;
        }

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
        self.out.flush()
    }
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, cols: u16) -> io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Puntaje: {}", state.score)))?;

    let hint = "← → / A D : mover   ESPACIO : disparar   Q : salir";
    let hint_len = hint.chars().count() as u16;
    if cols > hint_len + 16 {
        out.queue(cursor::MoveTo(cols - hint_len - 1, 0))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(hint))?;
    }
    Ok(())
}

// ── Touch buttons (last row) ──────────────────────────────────────────────────

fn draw_buttons<W: Write>(out: &mut W, cols: u16, rows: u16) -> io::Result<()> {
    let row = rows.saturating_sub(1);
    out.queue(style::SetForegroundColor(C_BUTTON))?;
    for (button, col) in TouchButton::layout(cols) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(button.label()))?;
    }
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

pub struct GameOverOverlay<W: Write> {
    out: W,
}

impl<W: Write> GameOverOverlay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> OverlayController for GameOverOverlay<W> {
    fn show_game_over(&mut self, score: u32) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let lines = [
            ("¡Game Over!".to_string(), C_OVERLAY),
            (format!("Puntaje final: {score}"), C_OVERLAY),
            (RESTART_LABEL.to_string(), C_OVERLAY_ACTION),
        ];
        let inner = OVERLAY_INNER_WIDTH;
        let (left, top) = overlay_origin(cols, rows);

        self.out.queue(style::SetForegroundColor(C_OVERLAY))?;
        self.out.queue(cursor::MoveTo(left, top))?;
        self.out
            .queue(Print(format!("┌{}┐", "─".repeat(inner as usize))))?;
        for (i, (text, color)) in lines.iter().enumerate() {
            let len = text.chars().count() as u16;
            let pad_left = inner.saturating_sub(len) / 2;
            let pad_right = inner.saturating_sub(len + pad_left);
            self.out.queue(cursor::MoveTo(left, top + 1 + i as u16))?;
            self.out.queue(style::SetForegroundColor(C_OVERLAY))?;
            self.out.queue(Print(format!("│{}", " ".repeat(pad_left as usize))))?;
            self.out.queue(style::SetForegroundColor(*color))?;
            self.out.queue(Print(text))?;
            self.out.queue(style::SetForegroundColor(C_OVERLAY))?;
            self.out.queue(Print(format!("{}│", " ".repeat(pad_right as usize))))?;
        }
        self.out
            .queue(cursor::MoveTo(left, top + 1 + lines.len() as u16))?;
        self.out
            .queue(Print(format!("└{}┘", "─".repeat(inner as usize))))?;

        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }

    fn hide_game_over(&mut self) -> io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.out.flush()
    }
}
