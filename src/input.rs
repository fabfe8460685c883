//! Input: the per-frame snapshot and the terminal adapter that produces it.
//!
//! Keyboard model: instead of acting on each key event, we keep a `key_frame`
//! map with the frame of the last press/repeat event for every key. A key is
//! live while that stamp is within `HOLD_WINDOW` frames, or until a release
//! event removes it on terminals that report releases (kitty protocol).
//!
//! Mouse clicks on the button strip at the bottom of the screen stand in for
//! touch controls and are OR-ed with the keyboard. A click on the game-over
//! box's "play again" line requests a restart, like R or Enter.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, TryRecvError};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::config::{field_for_terminal, HOLD_WINDOW};
use crate::game::InputAdapter;

/// What the player is asking for on this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    /// Edge-triggered: set on the one snapshot following the request.
    pub restart_requested: bool,
    pub quit_requested: bool,
}

// ── Touch buttons ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchButton {
    Left,
    Right,
    Fire,
}

impl TouchButton {
    pub fn label(self) -> &'static str {
        match self {
            TouchButton::Left => "[ ◀ ]",
            TouchButton::Right => "[ ▶ ]",
            TouchButton::Fire => "[ FIRE ]",
        }
    }

    /// Button strip for a terminal `cols` wide: each button with its first
    /// column. The strip sits on the last terminal row.
    pub fn layout(cols: u16) -> [(TouchButton, u16); 3] {
        let fire_width = TouchButton::Fire.label().chars().count() as u16;
        [
            (TouchButton::Left, 1),
            (TouchButton::Right, 7),
            (TouchButton::Fire, cols.saturating_sub(fire_width + 1)),
        ]
    }

    /// The button under a cell, if any.
    pub fn at(col: u16, row: u16, cols: u16, rows: u16) -> Option<TouchButton> {
        if rows == 0 || row != rows - 1 {
            return None;
        }
        Self::layout(cols).into_iter().find_map(|(button, start)| {
            let width = button.label().chars().count() as u16;
            (col >= start && col < start + width).then_some(button)
        })
    }
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

pub const OVERLAY_INNER_WIDTH: u16 = 24;
pub const RESTART_LABEL: &str = "[R] Jugar de Nuevo";

/// Top-left corner of the game-over box's frame on a `cols` x `rows` terminal.
/// Lines inside the box start one row below it.
pub fn overlay_origin(cols: u16, rows: u16) -> (u16, u16) {
    let left = (cols / 2).saturating_sub(OVERLAY_INNER_WIDTH / 2 + 1);
    let top = (rows / 2).saturating_sub(3);
    (left, top)
}

/// Terminal row of the "play again" line, the third line inside the box.
pub fn restart_row(rows: u16) -> u16 {
    overlay_origin(0, rows).1 + 3
}

/// Whether a cell lies on the overlay's "play again" line, between the box's
/// side borders.
pub fn restart_button_at(col: u16, row: u16, cols: u16, rows: u16) -> bool {
    let (left, _) = overlay_origin(cols, rows);
    row == restart_row(rows) && col > left && col <= left + OVERLAY_INNER_WIDTH
}

// ── Accumulated input state ───────────────────────────────────────────────────

#[derive(Debug, Default)]
struct TouchState {
    left: bool,
    right: bool,
    fire: bool,
}

/// Folds raw terminal events into held keys, pressed buttons and pending
/// one-shot requests. Feed it with [`InputState::handle`], read it once per
/// frame with [`InputState::snapshot`].
#[derive(Debug)]
pub struct InputState {
    key_frame: HashMap<KeyCode, u64>,
    touch: TouchState,
    restart_pending: bool,
    quit_pending: bool,
    resize_pending: Option<(u16, u16)>,
    cols: u16,
    rows: u16,
    frame: u64,
}

impl InputState {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            key_frame: HashMap::new(),
            touch: TouchState::default(),
            restart_pending: false,
            quit_pending: false,
            resize_pending: None,
            cols,
            rows,
            frame: 0,
        }
    }

    pub fn handle(&mut self, event: &Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(cols, rows) => {
                self.cols = *cols;
                self.rows = *rows;
                self.resize_pending = Some((*cols, *rows));
            }
            _ => {}
        }
    }

    pub fn request_quit(&mut self) {
        self.quit_pending = true;
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        let code = normalize(key.code);
        match key.kind {
            KeyEventKind::Press => {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => self.quit_pending = true,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit_pending = true;
                    }
                    KeyCode::Char('r') | KeyCode::Enter => self.restart_pending = true,
                    _ => {}
                }
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // Only counted while the game is over, when the box is drawn.
                if restart_button_at(mouse.column, mouse.row, self.cols, self.rows) {
                    self.restart_pending = true;
                }
                match TouchButton::at(mouse.column, mouse.row, self.cols, self.rows) {
                    Some(TouchButton::Left) => self.touch.left = true,
                    Some(TouchButton::Right) => self.touch.right = true,
                    Some(TouchButton::Fire) => self.touch.fire = true,
                    None => {}
                }
            }
            MouseEventKind::Up(_) => self.touch = TouchState::default(),
            _ => {}
        }
    }

    fn is_held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// The snapshot for the current frame. Consumes restart/quit requests and
    /// moves on to the next frame.
    pub fn snapshot(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            move_left: self.is_held(KeyCode::Left)
                || self.is_held(KeyCode::Char('a'))
                || self.touch.left,
            move_right: self.is_held(KeyCode::Right)
                || self.is_held(KeyCode::Char('d'))
                || self.touch.right,
            fire: self.is_held(KeyCode::Char(' ')) || self.touch.fire,
            restart_requested: std::mem::take(&mut self.restart_pending),
            quit_requested: std::mem::take(&mut self.quit_pending),
        };
        self.frame += 1;
        snapshot
    }

    /// Terminal size from the latest resize event, if one arrived.
    pub fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resize_pending.take()
    }
}

/// Letters are matched case-insensitively.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

// ── Terminal adapter ──────────────────────────────────────────────────────────

/// Reads events forwarded by a dedicated reader thread so the game loop
/// never blocks on terminal I/O. Everything that arrived since the last frame
/// is applied at the start of the next one.
pub struct TerminalInput {
    rx: Receiver<Event>,
    state: InputState,
}

impl TerminalInput {
    pub fn new(rx: Receiver<Event>, cols: u16, rows: u16) -> Self {
        Self {
            rx,
            state: InputState::new(cols, rows),
        }
    }

    fn drain(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.state.handle(&event),
                Err(TryRecvError::Empty) => break,
                // Reader thread is gone: no more input will ever arrive.
                Err(TryRecvError::Disconnected) => {
                    self.state.request_quit();
                    break;
                }
            }
        }
    }
}

impl InputAdapter for TerminalInput {
    fn snapshot(&mut self) -> InputSnapshot {
        self.drain();
        self.state.snapshot()
    }

    fn take_resize(&mut self) -> Option<(f32, f32)> {
        self.state
            .take_resize()
            .map(|(cols, rows)| field_for_terminal(cols, rows))
    }
}
