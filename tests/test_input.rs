use std::sync::mpsc;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use galaxy_defender::config::{cap_field, field_for_terminal, HOLD_WINDOW};
use galaxy_defender::game::InputAdapter;
use galaxy_defender::input::*;

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn key(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn state() -> InputState {
    InputState::new(80, 24)
}

// ── Keyboard ──────────────────────────────────────────────────────────────────

#[test]
fn nothing_pressed_is_idle() {
    let mut s = state();
    assert_eq!(s.snapshot(), InputSnapshot::default());
}

#[test]
fn arrows_and_letters_move() {
    let mut s = state();
    s.handle(&press(KeyCode::Left));
    let snap = s.snapshot();
    assert!(snap.move_left && !snap.move_right);

    let mut s = state();
    s.handle(&press(KeyCode::Char('D')));
    assert!(s.snapshot().move_right);
}

#[test]
fn space_fires() {
    let mut s = state();
    s.handle(&press(KeyCode::Char(' ')));
    assert!(s.snapshot().fire);
}

#[test]
fn pressed_key_expires_after_hold_window() {
    let mut s = state();
    s.handle(&press(KeyCode::Right));
    for _ in 0..=HOLD_WINDOW {
        assert!(s.snapshot().move_right);
    }
    assert!(!s.snapshot().move_right);
}

#[test]
fn repeat_keeps_key_held() {
    let mut s = state();
    s.handle(&press(KeyCode::Right));
    for _ in 0..HOLD_WINDOW * 3 {
        s.handle(&key(KeyCode::Right, KeyEventKind::Repeat));
        assert!(s.snapshot().move_right);
    }
}

#[test]
fn release_drops_key_immediately() {
    let mut s = state();
    s.handle(&press(KeyCode::Left));
    assert!(s.snapshot().move_left);
    s.handle(&key(KeyCode::Left, KeyEventKind::Release));
    assert!(!s.snapshot().move_left);
}

#[test]
fn restart_is_edge_triggered() {
    let mut s = state();
    s.handle(&press(KeyCode::Char('r')));
    assert!(s.snapshot().restart_requested);
    assert!(!s.snapshot().restart_requested);

    s.handle(&press(KeyCode::Enter));
    assert!(s.snapshot().restart_requested);
}

#[test]
fn quit_keys() {
    for event in [
        press(KeyCode::Char('q')),
        press(KeyCode::Char('Q')),
        press(KeyCode::Esc),
        Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
    ] {
        let mut s = state();
        s.handle(&event);
        assert!(s.snapshot().quit_requested, "{event:?}");
    }
}

#[test]
fn plain_c_does_not_quit() {
    let mut s = state();
    s.handle(&press(KeyCode::Char('c')));
    assert!(!s.snapshot().quit_requested);
}

// ── Touch buttons ─────────────────────────────────────────────────────────────

#[test]
fn button_hit_testing() {
    assert_eq!(TouchButton::at(1, 23, 80, 24), Some(TouchButton::Left));
    assert_eq!(TouchButton::at(5, 23, 80, 24), Some(TouchButton::Left));
    assert_eq!(TouchButton::at(6, 23, 80, 24), None);
    assert_eq!(TouchButton::at(7, 23, 80, 24), Some(TouchButton::Right));
    assert_eq!(TouchButton::at(71, 23, 80, 24), Some(TouchButton::Fire));
    assert_eq!(TouchButton::at(78, 23, 80, 24), Some(TouchButton::Fire));
    assert_eq!(TouchButton::at(79, 23, 80, 24), None);
    // Only the last row has buttons.
    assert_eq!(TouchButton::at(1, 22, 80, 24), None);
    assert_eq!(TouchButton::at(0, 0, 0, 0), None);
}

#[test]
fn touch_fire_held_until_release() {
    let mut s = state();
    s.handle(&mouse(MouseEventKind::Down(MouseButton::Left), 72, 23));
    let snap = s.snapshot();
    assert!(snap.fire);
    assert!(!snap.restart_requested);
    for _ in 0..HOLD_WINDOW * 2 {
        assert!(s.snapshot().fire);
    }
    s.handle(&mouse(MouseEventKind::Up(MouseButton::Left), 72, 23));
    assert!(!s.snapshot().fire);
}

#[test]
fn touch_and_keyboard_combine() {
    let mut s = state();
    s.handle(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 23));
    s.handle(&press(KeyCode::Char(' ')));
    let snap = s.snapshot();
    assert!(snap.move_left);
    assert!(snap.fire);
}

#[test]
fn touch_layout_follows_resize() {
    let mut s = state();
    s.handle(&Event::Resize(120, 40));
    s.handle(&mouse(MouseEventKind::Down(MouseButton::Left), 112, 39));
    assert!(s.snapshot().fire);
}

// ── Game-over box ─────────────────────────────────────────────────────────────

#[test]
fn restart_button_spans_the_box_interior() {
    // 80x24: frame from column 27 to 52, "play again" on row 12.
    assert_eq!(overlay_origin(80, 24), (27, 9));
    assert_eq!(restart_row(24), 12);
    assert!(restart_button_at(28, 12, 80, 24));
    assert!(restart_button_at(51, 12, 80, 24));
    assert!(!restart_button_at(27, 12, 80, 24));
    assert!(!restart_button_at(52, 12, 80, 24));
    assert!(!restart_button_at(40, 11, 80, 24));
}

#[test]
fn tap_on_play_again_requests_restart() {
    let mut s = state();
    s.handle(&mouse(MouseEventKind::Down(MouseButton::Left), 40, 12));
    let snap = s.snapshot();
    assert!(snap.restart_requested);
    assert!(!snap.fire);
    assert!(!s.snapshot().restart_requested);
}

#[test]
fn taps_elsewhere_do_not_restart() {
    for (col, row) in [(72, 23), (2, 23), (8, 23), (40, 5), (40, 11)] {
        let mut s = state();
        s.handle(&mouse(MouseEventKind::Down(MouseButton::Left), col, row));
        assert!(!s.snapshot().restart_requested, "tap at {col},{row}");
    }
}

#[test]
fn play_again_follows_resize() {
    let mut s = state();
    s.handle(&Event::Resize(120, 40));
    let row = restart_row(40);
    s.handle(&mouse(MouseEventKind::Down(MouseButton::Left), 60, row));
    assert!(s.snapshot().restart_requested);
}

// ── Resize ────────────────────────────────────────────────────────────────────

#[test]
fn resize_is_reported_once() {
    let mut s = state();
    s.handle(&Event::Resize(100, 40));
    assert_eq!(s.take_resize(), Some((100, 40)));
    assert_eq!(s.take_resize(), None);
}

#[test]
fn field_size_from_terminal() {
    assert_eq!(field_for_terminal(80, 24), (640.0, 352.0));
    assert_eq!(field_for_terminal(200, 80), (800.0, 600.0));
    assert_eq!(field_for_terminal(0, 1), (0.0, 0.0));
}

#[test]
fn cap_field_bounds() {
    assert_eq!(cap_field(-1.0, 10.0), (0.0, 10.0));
    assert_eq!(cap_field(f32::NAN, f32::NAN), (0.0, 0.0));
    assert_eq!(cap_field(900.0, 700.0), (800.0, 600.0));
}

// ── Terminal adapter ──────────────────────────────────────────────────────────

#[test]
fn terminal_input_drains_channel_each_frame() {
    let (tx, rx) = mpsc::channel();
    let mut input = TerminalInput::new(rx, 80, 24);
    tx.send(press(KeyCode::Left)).unwrap();
    tx.send(Event::Resize(100, 40)).unwrap();

    assert!(input.snapshot().move_left);
    assert_eq!(input.take_resize(), Some((800.0, 600.0)));
    assert_eq!(input.take_resize(), None);
    drop(tx);
}

#[test]
fn terminal_input_quits_when_reader_is_gone() {
    let (tx, rx) = mpsc::channel::<Event>();
    let mut input = TerminalInput::new(rx, 80, 24);
    drop(tx);
    assert!(input.snapshot().quit_requested);
}
