//! Runtime and host constants. Gameplay tuning lives in `tuning`.

use std::time::Duration;

/// Default frame length, roughly a 60 Hz display refresh.
pub const FRAME: Duration = Duration::from_millis(16);

/// The play field never grows past this, however large the terminal is.
pub const MAX_FIELD_WIDTH: f32 = 800.0;
pub const MAX_FIELD_HEIGHT: f32 = 600.0;

/// Pixel footprint of one terminal cell.
pub const CELL_WIDTH_PX: f32 = 8.0;
pub const CELL_HEIGHT_PX: f32 = 16.0;

/// Terminal rows reserved outside the field: the HUD on top, touch buttons below.
pub const HUD_ROWS: u16 = 1;
pub const BUTTON_ROWS: u16 = 1;

/// A key counts as held if its last press/repeat arrived within this many
/// frames. Covers terminals that never report key releases.
pub const HOLD_WINDOW: u64 = 8;

/// Clamp a requested field size to the cap. Negative or NaN sizes collapse to 0.
pub fn cap_field(width: f32, height: f32) -> (f32, f32) {
    let w = if width.is_nan() { 0.0 } else { width.clamp(0.0, MAX_FIELD_WIDTH) };
    let h = if height.is_nan() { 0.0 } else { height.clamp(0.0, MAX_FIELD_HEIGHT) };
    (w, h)
}

/// Play-field size (in pixels) for a terminal of `cols` x `rows` cells.
pub fn field_for_terminal(cols: u16, rows: u16) -> (f32, f32) {
    let play_rows = rows.saturating_sub(HUD_ROWS + BUTTON_ROWS);
    cap_field(cols as f32 * CELL_WIDTH_PX, play_rows as f32 * CELL_HEIGHT_PX)
}
