//! Game entity types and their per-frame movement rules.
//!
//! Every entity carries its own position and size; nothing is shared through
//! a common base. Randomness is always injected by the caller.

use std::f32::consts::TAU;

use rand::Rng;

use crate::collision::{Hitbox, Rect};
use crate::tuning::Tuning;

// ── Colours ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// `0xRRGGBB` → colour.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

pub const PLAYER_COLOR: Rgb = Rgb::from_hex(0x00FFAA);
pub const BULLET_COLOR: Rgb = Rgb::from_hex(0xFFFF00);
/// Used by explosions that are not given a colour.
pub const EXPLOSION_COLOR: Rgb = Rgb::from_hex(0xFF8800);
pub const ENEMY_PALETTE: [Rgb; 4] = [
    Rgb::from_hex(0xFF3355),
    Rgb::from_hex(0x8800FF),
    Rgb::from_hex(0xFF8800),
    Rgb::from_hex(0x00AA88),
];

// ── Tags ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Visual variant of an enemy ship. Has no gameplay effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyVariant {
    Round,
    Triangular,
    XShaped,
}

impl EnemyVariant {
    pub const ALL: [EnemyVariant; 3] = [Self::Round, Self::Triangular, Self::XShaped];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per move.
    pub speed: f32,
    /// Frames left of the boosted thruster flame.
    pub thruster: u32,
}

impl Player {
    /// A fresh ship centred horizontally near the bottom of the field.
    pub fn spawn(field_width: f32, field_height: f32, tuning: &Tuning) -> Self {
        let mut player = Self {
            x: field_width / 2.0 - tuning.player_width / 2.0,
            y: field_height - tuning.player_bottom_offset,
            width: tuning.player_width,
            height: tuning.player_height,
            speed: tuning.player_speed,
            thruster: 0,
        };
        player.clamp_to(field_width);
        player
    }

    /// Right-most legal x for a field of this width.
    pub fn max_x(&self, field_width: f32) -> f32 {
        (field_width - self.width).max(0.0)
    }

    pub fn clamp_to(&mut self, field_width: f32) {
        self.x = self.x.clamp(0.0, self.max_x(field_width));
    }

    pub fn move_in(&mut self, direction: Direction, field_width: f32) {
        let step = match direction {
            Direction::Left => -self.speed,
            Direction::Right => self.speed,
        };
        self.x = (self.x + step).clamp(0.0, self.max_x(field_width));
    }

    /// Launch a bullet from the nose of the ship and light the thrusters.
    pub fn fire(&mut self, tuning: &Tuning) -> Bullet {
        self.thruster = tuning.thruster_frames;
        Bullet {
            x: self.x + self.width / 2.0 - tuning.bullet_width / 2.0,
            y: self.y,
            width: tuning.bullet_width,
            height: tuning.bullet_height,
            speed: tuning.bullet_speed,
            age: 0,
        }
    }

    pub fn cool_thruster(&mut self) {
        self.thruster = self.thruster.saturating_sub(1);
    }

    pub fn center(&self) -> (f32, f32) {
        self.rect().center()
    }
}

impl Hitbox for Player {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Upward pixels per frame.
    pub speed: f32,
    /// Frames since launch. Only used for the trail effect.
    pub age: u32,
}

impl Bullet {
    pub fn advance(&mut self) {
        self.y -= self.speed;
        self.age += 1;
    }

    /// The whole bullet is above the field.
    pub fn is_off_top(&self) -> bool {
        self.y + self.height < 0.0
    }
}

impl Hitbox for Bullet {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Downward pixels per frame.
    pub speed: f32,
    pub variant: EnemyVariant,
    /// Radians; left unbounded, only ever fed to trig functions.
    pub rotation: f32,
    pub rotation_rate: f32,
    pub color: Rgb,
}

impl Enemy {
    pub fn advance(&mut self) {
        self.y += self.speed;
        self.rotation += self.rotation_rate;
    }

    /// Top edge has passed the bottom of the field.
    pub fn is_below(&self, field_height: f32) -> bool {
        self.y > field_height
    }

    pub fn center(&self) -> (f32, f32) {
        self.rect().center()
    }
}

impl Hitbox for Enemy {
    fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Cosmetics ─────────────────────────────────────────────────────────────────

/// Explosion debris. Never collides with anything.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub color: Rgb,
    /// Frames left before the particle disappears.
    pub life: i32,
}

impl Particle {
    pub fn advance(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.life -= 1;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0
    }
}

/// A burst of particles flying out of `(x, y)` in random directions.
pub fn explosion(
    x: f32,
    y: f32,
    color: Option<Rgb>,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<Particle> {
    let color = color.unwrap_or(EXPLOSION_COLOR);
    (0..count)
        .map(|_| {
            let angle: f32 = rng.gen_range(0.0..TAU);
            let speed: f32 = rng.gen_range(1.0..3.0);
            Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                size: rng.gen_range(2.0..5.0),
                color,
                life: 30 + rng.gen_range(0..20),
            }
        })
        .collect()
}

/// Background star. Recycled to the top once it scrolls off the bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
}

impl Star {
    /// The initial star field, spread over the whole play area.
    pub fn scatter(
        field_width: f32,
        field_height: f32,
        count: usize,
        rng: &mut impl Rng,
    ) -> Vec<Star> {
        (0..count)
            .map(|_| Star {
                x: random_coord(field_width, rng),
                y: random_coord(field_height, rng),
                size: rng.gen_range(1.0..3.0),
                speed: rng.gen_range(0.1..0.6),
            })
            .collect()
    }

    pub fn advance(&mut self, field_width: f32, field_height: f32, rng: &mut impl Rng) {
        self.y += self.speed;
        if self.y > field_height {
            self.y = 0.0;
            self.x = random_coord(field_width, rng);
        }
    }
}

/// Uniform in `[0, extent)`, or 0 for an empty extent.
pub(crate) fn random_coord(extent: f32, rng: &mut impl Rng) -> f32 {
    if extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}
