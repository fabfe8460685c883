//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`. Side effects are limited to the injected RNG.

use rand::Rng;
use tracing::{debug, info};

use crate::collision::collides;
use crate::config::cap_field;
use crate::entities::{
    explosion, Bullet, Direction, Enemy, GameStatus, Particle, Player, Star, PLAYER_COLOR,
};
use crate::input::InputSnapshot;
use crate::spawner::maybe_spawn;
use crate::tuning::Tuning;

// ── State ─────────────────────────────────────────────────────────────────────

/// The entire game state. Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    pub score: u32,
    pub status: GameStatus,
    /// Frames until the player may fire again.
    pub fire_cooldown: i32,
    /// Frames until the next enemy spawn.
    pub spawn_timer: i32,
    /// Updates run since the session started.
    pub frame: u64,
    pub width: f32,
    pub height: f32,
    pub tuning: Tuning,
}

impl GameState {
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}

// ── Constructors ──────────────────────────────────────────────────────────────

/// Build the initial state for a field of the given size.
pub fn init_state(width: f32, height: f32, tuning: Tuning, rng: &mut impl Rng) -> GameState {
    let (width, height) = cap_field(width, height);
    let stars = Star::scatter(width, height, tuning.star_count, rng);
    info!(width, height, "session started");
    GameState {
        player: Player::spawn(width, height, &tuning),
        bullets: Vec::new(),
        enemies: Vec::new(),
        particles: Vec::new(),
        stars,
        score: 0,
        status: GameStatus::Playing,
        fire_cooldown: 0,
        spawn_timer: 0,
        frame: 0,
        width,
        height,
        tuning,
    }
}

/// Start a new session on the same field. Stars keep scrolling where they are.
pub fn restart(state: &GameState) -> GameState {
    info!(final_score = state.score, "restart");
    GameState {
        player: Player::spawn(state.width, state.height, &state.tuning),
        bullets: Vec::new(),
        enemies: Vec::new(),
        particles: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        fire_cooldown: 0,
        spawn_timer: 0,
        frame: 0,
        ..state.clone()
    }
}

/// Adopt a new field size. Only the player is touched: it goes back to its
/// bottom row and is clamped inside the new width.
pub fn resize(state: &GameState, width: f32, height: f32) -> GameState {
    let (width, height) = cap_field(width, height);
    let mut player = state.player.clone();
    player.y = height - state.tuning.player_bottom_offset;
    player.clamp_to(width);
    info!(width, height, "field resized");
    GameState {
        player,
        width,
        height,
        ..state.clone()
    }
}

// ── Per-frame tick (RNG is injected) ───────────────────────────────────────

/// Advance the simulation by one frame. A finished game is returned unchanged.
pub fn tick(state: &GameState, input: &InputSnapshot, rng: &mut impl Rng) -> GameState {
    if state.is_game_over() {
        return state.clone();
    }

    let tuning = state.tuning;
    let (width, height) = (state.width, state.height);
    let mut next = state.clone();
    next.frame += 1;

    // ── 1. Background ────────────────────────────────────────────────────────
    for star in &mut next.stars {
        star.advance(width, height, rng);
    }

    // ── 2. Player input ──────────────────────────────────────────────────────
    next.player.cool_thruster();
    if input.move_left {
        next.player.move_in(Direction::Left, width);
    }
    if input.move_right {
        next.player.move_in(Direction::Right, width);
    }
    if input.fire && next.fire_cooldown <= 0 {
        let bullet = next.player.fire(&tuning);
        next.bullets.push(bullet);
        next.fire_cooldown = tuning.fire_cooldown;
    }

    // ── 3. Projectiles and debris ────────────────────────────────────────────
    for bullet in &mut next.bullets {
        bullet.advance();
    }
    next.bullets.retain(|b| !b.is_off_top());

    for particle in &mut next.particles {
        particle.advance();
    }
    next.particles.retain(|p| !p.is_dead());

    // ── 4. Spawn ─────────────────────────────────────────────────────────────
    let (timer, spawned) = maybe_spawn(next.spawn_timer, next.score, width, &tuning, rng);
    next.spawn_timer = timer;
    if let Some(enemy) = spawned {
        debug!(x = enemy.x, speed = enemy.speed, variant = ?enemy.variant, "enemy spawned");
        next.enemies.push(enemy);
    }

    // ── 5. Enemies: move, then resolve collisions ────────────────────────────
    // Bullets are only marked here and dropped afterwards, so one bullet can
    // never take out two enemies in the same frame.
    let mut spent = vec![false; next.bullets.len()];
    let mut survivors: Vec<Enemy> = Vec::with_capacity(next.enemies.len());
    let mut pending = std::mem::take(&mut next.enemies).into_iter();

    while let Some(mut enemy) = pending.next() {
        enemy.advance();

        if collides(&next.player, &enemy) {
            let (cx, cy) = next.player.center();
            next.particles
                .extend(explosion(cx, cy, Some(PLAYER_COLOR), tuning.explosion_particles, rng));
            next.status = GameStatus::GameOver;
            info!(score = next.score, frame = next.frame, "player destroyed");
            // The game ends on this frame; everything still queued stays put.
            survivors.push(enemy);
            survivors.extend(pending);
            next.enemies = survivors;
            next.bullets = keep_unspent(next.bullets, &spent);
            return next;
        }

        let hit = next
            .bullets
            .iter()
            .enumerate()
            .find(|(i, bullet)| !spent[*i] && collides(*bullet, &enemy))
            .map(|(i, _)| i);
        if let Some(i) = hit {
            spent[i] = true;
            let (cx, cy) = enemy.center();
            next.particles
                .extend(explosion(cx, cy, Some(enemy.color), tuning.explosion_particles, rng));
            next.score += 1;
            debug!(score = next.score, "enemy destroyed");
            continue;
        }

        if !enemy.is_below(height) {
            survivors.push(enemy);
        }
    }

    next.enemies = survivors;
    next.bullets = keep_unspent(next.bullets, &spent);

    if next.fire_cooldown > 0 {
        next.fire_cooldown -= 1;
    }

    next
}

fn keep_unspent(bullets: Vec<Bullet>, spent: &[bool]) -> Vec<Bullet> {
    bullets
        .into_iter()
        .zip(spent)
        .filter(|(_, used)| !**used)
        .map(|(b, _)| b)
        .collect()
}
