//! Gameplay tuning.
//!
//! Keep this separate from runtime configuration (frame pacing, viewport
//! limits) which lives in `config`.

/// How the spawn countdown is reset after each enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnPolicy {
    /// Interval shrinks in steps as the score grows, floored at a minimum.
    Ramped,
    /// Constant base interval.
    Flat,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tuning {
    pub player_width: f32,
    pub player_height: f32,
    /// Pixels per frame.
    pub player_speed: f32,
    /// Distance from the bottom of the field to the player's top edge.
    pub player_bottom_offset: f32,
    /// Frames of boosted thruster flame after each shot.
    pub thruster_frames: u32,

    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    /// Frames between two successful shots.
    pub fire_cooldown: i32,

    pub enemy_size: f32,
    pub enemy_min_speed: f32,
    pub enemy_max_speed: f32,
    /// Rotation rate is drawn from [-spin/2, spin/2).
    pub enemy_spin: f32,

    pub spawn_policy: SpawnPolicy,
    pub spawn_base_interval: i32,
    /// Interval reduction applied per `spawn_score_step` points.
    pub spawn_step: i32,
    pub spawn_score_step: u32,
    pub spawn_min_interval: i32,

    pub explosion_particles: usize,
    pub star_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_width: 50.0,
            player_height: 50.0,
            player_speed: 5.0,
            player_bottom_offset: 60.0,
            thruster_frames: 10,

            bullet_width: 5.0,
            bullet_height: 10.0,
            bullet_speed: 7.0,
            fire_cooldown: 20,

            enemy_size: 40.0,
            enemy_min_speed: 2.0,
            enemy_max_speed: 4.0,
            enemy_spin: 0.05,

            spawn_policy: SpawnPolicy::Ramped,
            spawn_base_interval: 60,
            spawn_step: 5,
            spawn_score_step: 10,
            spawn_min_interval: 20,

            explosion_particles: 20,
            star_count: 100,
        }
    }
}
