//! Enemy spawning and the difficulty ramp.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::{random_coord, Enemy, EnemyVariant, ENEMY_PALETTE};
use crate::tuning::{SpawnPolicy, Tuning};

/// Frames until the next enemy, given the current score.
///
/// Under the ramped policy this is `base - floor(score / score_step) * step`,
/// never below the minimum. Non-increasing in score.
pub fn spawn_interval(score: u32, tuning: &Tuning) -> i32 {
    match tuning.spawn_policy {
        SpawnPolicy::Flat => tuning.spawn_base_interval,
        SpawnPolicy::Ramped => {
            let steps = (score / tuning.spawn_score_step.max(1)) as i64;
            let interval = tuning.spawn_base_interval as i64 - steps * tuning.spawn_step as i64;
            interval.max(tuning.spawn_min_interval as i64) as i32
        }
    }
}

/// Count the spawn timer down by one frame. When it runs out, returns a new
/// enemy just above the visible field and the reset timer.
pub fn maybe_spawn(
    timer: i32,
    score: u32,
    field_width: f32,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> (i32, Option<Enemy>) {
    let timer = timer.saturating_sub(1);
    if timer > 0 {
        return (timer, None);
    }
    let enemy = spawn_enemy(field_width, tuning, rng);
    (spawn_interval(score, tuning), Some(enemy))
}

fn spawn_enemy(field_width: f32, tuning: &Tuning, rng: &mut impl Rng) -> Enemy {
    let size = tuning.enemy_size;
    let speed = if tuning.enemy_max_speed > tuning.enemy_min_speed {
        rng.gen_range(tuning.enemy_min_speed..tuning.enemy_max_speed)
    } else {
        tuning.enemy_min_speed
    };
    let half_spin = tuning.enemy_spin / 2.0;
    let rotation_rate = if half_spin > 0.0 {
        rng.gen_range(-half_spin..half_spin)
    } else {
        0.0
    };
    let variant = *EnemyVariant::ALL
        .choose(rng)
        .unwrap_or(&EnemyVariant::Round);
    let color = *ENEMY_PALETTE.choose(rng).unwrap_or(&ENEMY_PALETTE[0]);

    Enemy {
        x: random_coord(field_width - size, rng),
        y: -size,
        width: size,
        height: size,
        speed,
        variant,
        rotation: 0.0,
        rotation_rate,
        color,
    }
}
