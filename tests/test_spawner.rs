use galaxy_defender::entities::*;
use galaxy_defender::spawner::*;
use galaxy_defender::tuning::{SpawnPolicy, Tuning};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

// ── spawn_interval ────────────────────────────────────────────────────────────

#[test]
fn interval_ramps_in_steps() {
    let t = Tuning::default();
    assert_eq!(spawn_interval(0, &t), 60);
    assert_eq!(spawn_interval(9, &t), 60);
    assert_eq!(spawn_interval(10, &t), 55);
    assert_eq!(spawn_interval(25, &t), 50);
    assert_eq!(spawn_interval(80, &t), 20);
}

#[test]
fn interval_capped_at_minimum() {
    let t = Tuning::default();
    assert_eq!(spawn_interval(100, &t), 20);
    assert_eq!(spawn_interval(u32::MAX, &t), 20);
}

#[test]
fn interval_is_non_increasing_in_score() {
    let t = Tuning::default();
    let mut previous = spawn_interval(0, &t);
    for score in 1..500 {
        let interval = spawn_interval(score, &t);
        assert!(interval <= previous);
        assert!(interval >= t.spawn_min_interval);
        previous = interval;
    }
}

#[test]
fn flat_policy_ignores_score() {
    let t = Tuning {
        spawn_policy: SpawnPolicy::Flat,
        ..Tuning::default()
    };
    assert_eq!(spawn_interval(0, &t), 60);
    assert_eq!(spawn_interval(1000, &t), 60);
}

// ── maybe_spawn ───────────────────────────────────────────────────────────────

#[test]
fn countdown_without_spawn() {
    let t = Tuning::default();
    let (timer, enemy) = maybe_spawn(10, 0, 800.0, &t, &mut seeded_rng());
    assert_eq!(timer, 9);
    assert!(enemy.is_none());
}

#[test]
fn spawns_when_timer_runs_out() {
    let t = Tuning::default();
    let (timer, enemy) = maybe_spawn(1, 0, 800.0, &t, &mut seeded_rng());
    assert_eq!(timer, 60);
    let e = enemy.expect("enemy should spawn");
    assert_eq!(e.y, -40.0);
    assert_eq!((e.width, e.height), (40.0, 40.0));
    assert!((0.0..=760.0).contains(&e.x));
    assert!((2.0..4.0).contains(&e.speed));
    assert!((-0.025..0.025).contains(&e.rotation_rate));
    assert!(ENEMY_PALETTE.contains(&e.color));
}

#[test]
fn overdue_timer_spawns_too() {
    let t = Tuning::default();
    let (_, enemy) = maybe_spawn(-5, 0, 800.0, &t, &mut seeded_rng());
    assert!(enemy.is_some());
}

#[test]
fn reset_timer_follows_score() {
    let t = Tuning::default();
    let (timer, _) = maybe_spawn(0, 30, 800.0, &t, &mut seeded_rng());
    assert_eq!(timer, 45);
}

#[test]
fn narrow_field_spawns_at_left_edge() {
    let t = Tuning::default();
    let (_, enemy) = maybe_spawn(0, 0, 20.0, &t, &mut seeded_rng());
    assert_eq!(enemy.map(|e| e.x), Some(0.0));
}

#[test]
fn spawned_enemies_stay_in_bounds_and_vary() {
    let t = Tuning::default();
    let mut rng = seeded_rng();
    let mut variants = Vec::new();
    for _ in 0..200 {
        let (_, enemy) = maybe_spawn(0, 0, 800.0, &t, &mut rng);
        let e = enemy.expect("enemy should spawn");
        assert!(e.x >= 0.0 && e.x + e.width <= 800.0);
        if !variants.contains(&e.variant) {
            variants.push(e.variant);
        }
    }
    assert_eq!(variants.len(), EnemyVariant::ALL.len());
}
