//! Galaxy Defender: a single-screen arcade shooter.
//!
//! The library holds the whole game core (entities, collision, spawning,
//! per-frame update and the playing/game-over state machine) plus the
//! terminal input adapter. Drawing lives in the binary.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod game;
pub mod input;
pub mod spawner;
pub mod tuning;
