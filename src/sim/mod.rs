//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-frame step, no delta time
//! - Seeded RNG only (enemy layout at session start)
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, clamp_to_canvas, inside_canvas, point_within};
pub use state::{
    AttackKind, Enemy, GameEvent, GamePhase, GameState, Player, Projectile, Rules,
};
pub use tick::{TickInput, tick};
