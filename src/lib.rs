//! Circle Chase - a small canvas arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, pursuit, projectiles, collisions)
//! - `input`: Held-key / pointer capture, sampled once per frame
//! - `session`: Owns state + input and drives one frame at a time
//! - `ui`: HUD text, terminal overlay and retry hot-zone
//! - `renderer`: Scene projection and WebGPU pipeline
//! - `config`: Data-driven game parameters

pub mod config;
pub mod input;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod ui;

pub use config::{EnemyLayout, EnemySpawn, GameConfig, MeleeTrigger};
pub use session::Session;

use glam::Vec2;

/// Game configuration constants (defaults for `GameConfig`)
pub mod consts {
    /// Canvas dimensions in pixels
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 25.0;
    pub const PLAYER_SPEED: f32 = 7.0;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 20.0;
    pub const ENEMY_SPEED: f32 = 2.0;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const MAX_AMMO: u32 = 10;
    /// A projectile hits when closer than this fraction of the enemy radius
    pub const PROJECTILE_HIT_FRACTION: f32 = 0.8;
    /// Projectile sprite / fallback shape size (length along heading, width)
    pub const PROJECTILE_LENGTH: f32 = 24.0;
    pub const PROJECTILE_WIDTH: f32 = 12.0;

    /// Retry hot-zone size, centered horizontally below the canvas center
    pub const RETRY_ZONE_WIDTH: f32 = 200.0;
    pub const RETRY_ZONE_HEIGHT: f32 = 50.0;
    pub const RETRY_ZONE_OFFSET_Y: f32 = 60.0;

    /// Crosshair arm length in pixels
    pub const CROSSHAIR_SIZE: f32 = 10.0;
}

/// Distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector pointing from `from` to `to`, or `None` when they coincide
#[inline]
pub fn direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Heading angle (radians, screen space with y down) of a direction
#[inline]
pub fn heading(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_direction_is_unit() {
        let d = direction(Vec2::new(100.0, 100.0), Vec2::new(500.0, 100.0)).unwrap();
        assert!((d.x - 1.0).abs() < 1e-6);
        assert!(d.y.abs() < 1e-6);
    }

    #[test]
    fn test_direction_coincident_points() {
        assert!(direction(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_heading() {
        assert!(heading(Vec2::X).abs() < 1e-6);
        assert!((heading(Vec2::Y) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
