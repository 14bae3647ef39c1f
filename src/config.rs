//! Game configuration
//!
//! Every tunable parameter lives here. The browser build reads an optional
//! JSON blob from the page; anything missing falls back to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Linear RGBA color
pub type Color = [f32; 4];

/// How the melee attack key triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MeleeTrigger {
    /// Strike once on the key-down frame
    #[default]
    Press,
    /// Strike every frame the key is held
    Held,
}

/// A single enemy placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    /// Overrides `GameConfig::enemy_radius`
    #[serde(default)]
    pub radius: Option<f32>,
    /// Overrides `GameConfig::enemy_speed`
    #[serde(default)]
    pub speed: Option<f32>,
}

impl EnemySpawn {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            radius: None,
            speed: None,
        }
    }
}

/// Where enemies start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnemyLayout {
    /// Explicit positions
    Fixed { spawns: Vec<EnemySpawn> },
    /// `count` enemies placed with the session seed, at least
    /// `min_player_distance` away from the player start
    Scattered { count: u32, min_player_distance: f32 },
}

impl Default for EnemyLayout {
    fn default() -> Self {
        EnemyLayout::Fixed {
            spawns: vec![
                EnemySpawn::at(CANVAS_WIDTH / 4.0, CANVAS_HEIGHT / 4.0),
                EnemySpawn::at(CANVAS_WIDTH * 3.0 / 4.0, CANVAS_HEIGHT / 4.0),
                EnemySpawn::at(CANVAS_WIDTH / 4.0, CANVAS_HEIGHT * 3.0 / 4.0),
            ],
        }
    }
}

/// Game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Canvas ===
    pub width: f32,
    pub height: f32,

    // === Player ===
    pub player_radius: f32,
    pub player_speed: f32,
    pub player_color: Color,
    /// Scale diagonal movement down to `player_speed` (off = √2 faster diagonals)
    pub normalize_diagonal: bool,

    // === Enemies ===
    pub enemy_radius: f32,
    pub enemy_speed: f32,
    pub enemy_color: Color,
    pub enemies: EnemyLayout,
    /// Seed for scattered layouts (the browser build overrides it with the clock)
    pub seed: u64,

    // === Ranged attack ===
    pub ranged: bool,
    pub max_ammo: u32,
    pub projectile_speed: f32,
    pub projectile_hit_fraction: f32,
    /// Sprite for projectiles; a fallback shape is drawn when it fails to load
    pub sprite_url: Option<String>,

    // === Melee attack ===
    pub melee: bool,
    pub melee_trigger: MeleeTrigger,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            player_color: [0.5, 0.0, 0.5, 1.0], // purple
            normalize_diagonal: false,

            enemy_radius: ENEMY_RADIUS,
            enemy_speed: ENEMY_SPEED,
            enemy_color: [0.9, 0.1, 0.1, 1.0], // red
            enemies: EnemyLayout::default(),
            seed: 0,

            ranged: true,
            max_ammo: MAX_AMMO,
            projectile_speed: PROJECTILE_SPEED,
            projectile_hit_fraction: PROJECTILE_HIT_FRACTION,
            sprite_url: None,

            melee: true,
            melee_trigger: MeleeTrigger::Press,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config and repair out-of-range values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(json)?;
        config.validate();
        Ok(config)
    }

    /// Replace values the simulation cannot work with. Each repair is logged.
    pub fn validate(&mut self) {
        let defaults = Self::default();

        if !(self.width > 0.0) || !(self.height > 0.0) {
            log::warn!(
                "Invalid canvas size {}x{}, using {}x{}",
                self.width,
                self.height,
                defaults.width,
                defaults.height
            );
            self.width = defaults.width;
            self.height = defaults.height;
        }

        if !(self.player_radius > 0.0) {
            log::warn!("Invalid player_radius {}, using default", self.player_radius);
            self.player_radius = defaults.player_radius;
        }
        // Player must fit inside the canvas or clamping has no valid range
        let max_radius = self.width.min(self.height) / 2.0;
        if self.player_radius > max_radius {
            log::warn!(
                "player_radius {} does not fit the canvas, clamping to {}",
                self.player_radius,
                max_radius
            );
            self.player_radius = max_radius;
        }
        if !(self.player_speed >= 0.0) {
            log::warn!("Invalid player_speed {}, using default", self.player_speed);
            self.player_speed = defaults.player_speed;
        }

        if !(self.enemy_radius > 0.0) {
            log::warn!("Invalid enemy_radius {}, using default", self.enemy_radius);
            self.enemy_radius = defaults.enemy_radius;
        }
        if !(self.enemy_speed >= 0.0) {
            log::warn!("Invalid enemy_speed {}, using default", self.enemy_speed);
            self.enemy_speed = defaults.enemy_speed;
        }
        if let EnemyLayout::Fixed { spawns } = &mut self.enemies {
            for (i, spawn) in spawns.iter_mut().enumerate() {
                if let Some(radius) = spawn.radius.filter(|r| !(*r > 0.0)) {
                    log::warn!("Invalid radius {} for enemy {}, using enemy_radius", radius, i);
                    spawn.radius = None;
                }
                if let Some(speed) = spawn.speed.filter(|s| !(*s >= 0.0)) {
                    log::warn!("Invalid speed {} for enemy {}, using enemy_speed", speed, i);
                    spawn.speed = None;
                }
            }
        }

        if !(self.projectile_speed > 0.0) {
            log::warn!(
                "Invalid projectile_speed {}, using default",
                self.projectile_speed
            );
            self.projectile_speed = defaults.projectile_speed;
        }
        if !(self.projectile_hit_fraction > 0.0 && self.projectile_hit_fraction <= 1.0) {
            log::warn!(
                "projectile_hit_fraction {} outside (0, 1], using default",
                self.projectile_hit_fraction
            );
            self.projectile_hit_fraction = defaults.projectile_hit_fraction;
        }

        if !self.ranged && !self.melee {
            log::warn!("Both attacks disabled - enemies cannot be defeated");
        }
    }

    /// Config element id in the host page
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "game-config";

    /// Load config from the page's `<script id="game-config">` (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) if !json.trim().is_empty() => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded game config from page");
                    config
                }
                Err(e) => {
                    log::warn!("Bad game config ({}), using defaults", e);
                    Self::default()
                }
            },
            _ => {
                log::info!("Using default game config");
                Self::default()
            }
        }
    }

    /// Native builds always use the defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "max_ammo": 3, "melee_trigger": "held" }"#)
            .unwrap();
        assert_eq!(config.max_ammo, 3);
        assert_eq!(config.melee_trigger, MeleeTrigger::Held);
        assert_eq!(config.width, CANVAS_WIDTH);
        assert_eq!(config.player_speed, PLAYER_SPEED);
        assert_eq!(config.enemies, EnemyLayout::default());
        assert_eq!(config.sprite_url, None);
    }

    #[test]
    fn test_layout_json() {
        let config = GameConfig::from_json(
            r#"{ "enemies": { "kind": "scattered", "count": 4, "min_player_distance": 150.0 } }"#,
        )
        .unwrap();
        assert_eq!(
            config.enemies,
            EnemyLayout::Scattered {
                count: 4,
                min_player_distance: 150.0
            }
        );

        let config = GameConfig::from_json(
            r#"{ "enemies": { "kind": "fixed", "spawns": [{ "x": 10, "y": 20, "speed": 3 }] } }"#,
        )
        .unwrap();
        match config.enemies {
            EnemyLayout::Fixed { spawns } => {
                assert_eq!(spawns.len(), 1);
                assert_eq!(spawns[0].speed, Some(3.0));
                assert_eq!(spawns[0].radius, None);
            }
            other => panic!("unexpected layout {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(GameConfig::from_json("{ not json").is_err());
        assert!(GameConfig::from_json(r#"{ "width": "wide" }"#).is_err());
    }

    #[test]
    fn test_validate_repairs() {
        let mut config = GameConfig {
            width: -1.0,
            player_radius: 0.0,
            projectile_hit_fraction: 1.5,
            enemy_speed: f32::NAN,
            ..Default::default()
        };
        config.validate();
        assert_eq!(config.width, CANVAS_WIDTH);
        assert_eq!(config.height, CANVAS_HEIGHT);
        assert_eq!(config.player_radius, PLAYER_RADIUS);
        assert_eq!(config.projectile_hit_fraction, PROJECTILE_HIT_FRACTION);
        assert_eq!(config.enemy_speed, ENEMY_SPEED);
    }

    #[test]
    fn test_validate_repairs_spawn_overrides() {
        let config = GameConfig::from_json(
            r#"{ "enemies": { "kind": "fixed", "spawns": [
                { "x": 200, "y": 150, "radius": -30, "speed": -2 },
                { "x": 600, "y": 150, "radius": 12, "speed": 0 }
            ] } }"#,
        )
        .unwrap();
        match config.enemies {
            EnemyLayout::Fixed { spawns } => {
                assert_eq!(spawns[0].radius, None);
                assert_eq!(spawns[0].speed, None);
                assert_eq!(spawns[1].radius, Some(12.0));
                assert_eq!(spawns[1].speed, Some(0.0));
            }
            other => panic!("unexpected layout {:?}", other),
        }

        let mut config = GameConfig {
            enemies: EnemyLayout::Fixed {
                spawns: vec![EnemySpawn {
                    radius: Some(f32::NAN),
                    speed: Some(f32::NAN),
                    ..EnemySpawn::at(10.0, 10.0)
                }],
            },
            ..Default::default()
        };
        config.validate();
        assert_eq!(
            config.enemies,
            EnemyLayout::Fixed {
                spawns: vec![EnemySpawn::at(10.0, 10.0)]
            }
        );
    }

    #[test]
    fn test_validate_shrinks_oversized_player() {
        let mut config = GameConfig {
            width: 40.0,
            height: 30.0,
            player_radius: 25.0,
            ..Default::default()
        };
        config.validate();
        assert_eq!(config.player_radius, 15.0);
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }
}
