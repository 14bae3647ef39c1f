//! Game state and core simulation types
//!
//! Everything the simulation step reads or writes lives in `GameState`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::{Color, EnemyLayout, GameConfig, MeleeTrigger};
use crate::distance;

/// Current phase of gameplay. The two terminal phases exclude each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Playing,
    /// An enemy reached the player
    GameOver,
    /// Every enemy is inactive
    GameWon,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        self != GamePhase::Playing
    }
}

/// How an enemy was defeated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    Melee,
    Projectile,
}

/// Something that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Fired { projectile_id: u32 },
    FireRejected,
    EnemyDefeated { enemy_id: u32, by: AttackKind },
    PlayerCaught { enemy_id: u32 },
    Won,
    Reset,
}

/// The player circle
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub color: Color,
}

/// A pursuing enemy. Defeated enemies stay in the list with `active = false`.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Start position, restored on reset
    pub origin: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub color: Color,
    pub active: bool,
}

/// A straight-flying projectile
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub origin: Vec2,
    /// Unit direction, fixed at launch
    pub dir: Vec2,
    /// Heading angle of `dir` (radians), used to rotate the sprite
    pub heading: f32,
}

impl Projectile {
    /// Launch from `origin` along the unit vector `dir`
    pub fn new(id: u32, origin: Vec2, dir: Vec2) -> Self {
        Self {
            id,
            pos: origin,
            origin,
            dir,
            heading: crate::heading(dir),
        }
    }
}

/// Simulation parameters copied out of `GameConfig`
#[derive(Debug, Clone, PartialEq)]
pub struct Rules {
    pub ranged: bool,
    pub projectile_speed: f32,
    pub projectile_hit_fraction: f32,
    pub melee: bool,
    pub melee_trigger: MeleeTrigger,
    pub normalize_diagonal: bool,
}

impl From<&GameConfig> for Rules {
    fn from(config: &GameConfig) -> Self {
        Self {
            ranged: config.ranged,
            projectile_speed: config.projectile_speed,
            projectile_hit_fraction: config.projectile_hit_fraction,
            melee: config.melee,
            melee_trigger: config.melee_trigger,
            normalize_diagonal: config.normalize_diagonal,
        }
    }
}

/// Maximum placement attempts per scattered enemy
const SCATTER_ATTEMPTS: u32 = 100;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Canvas size
    pub width: f32,
    pub height: f32,
    pub rules: Rules,
    pub player: Player,
    /// Player position at session start, restored on reset
    pub player_start: Vec2,
    /// Enemies in insertion order (collision tie-break order)
    pub enemies: Vec<Enemy>,
    /// Projectiles in insertion order
    pub projectiles: Vec<Projectile>,
    pub score: u32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub phase: GamePhase,
    /// Simulation tick counter (since the last reset)
    pub time_ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh session from the config
    pub fn new(config: &GameConfig) -> Self {
        let player_start = Vec2::new(config.width / 2.0, config.height / 2.0);
        let mut state = Self {
            width: config.width,
            height: config.height,
            rules: Rules::from(config),
            player: Player {
                pos: player_start,
                radius: config.player_radius,
                speed: config.player_speed,
                color: config.player_color,
            },
            player_start,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            score: 0,
            ammo: config.max_ammo,
            max_ammo: config.max_ammo,
            phase: GamePhase::Playing,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };

        state.spawn_enemies(config);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an enemy at `pos`; it returns there on reset
    pub fn add_enemy(&mut self, pos: Vec2, radius: f32, speed: f32, color: Color) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            pos,
            origin: pos,
            radius,
            speed,
            color,
            active: true,
        });
        id
    }

    fn spawn_enemies(&mut self, config: &GameConfig) {
        match &config.enemies {
            EnemyLayout::Fixed { spawns } => {
                for spawn in spawns {
                    let radius = spawn.radius.unwrap_or(config.enemy_radius);
                    let speed = spawn.speed.unwrap_or(config.enemy_speed);
                    self.add_enemy(
                        Vec2::new(spawn.x, spawn.y),
                        radius,
                        speed,
                        config.enemy_color,
                    );
                }
            }
            EnemyLayout::Scattered {
                count,
                min_player_distance,
            } => {
                let mut rng = Pcg32::seed_from_u64(config.seed);
                let r = config.enemy_radius;
                let (max_x, max_y) = ((self.width - r).max(r), (self.height - r).max(r));

                for _ in 0..*count {
                    let mut pos = Vec2::new(r, r);
                    for attempt in 0..SCATTER_ATTEMPTS {
                        pos = Vec2::new(rng.random_range(r..=max_x), rng.random_range(r..=max_y));
                        if distance(pos, self.player_start) >= *min_player_distance {
                            break;
                        }
                        if attempt + 1 == SCATTER_ATTEMPTS {
                            log::warn!(
                                "No spot {} away from the player, placing enemy at {:?}",
                                min_player_distance,
                                pos
                            );
                        }
                    }
                    self.add_enemy(pos, r, config.enemy_speed, config.enemy_color);
                }
            }
        }
        log::debug!("Spawned {} enemies", self.enemies.len());
    }

    /// Restore the session to its starting values
    pub fn reset(&mut self) {
        self.player.pos = self.player_start;
        for enemy in &mut self.enemies {
            enemy.pos = enemy.origin;
            enemy.active = true;
        }
        self.projectiles.clear();
        self.score = 0;
        self.ammo = self.max_ammo;
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.events.push(GameEvent::Reset);
    }

    /// Enemies still eligible for pursuit and collision
    pub fn active_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.active)
    }

    pub fn all_enemies_defeated(&self) -> bool {
        self.enemies.iter().all(|e| !e.active)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_game_won(&self) -> bool {
        self.phase == GamePhase::GameWon
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnemySpawn;

    #[test]
    fn test_new_state_defaults() {
        let config = GameConfig::default();
        let state = GameState::new(&config);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.enemies.len(), 3);
        assert_eq!(state.enemies[0].pos, Vec2::new(200.0, 150.0));
        assert!(state.enemies.iter().all(|e| e.active && e.pos == e.origin));
        assert_eq!(state.ammo, config.max_ammo);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_spawn_overrides() {
        let mut spawn = EnemySpawn::at(10.0, 20.0);
        spawn.radius = Some(5.0);
        let config = GameConfig {
            enemies: EnemyLayout::Fixed {
                spawns: vec![spawn, EnemySpawn::at(30.0, 40.0)],
            },
            ..Default::default()
        };
        let state = GameState::new(&config);
        assert_eq!(state.enemies[0].radius, 5.0);
        assert_eq!(state.enemies[0].speed, config.enemy_speed);
        assert_eq!(state.enemies[1].radius, config.enemy_radius);
        assert_ne!(state.enemies[0].id, state.enemies[1].id);
    }

    #[test]
    fn test_scattered_layout_is_seeded() {
        let config = GameConfig {
            enemies: EnemyLayout::Scattered {
                count: 6,
                min_player_distance: 150.0,
            },
            seed: 42,
            ..Default::default()
        };
        let a = GameState::new(&config);
        let b = GameState::new(&config);
        assert_eq!(a.enemies.len(), 6);
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
            assert!(distance(ea.pos, a.player_start) >= 150.0);
            assert!(ea.pos.x >= ea.radius && ea.pos.x <= a.width - ea.radius);
            assert!(ea.pos.y >= ea.radius && ea.pos.y <= a.height - ea.radius);
        }
    }

    #[test]
    fn test_reset_restores_start() {
        let mut state = GameState::new(&GameConfig::default());
        state.player.pos = Vec2::new(30.0, 30.0);
        state.enemies[0].pos = Vec2::new(1.0, 1.0);
        state.enemies[1].active = false;
        let id = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::new(id, Vec2::ZERO, Vec2::X));
        state.score = 7;
        state.ammo = 0;
        state.phase = GamePhase::GameOver;

        state.reset();

        assert_eq!(state.player.pos, state.player_start);
        assert!(state.enemies.iter().all(|e| e.active && e.pos == e.origin));
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.ammo, state.max_ammo);
        assert!(!state.is_game_over() && !state.is_game_won());
        assert_eq!(state.events.last(), Some(&GameEvent::Reset));
    }

    #[test]
    fn test_projectile_heading() {
        let p = Projectile::new(1, Vec2::ZERO, Vec2::new(0.0, -1.0));
        assert!((p.heading + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
