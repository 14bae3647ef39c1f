//! Game session: state + input + config, advanced one frame at a time
//!
//! The host forwards raw events here and calls `frame()` once per display
//! refresh. Nothing in here touches the platform.

use glam::Vec2;

use crate::config::GameConfig;
use crate::input::InputState;
use crate::renderer::Scene;
use crate::sim::{GameEvent, GameState, tick};
use crate::ui::{HudView, retry_zone};

/// What a primary click turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Projectile queued toward the click (ammo was available)
    Fire,
    /// Click landed on the retry hot-zone of a terminal screen
    Retry,
    Ignored,
}

pub struct Session {
    config: GameConfig,
    state: GameState,
    input: InputState,
    frames: u64,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let state = GameState::new(&config);
        log::info!(
            "New session: {}x{} canvas, {} enemies, ranged={}, melee={}",
            config.width,
            config.height,
            state.enemies.len(),
            config.ranged,
            config.melee
        );
        Self {
            config,
            state,
            input: InputState::new(),
            frames: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access (scripted sessions and tests)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Frames driven so far, across resets
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn key_down(&mut self, code: &str) -> bool {
        let handled = self.input.key_down(code);
        if !handled {
            log::trace!("Ignoring key {}", code);
        }
        handled
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.input.key_up(code)
    }

    /// Window lost focus; pending key-ups will never arrive
    pub fn focus_lost(&mut self) {
        self.input.release_all();
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.input.pointer_moved(pos);
    }

    /// Primary action at `pos`: retry on a terminal screen, fire otherwise
    pub fn click(&mut self, pos: Vec2) -> ClickAction {
        self.input.pointer_moved(pos);

        if self.state.is_terminal() {
            if retry_zone(self.state.width, self.state.height).contains(pos) {
                self.input.request_reset();
                return ClickAction::Retry;
            }
            return ClickAction::Ignored;
        }

        if !self.config.ranged {
            return ClickAction::Ignored;
        }
        if self.state.ammo == 0 {
            log::debug!("Out of ammo, click ignored");
            return ClickAction::Ignored;
        }
        self.input.queue_fire(pos);
        ClickAction::Fire
    }

    /// Sample input and run one simulation step
    pub fn frame(&mut self) {
        let input = self.input.snapshot();
        tick(&mut self.state, &input);
        self.frames += 1;
        self.log_events();
    }

    /// Draw list for the current state
    pub fn scene(&self) -> Scene {
        Scene::build(&self.state, self.input.pointer())
    }

    /// Text layer for the current state
    pub fn hud(&self) -> HudView {
        HudView::from_state(&self.state)
    }

    fn log_events(&self) {
        for event in &self.state.events {
            match event {
                GameEvent::Fired { projectile_id } => {
                    log::debug!(
                        "Fired projectile {} ({} ammo left)",
                        projectile_id,
                        self.state.ammo
                    );
                }
                GameEvent::FireRejected => log::debug!("Fire rejected (ammo {})", self.state.ammo),
                GameEvent::EnemyDefeated { enemy_id, by } => {
                    log::info!(
                        "Enemy {} defeated by {:?}, score {}",
                        enemy_id,
                        by,
                        self.state.score
                    );
                }
                GameEvent::PlayerCaught { enemy_id } => {
                    log::info!(
                        "Caught by enemy {} - game over (score {})",
                        enemy_id,
                        self.state.score
                    );
                }
                GameEvent::Won => log::info!("All enemies defeated - score {}", self.state.score),
                GameEvent::Reset => log::info!("Session reset"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EnemyLayout, EnemySpawn};
    use crate::sim::GamePhase;

    fn session_with_enemy(x: f32, y: f32) -> Session {
        let config = GameConfig {
            enemies: EnemyLayout::Fixed {
                spawns: vec![EnemySpawn::at(x, y)],
            },
            ..Default::default()
        };
        Session::new(config)
    }

    #[test]
    fn test_click_fires_while_playing() {
        let mut session = session_with_enemy(700.0, 550.0);
        assert_eq!(session.click(Vec2::new(400.0, 100.0)), ClickAction::Fire);
        session.frame();
        assert_eq!(session.state().projectiles.len(), 1);
        assert_eq!(session.state().ammo, session.config().max_ammo - 1);
        assert_eq!(session.input().pointer(), Vec2::new(400.0, 100.0));
    }

    #[test]
    fn test_click_ignored_without_ranged() {
        let mut session = Session::new(GameConfig {
            ranged: false,
            ..Default::default()
        });
        assert_eq!(session.click(Vec2::new(10.0, 10.0)), ClickAction::Ignored);
    }

    #[test]
    fn test_click_without_ammo_is_ignored() {
        let mut session = session_with_enemy(700.0, 550.0);
        session.state_mut().ammo = 0;
        assert_eq!(session.click(Vec2::new(400.0, 100.0)), ClickAction::Ignored);
        session.frame();
        assert!(session.state().projectiles.is_empty());
        assert_eq!(session.state().ammo, 0);
        assert_eq!(session.input().pointer(), Vec2::new(400.0, 100.0));
    }

    #[test]
    fn test_retry_zone_click_resets_after_game_over() {
        let mut session = session_with_enemy(700.0, 550.0);
        session.state_mut().player.pos = Vec2::new(660.0, 530.0);
        session.state_mut().score = 2;
        session.frame();
        assert!(session.state().is_game_over());

        // Outside the zone: nothing happens
        assert_eq!(session.click(Vec2::new(10.0, 10.0)), ClickAction::Ignored);
        session.frame();
        assert!(session.state().is_game_over());
        assert!(session.state().projectiles.is_empty());

        // Inside the zone: reset on the next frame
        assert_eq!(session.click(Vec2::new(400.0, 360.0)), ClickAction::Retry);
        session.frame();
        assert_eq!(session.state().phase, GamePhase::Playing);
        assert_eq!(session.state().score, 0);
        assert!(session.state().enemies.iter().all(|e| e.active));
    }

    #[test]
    fn test_retry_zone_click_while_playing_fires() {
        let mut session = session_with_enemy(700.0, 550.0);
        assert_eq!(session.click(Vec2::new(400.0, 360.0)), ClickAction::Fire);
    }

    #[test]
    fn test_reset_key_mid_game() {
        let mut session = session_with_enemy(700.0, 550.0);
        session.key_down("KeyD");
        session.frame();
        assert_ne!(session.state().player.pos, session.state().player_start);

        session.key_up("KeyD");
        session.key_down("KeyR");
        session.frame();
        assert_eq!(session.state().player.pos, session.state().player_start);
        assert_eq!(session.state().enemies[0].origin, Vec2::new(700.0, 550.0));
    }

    #[test]
    fn test_focus_lost_releases_keys() {
        let mut session = session_with_enemy(700.0, 550.0);
        session.key_down("KeyD");
        session.focus_lost();
        session.frame();
        assert_eq!(session.state().player.pos, session.state().player_start);
    }

    #[test]
    fn test_melee_through_session() {
        let mut session = session_with_enemy(440.0, 300.0);
        session.key_down("KeyE");
        session.frame();
        assert!(session.state().is_game_won());
        assert_eq!(session.state().score, 1);
        assert!(session.hud().overlay.is_some());
        assert_eq!(session.frames(), 1);
    }
}
