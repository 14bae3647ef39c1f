//! HUD and terminal overlay
//!
//! Text is shown in DOM elements layered over the canvas; this module only
//! decides what they say and where the retry hot-zone is.

use glam::Vec2;

use crate::consts::{RETRY_ZONE_HEIGHT, RETRY_ZONE_OFFSET_Y, RETRY_ZONE_WIDTH};
use crate::sim::{GamePhase, GameState};

/// Axis-aligned rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Inclusive on all edges
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }
}

/// The clickable retry box, fixed below the canvas center
pub fn retry_zone(width: f32, height: f32) -> Rect {
    Rect::from_center(
        Vec2::new(width / 2.0, height / 2.0 + RETRY_ZONE_OFFSET_Y),
        Vec2::new(RETRY_ZONE_WIDTH, RETRY_ZONE_HEIGHT),
    )
}

/// Overlay shown in a terminal phase
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub title: &'static str,
    pub detail: String,
    pub retry_label: &'static str,
    pub retry_zone: Rect,
}

/// Everything the text layer displays for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub score: String,
    /// Only when the ranged attack is enabled
    pub ammo: Option<String>,
    pub overlay: Option<OverlayView>,
}

impl HudView {
    pub fn from_state(state: &GameState) -> Self {
        let title = match state.phase {
            GamePhase::Playing => None,
            GamePhase::GameOver => Some("Game Over"),
            GamePhase::GameWon => Some("You Win!"),
        };

        Self {
            score: format!("Score: {}", state.score),
            ammo: state
                .rules
                .ranged
                .then(|| format!("Ammo: {}/{}", state.ammo, state.max_ammo)),
            overlay: title.map(|title| OverlayView {
                title,
                detail: format!("Final score: {}", state.score),
                retry_label: "Retry",
                retry_zone: retry_zone(state.width, state.height),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_retry_zone_geometry() {
        let zone = retry_zone(800.0, 600.0);
        assert_eq!(zone.center(), Vec2::new(400.0, 360.0));
        assert_eq!(zone.min, Vec2::new(300.0, 335.0));
        assert_eq!(zone.max(), Vec2::new(500.0, 385.0));
    }

    #[test]
    fn test_rect_contains() {
        let zone = retry_zone(800.0, 600.0);
        assert!(zone.contains(Vec2::new(400.0, 360.0)));
        assert!(zone.contains(Vec2::new(300.0, 335.0)));
        assert!(zone.contains(Vec2::new(500.0, 385.0)));
        assert!(!zone.contains(Vec2::new(299.0, 360.0)));
        assert!(!zone.contains(Vec2::new(400.0, 386.0)));
    }

    #[test]
    fn test_hud_playing() {
        let mut state = GameState::new(&GameConfig::default());
        state.score = 2;
        state.ammo = 7;
        let hud = HudView::from_state(&state);
        assert_eq!(hud.score, "Score: 2");
        assert_eq!(hud.ammo.as_deref(), Some("Ammo: 7/10"));
        assert!(hud.overlay.is_none());
    }

    #[test]
    fn test_hud_hides_ammo_without_ranged() {
        let config = GameConfig {
            ranged: false,
            ..Default::default()
        };
        let hud = HudView::from_state(&GameState::new(&config));
        assert!(hud.ammo.is_none());
    }

    #[test]
    fn test_hud_overlays() {
        let mut state = GameState::new(&GameConfig::default());
        state.score = 3;
        state.phase = GamePhase::GameWon;
        let overlay = HudView::from_state(&state).overlay.unwrap();
        assert_eq!(overlay.title, "You Win!");
        assert_eq!(overlay.detail, "Final score: 3");
        assert_eq!(overlay.retry_zone, retry_zone(800.0, 600.0));

        state.phase = GamePhase::GameOver;
        let overlay = HudView::from_state(&state).overlay.unwrap();
        assert_eq!(overlay.title, "Game Over");
    }
}
