//! Scene projection
//!
//! Turns game state into an ordered draw list in canvas coordinates. Pure:
//! reads state, never changes it.

use glam::Vec2;

use super::vertex::colors;
use crate::config::Color;
use crate::consts::{CROSSHAIR_SIZE, PROJECTILE_LENGTH, PROJECTILE_WIDTH};
use crate::sim::GameState;
use crate::ui::{Rect, retry_zone};

/// One primitive, painted in list order
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Sprite (or fallback dart) rotated to `heading`
    Projectile {
        center: Vec2,
        heading: f32,
        length: f32,
        width: f32,
    },
    Crosshair {
        center: Vec2,
        size: f32,
        color: Color,
    },
    Rect {
        rect: Rect,
        color: Color,
    },
    RectOutline {
        rect: Rect,
        thickness: f32,
        color: Color,
    },
}

/// Draw list for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub background: Color,
    pub commands: Vec<DrawCmd>,
}

impl Scene {
    pub fn build(state: &GameState, pointer: Vec2) -> Self {
        let mut commands = Vec::with_capacity(state.enemies.len() + state.projectiles.len() + 4);

        commands.push(DrawCmd::Circle {
            center: state.player.pos,
            radius: state.player.radius,
            color: state.player.color,
        });

        for enemy in state.active_enemies() {
            commands.push(DrawCmd::Circle {
                center: enemy.pos,
                radius: enemy.radius,
                color: enemy.color,
            });
        }

        for projectile in &state.projectiles {
            commands.push(DrawCmd::Projectile {
                center: projectile.pos,
                heading: projectile.heading,
                length: PROJECTILE_LENGTH,
                width: PROJECTILE_WIDTH,
            });
        }

        commands.push(DrawCmd::Crosshair {
            center: pointer,
            size: CROSSHAIR_SIZE,
            color: colors::CROSSHAIR,
        });

        if state.is_terminal() {
            commands.push(DrawCmd::Rect {
                rect: Rect::new(Vec2::ZERO, Vec2::new(state.width, state.height)),
                color: colors::OVERLAY_DIM,
            });
            commands.push(DrawCmd::RectOutline {
                rect: retry_zone(state.width, state.height),
                thickness: 2.0,
                color: colors::RETRY_BOX,
            });
        }

        Self {
            width: state.width,
            height: state.height,
            background: colors::BACKGROUND,
            commands,
        }
    }
}
