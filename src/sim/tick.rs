//! Per-frame simulation tick
//!
//! Advances the game by one fixed step. Movement is in constant per-frame
//! units, so there is no delta time.

use glam::Vec2;

use super::collision::{circles_overlap, clamp_to_canvas, inside_canvas, point_within};
use super::state::{AttackKind, GameEvent, GamePhase, GameState, Projectile};
use crate::config::MeleeTrigger;
use crate::direction;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Attack key is currently held
    pub attack_held: bool,
    /// Attack key went down since the previous tick
    pub attack_pressed: bool,
    /// Fire one projectile toward each point (canvas coordinates)
    pub fire_at: Vec<Vec2>,
    /// Restart the session before stepping
    pub reset: bool,
}

/// Advance the game state by one step
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Reset is accepted in any phase, including terminal ones
    if input.reset {
        state.reset();
    }

    // Frozen until reset
    if state.is_terminal() {
        return;
    }

    state.time_ticks += 1;

    if state.rules.ranged {
        for &target in &input.fire_at {
            fire(state, target);
        }
    }

    move_player(state, input);
    pursue_player(state);
    advance_projectiles(state);

    let melee_triggered = match state.rules.melee_trigger {
        MeleeTrigger::Press => input.attack_pressed,
        MeleeTrigger::Held => input.attack_held,
    };
    if state.rules.melee && melee_triggered {
        melee_strike(state);
    }

    resolve_projectile_hits(state);
    check_player_caught(state);

    if state.phase == GamePhase::Playing && state.all_enemies_defeated() {
        state.phase = GamePhase::GameWon;
        state.events.push(GameEvent::Won);
    }
}

/// Spawn a projectile from the player toward `target`, spending one ammo
fn fire(state: &mut GameState, target: Vec2) {
    if state.ammo == 0 {
        state.events.push(GameEvent::FireRejected);
        return;
    }
    // Clicking the player's own center gives no heading
    let Some(dir) = direction(state.player.pos, target) else {
        state.events.push(GameEvent::FireRejected);
        return;
    };

    let id = state.next_entity_id();
    state
        .projectiles
        .push(Projectile::new(id, state.player.pos, dir));
    state.ammo -= 1;
    state.events.push(GameEvent::Fired { projectile_id: id });
}

/// Apply held direction keys, then clamp to the canvas
fn move_player(state: &mut GameState, input: &TickInput) {
    let mut step = Vec2::ZERO;
    if input.up {
        step.y -= 1.0;
    }
    if input.down {
        step.y += 1.0;
    }
    if input.left {
        step.x -= 1.0;
    }
    if input.right {
        step.x += 1.0;
    }
    if state.rules.normalize_diagonal {
        step = step.normalize_or_zero();
    }

    let player = &mut state.player;
    player.pos = clamp_to_canvas(
        player.pos + step * player.speed,
        player.radius,
        state.width,
        state.height,
    );
}

/// Seek steering: each active enemy steps straight toward the player
fn pursue_player(state: &mut GameState) {
    let target = state.player.pos;
    for enemy in state.enemies.iter_mut().filter(|e| e.active) {
        if let Some(dir) = direction(enemy.pos, target) {
            enemy.pos += dir * enemy.speed;
        }
    }
}

/// Move projectiles along their fixed heading and drop those off-canvas
fn advance_projectiles(state: &mut GameState) {
    let speed = state.rules.projectile_speed;
    let (width, height) = (state.width, state.height);
    state.projectiles.retain_mut(|p| {
        p.pos += p.dir * speed;
        inside_canvas(p.pos, width, height)
    });
}

/// Defeat every active enemy touching the player
fn melee_strike(state: &mut GameState) {
    let player = &state.player;
    for enemy in state.enemies.iter_mut().filter(|e| e.active) {
        if circles_overlap(player.pos, player.radius, enemy.pos, enemy.radius) {
            enemy.active = false;
            state.score += 1;
            state.events.push(GameEvent::EnemyDefeated {
                enemy_id: enemy.id,
                by: AttackKind::Melee,
            });
        }
    }
}

/// Each projectile defeats the first active enemy it is inside of (in
/// insertion order) and is consumed
fn resolve_projectile_hits(state: &mut GameState) {
    let hit_fraction = state.rules.projectile_hit_fraction;
    let enemies = &mut state.enemies;
    let mut defeated = Vec::new();

    state.projectiles.retain(|p| {
        let hit = enemies
            .iter_mut()
            .find(|e| e.active && point_within(p.pos, e.pos, e.radius * hit_fraction));
        match hit {
            Some(enemy) => {
                enemy.active = false;
                defeated.push(enemy.id);
                false
            }
            None => true,
        }
    });

    for enemy_id in defeated {
        state.score += 1;
        state.events.push(GameEvent::EnemyDefeated {
            enemy_id,
            by: AttackKind::Projectile,
        });
    }
}

/// Any active enemy overlapping the player ends the game
fn check_player_caught(state: &mut GameState) {
    let player = &state.player;
    let caught = state
        .active_enemies()
        .find(|e| circles_overlap(player.pos, player.radius, e.pos, e.radius))
        .map(|e| e.id);

    if let Some(enemy_id) = caught {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::PlayerCaught { enemy_id });
    }
}
