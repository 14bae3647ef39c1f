//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::scene::{DrawCmd, Scene};
use super::vertex::{Vertex, colors};
use crate::ui::Rect;

/// Circle segments (enough for a 25 px radius to look round)
const CIRCLE_SEGMENTS: u32 = 40;

/// A run of triangles drawn with one texture
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Uses the projectile sprite instead of the white texel
    pub textured: bool,
    pub vertices: Vec<Vertex>,
}

/// Tessellate a scene into ordered batches. Projectiles use the sprite when
/// `sprite_available`, otherwise a solid dart shape.
pub fn tessellate(scene: &Scene, sprite_available: bool) -> Vec<Batch> {
    let mut batches: Vec<Batch> = Vec::new();

    for cmd in &scene.commands {
        let (textured, vertices) = match *cmd {
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => (false, circle(center, radius, color, CIRCLE_SEGMENTS)),
            DrawCmd::Projectile {
                center,
                heading,
                length,
                width,
            } => {
                if sprite_available {
                    (
                        true,
                        oriented_quad(center, heading, length, width, colors::SPRITE),
                    )
                } else {
                    (false, dart(center, heading, length, width, colors::PROJECTILE))
                }
            }
            DrawCmd::Crosshair {
                center,
                size,
                color,
            } => (false, crosshair(center, size, color)),
            DrawCmd::Rect { rect, color } => (false, rect_fill(&rect, color)),
            DrawCmd::RectOutline {
                rect,
                thickness,
                color,
            } => (false, rect_outline(&rect, thickness, color)),
        };

        // Merge into the previous batch when the texture matches
        match batches.last_mut() {
            Some(last) if last.textured == textured => last.vertices.extend(vertices),
            _ => batches.push(Batch { textured, vertices }),
        }
    }

    batches
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Two triangles covering an axis-aligned rectangle
pub fn rect_fill(rect: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (min, max) = (rect.min, rect.max());
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Four thin rectangles along the edges of `rect`
pub fn rect_outline(rect: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (min, max) = (rect.min, rect.max());
    let t = thickness;
    [
        Rect::new(min, Vec2::new(rect.size.x, t)),
        Rect::new(Vec2::new(min.x, max.y - t), Vec2::new(rect.size.x, t)),
        Rect::new(min, Vec2::new(t, rect.size.y)),
        Rect::new(Vec2::new(max.x - t, min.y), Vec2::new(t, rect.size.y)),
    ]
    .iter()
    .flat_map(|edge| rect_fill(edge, color))
    .collect()
}

/// Thick line segment from `a` to `b`
pub fn line(a: Vec2, b: Vec2, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (thickness / 2.0);

    let (a1, a2, b1, b2) = (a + perp, a - perp, b + perp, b - perp);
    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// Plus-shaped pointer marker
pub fn crosshair(center: Vec2, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = line(
        center - Vec2::new(size, 0.0),
        center + Vec2::new(size, 0.0),
        2.0,
        color,
    );
    vertices.extend(line(
        center - Vec2::new(0.0, size),
        center + Vec2::new(0.0, size),
        2.0,
        color,
    ));
    vertices
}

/// Textured quad of `length` x `width` centered on `center`, with the
/// texture's +u axis pointing along `heading`
pub fn oriented_quad(
    center: Vec2,
    heading: f32,
    length: f32,
    width: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let forward = Vec2::from_angle(heading) * (length / 2.0);
    let side = forward.perp().normalize_or_zero() * (width / 2.0);

    let back_left = center - forward - side;
    let back_right = center - forward + side;
    let front_left = center + forward - side;
    let front_right = center + forward + side;

    vec![
        Vertex::textured(back_left.x, back_left.y, 0.0, 0.0, color),
        Vertex::textured(front_left.x, front_left.y, 1.0, 0.0, color),
        Vertex::textured(back_right.x, back_right.y, 0.0, 1.0, color),
        Vertex::textured(back_right.x, back_right.y, 0.0, 1.0, color),
        Vertex::textured(front_left.x, front_left.y, 1.0, 0.0, color),
        Vertex::textured(front_right.x, front_right.y, 1.0, 1.0, color),
    ]
}

/// Fallback projectile: a solid arrowhead pointing along `heading`
pub fn dart(center: Vec2, heading: f32, length: f32, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let forward = Vec2::from_angle(heading) * (length / 2.0);
    let side = forward.perp().normalize_or_zero() * (width / 2.0);

    let tip = center + forward;
    let back_left = center - forward - side;
    let back_right = center - forward + side;
    // Notch so the heading reads at a glance
    let notch = center - forward * 0.5;

    vec![
        Vertex::new(tip.x, tip.y, color),
        Vertex::new(back_left.x, back_left.y, color),
        Vertex::new(notch.x, notch.y, color),
        Vertex::new(tip.x, tip.y, color),
        Vertex::new(notch.x, notch.y, color),
        Vertex::new(back_right.x, back_right.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{GamePhase, GameState, Projectile};

    fn scene_with_projectile(phase: GamePhase) -> Scene {
        let mut state = GameState::new(&GameConfig::default());
        let id = state.next_entity_id();
        state
            .projectiles
            .push(Projectile::new(id, Vec2::new(50.0, 50.0), Vec2::X));
        state.phase = phase;
        Scene::build(&state, Vec2::ZERO)
    }

    #[test]
    fn test_circle_vertex_count() {
        let vertices = circle(Vec2::ZERO, 10.0, [1.0; 4], 12);
        assert_eq!(vertices.len(), 36);
        // Every rim vertex sits on the radius
        for v in vertices.iter().skip(1).step_by(3) {
            let r = Vec2::from(v.position).length();
            assert!((r - 10.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_tessellate_with_sprite_splits_batches() {
        let scene = scene_with_projectile(GamePhase::Playing);
        let batches = tessellate(&scene, true);
        // Circles | sprite | crosshair
        assert_eq!(batches.len(), 3);
        assert!(!batches[0].textured);
        assert!(batches[1].textured);
        assert_eq!(batches[1].vertices.len(), 6);
        assert!(!batches[2].textured);
    }

    #[test]
    fn test_tessellate_fallback_is_single_batch() {
        let scene = scene_with_projectile(GamePhase::Playing);
        let batches = tessellate(&scene, false);
        assert_eq!(batches.len(), 1);
        assert!(!batches[0].textured);
    }

    #[test]
    fn test_overlay_drawn_over_sprites() {
        let scene = scene_with_projectile(GamePhase::GameWon);
        let batches = tessellate(&scene, true);
        let last = batches.last().unwrap();
        assert!(!last.textured);
        // Dim overlay (6) + retry outline (4 * 6) after the crosshair (12)
        assert_eq!(last.vertices.len(), 12 + 6 + 24);
    }

    #[test]
    fn test_oriented_quad_follows_heading() {
        let quad = oriented_quad(Vec2::ZERO, std::f32::consts::FRAC_PI_2, 20.0, 10.0, [1.0; 4]);
        // u = 1 corners are at the front (+y when heading is pi/2)
        for v in quad.iter().filter(|v| v.uv[0] == 1.0) {
            assert!((v.position[1] - 10.0).abs() < 1e-4);
        }
        for v in quad.iter().filter(|v| v.uv[0] == 0.0) {
            assert!((v.position[1] + 10.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_dart_tip() {
        let vertices = dart(Vec2::new(100.0, 100.0), 0.0, 24.0, 12.0, [1.0; 4]);
        assert_eq!(vertices.len(), 6);
        assert!((vertices[0].position[0] - 112.0).abs() < 1e-4);
        assert!((vertices[0].position[1] - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_rect_fill_corners() {
        let rect = Rect::new(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        let vertices = rect_fill(&rect, [1.0; 4]);
        assert_eq!(vertices.len(), 6);
        assert!(vertices.iter().any(|v| v.position == [4.0, 6.0]));
        assert!(vertices.iter().any(|v| v.position == [1.0, 2.0]));
    }
}
