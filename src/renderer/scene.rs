//! Scene construction
//!
//! Builds a back-to-front display list from the game state. There is no depth
//! buffer: items are painted in list order, so the ordering here is what makes
//! near things cover far things.

use std::cmp::Reverse;
use std::f32::consts::PI;

use glam::{Affine2, Vec2, Vec3};

use super::projection::project;
use super::vertex::{Color, colors, with_alpha};
use crate::consts::*;
use crate::sim::{FeedbackColor, GameState, PlayerAction, TileKind};

/// Geometry in screen pixels
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Convex polygon, filled
    Fill(Vec<Vec2>),
    /// Straight line of the given pixel width
    Stroke { from: Vec2, to: Vec2, width: f32 },
    /// Axis-aligned filled ellipse
    Ellipse { center: Vec2, radii: Vec2 },
}

/// Which entity produced a draw item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Grid,
    Tile(u32),
    Particle,
    Player,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub source: Source,
    pub shape: Shape,
    pub color: Color,
}

/// One frame's display list
#[derive(Debug, Clone)]
pub struct Frame {
    /// Surface size in pixels
    pub viewport: Vec2,
    pub clear: Color,
    /// Paint order: first item is furthest back
    pub items: Vec<DrawItem>,
}

impl Frame {
    /// Tile indices in the order they were painted
    pub fn tile_order(&self) -> Vec<u32> {
        let mut order: Vec<u32> = Vec::new();
        for item in &self.items {
            if let Source::Tile(index) = item.source {
                if order.last() != Some(&index) {
                    order.push(index);
                }
            }
        }
        order
    }
}

/// Accumulates items, applying the shake offset to everything it paints
struct Painter {
    items: Vec<DrawItem>,
    offset: Vec2,
}

impl Painter {
    fn fill(&mut self, source: Source, points: impl IntoIterator<Item = Vec2>, color: Color) {
        let points = points.into_iter().map(|p| p + self.offset).collect();
        self.items.push(DrawItem {
            source,
            shape: Shape::Fill(points),
            color,
        });
    }

    fn rect(&mut self, source: Source, min: Vec2, size: Vec2, color: Color) {
        self.fill(
            source,
            [
                min,
                min + Vec2::new(size.x, 0.0),
                min + size,
                min + Vec2::new(0.0, size.y),
            ],
            color,
        );
    }

    fn stroke(&mut self, source: Source, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.items.push(DrawItem {
            source,
            shape: Shape::Stroke {
                from: from + self.offset,
                to: to + self.offset,
                width,
            },
            color,
        });
    }

    fn ellipse(&mut self, source: Source, center: Vec2, radii: Vec2, color: Color) {
        self.items.push(DrawItem {
            source,
            shape: Shape::Ellipse {
                center: center + self.offset,
                radii,
            },
            color,
        });
    }
}

/// Build the frame for `state` on a `viewport`-sized surface.
/// `shake` is the camera shake offset for this frame.
pub fn build_frame(state: &GameState, viewport: Vec2, shake: Vec2) -> Frame {
    let mut painter = Painter {
        items: Vec::with_capacity(64 + state.particles.len()),
        offset: shake,
    };

    draw_grid(&mut painter, state, viewport);
    draw_tiles(&mut painter, state, viewport);
    draw_particles(&mut painter, state, viewport);
    draw_player(&mut painter, state, viewport);

    Frame {
        viewport,
        clear: colors::BACKGROUND,
        items: painter.items,
    }
}

fn draw_grid(painter: &mut Painter, state: &GameState, viewport: Vec2) {
    let fov = state.tuning.fov;
    let grid_offset = state.world.camera.position.rem_euclid(GRID_ROW_SPACING);

    // Rows sweep toward the camera as the world scrolls
    for i in 0..GRID_ROWS {
        let z = i as f32 * GRID_ROW_SPACING - grid_offset;
        if z < NEAR_CULL {
            continue;
        }
        let left = project(Vec3::new(-GRID_HALF_WIDTH, GRID_FLOOR_Y, z), viewport, fov);
        let right = project(Vec3::new(GRID_HALF_WIDTH, GRID_FLOOR_Y, z), viewport, fov);
        painter.stroke(Source::Grid, left.pos, right.pos, 1.0, colors::GRID);
    }

    for i in -GRID_COLUMNS..=GRID_COLUMNS {
        let x = i as f32 * GRID_COLUMN_SPACING;
        let near = project(Vec3::new(x, GRID_FLOOR_Y, NEAR_CULL), viewport, fov);
        let far = project(Vec3::new(x, GRID_FLOOR_Y, DRAW_DISTANCE), viewport, fov);
        painter.stroke(Source::Grid, near.pos, far.pos, 1.0, colors::GRID);
    }
}

fn draw_tiles(painter: &mut Painter, state: &GameState, viewport: Vec2) {
    let fov = state.tuning.fov;
    let spacing = state.tuning.tile_spacing;
    let camera = state.world.camera.position;

    let mut visible: Vec<_> = state
        .tiles
        .iter()
        .filter(|t| {
            let z = t.depth(spacing) - camera;
            z > -fov && z < DRAW_DISTANCE
        })
        .collect();
    visible.sort_by_key(|t| Reverse(t.index));

    for tile in visible {
        let source = Source::Tile(tile.index);
        let z = tile.depth(spacing) - camera;
        let p = project(Vec3::new(0.0, 0.0, z), viewport, fov);
        let (c, s) = (p.pos, p.scale);

        // Platform
        let w = 400.0 * s;
        painter.rect(
            source,
            Vec2::new(c.x - w / 2.0, c.y + 150.0 * s),
            Vec2::new(w, 20.0 * s),
            colors::PLATFORM,
        );

        let size = 120.0 * s;
        match tile.kind {
            TileKind::Enemy => {
                painter.fill(
                    source,
                    [
                        Vec2::new(c.x, c.y - size),
                        Vec2::new(c.x + size / 2.0, c.y),
                        Vec2::new(c.x, c.y + size / 2.0),
                        Vec2::new(c.x - size / 2.0, c.y),
                    ],
                    colors::ENEMY,
                );
                painter.ellipse(
                    source,
                    Vec2::new(c.x, c.y - size / 4.0),
                    Vec2::splat(size / 5.0),
                    colors::ENEMY_EYE,
                );
            }
            TileKind::Gap => {
                painter.rect(
                    source,
                    Vec2::new(c.x - size, c.y + 150.0 * s),
                    Vec2::new(size * 2.0, 10.0 * s),
                    colors::GAP,
                );
                // Jump hint arrow
                painter.fill(
                    source,
                    [
                        Vec2::new(c.x, c.y - size),
                        Vec2::new(c.x + size / 2.0, c.y),
                        Vec2::new(c.x - size / 2.0, c.y),
                    ],
                    colors::GAP_ARROW,
                );
            }
        }
    }
}

fn feedback_color(color: FeedbackColor) -> Color {
    match color {
        FeedbackColor::Cyan => colors::CYAN,
        FeedbackColor::Amber => colors::AMBER,
        FeedbackColor::Red => colors::RED,
    }
}

fn draw_particles(painter: &mut Painter, state: &GameState, viewport: Vec2) {
    let fov = state.tuning.fov;
    let camera = state.world.camera.position;

    for particle in state.particles.iter() {
        let relative_z = particle.pos.z - camera;
        if relative_z < NEAR_CULL {
            continue;
        }
        let p = project(
            Vec3::new(particle.pos.x, particle.pos.y, relative_z),
            viewport,
            fov,
        );
        let size = 8.0 * p.scale;
        let color = with_alpha(feedback_color(particle.color), particle.life.clamp(0.0, 1.0));
        painter.rect(
            Source::Particle,
            p.pos - Vec2::splat(size / 2.0),
            Vec2::splat(size),
            color,
        );
    }
}

fn draw_player(painter: &mut Painter, state: &GameState, viewport: Vec2) {
    let player = &state.player;
    let hit = player.action == PlayerAction::Hit;

    let mut y = PLAYER_REST_Y;
    if player.action == PlayerAction::Jump {
        let span = state.tuning.clear_action_ticks.max(1) as f32;
        y -= (player.timer as f32 / span * PI).sin() * JUMP_HEIGHT;
    }

    let p = project(Vec3::new(0.0, y, PLAYER_DEPTH), viewport, state.tuning.fov);
    let ps = p.scale;
    let anchor = Affine2::from_translation(p.pos);
    let local = |x: f32, y: f32| Vec2::new(x * ps, y * ps);

    // Shadow and slash are not affected by the lean
    painter.ellipse(
        Source::Player,
        anchor.transform_point2(local(0.0, 160.0)),
        local(40.0, 10.0),
        colors::SHADOW,
    );

    let body = if player.action == PlayerAction::Attack {
        painter.stroke(
            Source::Player,
            anchor.transform_point2(local(-50.0, -50.0)),
            anchor.transform_point2(local(150.0, 50.0)),
            4.0,
            colors::WHITE,
        );
        anchor * Affine2::from_angle(ATTACK_LEAN)
    } else {
        anchor
    };

    let quad = |x: f32, y: f32, w: f32, h: f32| {
        [
            local(x, y),
            local(x + w, y),
            local(x + w, y + h),
            local(x, y + h),
        ]
        .map(|v| body.transform_point2(v))
    };

    let (torso, head) = if hit {
        (colors::RED, colors::RED)
    } else {
        (colors::CYAN, colors::PLAYER_HEAD)
    };
    painter.fill(Source::Player, quad(-20.0, -60.0, 40.0, 60.0), torso);
    painter.fill(Source::Player, quad(-15.0, -90.0, 30.0, 30.0), head);
    painter.fill(Source::Player, quad(-5.0, -80.0, 20.0, 5.0), colors::WHITE);

    // Sword on the back, lost while staggered
    if !hit {
        painter.fill(
            Source::Player,
            [
                local(10.0, -50.0),
                local(35.0, -85.0),
                local(40.0, -80.0),
                local(15.0, -45.0),
            ]
            .map(|v| body.transform_point2(v)),
            colors::SWORD,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Action, Engine, Lifecycle, ScriptedTiles};
    use crate::tuning::Tuning;

    const VIEW: Vec2 = Vec2::new(1280.0, 720.0);

    fn engine(kinds: &[TileKind]) -> Engine {
        Engine::with_source(
            Tuning::default(),
            Box::new(ScriptedTiles::new(kinds.to_vec())),
            11,
        )
    }

    #[test]
    fn test_tiles_painted_far_to_near() {
        let engine = engine(&[TileKind::Enemy, TileKind::Gap]);
        let frame = build_frame(engine.state(), VIEW, Vec2::ZERO);

        // Tiles 0..=5 are within draw distance (6 * 500 = 3000 is excluded)
        assert_eq!(frame.tile_order(), vec![5, 4, 3, 2, 1, 0]);
        assert_eq!(frame.clear, colors::BACKGROUND);
    }

    #[test]
    fn test_layer_order() {
        let mut engine = engine(&[TileKind::Gap]);
        engine.begin();
        engine.resolve(Action::Attack);
        engine.tick();
        let frame = build_frame(engine.state(), VIEW, Vec2::ZERO);

        let rank = |s: &Source| match s {
            Source::Grid => 0,
            Source::Tile(_) => 1,
            Source::Particle => 2,
            Source::Player => 3,
        };
        let ranks: Vec<_> = frame.items.iter().map(|i| rank(&i.source)).collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
        assert!(ranks.contains(&2), "damage burst is in front of the camera");
    }

    #[test]
    fn test_shake_translates_everything() {
        let engine = engine(&[TileKind::Enemy]);
        let calm = build_frame(engine.state(), VIEW, Vec2::ZERO);
        let shaken = build_frame(engine.state(), VIEW, Vec2::new(5.0, -3.0));
        assert_eq!(calm.items.len(), shaken.items.len());

        for (a, b) in calm.items.iter().zip(&shaken.items) {
            match (&a.shape, &b.shape) {
                (Shape::Fill(pa), Shape::Fill(pb)) => {
                    for (x, y) in pa.iter().zip(pb) {
                        assert!((*y - *x - Vec2::new(5.0, -3.0)).length() < 1e-3);
                    }
                }
                (Shape::Stroke { from: fa, .. }, Shape::Stroke { from: fb, .. }) => {
                    assert!((*fb - *fa - Vec2::new(5.0, -3.0)).length() < 1e-3);
                }
                (Shape::Ellipse { center: ca, .. }, Shape::Ellipse { center: cb, .. }) => {
                    assert!((*cb - *ca - Vec2::new(5.0, -3.0)).length() < 1e-3);
                }
                _ => panic!("shape kinds differ"),
            }
        }
    }

    #[test]
    fn test_hit_avatar_is_red_without_sword() {
        let mut engine = engine(&[TileKind::Gap]);
        engine.begin();
        let calm = build_frame(engine.state(), VIEW, Vec2::ZERO);
        engine.resolve(Action::Attack);
        assert_eq!(engine.snapshot().lifecycle, Lifecycle::Playing);
        let hit = build_frame(engine.state(), VIEW, Vec2::ZERO);

        let player = |f: &Frame| {
            f.items
                .iter()
                .filter(|i| i.source == Source::Player)
                .cloned()
                .collect::<Vec<_>>()
        };
        let calm_player = player(&calm);
        let hit_player = player(&hit);
        assert_eq!(hit_player.len() + 1, calm_player.len());
        assert!(hit_player.iter().any(|i| i.color == colors::RED));
        assert!(!hit_player.iter().any(|i| i.color == colors::SWORD));
    }

    #[test]
    fn test_particles_fade_with_life() {
        let mut engine = engine(&[TileKind::Gap]);
        engine.begin();
        engine.resolve(Action::Attack);
        for _ in 0..10 {
            engine.tick();
        }
        let frame = build_frame(engine.state(), VIEW, Vec2::ZERO);
        let alphas: Vec<f32> = frame
            .items
            .iter()
            .filter(|i| i.source == Source::Particle)
            .map(|i| i.color[3])
            .collect();
        assert!(!alphas.is_empty());
        assert!(alphas.iter().all(|a| *a > 0.0 && *a < 1.0));
    }
}
