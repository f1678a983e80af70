//! Minimal kinematic host
//!
//! Integrates constant velocities, clamps bodies that collide with the
//! world bounds and reports axis-aligned overlaps. Enough to drive a
//! session without a browser: the native binary and the integration
//! tests run on it.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use glam::Vec2;

use crate::sim::{BodyKind, BodySpec, BodyState, EntityId, PhysicsHost, ScoreDisplay};

/// Unscaled sprite extents
pub const SHIP_SPRITE: Vec2 = Vec2::new(16.0, 16.0);
pub const PROJECTILE_SPRITE: Vec2 = Vec2::new(4.0, 16.0);
pub const ENEMY_SPRITE: Vec2 = Vec2::new(34.0, 20.0);

fn sprite_size(kind: BodyKind) -> Vec2 {
    match kind {
        BodyKind::Ship => SHIP_SPRITE,
        BodyKind::Projectile => PROJECTILE_SPRITE,
        BodyKind::Enemy => ENEMY_SPRITE,
    }
}

#[derive(Debug, Clone)]
struct Body {
    kind: BodyKind,
    pos: Vec2,
    vel: Vec2,
    size: Vec2,
    enabled: bool,
    collide_world_bounds: bool,
}

impl Body {
    fn overlaps(&self, other: &Body) -> bool {
        let d = (self.pos - other.pos).abs();
        let reach = (self.size + other.size) / 2.0;
        d.x < reach.x && d.y < reach.y
    }
}

/// Headless world keyed by entity id (iteration in id order)
#[derive(Debug, Clone)]
pub struct HeadlessWorld {
    size: Vec2,
    bodies: BTreeMap<EntityId, Body>,
}

impl HeadlessWorld {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            bodies: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn kind_of(&self, id: EntityId) -> Option<BodyKind> {
        self.bodies.get(&id).map(|b| b.kind)
    }

    pub fn is_enabled(&self, id: EntityId) -> bool {
        self.bodies.get(&id).is_some_and(|b| b.enabled)
    }

    /// Advance every enabled body by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        let size = self.size;
        for body in self.bodies.values_mut().filter(|b| b.enabled) {
            body.pos += body.vel * dt;
            if body.collide_world_bounds {
                let half = body.size / 2.0;
                body.pos = body.pos.clamp(half, (size - half).max(half));
            }
        }
    }

    /// Enabled overlapping pairs that involve an enemy, lower id first
    pub fn overlaps(&self) -> Vec<(EntityId, EntityId)> {
        let live: Vec<(&EntityId, &Body)> = self.bodies.iter().filter(|(_, b)| b.enabled).collect();
        let mut pairs = Vec::new();
        for (i, (a_id, a)) in live.iter().enumerate() {
            for (b_id, b) in &live[i + 1..] {
                let involves_enemy = a.kind == BodyKind::Enemy || b.kind == BodyKind::Enemy;
                let same_kind = a.kind == b.kind;
                if involves_enemy && !same_kind && a.overlaps(b) {
                    pairs.push((**a_id, **b_id));
                }
            }
        }
        pairs
    }
}

impl PhysicsHost for HeadlessWorld {
    fn world_size(&self) -> Vec2 {
        self.size
    }

    fn create_body(&mut self, id: EntityId, spec: BodySpec) {
        self.bodies.insert(
            id,
            Body {
                kind: spec.kind,
                pos: spec.pos,
                vel: spec.vel,
                size: sprite_size(spec.kind) * spec.scale,
                enabled: spec.enabled,
                collide_world_bounds: spec.collide_world_bounds,
            },
        );
    }

    fn body(&self, id: EntityId) -> Option<BodyState> {
        self.bodies.get(&id).map(|b| BodyState {
            pos: b.pos,
            size: b.size,
            vel: b.vel,
        })
    }

    fn reset_body(&mut self, id: EntityId, pos: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.pos = pos;
            body.vel = Vec2::ZERO;
        }
    }

    fn set_velocity(&mut self, id: EntityId, vel: Vec2) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.vel = vel;
        }
    }

    fn set_enabled(&mut self, id: EntityId, enabled: bool) {
        if let Some(body) = self.bodies.get_mut(&id) {
            body.enabled = enabled;
        }
    }

    fn destroy_body(&mut self, id: EntityId) {
        self.bodies.remove(&id);
    }
}

/// Score display that keeps the latest line, shareable with the caller
#[derive(Debug, Clone, Default)]
pub struct TextDisplay {
    line: Rc<RefCell<String>>,
    anchor: Rc<RefCell<Option<Vec2>>>,
}

impl TextDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.line.borrow().clone()
    }

    pub fn anchor_pos(&self) -> Option<Vec2> {
        *self.anchor.borrow()
    }
}

impl ScoreDisplay for TextDisplay {
    fn show(&mut self, text: &str) {
        *self.line.borrow_mut() = text.to_string();
    }

    fn anchor(&mut self, pos: Vec2) {
        *self.anchor.borrow_mut() = Some(pos);
    }
}
