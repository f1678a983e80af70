//! Collaborator interfaces implemented by the host engine
//!
//! The core never integrates motion or detects overlaps. It owns domain
//! state keyed by `EntityId`; the host owns one physics body per id.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Entity identifier shared between the core and the host body table
pub type EntityId = u32;

/// What a host body represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Ship,
    Projectile,
    Enemy,
}

impl BodyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyKind::Ship => "ship",
            BodyKind::Projectile => "projectile",
            BodyKind::Enemy => "enemy",
        }
    }
}

/// Parameters for creating a host body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    pub kind: BodyKind,
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub scale: f32,
    /// Active and visible
    pub enabled: bool,
    /// Clamp to world bounds (ship only)
    pub collide_world_bounds: bool,
}

/// Physical state of a host body as seen by the core
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    /// Center position
    pub pos: Vec2,
    /// Scaled extent
    pub size: Vec2,
    pub vel: Vec2,
}

impl BodyState {
    /// Top edge row
    pub fn top(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }
}

/// Rendering/physics host
pub trait PhysicsHost {
    /// Playfield (width, height)
    fn world_size(&self) -> Vec2;

    fn create_body(&mut self, id: EntityId, spec: BodySpec);

    fn body(&self, id: EntityId) -> Option<BodyState>;

    /// Teleport a body and zero its velocity
    fn reset_body(&mut self, id: EntityId, pos: Vec2);

    fn set_velocity(&mut self, id: EntityId, vel: Vec2);

    /// Toggle active + visible
    fn set_enabled(&mut self, id: EntityId, enabled: bool);

    fn destroy_body(&mut self, id: EntityId);
}

/// Bitmap-text sink for the score line
pub trait ScoreDisplay {
    fn show(&mut self, text: &str);

    /// Where the label sits (top-left), called once before the first `show`
    fn anchor(&mut self, _pos: Vec2) {}
}

/// Display that drops everything (hosts without a HUD)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl ScoreDisplay for NullDisplay {
    fn show(&mut self, _text: &str) {}
}
