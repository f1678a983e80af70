//! Pooled projectiles
//!
//! A fixed set of projectile bodies is created up front and recycled.
//! Firing activates the first dormant slot; slots retire back to dormant
//! when they leave the top of the playfield or hit an enemy.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::host::{BodyKind, BodySpec, EntityId, PhysicsHost};

/// Projectile lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectileState {
    #[default]
    Dormant,
    Active,
}

/// One pooled projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub state: ProjectileState,
}

impl Projectile {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            state: ProjectileState::Dormant,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == ProjectileState::Active
    }

    /// Per-frame retirement check against the body's current row.
    /// Returns true if the projectile went dormant.
    pub fn update(&mut self, y: f32, retire_y: f32) -> bool {
        if self.is_active() && y <= retire_y {
            self.state = ProjectileState::Dormant;
            return true;
        }
        false
    }

    /// Return to dormant. Returns false if already dormant.
    pub fn kill(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.state = ProjectileState::Dormant;
        true
    }
}

/// Fixed-capacity projectile pool
#[derive(Debug, Clone)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
    speed: f32,
    retire_y: f32,
}

impl ProjectilePool {
    /// Build a pool over pre-allocated ids; creates one disabled host body per slot
    pub fn new(
        host: &mut dyn PhysicsHost,
        ids: impl IntoIterator<Item = EntityId>,
        scale: f32,
        speed: f32,
        retire_y: f32,
    ) -> Self {
        let slots: Vec<Projectile> = ids.into_iter().map(Projectile::new).collect();
        for slot in &slots {
            host.create_body(
                slot.id,
                BodySpec {
                    kind: BodyKind::Projectile,
                    pos: Vec2::ZERO,
                    vel: Vec2::ZERO,
                    scale,
                    enabled: false,
                    collide_world_bounds: false,
                },
            );
        }
        Self {
            slots,
            speed,
            retire_y,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Projectile] {
        &self.slots
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|p| p.is_active()).count()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.iter().any(|p| p.id == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Projectile> {
        self.slots.iter().find(|p| p.id == id)
    }

    /// Index of the first dormant slot in pool order
    pub fn first_dormant(&self) -> Option<usize> {
        self.slots.iter().position(|p| !p.is_active())
    }

    /// Fire the first dormant projectile from `pos`.
    /// Returns the id fired, or None when every slot is in flight.
    pub fn fire(&mut self, host: &mut dyn PhysicsHost, pos: Vec2) -> Option<EntityId> {
        let Some(index) = self.first_dormant() else {
            log::debug!("Fire dropped: all {} projectiles in flight", self.capacity());
            return None;
        };
        let slot = &mut self.slots[index];
        slot.state = ProjectileState::Active;

        host.reset_body(slot.id, pos);
        host.set_enabled(slot.id, true);
        host.set_velocity(slot.id, Vec2::new(0.0, -self.speed));
        Some(slot.id)
    }

    /// Retire projectiles that left the top of the playfield
    pub fn update(&mut self, host: &mut dyn PhysicsHost) -> usize {
        let mut retired = 0;
        for slot in &mut self.slots {
            if !slot.is_active() {
                continue;
            }
            let Some(body) = host.body(slot.id) else {
                continue;
            };
            if slot.update(body.pos.y, self.retire_y) {
                host.set_enabled(slot.id, false);
                retired += 1;
            }
        }
        retired
    }

    /// Retire a specific projectile (hit). Returns false if it was not active.
    pub fn kill(&mut self, host: &mut dyn PhysicsHost, id: EntityId) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        if slot.kill() {
            host.set_enabled(id, false);
            true
        } else {
            false
        }
    }

    /// Destroy every host body owned by the pool
    pub fn release(&mut self, host: &mut dyn PhysicsHost) {
        for slot in self.slots.drain(..) {
            host.destroy_body(slot.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::HeadlessWorld;

    fn pool(world: &mut HeadlessWorld) -> ProjectilePool {
        ProjectilePool::new(world, 1..=5, 4.0, 300.0, -32.0)
    }

    #[test]
    fn test_retire_threshold() {
        let mut p = Projectile::new(1);
        p.state = ProjectileState::Active;
        assert!(!p.update(-31.0, -32.0));
        assert!(p.is_active());
        assert!(p.update(-33.0, -32.0));
        assert_eq!(p.state, ProjectileState::Dormant);
    }

    #[test]
    fn test_retire_exactly_at_threshold() {
        let mut p = Projectile::new(1);
        p.state = ProjectileState::Active;
        assert!(p.update(-32.0, -32.0));
    }

    #[test]
    fn test_dormant_never_retires_again() {
        let mut p = Projectile::new(1);
        assert!(!p.update(-500.0, -32.0));
        assert!(!p.kill());
    }

    #[test]
    fn test_fire_takes_first_dormant() {
        let mut world = HeadlessWorld::new(800.0, 600.0);
        let mut pool = pool(&mut world);

        let fired = pool.fire(&mut world, Vec2::new(100.0, 400.0));
        assert_eq!(fired, Some(1));
        assert_eq!(pool.active_count(), 1);

        let body = world.body(1).unwrap();
        assert_eq!(body.pos, Vec2::new(100.0, 400.0));
        assert_eq!(body.vel, Vec2::new(0.0, -300.0));
        assert!(world.is_enabled(1));

        // Free slot 1 again; next fire reuses it before slot 3
        assert_eq!(pool.fire(&mut world, Vec2::ZERO), Some(2));
        assert!(pool.kill(&mut world, 1));
        assert_eq!(pool.fire(&mut world, Vec2::ZERO), Some(1));
    }

    #[test]
    fn test_sixth_fire_is_noop() {
        let mut world = HeadlessWorld::new(800.0, 600.0);
        let mut pool = pool(&mut world);
        for _ in 0..5 {
            assert!(pool.fire(&mut world, Vec2::new(10.0, 10.0)).is_some());
        }
        let before: Vec<_> = pool.slots().iter().map(|p| p.state).collect();
        assert_eq!(pool.fire(&mut world, Vec2::new(50.0, 50.0)), None);
        let after: Vec<_> = pool.slots().iter().map(|p| p.state).collect();
        assert_eq!(before, after);
        assert_eq!(pool.capacity(), 5);
    }

    #[test]
    fn test_update_retires_offscreen() {
        let mut world = HeadlessWorld::new(800.0, 600.0);
        let mut pool = pool(&mut world);
        pool.fire(&mut world, Vec2::new(10.0, -33.0));
        pool.fire(&mut world, Vec2::new(10.0, -31.0));
        assert_eq!(pool.update(&mut world), 1);
        assert!(!pool.slots()[0].is_active());
        assert!(pool.slots()[1].is_active());
        assert!(!world.is_enabled(1));
    }

    #[test]
    fn test_kill_twice() {
        let mut world = HeadlessWorld::new(800.0, 600.0);
        let mut pool = pool(&mut world);
        let id = pool.fire(&mut world, Vec2::ZERO).unwrap();
        assert!(pool.kill(&mut world, id));
        assert!(!pool.kill(&mut world, id));
        assert!(!pool.kill(&mut world, 99));
    }
}
