//! Enemies ("bugs") and the probabilistic spawner
//!
//! Every spawn check is an independent Bernoulli trial gated by a
//! capacity ceiling, so the spawn rate self-regulates instead of
//! following a fixed interval.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::host::{BodyKind, BodySpec, EntityId, PhysicsHost};
use super::score::ScoreTracker;

/// Enemy lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Alive,
    Dead,
}

/// One enemy. Holds a non-owning handle to the session score so it can
/// charge its own escape penalty.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub state: EnemyState,
    score: Weak<RefCell<ScoreTracker>>,
}

impl Enemy {
    pub fn new(id: EntityId, score: Weak<RefCell<ScoreTracker>>) -> Self {
        Self {
            id,
            state: EnemyState::Alive,
            score,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state == EnemyState::Alive
    }

    /// Per-frame boundary check. An alive enemy at or below the bottom
    /// edge dies and charges `penalty` bugs. Returns true on that transition.
    pub fn update(&mut self, y: f32, playfield_height: f32, penalty: u32) -> bool {
        if !self.is_alive() || y < playfield_height {
            return false;
        }
        self.state = EnemyState::Dead;
        if let Some(score) = self.score.upgrade() {
            score.borrow_mut().add_bugs(penalty);
        }
        true
    }

    /// Mark dead. Returns false if already dead.
    pub fn kill(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.state = EnemyState::Dead;
        true
    }
}

/// Session-wide entity id source
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: EntityId,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> EntityId {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Spawner tunables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRules {
    pub max_targets: usize,
    pub probability: f32,
    pub spawn_y: f32,
    pub width_fraction: f32,
    pub speed: f32,
    pub scale: f32,
    pub escape_penalty: u32,
}

/// Owns the live enemies; the live count is derived from them
#[derive(Debug)]
pub struct EnemySpawner {
    enemies: Vec<Enemy>,
    rules: SpawnRules,
    score: Weak<RefCell<ScoreTracker>>,
}

impl EnemySpawner {
    pub fn new(rules: SpawnRules, score: &Rc<RefCell<ScoreTracker>>) -> Self {
        Self {
            enemies: Vec::with_capacity(rules.max_targets),
            rules,
            score: Rc::downgrade(score),
        }
    }

    pub fn rules(&self) -> &SpawnRules {
        &self.rules
    }

    pub fn live_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.enemies.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn has_capacity(&self) -> bool {
        self.live_count() < self.rules.max_targets
    }

    /// Decision for a uniform roll in [0, 1)
    pub fn should_spawn(&self, roll: f32) -> bool {
        self.has_capacity() && roll < self.rules.probability
    }

    /// Spawn column for a uniform roll in [0, 1)
    pub fn spawn_x(&self, roll: f32, playfield_width: f32) -> f32 {
        roll * (playfield_width * self.rules.width_fraction)
    }

    /// One spawn check. Returns the new enemy's id when one spawned.
    pub fn check_spawn<R: Rng>(
        &mut self,
        host: &mut dyn PhysicsHost,
        rng: &mut R,
        ids: &mut EntityIds,
    ) -> Option<EntityId> {
        if !self.has_capacity() {
            log::debug!("Spawn check skipped: {} enemies live", self.live_count());
            return None;
        }
        let roll: f32 = rng.random();
        if !self.should_spawn(roll) {
            return None;
        }
        let x = self.spawn_x(rng.random(), host.world_size().x);
        Some(self.spawn(host, ids.next_id(), Vec2::new(x, self.rules.spawn_y)))
    }

    /// Create an alive enemy at `pos` moving down
    pub fn spawn(&mut self, host: &mut dyn PhysicsHost, id: EntityId, pos: Vec2) -> EntityId {
        host.create_body(
            id,
            BodySpec {
                kind: BodyKind::Enemy,
                pos,
                vel: Vec2::new(0.0, self.rules.speed),
                scale: self.rules.scale,
                enabled: true,
                collide_world_bounds: false,
            },
        );
        self.enemies.push(Enemy::new(id, self.score.clone()));
        log::debug!("Spawned enemy {} at ({:.0}, {:.0})", id, pos.x, pos.y);
        id
    }

    /// Remove enemies that left the bottom of the playfield, charging the
    /// escape penalty once each. Returns how many escaped. Enemies whose
    /// host body is gone are dropped without a penalty.
    pub fn update(&mut self, host: &mut dyn PhysicsHost) -> usize {
        let height = host.world_size().y;
        let penalty = self.rules.escape_penalty;
        let mut escaped = Vec::new();
        for enemy in &mut self.enemies {
            let Some(body) = host.body(enemy.id) else {
                log::debug!("Enemy {} lost its body", enemy.id);
                enemy.kill();
                continue;
            };
            if enemy.update(body.pos.y, height, penalty) {
                escaped.push(enemy.id);
            }
        }
        for id in &escaped {
            host.destroy_body(*id);
        }
        self.enemies.retain(Enemy::is_alive);
        escaped.len()
    }

    /// Kill and remove an enemy. Returns false if it was not alive here.
    pub fn kill(&mut self, host: &mut dyn PhysicsHost, id: EntityId) -> bool {
        let Some(index) = self.enemies.iter().position(|e| e.id == id) else {
            return false;
        };
        let mut enemy = self.enemies.remove(index);
        if !enemy.kill() {
            return false;
        }
        host.destroy_body(id);
        true
    }

    /// Destroy every live enemy body
    pub fn release(&mut self, host: &mut dyn PhysicsHost) {
        for enemy in self.enemies.drain(..) {
            host.destroy_body(enemy.id);
        }
    }
}
