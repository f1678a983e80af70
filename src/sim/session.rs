//! Game session orchestration
//!
//! Owns every gameplay component for one run of the scene. The host
//! drives it with three kinds of calls, all on the same thread:
//! - `frame` once per rendered frame
//! - `overlap` whenever its physics reports two bodies touching
//! - button presses through the `InputChannel` the session registered on
//!
//! `dispose` is terminal: it unregisters from the input channel first,
//! then tears down host bodies. Any later call is a no-op.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::{Collider, CollisionResolver, Outcome};
use super::enemy::{EnemySpawner, EntityIds, SpawnRules};
use super::host::{BodyKind, BodySpec, EntityId, PhysicsHost, ScoreDisplay};
use super::input::{GameAction, InputChannel, InputMapper};
use super::projectile::ProjectilePool;
use super::score::{Score, ScoreTracker};
use crate::settings::SessionConfig;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    Running,
    Disposed,
}

/// Serializable view of a session for HUD/debug overlays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub hits: u32,
    pub bugs: u32,
    pub live_enemies: usize,
    pub active_projectiles: usize,
    pub elapsed_ms: f64,
    pub disposed: bool,
}

/// One running scene
pub struct GameSession {
    config: SessionConfig,
    seed: u64,
    phase: SessionPhase,
    ids: EntityIds,
    ship: EntityId,
    score: Rc<RefCell<ScoreTracker>>,
    projectiles: ProjectilePool,
    spawner: EnemySpawner,
    resolver: CollisionResolver,
    input: InputMapper,
    channel: InputChannel,
    rng: Pcg32,
    /// Time accumulated toward the next spawn check (ms)
    spawn_timer_ms: f32,
    elapsed_ms: f64,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("seed", &self.seed)
            .field("phase", &self.phase)
            .field("ship", &self.ship)
            .field("score", &self.score.borrow().score())
            .field("live_enemies", &self.spawner.live_count())
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Build the scene against `host` and start listening on `channel`
    pub fn new(
        host: &mut dyn PhysicsHost,
        mut display: Box<dyn ScoreDisplay>,
        channel: InputChannel,
        config: SessionConfig,
    ) -> Self {
        let config = config.validated();
        let seed = config.resolve_seed();
        let world = host.world_size();
        let mut ids = EntityIds::default();

        let ship = ids.next_id();
        host.create_body(
            ship,
            BodySpec {
                kind: BodyKind::Ship,
                pos: Vec2::new(world.x / 2.0, world.y - config.ship_start_inset),
                vel: Vec2::ZERO,
                scale: config.ship_scale,
                enabled: true,
                collide_world_bounds: true,
            },
        );

        display.anchor(Vec2::new(config.score_label_x, world.y - config.score_label_inset));
        let score = Rc::new(RefCell::new(ScoreTracker::new(display)));

        let pool_ids: Vec<EntityId> = (0..config.pool_capacity).map(|_| ids.next_id()).collect();
        let projectiles = ProjectilePool::new(
            host,
            pool_ids,
            config.projectile_scale,
            config.projectile_speed,
            config.projectile_retire_y,
        );

        let spawner = EnemySpawner::new(
            SpawnRules {
                max_targets: config.max_targets,
                probability: config.spawn_probability,
                spawn_y: config.spawn_y,
                width_fraction: config.spawn_width_fraction,
                speed: config.enemy_speed,
                scale: config.enemy_scale,
                escape_penalty: config.escape_penalty,
            },
            &score,
        );

        let input = InputMapper::new(config.accel_divisor);
        channel.register(input.sink());

        log::info!(
            "Session started (seed={}, world={}x{}, pool={})",
            seed,
            world.x,
            world.y,
            projectiles.capacity()
        );

        Self {
            seed,
            phase: SessionPhase::Running,
            ids,
            ship,
            score,
            projectiles,
            spawner,
            resolver: CollisionResolver::new(),
            input,
            channel,
            rng: Pcg32::seed_from_u64(seed),
            spawn_timer_ms: 0.0,
            elapsed_ms: 0.0,
            config,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.phase == SessionPhase::Disposed
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn ship_id(&self) -> EntityId {
        self.ship
    }

    pub fn score(&self) -> Score {
        self.score.borrow().score()
    }

    pub fn projectiles(&self) -> &ProjectilePool {
        &self.projectiles
    }

    pub fn spawner(&self) -> &EnemySpawner {
        &self.spawner
    }

    /// Per-frame hook. `delta_ms` is the time since the previous frame.
    /// Returns false if the session is disposed.
    pub fn frame(&mut self, host: &mut dyn PhysicsHost, _time_ms: f64, delta_ms: f32) -> bool {
        if self.is_disposed() {
            log::debug!("Frame after dispose ignored");
            return false;
        }

        for action in self.input.drain() {
            self.apply(host, action);
        }

        if let Some(action) = self.input.map_acceleration(self.channel.acceleration()) {
            self.apply(host, action);
        }

        self.projectiles.update(host);
        self.spawner.update(host);

        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.elapsed_ms += f64::from(delta_ms);
            self.spawn_timer_ms += delta_ms;
            let period = self.config.spawn_period_ms;
            // No more than max_targets checks can succeed in one frame
            let max_checks = self.config.max_targets.max(1);
            let mut checks = 0;
            while self.spawn_timer_ms >= period && checks < max_checks {
                self.spawn_timer_ms -= period;
                self.check_spawn(host);
                checks += 1;
            }
            if self.spawn_timer_ms >= period {
                log::debug!("Dropped {:.0} ms of spawn backlog", self.spawn_timer_ms);
                self.spawn_timer_ms = 0.0;
            }
        }
        true
    }

    fn apply(&mut self, host: &mut dyn PhysicsHost, action: GameAction) {
        match action {
            GameAction::Fire => {
                self.fire(host);
            }
            GameAction::Steer { velocity_x } => self.steer(host, velocity_x),
        }
    }

    /// Fire from the ship's muzzle (horizontal center, top edge)
    pub fn fire(&mut self, host: &mut dyn PhysicsHost) -> Option<EntityId> {
        if self.is_disposed() {
            return None;
        }
        let ship = host.body(self.ship)?;
        let muzzle = Vec2::new(ship.pos.x, ship.top());
        self.projectiles.fire(host, muzzle)
    }

    /// Command the ship's horizontal velocity, leaving vertical as is
    pub fn steer(&mut self, host: &mut dyn PhysicsHost, velocity_x: f32) {
        if self.is_disposed() {
            return;
        }
        if let Some(ship) = host.body(self.ship) {
            host.set_velocity(self.ship, Vec2::new(velocity_x, ship.vel.y));
        }
    }

    /// One spawn check (also driven internally by `frame`)
    pub fn check_spawn(&mut self, host: &mut dyn PhysicsHost) -> Option<EntityId> {
        if self.is_disposed() {
            return None;
        }
        self.spawner.check_spawn(host, &mut self.rng, &mut self.ids)
    }

    /// Spawn an enemy at an explicit position, bypassing the random check
    pub fn spawn_at(&mut self, host: &mut dyn PhysicsHost, pos: Vec2) -> Option<EntityId> {
        if self.is_disposed() {
            return None;
        }
        let id = self.ids.next_id();
        Some(self.spawner.spawn(host, id, pos))
    }

    fn classify(&self, id: EntityId) -> Collider {
        if id == self.ship {
            return Collider::Ship;
        }
        if let Some(p) = self.projectiles.get(id) {
            return Collider::Projectile {
                id,
                active: p.is_active(),
            };
        }
        if let Some(e) = self.spawner.get(id) {
            return Collider::Enemy {
                id,
                alive: e.is_alive(),
            };
        }
        Collider::Unknown
    }

    /// Overlap report from the host, arguments in either order.
    /// Returns whether the host should physically separate the bodies.
    pub fn overlap(&mut self, host: &mut dyn PhysicsHost, a: EntityId, b: EntityId) -> bool {
        if self.is_disposed() {
            return false;
        }
        let outcome = self.resolver.resolve(self.classify(a), self.classify(b));
        match outcome {
            Outcome::Hit { projectile, enemy } => {
                self.projectiles.kill(host, projectile);
                self.spawner.kill(host, enemy);
                self.score.borrow_mut().add_hit();
                log::debug!("Projectile {} hit enemy {}", projectile, enemy);
            }
            Outcome::ShipStruck { enemy } => {
                self.spawner.kill(host, enemy);
                self.score.borrow_mut().add_bugs(self.config.ship_penalty);
                log::debug!("Enemy {} reached the ship", enemy);
            }
            Outcome::Ignore => {}
        }
        outcome.separates()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let score = self.score();
        SessionSnapshot {
            hits: score.hits,
            bugs: score.bugs,
            live_enemies: self.spawner.live_count(),
            active_projectiles: self.projectiles.active_count(),
            elapsed_ms: self.elapsed_ms,
            disposed: self.is_disposed(),
        }
    }

    /// Tear the session down. Unregisters the input sink before anything else.
    pub fn dispose(&mut self, host: &mut dyn PhysicsHost) {
        if self.is_disposed() {
            log::warn!("Session disposed twice");
            return;
        }
        self.channel.clear();
        self.phase = SessionPhase::Disposed;
        self.input.reset();

        self.projectiles.release(host);
        self.spawner.release(host);
        host.destroy_body(self.ship);

        let score = self.score();
        log::info!("Session ended (bugs={}, hits={})", score.bugs, score.hits);
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        // Never leave a sink behind on the shared channel
        if !self.is_disposed() {
            self.channel.clear();
        }
    }
}
