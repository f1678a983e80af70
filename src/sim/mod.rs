//! Gameplay core
//!
//! All decision logic lives here. This module never renders, integrates
//! motion or detects overlaps; those belong to the host through the
//! traits in `host`.
//! - Seeded RNG only
//! - Stable iteration order (pool order, spawn order)
//! - No platform dependencies

pub mod collision;
pub mod enemy;
pub mod host;
pub mod input;
pub mod projectile;
pub mod score;
pub mod session;

pub use collision::{Collider, CollisionResolver, Outcome};
pub use enemy::{Enemy, EnemySpawner, EnemyState, EntityIds, SpawnRules};
pub use host::{BodyKind, BodySpec, BodyState, EntityId, NullDisplay, PhysicsHost, ScoreDisplay};
pub use input::{Acceleration, Button, ButtonSink, GameAction, InputChannel, InputMapper};
pub use projectile::{Projectile, ProjectilePool, ProjectileState};
pub use score::{Score, ScoreTracker};
pub use session::{GameSession, SessionPhase, SessionSnapshot};
