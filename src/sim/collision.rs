//! Collision outcome policies
//!
//! Overlap detection belongs to the host. Given the two ids the host
//! reported, in either order, decide what happens to each party.

use super::host::EntityId;

/// What the core knows about an overlapping body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collider {
    Ship,
    /// Projectile and whether it is in flight
    Projectile { id: EntityId, active: bool },
    /// Enemy and whether it is still alive
    Enemy { id: EntityId, alive: bool },
    /// Id the session does not own (already removed, or foreign)
    Unknown,
}

impl Collider {
    fn live_enemy(&self) -> Option<EntityId> {
        match *self {
            Collider::Enemy { id, alive: true } => Some(id),
            _ => None,
        }
    }

    fn active_projectile(&self) -> Option<EntityId> {
        match *self {
            Collider::Projectile { id, active: true } => Some(id),
            _ => None,
        }
    }
}

/// Decided outcome of one overlap report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Projectile destroys enemy: retire both, score one hit
    Hit { projectile: EntityId, enemy: EntityId },
    /// Enemy reached the ship: kill the enemy, charge the penalty, ship untouched
    ShipStruck { enemy: EntityId },
    /// Nothing to do
    Ignore,
}

impl Outcome {
    /// Whether the host should physically separate the two bodies
    pub fn separates(&self) -> bool {
        matches!(self, Outcome::Hit { .. })
    }
}

/// Collision policy table
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    pub fn new() -> Self {
        Self
    }

    /// Decide the outcome of an overlap between `a` and `b`
    pub fn resolve(&self, a: Collider, b: Collider) -> Outcome {
        if let Some(outcome) = Self::projectile_hit(a, b).or_else(|| Self::projectile_hit(b, a)) {
            return outcome;
        }
        if let Some(outcome) = Self::ship_struck(a, b).or_else(|| Self::ship_struck(b, a)) {
            return outcome;
        }
        Outcome::Ignore
    }

    fn projectile_hit(projectile: Collider, enemy: Collider) -> Option<Outcome> {
        Some(Outcome::Hit {
            projectile: projectile.active_projectile()?,
            enemy: enemy.live_enemy()?,
        })
    }

    fn ship_struck(ship: Collider, enemy: Collider) -> Option<Outcome> {
        if ship != Collider::Ship {
            return None;
        }
        Some(Outcome::ShipStruck {
            enemy: enemy.live_enemy()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BULLET: Collider = Collider::Projectile { id: 2, active: true };
    const BUG: Collider = Collider::Enemy { id: 9, alive: true };

    #[test]
    fn test_hit_either_order() {
        let resolver = CollisionResolver::new();
        let expected = Outcome::Hit { projectile: 2, enemy: 9 };
        assert_eq!(resolver.resolve(BULLET, BUG), expected);
        assert_eq!(resolver.resolve(BUG, BULLET), expected);
        assert!(expected.separates());
    }

    #[test]
    fn test_ship_struck_either_order() {
        let resolver = CollisionResolver::new();
        let expected = Outcome::ShipStruck { enemy: 9 };
        assert_eq!(resolver.resolve(Collider::Ship, BUG), expected);
        assert_eq!(resolver.resolve(BUG, Collider::Ship), expected);
        assert!(!expected.separates());
    }

    #[test]
    fn test_stale_parties_ignored() {
        let resolver = CollisionResolver::new();
        let dormant = Collider::Projectile { id: 2, active: false };
        let dead = Collider::Enemy { id: 9, alive: false };
        assert_eq!(resolver.resolve(dormant, BUG), Outcome::Ignore);
        assert_eq!(resolver.resolve(BULLET, dead), Outcome::Ignore);
        assert_eq!(resolver.resolve(Collider::Ship, dead), Outcome::Ignore);
        assert_eq!(resolver.resolve(Collider::Unknown, BUG), Outcome::Ignore);
    }

    #[test]
    fn test_non_enemy_pairs_ignored() {
        let resolver = CollisionResolver::new();
        assert_eq!(resolver.resolve(Collider::Ship, BULLET), Outcome::Ignore);
        assert_eq!(resolver.resolve(BULLET, BULLET), Outcome::Ignore);
        assert_eq!(resolver.resolve(BUG, BUG), Outcome::Ignore);
        assert!(!Outcome::Ignore.separates());
    }
}
