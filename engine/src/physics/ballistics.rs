//! Ballistics simulation for projectile trajectories
//!
//! One pool type covers both projectile kinds: missiles (fast, flat,
//! short-lived) and bombs (dropped, gravity-dominated, long-lived). The
//! kinds differ only in the constants returned by [`ProjectileKind::spec`];
//! the state machine and the integration path are shared.
//!
//! A projectile is `Armed` at spawn, loops through in-flight integration
//! once per frame, and terminates either by collision or by lifetime expiry.
//! Terminal transitions happen in the same frame they are detected: the
//! entity is dropped from the live pool and a [`ProjectileEvent`] is handed
//! to the caller, which owns all follow-up (explosion effects, obstacle
//! removal). The pool itself never mutates the collision world.
//!
//! # Example
//!
//! ```ignore
//! use barnstormer_engine::physics::ballistics::{ProjectileKind, ProjectilePool};
//! use barnstormer_engine::physics::collision::CollisionWorld;
//! use glam::Vec3;
//!
//! let mut missiles = ProjectilePool::new(ProjectileKind::Missile);
//! let mut rng = rand::thread_rng();
//! missiles.spawn(Vec3::new(0.0, 50.0, 0.0), Vec3::Z * 150.0, &mut rng);
//!
//! let world = CollisionWorld::new();
//! let events = missiles.update(&world, 1.0 / 60.0);
//! assert!(events.is_empty());
//! ```

use glam::Vec3;
use rand::Rng;

use super::collision::{CollisionWorld, Hit};

/// Launch speed of a missile along its firing direction (m/s).
pub const MISSILE_SPEED: f32 = 150.0;
/// Downward seed speed given to a bomb at release (m/s).
pub const BOMB_RELEASE_SINK: f32 = 5.0;
/// Fraction of the releasing body's forward speed carried by a bomb.
pub const BOMB_FORWARD_CARRY: f32 = 10.0;

/// Projectile family; selects the [`BallisticsSpec`] constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    /// Wing-launched, flies flat under light gravity with no drag.
    Missile,
    /// Belly-dropped, falls under full gravity with linear drag.
    Bomb,
}

impl ProjectileKind {
    /// Kind-specific integration constants.
    pub const fn spec(self) -> BallisticsSpec {
        match self {
            ProjectileKind::Missile => BallisticsSpec {
                gravity: 5.0,
                drag: 0.0,
                mass: 1.0,
                lifetime: 10.0,
                spin: 0.2,
            },
            ProjectileKind::Bomb => BallisticsSpec {
                gravity: 9.8,
                drag: 0.02,
                mass: 1.0,
                lifetime: 30.0,
                spin: 0.01,
            },
        }
    }
}

/// Integration constants for one projectile kind.
#[derive(Debug, Clone, Copy)]
pub struct BallisticsSpec {
    /// Downward acceleration magnitude (m/s²), divided by mass.
    pub gravity: f32,
    /// Linear drag coefficient: deceleration is `velocity * drag`.
    pub drag: f32,
    /// Mass in kilograms.
    pub mass: f32,
    /// Seconds of flight before the projectile expires.
    pub lifetime: f32,
    /// Maximum per-axis tumble applied each update (cosmetic).
    pub spin: f32,
}

/// A live projectile in flight.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Remaining flight time in seconds; monotonically decreasing.
    pub lifetime: f32,
    /// Per-update tumble increment (cosmetic, for the render collaborator).
    pub spin: Vec3,
    /// Accumulated tumble angles (cosmetic).
    pub rotation: Vec3,
}

/// Terminal report for a retired projectile.
///
/// `hit` is `Some` for a collision and `None` for a lifetime expiry; the
/// caller decides what each outcome triggers (visual effects, obstacle
/// removal).
#[derive(Debug, Clone, Copy)]
pub struct ProjectileEvent {
    pub kind: ProjectileKind,
    pub position: Vec3,
    pub hit: Option<Hit>,
}

/// Pool of live projectiles of a single kind.
///
/// There is at most one pool per kind; a retired projectile never survives
/// into the next frame.
#[derive(Debug, Clone)]
pub struct ProjectilePool {
    kind: ProjectileKind,
    spec: BallisticsSpec,
    live: Vec<Projectile>,
}

impl ProjectilePool {
    /// Create an empty pool for the given kind.
    pub fn new(kind: ProjectileKind) -> Self {
        Self {
            kind,
            spec: kind.spec(),
            live: Vec::new(),
        }
    }

    /// Kind this pool simulates.
    pub fn kind(&self) -> ProjectileKind {
        self.kind
    }

    /// Live projectiles, for the render collaborator.
    pub fn projectiles(&self) -> &[Projectile] {
        &self.live
    }

    /// Number of projectiles currently in flight.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// True when nothing is in flight.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Arm a projectile with a fully composed initial velocity.
    ///
    /// Velocity composition is the caller's job: missiles pass
    /// `direction * MISSILE_SPEED`, bombs pass the release-sink plus
    /// forward-carry sum. The tumble axis is randomized per projectile.
    pub fn spawn<R: Rng>(&mut self, position: Vec3, velocity: Vec3, rng: &mut R) {
        let s = self.spec.spin;
        self.live.push(Projectile {
            position,
            velocity,
            lifetime: self.spec.lifetime.max(0.0),
            spin: Vec3::new(
                rng.gen_range(-s..=s),
                rng.gen_range(-s..=s),
                rng.gen_range(-s..=s),
            ),
            rotation: Vec3::ZERO,
        });
    }

    /// Remove every live projectile without emitting events.
    pub fn clear(&mut self) {
        self.live.clear();
    }

    /// Advance every live projectile by `dt` and retire the finished ones.
    ///
    /// Semi-implicit Euler with gravity and linear drag:
    /// `v += (gravity / mass + drag_accel) * dt` where
    /// `drag_accel = -v * drag`, then `p += v * dt`. After integration the
    /// new position is queried against `world`; a hit or an expired lifetime
    /// retires the projectile within this same frame.
    pub fn update(&mut self, world: &CollisionWorld, dt: f32) -> Vec<ProjectileEvent> {
        let mut events = Vec::new();
        let kind = self.kind;
        let spec = self.spec;

        self.live.retain_mut(|p| {
            let drag_accel = -p.velocity * spec.drag;
            p.velocity.y -= spec.gravity / spec.mass * dt;
            p.velocity += drag_accel * dt;
            p.position += p.velocity * dt;
            p.rotation += p.spin;
            p.lifetime -= dt;

            if let Some(hit) = world.query(p.position) {
                events.push(ProjectileEvent {
                    kind,
                    position: p.position,
                    hit: Some(hit),
                });
                return false;
            }

            if p.lifetime <= 0.0 {
                events.push(ProjectileEvent {
                    kind,
                    position: p.position,
                    hit: None,
                });
                return false;
            }

            true
        });

        events
    }
}
