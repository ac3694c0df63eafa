//! Frame Orchestration
//!
//! [`FlightSim`] owns every simulation subsystem and drives one frame tick
//! in a fixed order: projectile integration, edge-command consumption,
//! flight-body integration, aircraft collision classification, world churn,
//! particle update. All time-driven state advances inside this single tick;
//! there are no timers or callbacks outside it.
//!
//! The session also plays the role of the effects collaborator for
//! destruction: the physics layer only reports hits, and the session decides
//! that missile impacts remove destructible obstacles while bomb impacts do
//! not.

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::flight::{FlightBody, FlightStatus, WingSide};
use crate::game::config::SimConfig;
use crate::game::particles::TrailEmitter;
use crate::game::world::GameWorld;
use crate::input::FlightKeys;
use crate::physics::ballistics::{ProjectileEvent, ProjectileKind, ProjectilePool};
use crate::physics::collision::Hit;

/// Upper bound on a single frame step, in seconds.
///
/// A stalled host loop produces one clamped step instead of a huge delta
/// that would let fast movers tunnel through obstacles.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Everything that happened in one frame, for the host to react to.
#[derive(Debug, Clone)]
pub struct FrameReport {
    /// Advisory flight state after this frame.
    pub status: FlightStatus,
    /// What the aircraft hit this frame, if anything.
    pub crash: Option<Hit>,
    /// Projectiles retired this frame (impacts and expiries).
    pub events: Vec<ProjectileEvent>,
}

/// The complete simulation state for one play session.
pub struct FlightSim {
    /// The player aircraft.
    pub body: FlightBody,
    /// Populated world and collision geometry.
    pub world: GameWorld,
    /// Live missiles.
    pub missiles: ProjectilePool,
    /// Live bombs.
    pub bombs: ProjectilePool,
    /// Cosmetic exhaust trail.
    pub trail: TrailEmitter,
    rng: StdRng,
    elapsed: f32,
}

impl FlightSim {
    /// Build a session from the config; `seed: None` draws from entropy.
    pub fn new(config: &SimConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let world = GameWorld::generate(&config.world, &mut rng);

        Self {
            body: FlightBody::new(),
            world,
            missiles: ProjectilePool::new(ProjectileKind::Missile),
            bombs: ProjectilePool::new(ProjectileKind::Bomb),
            trail: TrailEmitter::new(),
            rng,
            elapsed: 0.0,
        }
    }

    /// Total simulated time in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Force-reset the session between frames: aircraft back to spawn, all
    /// projectiles cancelled, trail cleared. The world keeps its state.
    pub fn reset(&mut self) {
        self.body.reset();
        self.missiles.clear();
        self.bombs.clear();
        self.trail.clear();
        log::info!("session reset");
    }

    /// Advance the simulation by one frame.
    ///
    /// Edge-triggered commands in `keys` are consumed here; held commands
    /// are read but left untouched.
    pub fn advance(&mut self, keys: &mut FlightKeys, dt: f32) -> FrameReport {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.elapsed += dt;

        // Projectiles fly against last frame's world.
        let mut events = self.missiles.update(&self.world.collision, dt);
        events.extend(self.bombs.update(&self.world.collision, dt));
        for event in &events {
            self.resolve_projectile_event(event);
        }

        self.consume_commands(keys);

        let status = if self.body.is_destroyed() {
            FlightStatus::Crashed
        } else {
            self.body.step(keys, dt)
        };

        // Feed the collision classification back into the body's terminal
        // state; a wreck is not re-queried.
        let crash = if self.body.is_destroyed() {
            None
        } else {
            self.world.collision.query(self.body.position)
        };
        let status = match crash {
            Some(hit) => {
                self.body.mark_crashed();
                log::warn!("aircraft down ({hit:?}) at {:?}", self.body.position);
                FlightStatus::Crashed
            }
            None => status,
        };

        self.world.update(self.body.position, dt, &mut self.rng);

        if !self.body.is_destroyed() {
            self.trail.emit(
                self.body.exhaust_position(),
                self.body.forward(),
                self.body.throttle,
                &mut self.rng,
            );
        }
        self.trail.step(dt);

        FrameReport {
            status,
            crash,
            events,
        }
    }

    fn consume_commands(&mut self, keys: &mut FlightKeys) {
        if keys.take_reset() {
            self.reset();
        }
        if keys.take_gear_toggle() {
            self.body.toggle_gear();
        }

        // A wreck cannot fire; the latches are still consumed so nothing
        // queued before the crash goes off after a reset.
        let fire_left = keys.take_fire_left();
        let fire_right = keys.take_fire_right();
        let drop = keys.take_drop();
        if self.body.is_destroyed() {
            return;
        }

        if fire_left {
            self.body.fire(WingSide::Left, &mut self.missiles, &mut self.rng);
            log::info!("missile away (left), {} in flight", self.missiles.len());
        }
        if fire_right {
            self.body
                .fire(WingSide::Right, &mut self.missiles, &mut self.rng);
            log::info!("missile away (right), {} in flight", self.missiles.len());
        }
        if drop {
            self.body.drop_bomb(&mut self.bombs, &mut self.rng);
            log::info!("bomb released, {} falling", self.bombs.len());
        }
    }

    /// Destruction policy: only missiles destroy, and only destructible
    /// obstacles.
    fn resolve_projectile_event(&mut self, event: &ProjectileEvent) {
        match (event.kind, event.hit) {
            (ProjectileKind::Missile, Some(Hit::Structure(id))) => {
                let destructible = self
                    .world
                    .collision
                    .obstacle(id)
                    .is_some_and(|o| o.destructible);
                if destructible {
                    self.world.remove(id);
                    log::info!("structure {} destroyed at {}", id.index(), fmt_pos(event.position));
                }
            }
            (kind, Some(hit)) => {
                log::debug!("{kind:?} impact ({hit:?}) at {}", fmt_pos(event.position));
            }
            (kind, None) => log::debug!("{kind:?} expired at {}", fmt_pos(event.position)),
        }
    }
}

fn fmt_pos(p: Vec3) -> String {
    format!("({:.1}, {:.1}, {:.1})", p.x, p.y, p.z)
}
