//! Flight body dynamics
//!
//! The [`FlightBody`] owns the aircraft pose (position plus yaw/pitch/roll),
//! the pitch/roll angular velocities, the throttle and the landing gear
//! flag. `step` turns one frame of held input into motion: inputs feed the
//! angular velocities (inertia), the velocities feed the angles, and the
//! roll angle feeds yaw (bank-to-turn). There is no full aerodynamic model;
//! a constant descent bias fights a speed-proportional lift term, and losing
//! the lift term below the stall threshold *is* the stall behavior.
//!
//! All out-of-range inputs are clamped rather than rejected; `step` never
//! fails.

use glam::{EulerRot, Quat, Vec3};
use rand::Rng;

use crate::input::FlightKeys;
use crate::physics::ballistics::{
    BOMB_FORWARD_CARRY, BOMB_RELEASE_SINK, MISSILE_SPEED, ProjectilePool,
};
use crate::physics::collision::GROUND_ALTITUDE;

// Flight tuning constants
/// Full-throttle forward speed in m/s.
pub const FLY_SPEED: f32 = 80.0;
/// Reference speed for the lift term in m/s.
pub const MAX_SPEED: f32 = 150.0;
/// Below this commanded speed the lift term drops out.
pub const STALL_SPEED: f32 = 20.0;
/// Base pitch actuation rate in rad/s.
pub const PITCH_RATE: f32 = 1.2;
/// Base roll actuation rate in rad/s.
pub const ROLL_RATE: f32 = 1.5;
/// Pitch angular velocity magnitude bound.
pub const MAX_PITCH_VELOCITY: f32 = 1.0;
/// Roll angular velocity magnitude bound.
pub const MAX_ROLL_VELOCITY: f32 = 1.2;
/// Roll angle bound; the pitch angle has no such clamp, only its velocity.
pub const MAX_ROLL: f32 = 60.0 * std::f32::consts::PI / 180.0;
/// Idle decay factor applied to angular velocities once per update.
/// Deliberately not scaled by dt; scaling it changes the flight feel.
pub const ANGULAR_DAMPING: f32 = 0.92;
/// Spring gain pulling the roll angle back to level when no roll is held.
pub const ROLL_RESTORING_GAIN: f32 = 8.0;
/// Multiplier on ROLL_RATE while a roll key is held.
pub const ROLL_INPUT_GAIN: f32 = 6.0;
/// Multiplier on PITCH_RATE while a pitch key is held.
pub const PITCH_INPUT_GAIN: f32 = 3.0;
/// Yaw drift per unit of banked roll: `yaw -= sin(roll) * gain * dt`.
pub const BANK_TURN_GAIN: f32 = 0.8;
/// Constant descent bias in m/s.
pub const DESCENT_RATE: f32 = 15.0;
/// Lift contribution at MAX_SPEED, in m/s.
pub const LIFT_GAIN: f32 = 10.0;
/// Direct altitude nudge rate in m/s (climb/descend keys).
pub const CLIMB_RATE: f32 = 20.0;
/// Throttle change per second while a throttle key is held.
pub const THROTTLE_RATE: f32 = 0.5;
/// Below this speed a grounded aircraft bleeds throttle.
pub const GROUND_RECOVERY_SPEED: f32 = 30.0;
/// Per-frame throttle multiplier while grounded and slow.
pub const GROUND_THROTTLE_BLEED: f32 = 0.95;
/// Canonical spawn position.
pub const SPAWN_POSITION: Vec3 = Vec3::new(0.0, 50.0, 0.0);
/// Canonical spawn throttle.
pub const SPAWN_THROTTLE: f32 = 0.5;

/// Local-frame launch offset of the wing hardpoints.
const MISSILE_OFFSET: f32 = 3.0;
/// Local-frame hardpoint lead along the body z axis.
const MISSILE_OFFSET_FORWARD: f32 = 2.0;
/// Local-frame bomb bay offset (below and behind the center of mass).
const BOMB_BAY_OFFSET: Vec3 = Vec3::new(0.0, -1.5, -2.0);
/// Forward lead applied to the bomb release point.
const BOMB_RELEASE_LEAD: f32 = 3.0;
/// Local-frame exhaust direction, scaled to the tail position.
const EXHAUST_OFFSET: Vec3 = Vec3::new(0.0, -0.1, -1.0);
const EXHAUST_DISTANCE: f32 = 7.0;

/// Advisory per-frame flight state.
///
/// `Crashed` reports the terminal flag; it does not itself stop integration.
/// The caller decides whether to keep stepping a crashed body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightStatus {
    Flying,
    /// Commanded speed is below [`STALL_SPEED`]; no lift this frame.
    Stalling,
    Crashed,
}

/// Which wing hardpoint fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WingSide {
    Left,
    Right,
}

/// The player aircraft's physical state.
#[derive(Debug, Clone)]
pub struct FlightBody {
    /// World position of the center of mass.
    pub position: Vec3,
    /// Heading angle in radians; derived from roll, never directly actuated.
    pub yaw: f32,
    /// Nose angle in radians; negative pitches the nose up.
    pub pitch: f32,
    /// Bank angle in radians, clamped to ±[`MAX_ROLL`].
    pub roll: f32,
    /// Pitch angular velocity, clamped to ±[`MAX_PITCH_VELOCITY`].
    pub pitch_velocity: f32,
    /// Roll angular velocity, clamped to ±[`MAX_ROLL_VELOCITY`].
    pub roll_velocity: f32,
    /// Engine power in [0, 1].
    pub throttle: f32,
    /// Landing gear state; cosmetic, no physical effect.
    pub gear_down: bool,
    destroyed: bool,
}

impl Default for FlightBody {
    fn default() -> Self {
        Self {
            position: SPAWN_POSITION,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            pitch_velocity: 0.0,
            roll_velocity: 0.0,
            throttle: SPAWN_THROTTLE,
            gear_down: true,
            destroyed: false,
        }
    }
}

impl FlightBody {
    /// Create a body at the canonical spawn pose.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commanded forward speed in m/s.
    pub fn speed(&self) -> f32 {
        self.throttle * FLY_SPEED
    }

    /// Orientation quaternion: yaw outermost, then pitch, then roll.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, self.roll)
    }

    /// World-space forward axis (body +Z).
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::Z
    }

    /// World-space engine exhaust position, for the trail emitter and the
    /// chase camera. Read-only projection.
    pub fn exhaust_position(&self) -> Vec3 {
        self.position + self.orientation() * (EXHAUST_OFFSET * EXHAUST_DISTANCE)
    }

    /// Whether a crash has been reported for this body.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Record a crash. Advisory: the body keeps accepting `step` calls; the
    /// caller chooses whether to keep integrating a wreck.
    pub fn mark_crashed(&mut self) {
        self.destroyed = true;
    }

    /// Flip the landing gear. Cosmetic only.
    pub fn toggle_gear(&mut self) {
        self.gear_down = !self.gear_down;
    }

    /// Return to the canonical spawn pose and clear the crash flag.
    ///
    /// Safe to call between frames at any time.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Integrate one frame of held input into motion.
    ///
    /// Inputs are clamped, never rejected. Returns the advisory status for
    /// this frame; collision classification is the caller's job.
    pub fn step(&mut self, keys: &FlightKeys, dt: f32) -> FlightStatus {
        self.apply_throttle(keys, dt);
        self.apply_roll_input(keys, dt);
        self.apply_pitch_input(keys, dt);

        self.pitch_velocity = self
            .pitch_velocity
            .clamp(-MAX_PITCH_VELOCITY, MAX_PITCH_VELOCITY);
        self.roll_velocity = self
            .roll_velocity
            .clamp(-MAX_ROLL_VELOCITY, MAX_ROLL_VELOCITY);

        // Direct altitude nudges bypass the force model.
        self.position.y += keys.climb_axis() as f32 * CLIMB_RATE * dt;

        self.integrate_attitude(dt);
        self.integrate_position(dt);
        self.resolve_ground_contact();

        if self.destroyed {
            FlightStatus::Crashed
        } else if self.speed() < STALL_SPEED {
            FlightStatus::Stalling
        } else {
            FlightStatus::Flying
        }
    }

    fn apply_throttle(&mut self, keys: &FlightKeys, dt: f32) {
        self.throttle =
            (self.throttle + keys.throttle_axis() as f32 * THROTTLE_RATE * dt).clamp(0.0, 1.0);
    }

    fn apply_roll_input(&mut self, keys: &FlightKeys, dt: f32) {
        // Restoring spring toward level flight, only while no roll is held.
        if !keys.roll_left && !keys.roll_right {
            self.roll_velocity -= self.roll * ROLL_RESTORING_GAIN * dt;
        }

        let input = keys.roll_axis();
        if input != 0 {
            self.roll_velocity += input as f32 * ROLL_RATE * ROLL_INPUT_GAIN * dt;
        } else {
            self.roll_velocity *= ANGULAR_DAMPING;
        }
    }

    fn apply_pitch_input(&mut self, keys: &FlightKeys, dt: f32) {
        // No restoring spring here: pitch only damps back, the one
        // asymmetry against the roll axis.
        if keys.pitch_up {
            self.pitch_velocity -= PITCH_RATE * PITCH_INPUT_GAIN * dt;
        } else if keys.pitch_down {
            self.pitch_velocity += PITCH_RATE * PITCH_INPUT_GAIN * dt;
        } else {
            self.pitch_velocity *= ANGULAR_DAMPING;
        }
    }

    fn integrate_attitude(&mut self, dt: f32) {
        self.pitch += self.pitch_velocity * dt;
        self.roll += self.roll_velocity * dt;

        // Banking turns the aircraft.
        self.yaw -= self.roll.sin() * BANK_TURN_GAIN * dt;

        self.roll = self.roll.clamp(-MAX_ROLL, MAX_ROLL);
    }

    fn integrate_position(&mut self, dt: f32) {
        self.position += self.forward() * (self.throttle * FLY_SPEED * dt);

        let speed = self.speed();
        let mut vertical = -DESCENT_RATE * dt;
        if speed > STALL_SPEED {
            vertical += speed / MAX_SPEED * LIFT_GAIN * dt;
        }
        self.position.y += vertical;
    }

    fn resolve_ground_contact(&mut self) {
        if self.position.y < GROUND_ALTITUDE {
            self.position.y = GROUND_ALTITUDE;
            self.pitch_velocity = 0.0;
            self.roll_velocity = 0.0;
            // A slow grounded aircraft cannot instantly power back out.
            if self.speed() < GROUND_RECOVERY_SPEED {
                self.throttle *= GROUND_THROTTLE_BLEED;
            }
        }
    }

    /// Fire a missile from a wing hardpoint into `missiles`.
    ///
    /// Rate limiting is the caller's responsibility: the fire command must be
    /// re-armed explicitly, it does not auto-repeat.
    pub fn fire<R: Rng>(&self, side: WingSide, missiles: &mut ProjectilePool, rng: &mut R) {
        let lateral = match side {
            WingSide::Left => -MISSILE_OFFSET,
            WingSide::Right => MISSILE_OFFSET,
        };
        let hardpoint = Vec3::new(lateral, 0.0, MISSILE_OFFSET_FORWARD);
        let launch = self.position + self.orientation() * hardpoint;
        missiles.spawn(launch, self.forward() * MISSILE_SPEED, rng);
    }

    /// Release a bomb from the belly bay into `bombs`.
    ///
    /// The bomb inherits a small downward sink plus a share of the body's
    /// forward motion.
    pub fn drop_bomb<R: Rng>(&self, bombs: &mut ProjectilePool, rng: &mut R) {
        let release =
            self.position + self.orientation() * BOMB_BAY_OFFSET + self.forward() * BOMB_RELEASE_LEAD;
        let velocity = Vec3::new(0.0, -BOMB_RELEASE_SINK, 0.0) + self.forward() * BOMB_FORWARD_CARRY;
        bombs.spawn(release, velocity, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::ballistics::ProjectileKind;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_throttle_clamped_to_unit_range() {
        let mut body = FlightBody::new();
        let mut keys = FlightKeys::new();

        keys.throttle_up = true;
        for _ in 0..600 {
            body.step(&keys, DT);
        }
        assert_eq!(body.throttle, 1.0);

        keys.throttle_up = false;
        keys.throttle_down = true;
        for _ in 0..600 {
            body.step(&keys, DT);
        }
        assert_eq!(body.throttle, 0.0);
    }

    #[test]
    fn test_angular_velocities_stay_bounded() {
        let mut body = FlightBody::new();
        let mut keys = FlightKeys::new();
        keys.roll_right = true;
        keys.pitch_down = true;

        for _ in 0..600 {
            body.step(&keys, DT);
            assert!(body.roll_velocity.abs() <= MAX_ROLL_VELOCITY);
            assert!(body.pitch_velocity.abs() <= MAX_PITCH_VELOCITY);
        }
    }

    #[test]
    fn test_roll_clamped_pitch_unbounded() {
        let mut body = FlightBody::new();
        // Keep altitude high so ground contact never zeroes the velocities.
        body.position.y = 5000.0;
        let mut keys = FlightKeys::new();
        keys.roll_right = true;
        keys.pitch_down = true;
        keys.climb = true;

        for _ in 0..1200 {
            body.step(&keys, DT);
            assert!(body.roll.abs() <= MAX_ROLL + 1e-6);
        }
        // The pitch angle has no clamp and keeps winding up.
        assert!(body.pitch.abs() > MAX_ROLL);
    }

    #[test]
    fn test_idle_damping_ignores_dt() {
        // The 0.92 decay is per update, not per second: one update at any dt
        // produces the same decay.
        let keys = FlightKeys::new();

        let mut fast = FlightBody::new();
        fast.position.y = 500.0;
        fast.roll_velocity = 1.0;
        fast.roll = 0.0;
        fast.step(&keys, 1.0 / 120.0);

        let mut slow = FlightBody::new();
        slow.position.y = 500.0;
        slow.roll_velocity = 1.0;
        slow.roll = 0.0;
        slow.step(&keys, 1.0 / 30.0);

        assert_relative_eq!(fast.roll_velocity, ANGULAR_DAMPING, epsilon = 1e-6);
        // The slower frame integrates more roll angle, but the velocity decay
        // factor is identical.
        assert_relative_eq!(slow.roll_velocity, ANGULAR_DAMPING, epsilon = 1e-6);
    }

    #[test]
    fn test_banking_turns_the_nose() {
        let mut body = FlightBody::new();
        body.position.y = 500.0;
        let mut keys = FlightKeys::new();
        keys.roll_right = true;

        for _ in 0..120 {
            body.step(&keys, DT);
        }
        // Positive roll banks right; yaw drifts negative.
        assert!(body.roll > 0.0);
        assert!(body.yaw < 0.0);
    }

    #[test]
    fn test_ground_contact_clamps_and_bleeds_throttle() {
        let mut body = FlightBody::new();
        body.position.y = 1.0;
        body.throttle = 0.2; // speed 16, below the recovery threshold
        body.pitch_velocity = 0.5;
        body.roll_velocity = -0.5;

        let keys = FlightKeys::new();
        let status = body.step(&keys, DT);

        assert_eq!(body.position.y, GROUND_ALTITUDE);
        assert_eq!(body.pitch_velocity, 0.0);
        assert_eq!(body.roll_velocity, 0.0);
        assert_relative_eq!(body.throttle, 0.2 * GROUND_THROTTLE_BLEED, epsilon = 1e-6);
        assert_eq!(status, FlightStatus::Stalling);
    }

    #[test]
    fn test_ground_contact_keeps_throttle_at_speed() {
        let mut body = FlightBody::new();
        body.position.y = 1.0;
        body.throttle = 0.5; // speed 40, above the recovery threshold

        let keys = FlightKeys::new();
        body.step(&keys, DT);

        assert_eq!(body.position.y, GROUND_ALTITUDE);
        assert_relative_eq!(body.throttle, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_stall_status_thresholds() {
        let keys = FlightKeys::new();

        let mut body = FlightBody::new();
        body.throttle = 0.5; // speed 40 > 20
        assert_eq!(body.step(&keys, DT), FlightStatus::Flying);

        let mut body = FlightBody::new();
        body.throttle = 0.2; // speed 16 < 20
        assert_eq!(body.step(&keys, DT), FlightStatus::Stalling);
    }

    #[test]
    fn test_lift_only_above_stall_speed() {
        let keys = FlightKeys::new();

        // Stalled: pure descent bias.
        let mut stalled = FlightBody::new();
        stalled.throttle = 0.2;
        let y0 = stalled.position.y;
        stalled.step(&keys, DT);
        assert_relative_eq!(y0 - stalled.position.y, DESCENT_RATE * DT, epsilon = 1e-4);

        // Flying: lift offsets part of the descent.
        let mut flying = FlightBody::new();
        flying.throttle = 0.5;
        let y0 = flying.position.y;
        flying.step(&keys, DT);
        let expected = (DESCENT_RATE - 40.0 / MAX_SPEED * LIFT_GAIN) * DT;
        assert_relative_eq!(y0 - flying.position.y, expected, epsilon = 1e-4);
    }

    #[test]
    fn test_crash_flag_is_advisory() {
        let mut body = FlightBody::new();
        body.mark_crashed();

        let keys = FlightKeys::new();
        let before = body.position;
        let status = body.step(&keys, DT);

        // The body still integrates; only the status reports the crash.
        assert_eq!(status, FlightStatus::Crashed);
        assert_ne!(body.position, before);
    }

    #[test]
    fn test_reset_restores_spawn_pose() {
        let mut body = FlightBody::new();
        let mut keys = FlightKeys::new();
        keys.roll_left = true;
        keys.pitch_up = true;
        for _ in 0..300 {
            body.step(&keys, DT);
        }
        body.mark_crashed();

        body.reset();
        assert_eq!(body.position, SPAWN_POSITION);
        assert_eq!(body.throttle, SPAWN_THROTTLE);
        assert_eq!(body.roll, 0.0);
        assert_eq!(body.pitch_velocity, 0.0);
        assert!(!body.is_destroyed());
    }

    #[test]
    fn test_missile_spawn_transform_level_flight() {
        let body = FlightBody::new();
        let mut missiles = ProjectilePool::new(ProjectileKind::Missile);
        let mut rng = StdRng::seed_from_u64(3);

        body.fire(WingSide::Left, &mut missiles, &mut rng);
        let p = missiles.projectiles()[0];

        // Level flight: identity orientation, forward is +Z.
        assert_relative_eq!(p.position.x, -3.0, epsilon = 1e-5);
        assert_relative_eq!(p.position.y, 50.0, epsilon = 1e-5);
        assert_relative_eq!(p.position.z, 2.0, epsilon = 1e-5);
        assert_relative_eq!(p.velocity.z, MISSILE_SPEED, epsilon = 1e-4);
        assert_relative_eq!(p.velocity.x, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_bomb_velocity_composition() {
        let body = FlightBody::new();
        let mut bombs = ProjectilePool::new(ProjectileKind::Bomb);
        let mut rng = StdRng::seed_from_u64(3);

        body.drop_bomb(&mut bombs, &mut rng);
        let p = bombs.projectiles()[0];

        // Down 5 plus forward carry 10 along +Z.
        assert_relative_eq!(p.velocity.y, -BOMB_RELEASE_SINK, epsilon = 1e-5);
        assert_relative_eq!(p.velocity.z, BOMB_FORWARD_CARRY, epsilon = 1e-5);
        // Released below and behind, thrown slightly forward.
        assert_relative_eq!(p.position.y, 48.5, epsilon = 1e-5);
        assert_relative_eq!(p.position.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_exhaust_sits_behind_the_tail() {
        let body = FlightBody::new();
        let exhaust = body.exhaust_position();
        assert!(exhaust.z < body.position.z);
        assert!(exhaust.y < body.position.y);
    }
}
