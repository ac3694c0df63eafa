//! World Population and Churn
//!
//! Builds the [`CollisionWorld`] at session start and keeps the illusion of
//! an endless world afterwards: obstacles that drift outside their window
//! around the aircraft are recycled to the opposite edge, and animals wander
//! on a heading that re-randomizes on a countdown timer. Destroyed obstacles
//! are never recycled.

use glam::Vec3;
use rand::Rng;

use crate::game::config::WorldConfig;
use crate::physics::collision::{CollisionWorld, ObstacleId, ObstacleKind, TREE_RADIUS};

// ============================================================================
// Churn constants
// ============================================================================

/// Trees recycle once they drift this far from the aircraft on an axis.
pub const TREE_WINDOW: f32 = 2000.0;
/// Jitter applied to a recycled tree's respawn coordinate.
pub const TREE_RESPAWN_JITTER: f32 = 100.0;
/// Buildings recycle at this axis distance.
pub const BUILDING_WINDOW: f32 = 1500.0;
/// Jitter applied to a recycled building's respawn coordinate.
pub const BUILDING_RESPAWN_JITTER: f32 = 300.0;
/// Trucks recycle at this axis distance.
pub const TRUCK_WINDOW: f32 = 1200.0;
/// Jitter applied to a recycled truck's respawn coordinate.
pub const TRUCK_RESPAWN_JITTER: f32 = 200.0;
/// Animals are teleported back near the aircraft beyond this axis distance.
pub const ANIMAL_RECENTER_DISTANCE: f32 = 1000.0;

/// Spacing of the road grid the trucks park on.
const ROAD_SPACING: f32 = 300.0;
/// Road lanes run from -ROAD_LANES to +ROAD_LANES.
const ROAD_LANES: i32 = 5;
/// Parking jitter around a road position.
const TRUCK_JITTER: f32 = 50.0;
/// Truck base elevation.
const TRUCK_ELEVATION: f32 = 1.5;
/// Tree base elevation.
const TREE_ELEVATION: f32 = 3.0;

// ============================================================================
// Animals
// ============================================================================

/// Animal species; differ in exclusion radius and walking speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimalSpecies {
    Cow,
    Sheep,
    Pig,
}

impl AnimalSpecies {
    /// Horizontal exclusion radius in meters.
    pub fn radius(self) -> f32 {
        match self {
            AnimalSpecies::Cow => 2.0,
            AnimalSpecies::Sheep => 1.5,
            AnimalSpecies::Pig => 1.8,
        }
    }

    /// Walking speed range in m/s.
    fn speed_range(self) -> (f32, f32) {
        match self {
            AnimalSpecies::Cow => (0.5, 1.0),
            AnimalSpecies::Sheep => (0.3, 0.7),
            AnimalSpecies::Pig => (0.4, 0.9),
        }
    }
}

/// Per-animal wander state, advanced once per frame.
///
/// The species only matters at generation time (radius and speed draw);
/// afterwards every animal wanders the same way.
#[derive(Debug, Clone)]
struct WanderState {
    id: ObstacleId,
    heading: f32,
    speed: f32,
    /// Seconds until the next heading change.
    turn_timer: f32,
}

// ============================================================================
// GameWorld
// ============================================================================

/// The populated world: collision geometry plus the churn bookkeeping.
#[derive(Debug, Clone)]
pub struct GameWorld {
    /// Collision geometry; queried by the aircraft and every projectile.
    pub collision: CollisionWorld,
    buildings: Vec<ObstacleId>,
    trucks: Vec<ObstacleId>,
    trees: Vec<ObstacleId>,
    animals: Vec<WanderState>,
}

impl GameWorld {
    /// Populate a fresh world from the config.
    pub fn generate<R: Rng>(config: &WorldConfig, rng: &mut R) -> Self {
        let mut collision = CollisionWorld::new();

        let mut buildings = Vec::with_capacity(config.building_count);
        for _ in 0..config.building_count {
            let width = rng.gen_range(20.0..40.0_f32);
            let depth = rng.gen_range(20.0..40.0_f32);
            let height = rng.gen_range(50.0..130.0_f32);
            let radius = (width * width + depth * depth).sqrt() / 2.0;
            let e = config.building_extent;
            let position = Vec3::new(rng.gen_range(-e..e), 0.0, rng.gen_range(-e..e));
            buildings.push(collision.insert(ObstacleKind::Building, position, radius, height));
        }

        let mut trucks = Vec::with_capacity(config.truck_count);
        for _ in 0..config.truck_count {
            let lane = rng.gen_range(-ROAD_LANES..=ROAD_LANES) as f32 * ROAD_SPACING;
            let along = rng.gen_range(-TRUCK_JITTER..TRUCK_JITTER);
            let across = rng.gen_range(-TRUCK_JITTER..TRUCK_JITTER);
            // Coin flip between an east-west and a north-south road.
            let position = if rng.gen_bool(0.5) {
                Vec3::new(along, TRUCK_ELEVATION, lane + across)
            } else {
                Vec3::new(lane + across, TRUCK_ELEVATION, along)
            };
            trucks.push(collision.insert(ObstacleKind::Vehicle, position, 6.0, 6.0));
        }

        let mut animals = Vec::with_capacity(config.animal_count());
        let herds = [
            (AnimalSpecies::Cow, config.cow_count),
            (AnimalSpecies::Sheep, config.sheep_count),
            (AnimalSpecies::Pig, config.pig_count),
        ];
        for (species, count) in herds {
            for _ in 0..count {
                let e = config.animal_extent;
                let position = Vec3::new(rng.gen_range(-e..e), 0.0, rng.gen_range(-e..e));
                let id = collision.insert(ObstacleKind::Animal, position, species.radius(), 2.0);
                let (lo, hi) = species.speed_range();
                animals.push(WanderState {
                    id,
                    heading: rng.gen_range(0.0..std::f32::consts::TAU),
                    speed: rng.gen_range(lo..hi),
                    turn_timer: 0.0,
                });
            }
        }

        let mut trees = Vec::with_capacity(config.tree_clusters * config.trees_per_cluster);
        for _ in 0..config.tree_clusters {
            let e = config.tree_cluster_extent;
            let cluster_x = rng.gen_range(-e..e);
            let cluster_z = rng.gen_range(-e..e);
            for _ in 0..config.trees_per_cluster {
                let s = config.tree_scatter;
                let position = Vec3::new(
                    cluster_x + rng.gen_range(-s..s),
                    TREE_ELEVATION,
                    cluster_z + rng.gen_range(-s..s),
                );
                trees.push(collision.insert(ObstacleKind::Tree, position, TREE_RADIUS, 8.0));
            }
        }

        log::info!(
            "world populated: {} buildings, {} trucks, {} animals, {} trees",
            buildings.len(),
            trucks.len(),
            animals.len(),
            trees.len()
        );

        Self {
            collision,
            buildings,
            trucks,
            trees,
            animals,
        }
    }

    /// Remove an obstacle from the world. Idempotent; the churn pass will
    /// drop its bookkeeping on the next update.
    pub fn remove(&mut self, id: ObstacleId) {
        self.collision.remove(id);
    }

    /// Live building handles (destruction targets).
    pub fn buildings(&self) -> impl Iterator<Item = ObstacleId> + '_ {
        let collision = &self.collision;
        self.buildings
            .iter()
            .copied()
            .filter(move |id| collision.obstacle(*id).is_some())
    }

    /// Advance one frame of world churn around the aircraft.
    pub fn update<R: Rng>(&mut self, aircraft: Vec3, dt: f32, rng: &mut R) {
        self.prune_dead();
        self.wander_animals(aircraft, dt, rng);
        self.drift(aircraft, rng);
    }

    /// Drop bookkeeping entries whose obstacles were destroyed.
    fn prune_dead(&mut self) {
        let collision = &self.collision;
        self.buildings.retain(|id| collision.obstacle(*id).is_some());
        self.trucks.retain(|id| collision.obstacle(*id).is_some());
        self.trees.retain(|id| collision.obstacle(*id).is_some());
        self.animals.retain(|a| collision.obstacle(a.id).is_some());
    }

    fn wander_animals<R: Rng>(&mut self, aircraft: Vec3, dt: f32, rng: &mut R) {
        for animal in &mut self.animals {
            animal.turn_timer -= dt;
            if animal.turn_timer <= 0.0 {
                animal.heading += rng.gen_range(-0.5..0.5);
                animal.turn_timer = rng.gen_range(2.0..5.0);
            }

            let Some(obstacle) = self.collision.obstacle_mut(animal.id) else {
                continue;
            };
            obstacle.position.x += animal.heading.cos() * animal.speed * dt;
            obstacle.position.z += animal.heading.sin() * animal.speed * dt;

            // Keep the herd near the aircraft.
            if (obstacle.position.x - aircraft.x).abs() > ANIMAL_RECENTER_DISTANCE {
                obstacle.position.x = aircraft.x + rng.gen_range(-750.0..750.0);
            }
            if (obstacle.position.z - aircraft.z).abs() > ANIMAL_RECENTER_DISTANCE {
                obstacle.position.z = aircraft.z + rng.gen_range(-750.0..750.0);
            }
        }
    }

    fn drift<R: Rng>(&mut self, aircraft: Vec3, rng: &mut R) {
        let groups: [(&[ObstacleId], f32, f32); 3] = [
            (&self.trees, TREE_WINDOW, TREE_RESPAWN_JITTER),
            (&self.buildings, BUILDING_WINDOW, BUILDING_RESPAWN_JITTER),
            (&self.trucks, TRUCK_WINDOW, TRUCK_RESPAWN_JITTER),
        ];
        // Collect first: the id lists cannot be borrowed while obstacles are
        // mutated.
        let work: Vec<(ObstacleId, f32, f32)> = groups
            .iter()
            .flat_map(|(ids, window, jitter)| {
                ids.iter().map(move |id| (*id, *window, *jitter))
            })
            .collect();

        for (id, window, jitter) in work {
            let Some(obstacle) = self.collision.obstacle_mut(id) else {
                continue;
            };
            obstacle.position.x =
                recycle_axis(obstacle.position.x, aircraft.x, window, jitter, rng);
            obstacle.position.z =
                recycle_axis(obstacle.position.z, aircraft.z, window, jitter, rng);
        }
    }

    #[cfg(test)]
    fn animal_ids(&self) -> Vec<ObstacleId> {
        self.animals.iter().map(|a| a.id).collect()
    }
}

/// Move a coordinate to the opposite window edge once it leaves the window.
fn recycle_axis<R: Rng>(value: f32, anchor: f32, window: f32, jitter: f32, rng: &mut R) -> f32 {
    let distance = value - anchor;
    if distance > window {
        anchor - window + rng.gen_range(0.0..jitter)
    } else if distance < -window {
        anchor + window + rng.gen_range(0.0..jitter)
    } else {
        value
    }
}
