//! Collision detection module
//!
//! Provides the [`CollisionWorld`], the single queryable store of everything
//! the aircraft and its projectiles can run into: the ground plane, buildings,
//! vehicles, animals and trees. Each obstacle class is a horizontal exclusion
//! circle with its own forgiveness margin and a vertical ceiling above which
//! the class reports no hit (flying over a building is allowed).
//!
//! # Example
//!
//! ```ignore
//! use barnstormer_engine::physics::collision::{CollisionWorld, Hit, ObstacleKind};
//! use glam::Vec3;
//!
//! let mut world = CollisionWorld::new();
//! let id = world.insert(ObstacleKind::Building, Vec3::new(100.0, 0.0, 0.0), 15.0, 80.0);
//!
//! match world.query(Vec3::new(95.0, 40.0, 0.0)) {
//!     Some(Hit::Structure(hit)) => assert_eq!(hit, id),
//!     other => panic!("expected a building hit, got {other:?}"),
//! }
//! ```

use glam::Vec3;

// ============================================================================
// Collision constants
// ============================================================================

/// Altitude below which the ground plane is hit, regardless of position.
pub const GROUND_ALTITUDE: f32 = 2.0;

/// Extra exclusion distance added to a building's radius.
pub const BUILDING_MARGIN: f32 = 10.0;
/// Vertical clearance added to a building's height before a fly-over is safe.
pub const BUILDING_CEILING_MARGIN: f32 = 5.0;

/// Extra exclusion distance added to a vehicle's radius.
pub const VEHICLE_MARGIN: f32 = 8.0;
/// Vehicles are only hit below this absolute altitude.
pub const VEHICLE_CEILING: f32 = 10.0;

/// Extra exclusion distance added to an animal's radius.
pub const ANIMAL_MARGIN: f32 = 8.0;
/// Animals are only hit below this absolute altitude.
pub const ANIMAL_CEILING: f32 = 5.0;

/// All trees share one exclusion radius; per-tree radii are cosmetic.
pub const TREE_RADIUS: f32 = 6.0;
/// Trees are only hit below this absolute altitude.
pub const TREE_CEILING: f32 = 15.0;

// ============================================================================
// Obstacles
// ============================================================================

/// Stable handle to an obstacle in a [`CollisionWorld`].
///
/// Ids are never reused; a removed obstacle's id stays dead forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObstacleId(u32);

impl ObstacleId {
    /// Raw index, for display/debugging.
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Obstacle class, selecting margin and ceiling rules in [`CollisionWorld::query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Tall static structure with a real height ceiling.
    Building,
    /// Ground vehicle, hit only in a low altitude band.
    Vehicle,
    /// Wandering ground animal, hit only in a very low altitude band.
    Animal,
    /// Tree; uniform radius, no handle reported on hit.
    Tree,
}

/// One entry in the collision world.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// World position; only the horizontal (x, z) components participate in
    /// the distance test, y is the base elevation of the model.
    pub position: Vec3,
    /// Horizontal exclusion radius in meters (before the class margin).
    pub radius: f32,
    /// Height of the obstacle; only meaningful for buildings, whose ceiling
    /// is `height + BUILDING_CEILING_MARGIN`.
    pub height: f32,
    /// Whether a destructive projectile may remove this obstacle.
    pub destructible: bool,
    alive: bool,
}

impl Obstacle {
    /// Whether the obstacle still participates in queries.
    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Classified result of a point query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Below the minimum flying altitude.
    Ground,
    /// Inside a building's exclusion volume.
    Structure(ObstacleId),
    /// Inside a vehicle's or animal's exclusion band.
    Actor(ObstacleId),
    /// Inside a tree's exclusion cylinder.
    Tree,
}

// ============================================================================
// CollisionWorld
// ============================================================================

/// Read-mostly store of all collidable world geometry.
///
/// Populated once at world-build time; the only mutations afterwards are
/// position updates from the drift/wander pass and [`remove`](Self::remove)
/// when a destructible obstacle is blown up. Queries scan each class in a
/// fixed priority order and the first match wins; no distance ranking is
/// performed among obstacles of the same class.
#[derive(Debug, Clone, Default)]
pub struct CollisionWorld {
    obstacles: Vec<Obstacle>,
}

impl CollisionWorld {
    /// Create an empty world (ground plane only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an obstacle and return its handle.
    ///
    /// Buildings are destructible; every other class is not.
    pub fn insert(&mut self, kind: ObstacleKind, position: Vec3, radius: f32, height: f32) -> ObstacleId {
        let id = ObstacleId(self.obstacles.len() as u32);
        self.obstacles.push(Obstacle {
            kind,
            position,
            radius,
            height,
            destructible: matches!(kind, ObstacleKind::Building),
            alive: true,
        });
        id
    }

    /// Remove an obstacle from all future queries. Idempotent.
    pub fn remove(&mut self, id: ObstacleId) {
        if let Some(obstacle) = self.obstacles.get_mut(id.0 as usize) {
            obstacle.alive = false;
        }
    }

    /// Look up a live obstacle.
    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.0 as usize).filter(|o| o.alive)
    }

    /// Mutable lookup of a live obstacle (drift/wander position updates).
    pub fn obstacle_mut(&mut self, id: ObstacleId) -> Option<&mut Obstacle> {
        self.obstacles.get_mut(id.0 as usize).filter(|o| o.alive)
    }

    /// Number of live obstacles.
    pub fn len(&self) -> usize {
        self.obstacles.iter().filter(|o| o.alive).count()
    }

    /// True if no live obstacles remain.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over live obstacles with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (ObstacleId, &Obstacle)> {
        self.obstacles
            .iter()
            .enumerate()
            .filter(|(_, o)| o.alive)
            .map(|(i, o)| (ObstacleId(i as u32), o))
    }

    /// Classify a world-space point against everything in the world.
    ///
    /// Evaluation order: ground, buildings, vehicles, animals, trees.
    /// Within a class the first live obstacle whose horizontal distance is
    /// inside `radius + margin` and whose ceiling gate passes wins.
    pub fn query(&self, point: Vec3) -> Option<Hit> {
        if point.y < GROUND_ALTITUDE {
            return Some(Hit::Ground);
        }

        for (id, obstacle) in self.of_kind(ObstacleKind::Building) {
            if within(point, obstacle.position, obstacle.radius + BUILDING_MARGIN)
                && point.y < obstacle.height + BUILDING_CEILING_MARGIN
            {
                return Some(Hit::Structure(id));
            }
        }

        for (id, obstacle) in self.of_kind(ObstacleKind::Vehicle) {
            if within(point, obstacle.position, obstacle.radius + VEHICLE_MARGIN)
                && point.y < VEHICLE_CEILING
            {
                return Some(Hit::Actor(id));
            }
        }

        for (id, obstacle) in self.of_kind(ObstacleKind::Animal) {
            if within(point, obstacle.position, obstacle.radius + ANIMAL_MARGIN)
                && point.y < ANIMAL_CEILING
            {
                return Some(Hit::Actor(id));
            }
        }

        if point.y < TREE_CEILING {
            for (_, obstacle) in self.of_kind(ObstacleKind::Tree) {
                if within(point, obstacle.position, TREE_RADIUS) {
                    return Some(Hit::Tree);
                }
            }
        }

        None
    }

    fn of_kind(&self, kind: ObstacleKind) -> impl Iterator<Item = (ObstacleId, &Obstacle)> {
        self.iter().filter(move |(_, o)| o.kind == kind)
    }
}

/// Horizontal (XZ-plane) distance test.
fn within(point: Vec3, center: Vec3, distance: f32) -> bool {
    let dx = point.x - center.x;
    let dz = point.z - center.z;
    (dx * dx + dz * dz).sqrt() < distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_world_only_hits_ground() {
        let world = CollisionWorld::new();
        assert_eq!(world.query(Vec3::new(0.0, 1.0, 0.0)), Some(Hit::Ground));
        assert_eq!(world.query(Vec3::new(0.0, 50.0, 0.0)), None);
    }

    #[test]
    fn test_ground_has_priority_over_obstacles() {
        let mut world = CollisionWorld::new();
        world.insert(ObstacleKind::Building, Vec3::ZERO, 15.0, 80.0);
        assert_eq!(world.query(Vec3::new(0.0, 1.0, 0.0)), Some(Hit::Ground));
    }

    #[test]
    fn test_building_margin() {
        let mut world = CollisionWorld::new();
        let id = world.insert(ObstacleKind::Building, Vec3::ZERO, 15.0, 80.0);

        // Inside radius + margin.
        let hit = world.query(Vec3::new(24.9, 40.0, 0.0));
        assert_eq!(hit, Some(Hit::Structure(id)));

        // Just outside.
        assert_eq!(world.query(Vec3::new(25.1, 40.0, 0.0)), None);
    }

    #[test]
    fn test_building_fly_over() {
        let mut world = CollisionWorld::new();
        world.insert(ObstacleKind::Building, Vec3::ZERO, 15.0, 80.0);

        // Horizontally inside, but above height + ceiling margin.
        assert_eq!(world.query(Vec3::new(0.0, 85.1, 0.0)), None);
        assert!(world.query(Vec3::new(0.0, 84.9, 0.0)).is_some());
    }

    #[test]
    fn test_vehicle_altitude_band() {
        let mut world = CollisionWorld::new();
        let id = world.insert(ObstacleKind::Vehicle, Vec3::ZERO, 6.0, 6.0);

        assert_eq!(world.query(Vec3::new(4.0, 9.0, 0.0)), Some(Hit::Actor(id)));
        assert_eq!(world.query(Vec3::new(4.0, 11.0, 0.0)), None);
    }

    #[test]
    fn test_animal_altitude_band() {
        let mut world = CollisionWorld::new();
        let id = world.insert(ObstacleKind::Animal, Vec3::ZERO, 2.0, 2.0);

        assert_eq!(world.query(Vec3::new(3.0, 4.0, 0.0)), Some(Hit::Actor(id)));
        assert_eq!(world.query(Vec3::new(3.0, 6.0, 0.0)), None);
    }

    #[test]
    fn test_tree_uniform_radius() {
        let mut world = CollisionWorld::new();
        world.insert(ObstacleKind::Tree, Vec3::ZERO, 1.0, 8.0);

        // The stored radius is ignored; the shared TREE_RADIUS applies.
        assert_eq!(world.query(Vec3::new(5.5, 10.0, 0.0)), Some(Hit::Tree));
        assert_eq!(world.query(Vec3::new(6.5, 10.0, 0.0)), None);
        // Above the tree ceiling.
        assert_eq!(world.query(Vec3::new(0.0, 16.0, 0.0)), None);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut world = CollisionWorld::new();
        let id = world.insert(ObstacleKind::Building, Vec3::ZERO, 15.0, 80.0);

        world.remove(id);
        assert_eq!(world.query(Vec3::new(0.0, 40.0, 0.0)), None);
        assert!(world.obstacle(id).is_none());

        // Second removal is a no-op.
        world.remove(id);
        assert_eq!(world.len(), 0);
    }

    #[test]
    fn test_iteration_order_decides_ties() {
        let mut world = CollisionWorld::new();
        let first = world.insert(ObstacleKind::Building, Vec3::ZERO, 15.0, 80.0);
        let _second = world.insert(ObstacleKind::Building, Vec3::new(1.0, 0.0, 0.0), 15.0, 80.0);

        // Both overlap the query point; insertion order wins.
        assert_eq!(world.query(Vec3::new(0.5, 40.0, 0.0)), Some(Hit::Structure(first)));
    }

    #[test]
    fn test_destructible_defaults() {
        let mut world = CollisionWorld::new();
        let building = world.insert(ObstacleKind::Building, Vec3::ZERO, 15.0, 80.0);
        let animal = world.insert(ObstacleKind::Animal, Vec3::new(50.0, 0.0, 0.0), 2.0, 2.0);

        assert!(world.obstacle(building).unwrap().destructible);
        assert!(!world.obstacle(animal).unwrap().destructible);
    }
}
