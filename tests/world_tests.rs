//! Collision World and Population Tests
//!
//! Query classification, margins, fly-over gates, idempotent removal, the
//! drift/wander churn and config loading, all through the public API.

use barnstormer_engine::game::{GameWorld, SimConfig, WorldConfig};
use barnstormer_engine::physics::collision::{
    ANIMAL_CEILING, BUILDING_CEILING_MARGIN, BUILDING_MARGIN, CollisionWorld, GROUND_ALTITUDE, Hit,
    ObstacleKind, TREE_CEILING, VEHICLE_CEILING,
};
use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;

// ============================================================================
// Query classification
// ============================================================================

#[test]
fn ground_wins_over_everything() {
    let mut world = CollisionWorld::new();
    world.insert(ObstacleKind::Building, Vec3::ZERO, 20.0, 100.0);
    world.insert(ObstacleKind::Tree, Vec3::ZERO, 6.0, 8.0);

    let hit = world.query(Vec3::new(0.0, GROUND_ALTITUDE - 0.1, 0.0));
    assert_eq!(hit, Some(Hit::Ground));
}

#[test]
fn fly_over_inside_radius_above_ceiling_is_clear() {
    let mut world = CollisionWorld::new();
    let height = 80.0;
    world.insert(ObstacleKind::Building, Vec3::ZERO, 15.0, height);

    // Horizontally well inside radius + margin, vertically above the
    // ceiling: no collision.
    let above = Vec3::new(5.0, height + BUILDING_CEILING_MARGIN + 0.1, 0.0);
    assert_eq!(world.query(above), None);

    let below = Vec3::new(5.0, height + BUILDING_CEILING_MARGIN - 0.1, 0.0);
    assert!(matches!(world.query(below), Some(Hit::Structure(_))));
}

#[test]
fn class_margins_are_generous() {
    let mut world = CollisionWorld::new();
    let radius = 15.0;
    world.insert(ObstacleKind::Building, Vec3::ZERO, radius, 80.0);

    let inside = Vec3::new(radius + BUILDING_MARGIN - 0.1, 40.0, 0.0);
    assert!(world.query(inside).is_some());

    let outside = Vec3::new(radius + BUILDING_MARGIN + 0.1, 40.0, 0.0);
    assert_eq!(world.query(outside), None);
}

#[test]
fn actor_bands_gate_on_altitude() {
    let mut world = CollisionWorld::new();
    let truck = world.insert(ObstacleKind::Vehicle, Vec3::ZERO, 6.0, 6.0);
    let cow = world.insert(ObstacleKind::Animal, Vec3::new(100.0, 0.0, 0.0), 2.0, 2.0);

    // Trucks are hit below 10 m, animals only below 5 m.
    assert_eq!(world.query(Vec3::new(0.0, VEHICLE_CEILING - 1.0, 0.0)), Some(Hit::Actor(truck)));
    assert_eq!(world.query(Vec3::new(0.0, VEHICLE_CEILING + 1.0, 0.0)), None);

    assert_eq!(
        world.query(Vec3::new(100.0, ANIMAL_CEILING - 1.0, 0.0)),
        Some(Hit::Actor(cow))
    );
    assert_eq!(world.query(Vec3::new(100.0, ANIMAL_CEILING + 1.0, 0.0)), None);
}

#[test]
fn trees_report_no_handle() {
    let mut world = CollisionWorld::new();
    world.insert(ObstacleKind::Tree, Vec3::ZERO, 6.0, 8.0);

    assert_eq!(world.query(Vec3::new(3.0, TREE_CEILING - 1.0, 0.0)), Some(Hit::Tree));
    assert_eq!(world.query(Vec3::new(3.0, TREE_CEILING + 1.0, 0.0)), None);
}

// ============================================================================
// Removal
// ============================================================================

#[test]
fn removal_is_idempotent_and_final() {
    let mut world = CollisionWorld::new();
    let id = world.insert(ObstacleKind::Building, Vec3::ZERO, 15.0, 80.0);
    let probe = Vec3::new(0.0, 40.0, 0.0);
    assert!(world.query(probe).is_some());

    world.remove(id);
    let after_once = world.query(probe);
    world.remove(id);
    let after_twice = world.query(probe);

    assert_eq!(after_once, None);
    assert_eq!(after_once, after_twice);

    // The dead obstacle stays dead through later inserts.
    world.insert(ObstacleKind::Tree, Vec3::new(500.0, 0.0, 0.0), 6.0, 8.0);
    assert!(world.obstacle(id).is_none());
}

// ============================================================================
// Population and churn
// ============================================================================

fn tiny_world() -> WorldConfig {
    WorldConfig {
        building_count: 2,
        truck_count: 1,
        cow_count: 1,
        sheep_count: 1,
        pig_count: 0,
        tree_clusters: 1,
        trees_per_cluster: 3,
        ..WorldConfig::default()
    }
}

#[test]
fn population_matches_config() {
    let mut rng = StdRng::seed_from_u64(21);
    let world = GameWorld::generate(&tiny_world(), &mut rng);
    // 2 buildings + 1 truck + 2 animals + 3 trees
    assert_eq!(world.collision.len(), 8);
}

#[test]
fn churn_keeps_the_world_around_the_aircraft() {
    let mut rng = StdRng::seed_from_u64(22);
    let mut world = GameWorld::generate(&tiny_world(), &mut rng);

    // A long cross-country leg in big hops; the world must follow.
    let mut aircraft = Vec3::new(0.0, 60.0, 0.0);
    for _ in 0..50 {
        aircraft.x += 400.0;
        aircraft.z -= 250.0;
        world.update(aircraft, 1.0 / 60.0, &mut rng);
    }

    for (_, obstacle) in world.collision.iter() {
        let dx = (obstacle.position.x - aircraft.x).abs();
        let dz = (obstacle.position.z - aircraft.z).abs();
        assert!(dx < 2500.0 && dz < 2500.0, "obstacle left behind at ({dx}, {dz})");
    }
}

#[test]
fn destroyed_building_is_gone_for_good() {
    let mut rng = StdRng::seed_from_u64(23);
    let mut world = GameWorld::generate(&tiny_world(), &mut rng);
    let victim = world.buildings().next().unwrap();

    world.remove(victim);
    // Churn hard; the wreck must never come back.
    let mut aircraft = Vec3::ZERO;
    for _ in 0..20 {
        aircraft.x += 1000.0;
        world.update(aircraft, 1.0 / 60.0, &mut rng);
        assert!(world.collision.obstacle(victim).is_none());
    }
}

// ============================================================================
// Config files
// ============================================================================

#[test]
fn config_file_round_trips() {
    let config = SimConfig {
        seed: Some(77),
        world: tiny_world(),
    };
    let path = std::env::temp_dir().join("barnstormer_world_test_config.json");
    config.save(&path).unwrap();

    let loaded = SimConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn partial_config_file_uses_defaults() {
    let path = std::env::temp_dir().join("barnstormer_partial_config.json");
    std::fs::write(&path, r#"{ "world": { "tree_clusters": 0 } }"#).unwrap();

    let loaded = SimConfig::load(&path).unwrap();
    assert_eq!(loaded.world.tree_clusters, 0);
    assert_eq!(loaded.world.building_count, WorldConfig::default().building_count);
    assert_eq!(loaded.seed, None);
}
