//! Arena spawning - floor, walls, cover blocks, and lighting.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::cover::CoverVolume;

/// Marker for everything the arena setup spawns, so it can be torn down
/// when leaving gameplay.
#[derive(Component)]
pub struct ArenaGeometry;

const ARENA_SIZE: f32 = 40.0;
const WALL_HEIGHT: f32 = 3.0;
const WALL_THICKNESS: f32 = 0.5;

/// Spawn the test arena floor and perimeter walls.
pub fn spawn_arena_shell(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.25, 0.27, 0.3),
        perceptual_roughness: 0.95,
        ..default()
    });
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.33, 0.3),
        perceptual_roughness: 0.9,
        ..default()
    });

    // Floor as a box extending downward, top surface at y=0.
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(ARENA_SIZE, 0.5, ARENA_SIZE))),
        MeshMaterial3d(floor_material),
        Transform::from_xyz(0.0, -0.25, 0.0),
        Collider::cuboid(ARENA_SIZE / 2.0, 0.25, ARENA_SIZE / 2.0),
        ArenaGeometry,
    ));

    // Perimeter walls: (position, dimensions)
    let half = ARENA_SIZE / 2.0;
    let wall_configs = [
        (
            Vec3::new(0.0, WALL_HEIGHT / 2.0, -half),
            Vec3::new(ARENA_SIZE, WALL_HEIGHT, WALL_THICKNESS),
        ),
        (
            Vec3::new(0.0, WALL_HEIGHT / 2.0, half),
            Vec3::new(ARENA_SIZE, WALL_HEIGHT, WALL_THICKNESS),
        ),
        (
            Vec3::new(-half, WALL_HEIGHT / 2.0, 0.0),
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, ARENA_SIZE),
        ),
        (
            Vec3::new(half, WALL_HEIGHT / 2.0, 0.0),
            Vec3::new(WALL_THICKNESS, WALL_HEIGHT, ARENA_SIZE),
        ),
    ];

    for (position, size) in wall_configs {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(position),
            Collider::cuboid(size.x / 2.0, size.y / 2.0, size.z / 2.0),
            ArenaGeometry,
        ));
    }
}

/// Spawn a chest-high cover block facing the given yaw.
pub fn spawn_cover_block(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
    yaw: f32,
    width: f32,
) {
    const COVER_HEIGHT: f32 = 1.1;
    const COVER_DEPTH: f32 = 0.6;

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(width, COVER_HEIGHT, COVER_DEPTH))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.45, 0.42, 0.38),
            perceptual_roughness: 0.8,
            ..default()
        })),
        Transform::from_translation(position + Vec3::Y * (COVER_HEIGHT / 2.0))
            .with_rotation(Quat::from_rotation_y(yaw)),
        Collider::cuboid(width / 2.0, COVER_HEIGHT / 2.0, COVER_DEPTH / 2.0),
        CoverVolume {
            half_width: width / 2.0,
        },
        ArenaGeometry,
    ));
}

/// Key light for the arena.
pub fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 14.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        ArenaGeometry,
    ));
}
