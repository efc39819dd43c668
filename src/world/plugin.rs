//! World plugin - arena setup and teardown.

use bevy::prelude::*;

use super::spawning::{spawn_arena_shell, spawn_cover_block, spawn_lighting, ArenaGeometry};
use crate::core::GameState;
use crate::player::{spawn_player, PlayerConfig};

/// World plugin - spawns the test arena and the player within it.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::InGame), setup_arena);
    }
}

/// Build the arena and drop the player into it.
///
/// Re-entering gameplay after a pause must not rebuild the world.
fn setup_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<PlayerConfig>,
    existing: Query<(), With<ArenaGeometry>>,
) {
    if !existing.is_empty() {
        return;
    }
    spawn_arena_shell(&mut commands, &mut meshes, &mut materials);
    spawn_lighting(&mut commands);

    // A few cover blocks at different angles to snap against.
    let cover_layout = [
        (Vec3::new(0.0, 0.0, -6.0), 0.0, 3.0),
        (Vec3::new(-5.0, 0.0, -2.0), std::f32::consts::FRAC_PI_2, 2.0),
        (Vec3::new(5.0, 0.0, 2.0), -std::f32::consts::FRAC_PI_4, 2.5),
    ];
    for (position, yaw, width) in cover_layout {
        spawn_cover_block(
            &mut commands,
            &mut meshes,
            &mut materials,
            position,
            yaw,
            width,
        );
    }

    let spawn_height = config.movement.capsule_half_height + config.movement.capsule_radius + 0.05;
    spawn_player(
        &mut commands,
        &mut meshes,
        &mut materials,
        Vec3::new(0.0, spawn_height, 4.0),
        &config,
    );

    info!("Arena ready");
}
