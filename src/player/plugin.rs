//! Player plugin - input, state coordination, locomotion, and muzzle FX.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::config::{load_player_config, PlayerConfig};
use super::coordinator::Coordinator;
use super::input::{gather_input, PlayerInput};
use super::systems;
use crate::animation::PoseAnimator;
use crate::core::{FrameSet, MuzzleSide};

/// Player plugin - handles the character's state machine, movement, and
/// effect output.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .add_systems(Startup, load_player_config)
            .add_systems(Update, gather_input.in_set(FrameSet::Input))
            .add_systems(
                Update,
                (
                    systems::apply_state_requests,
                    systems::tick_coordinator,
                    systems::sync_crouch_capsule,
                )
                    .chain()
                    .in_set(FrameSet::Transitions),
            )
            .add_systems(Update, systems::apply_locomotion.in_set(FrameSet::Locomotion))
            .add_systems(
                Update,
                (
                    systems::blend_animation_layers,
                    systems::drain_animation_triggers,
                    systems::spawn_muzzle_flashes,
                    systems::fade_muzzle_flashes,
                )
                    .chain()
                    .in_set(FrameSet::LateOutputs),
            );
    }
}

/// Spawn the player entity with its physics capsule, pose animator, and
/// muzzle sockets.
///
/// If the combat tuning fails validation the character is spawned without a
/// coordinator and stays inert for the session - the one fatal error path,
/// fatal only to this component.
pub fn spawn_player(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
    config: &PlayerConfig,
) -> Entity {
    let movement = &config.movement;

    let mut entity = commands.spawn((
        Player,
        MovementState::default(),
        PendingDisplacement::default(),
        PreviousPose::default(),
        PoseAnimator::default(),
        Transform::from_translation(position),
        Visibility::default(),
        // Rapier physics components
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(movement.capsule_half_height, movement.capsule_radius),
        KinematicCharacterController {
            offset: CharacterLength::Absolute(0.01),
            snap_to_ground: Some(CharacterLength::Absolute(0.3)),
            ..default()
        },
    ));

    match Coordinator::new(config.combat.clone()) {
        Ok(coordinator) => {
            entity.insert(coordinator);
        }
        Err(e) => {
            error!("Invalid combat tuning, character disabled: {e}");
        }
    }

    entity.with_children(|parent| {
        // Placeholder body until a rigged model is wired up.
        parent.spawn((
            Mesh3d(meshes.add(Capsule3d::new(
                movement.capsule_radius,
                movement.capsule_half_height * 2.0,
            ))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.35, 0.4, 0.5),
                ..default()
            })),
            Transform::default(),
        ));

        // Muzzle anchors, one per shoulder.
        parent.spawn((
            MuzzleSocket {
                side: MuzzleSide::Left,
            },
            Transform::from_xyz(-0.3, 0.4, -0.5),
        ));
        parent.spawn((
            MuzzleSocket {
                side: MuzzleSide::Right,
            },
            Transform::from_xyz(0.3, 0.4, -0.5),
        ));
    });

    entity.id()
}
