//! Camera systems - cursor capture, rig setup, and the per-frame orbit.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_rapier3d::prelude::*;

use super::rig::{clamp_obstructed, CameraRig, OrbitCamera};
use crate::core::smooth_damp;
use crate::player::{Coordinator, Player, PlayerConfig, PlayerInput};

/// Grab and hide cursor when entering gameplay.
pub fn grab_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Release cursor when leaving gameplay.
pub fn release_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Spawn the orbit camera once gameplay starts.
///
/// Camera tuning is validated here, once; a bad section logs the error and
/// leaves the game without a gameplay camera instead of failing per-frame.
/// Resuming from pause re-enters gameplay without spawning a second camera.
pub fn setup_camera(
    mut commands: Commands,
    config: Res<PlayerConfig>,
    existing: Query<(), With<OrbitCamera>>,
) {
    if !existing.is_empty() {
        return;
    }
    let tuning = &config.camera;
    if let Err(e) = tuning.validate() {
        error!("Invalid camera tuning, camera disabled: {e}");
        return;
    }

    let rig = CameraRig::new(tuning);
    commands.spawn((
        OrbitCamera,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: rig.fov(),
            ..default()
        }),
        Transform::from_xyz(0.0, tuning.base_height, tuning.base_distance)
            .looking_at(Vec3::new(0.0, tuning.base_height, 0.0), Vec3::Y),
        rig,
    ));
}

/// Per-frame third-person orbit: look input, state-gated zoom and crouch
/// offsets, obstruction probing, and smoothed application of the pose.
pub fn update_camera(
    time: Res<Time>,
    input: Res<PlayerInput>,
    config: Res<PlayerConfig>,
    rapier_context: Query<&RapierContext>,
    player: Query<(Entity, &Transform, Option<&Coordinator>), With<Player>>,
    mut camera: Query<
        (&mut Transform, &mut CameraRig, &mut Projection),
        (With<OrbitCamera>, Without<Player>),
    >,
) {
    let Ok((mut cam_transform, mut rig, mut projection)) = camera.get_single_mut() else {
        return;
    };
    let Ok((player_entity, player_transform, coordinator)) = player.get_single() else {
        return;
    };
    let tuning = &config.camera;
    let dt = time.delta_secs();

    rig.apply_look(input.look_delta, tuning, dt);

    let (aiming, crouch_settled) = coordinator
        .map(|c| (c.state().aiming, c.crouch_camera_active()))
        .unwrap_or((false, false));
    rig.advance(aiming, crouch_settled, tuning, dt);

    let pivot = rig.pivot(player_transform.translation);
    let desired = rig.desired_position(pivot);

    // Probe for geometry between the pivot and the ideal camera spot.
    let hit_distance = rapier_context.get_single().ok().and_then(|context| {
        let offset = desired - pivot;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return None;
        }
        context
            .cast_shape(
                pivot,
                Quat::IDENTITY,
                offset / distance,
                &Collider::ball(tuning.obstruction_radius),
                ShapeCastOptions {
                    max_time_of_impact: distance,
                    ..default()
                },
                QueryFilter::default().exclude_collider(player_entity),
            )
            .map(|(_, hit)| hit.time_of_impact)
    });
    let target_pos = clamp_obstructed(pivot, desired, hit_distance, tuning.obstruction_padding);

    // Position is critically damped; rotation and FOV use plain exponential
    // interpolation, each at its own rate.
    let current = cam_transform.translation;
    cam_transform.translation = smooth_damp(
        current,
        target_pos,
        &mut rig.position_velocity,
        tuning.position_smooth_time,
        dt,
    );

    let t = (tuning.rotation_rate * dt).min(1.0);
    let target_rotation = rig.orientation();
    cam_transform.rotation = cam_transform.rotation.slerp(target_rotation, t);

    if let Projection::Perspective(perspective) = projection.as_mut() {
        perspective.fov = rig.fov();
    }
}
