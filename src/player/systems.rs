//! Bevy systems gluing the character core to input, physics, and effects.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::config::PlayerConfig;
use super::coordinator::{Coordinator, FxSink, TickContext};
use super::input::PlayerInput;
use super::locomotion::{plan_locomotion, integrate_gravity, LocomotionInput};
use crate::animation::{AnimationDriver, PoseAnimator, PARAM_SPEED};
use crate::camera::OrbitCamera;
use crate::core::{MuzzleFlashEvent, MuzzleSide, SfxCue, SfxEvent};
use crate::world::{find_nearby_cover, CoverVolume};

/// Forwards coordinator effect requests to the audio and FX event streams.
struct EventFx<'a, 'w1, 'w2> {
    sfx: &'a mut EventWriter<'w1, SfxEvent>,
    flashes: &'a mut EventWriter<'w2, MuzzleFlashEvent>,
}

impl FxSink for EventFx<'_, '_, '_> {
    fn play_sfx(&mut self, cue: SfxCue, volume: f32) {
        self.sfx.send(SfxEvent { cue, volume });
    }

    fn muzzle_flash(&mut self, side: MuzzleSide) {
        self.flashes.send(MuzzleFlashEvent { side });
    }
}

/// Translate edge-triggered input into coordinator state requests.
pub fn apply_state_requests(
    input: Res<PlayerInput>,
    config: Res<PlayerConfig>,
    mut sfx: EventWriter<SfxEvent>,
    mut flashes: EventWriter<MuzzleFlashEvent>,
    covers: Query<(&Transform, &CoverVolume), Without<Player>>,
    mut player: Query<
        (&Transform, &mut Coordinator, &mut PoseAnimator, &mut PendingDisplacement),
        With<Player>,
    >,
) {
    let Ok((transform, mut coordinator, mut animator, mut pending)) = player.get_single_mut()
    else {
        return;
    };

    let mut fx = EventFx {
        sfx: &mut sfx,
        flashes: &mut flashes,
    };

    if input.draw_pressed {
        coordinator.request_draw_holster_toggle(animator.as_mut(), &mut fx);
    }
    if input.attack_pressed {
        coordinator.request_attack(animator.as_mut(), &mut fx);
    }
    if input.crouch_pressed {
        coordinator.request_crouch_toggle(animator.as_mut());
    }
    if input.interact_pressed {
        let surface = find_nearby_cover(
            transform.translation,
            coordinator.tuning().cover_search_radius,
            covers.iter(),
        );
        let snap = coordinator.request_cover_toggle(
            animator.as_mut(),
            surface.as_ref(),
            transform.translation,
            config.movement.capsule_radius,
        );
        if let Some(target) = snap {
            pending.0 += target - transform.translation;
        }
    }
}

/// Advance the coordinator's continuous state once per frame.
pub fn tick_coordinator(
    time: Res<Time>,
    input: Res<PlayerInput>,
    camera: Query<&Transform, (With<OrbitCamera>, Without<Player>)>,
    mut player: Query<(&Transform, &mut Coordinator, &mut PoseAnimator), With<Player>>,
) {
    let Ok((transform, mut coordinator, mut animator)) = player.get_single_mut() else {
        return;
    };

    // Without a camera the bearing degenerates to zero and the in-cover
    // facing simply holds.
    let camera_pos = camera
        .get_single()
        .map(|t| t.translation)
        .unwrap_or(transform.translation);

    let ctx = TickContext {
        aim_held: input.aim_held,
        camera_pos,
        character_pos: transform.translation,
    };
    coordinator.tick(time.delta_secs(), &ctx, animator.as_mut());
}

/// Snap the physics capsule between standing and crouched dimensions.
///
/// The resize is instant; only actual crouch transitions touch the collider.
pub fn sync_crouch_capsule(
    config: Res<PlayerConfig>,
    mut player: Query<(&Coordinator, &mut Collider, &mut PreviousPose), With<Player>>,
) {
    let Ok((coordinator, mut collider, mut previous)) = player.get_single_mut() else {
        return;
    };

    let crouching = coordinator.state().crouching;
    if crouching == previous.crouching {
        return;
    }
    previous.crouching = crouching;

    let half_height = if crouching {
        config.movement.crouch_half_height
    } else {
        config.movement.capsule_half_height
    };
    *collider = Collider::capsule_y(half_height, config.movement.capsule_radius);
}

/// Plan and apply this frame's movement through the character controller.
///
/// Horizontal displacement is per-frame only; the vertical accumulator
/// applies gravity independently, even while movement is locked in cover.
pub fn apply_locomotion(
    time: Res<Time>,
    input: Res<PlayerInput>,
    config: Res<PlayerConfig>,
    rapier_context: Query<&RapierContext>,
    camera: Query<&Transform, (With<OrbitCamera>, Without<Player>)>,
    mut player: Query<
        (
            Entity,
            &mut Transform,
            &Coordinator,
            &mut MovementState,
            &mut PendingDisplacement,
            &mut KinematicCharacterController,
            &mut PoseAnimator,
        ),
        With<Player>,
    >,
) {
    let Ok((
        player_entity,
        mut transform,
        coordinator,
        mut movement_state,
        mut pending,
        mut controller,
        mut animator,
    )) = player.get_single_mut()
    else {
        return;
    };
    let dt = time.delta_secs();

    // Ground check using a short downward raycast from just above the
    // capsule bottom (more reliable than the controller's grounded output).
    let half_height = if coordinator.state().crouching {
        config.movement.crouch_half_height
    } else {
        config.movement.capsule_half_height
    };
    let capsule_bottom = half_height + config.movement.capsule_radius;
    let is_grounded = if let Ok(context) = rapier_context.get_single() {
        let ray_origin = transform.translation - Vec3::Y * (capsule_bottom - 0.05);
        context
            .cast_ray(
                ray_origin,
                Vec3::NEG_Y,
                0.15,
                true,
                QueryFilter::default().exclude_collider(player_entity),
            )
            .is_some()
    } else {
        true
    };
    movement_state.is_grounded = is_grounded;
    movement_state.vertical_velocity = integrate_gravity(
        movement_state.vertical_velocity,
        is_grounded,
        &config.movement,
        dt,
    );

    let (cam_forward, cam_right) = camera
        .get_single()
        .map(|t| (t.forward().as_vec3(), t.right().as_vec3()))
        .unwrap_or((Vec3::NEG_Z, Vec3::X));

    let plan = plan_locomotion(
        &LocomotionInput {
            move_axis: input.move_axis,
            run_held: input.run_held,
            cam_forward,
            cam_right,
        },
        coordinator.state(),
        &config.movement,
    );

    // Horizontal + gravity + any one-shot displacement (cover snap).
    let displacement = plan.planar_velocity * dt
        + Vec3::Y * (movement_state.vertical_velocity * dt)
        + pending.0;
    pending.0 = Vec3::ZERO;
    controller.translation = Some(displacement);

    if let Some(facing) = plan.desired_facing {
        let target = Transform::IDENTITY.looking_to(facing, Vec3::Y).rotation;
        let t = (config.movement.turn_rate * dt).min(1.0);
        transform.rotation = transform.rotation.slerp(target, t);
    }

    animator.set_float(
        PARAM_SPEED,
        plan.speed_target,
        config.movement.speed_damp_time,
        dt,
    );
}

/// Late-frame upper-body layer blending.
pub fn blend_animation_layers(
    time: Res<Time>,
    mut player: Query<(&mut Coordinator, &mut PoseAnimator), With<Player>>,
) {
    let Ok((mut coordinator, mut animator)) = player.get_single_mut() else {
        return;
    };
    coordinator.blend_layers(time.delta_secs(), animator.as_mut());
}

/// Hand trigger pulses to the animation backend.
///
/// Each pulse is consumed exactly once. Until a concrete graph is bound,
/// consuming means tracing the cue.
pub fn drain_animation_triggers(mut query: Query<&mut PoseAnimator, With<Player>>) {
    for mut animator in query.iter_mut() {
        for trigger in animator.drain_triggers() {
            debug!("animation cue: {trigger}");
        }
    }
}

/// Spawn a brief light burst at the requested muzzle socket.
pub fn spawn_muzzle_flashes(
    mut commands: Commands,
    mut events: EventReader<MuzzleFlashEvent>,
    sockets: Query<(&MuzzleSocket, &GlobalTransform)>,
) {
    for event in events.read() {
        let Some((_, socket_transform)) = sockets
            .iter()
            .find(|(socket, _)| socket.side == event.side)
        else {
            continue;
        };

        commands.spawn((
            PointLight {
                color: Color::srgb(1.0, 0.8, 0.4),
                intensity: 20_000.0,
                range: 6.0,
                shadows_enabled: false,
                ..default()
            },
            Transform::from_translation(socket_transform.translation()),
            MuzzleFlash {
                timer: Timer::from_seconds(0.05, TimerMode::Once),
            },
        ));
    }
}

/// Expire muzzle flash lights.
pub fn fade_muzzle_flashes(
    mut commands: Commands,
    time: Res<Time>,
    mut flashes: Query<(Entity, &mut MuzzleFlash)>,
) {
    for (entity, mut flash) in flashes.iter_mut() {
        flash.timer.tick(time.delta());
        if flash.timer.finished() {
            commands.entity(entity).despawn();
        }
    }
}
