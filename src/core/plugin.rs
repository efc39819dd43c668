//! Core plugin that sets up game states, events, and frame ordering.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Phases of a gameplay frame, chained in order.
///
/// Input sampling and discrete state transitions run before locomotion and
/// gravity; camera and animation-layer blending run last, so they always
/// observe the current frame's finalized character state instead of lagging
/// a frame behind it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Input,
    Transitions,
    Locomotion,
    LateOutputs,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Paused)
/// - Global events (SfxEvent, MuzzleFlashEvent)
/// - The per-frame system set ordering
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<SfxEvent>()
            .add_event::<MuzzleFlashEvent>()

            // Frame phase ordering shared by the character and camera plugins
            .configure_sets(
                Update,
                (
                    FrameSet::Input,
                    FrameSet::Transitions,
                    FrameSet::Locomotion,
                    FrameSet::LateOutputs,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )

            // Loading state - transition to InGame once startup systems ran
            .add_systems(OnEnter(GameState::Loading), transition_to_in_game)

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input
                    .run_if(in_state(GameState::InGame).or(in_state(GameState::Paused))),
            );
    }
}

/// Immediately transition from Loading to InGame.
/// Later this will wait for assets to load.
fn transition_to_in_game(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}
