//! Audio plugin - ambient music loop and one-shot SFX playback.

use bevy::prelude::*;
use bevy_kira_audio::prelude::*;

use super::library::{load_audio_library, AudioSettings, SfxLibrary};
use crate::core::{GameState, SfxEvent};

/// Channel for the looped ambient track.
#[derive(Resource)]
pub struct MusicChannel;

/// Channel for one-shot effects.
#[derive(Resource)]
pub struct SfxChannel;

/// Audio plugin - owns the mixer channels and clip pools.
pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AudioSettings>()
            .add_audio_channel::<MusicChannel>()
            .add_audio_channel::<SfxChannel>()
            .add_systems(Startup, load_audio_library)
            .add_systems(OnEnter(GameState::InGame), start_ambient_music)
            .add_systems(
                Update,
                (play_sfx_requests, apply_music_volume).run_if(in_state(GameState::InGame)),
            );
    }
}

/// Start the ambient loop when gameplay begins.
fn start_ambient_music(
    music: Res<AudioChannel<MusicChannel>>,
    library: Res<SfxLibrary>,
    settings: Res<AudioSettings>,
) {
    let Some(track) = library.ambient.clone() else {
        return;
    };
    music.stop();
    music.play(track).looped().with_volume(settings.music_volume);
}

/// Play one-shot effects requested by the character.
fn play_sfx_requests(
    mut events: EventReader<SfxEvent>,
    sfx: Res<AudioChannel<SfxChannel>>,
    library: Res<SfxLibrary>,
    settings: Res<AudioSettings>,
) {
    for event in events.read() {
        let Some(clip) = library.random_clip(event.cue) else {
            continue;
        };
        sfx.play(clip)
            .with_volume(settings.sfx_volume * event.volume as f64);
    }
}

/// Pick up live music volume changes.
fn apply_music_volume(
    music: Res<AudioChannel<MusicChannel>>,
    settings: Res<AudioSettings>,
) {
    if settings.is_changed() {
        music.set_volume(settings.music_volume);
    }
}
