//! Sound clip pools and mixer settings.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy_kira_audio::AudioSource;

use crate::core::SfxCue;

/// Mixer volumes. Music volume changes are picked up live by the audio
/// systems; per-request SFX volume scales multiply `sfx_volume`.
#[derive(Resource)]
pub struct AudioSettings {
    pub music_volume: f64,
    pub sfx_volume: f64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            music_volume: 0.35,
            sfx_volume: 0.8,
        }
    }
}

/// Clip pools per cue, plus the looped ambient track.
///
/// A cue with an empty pool silently plays nothing; missing audio never
/// affects unrelated state.
#[derive(Resource, Default)]
pub struct SfxLibrary {
    pools: HashMap<SfxCue, Vec<Handle<AudioSource>>>,
    pub ambient: Option<Handle<AudioSource>>,
}

impl SfxLibrary {
    pub fn insert_pool(&mut self, cue: SfxCue, clips: Vec<Handle<AudioSource>>) {
        self.pools.insert(cue, clips);
    }

    pub fn pool(&self, cue: SfxCue) -> &[Handle<AudioSource>] {
        self.pools.get(&cue).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Pick a random clip from the cue's pool, if it has any.
    pub fn random_clip(&self, cue: SfxCue) -> Option<Handle<AudioSource>> {
        let pool = self.pool(cue);
        if pool.is_empty() {
            return None;
        }
        let index = ((rand::random::<f32>() * pool.len() as f32) as usize).min(pool.len() - 1);
        Some(pool[index].clone())
    }
}

/// Load the audio library at startup.
pub fn load_audio_library(mut commands: Commands, asset_server: Res<AssetServer>) {
    let mut library = SfxLibrary::default();

    library.insert_pool(
        SfxCue::Gunshot,
        vec![
            asset_server.load("sounds/gunshot_01.ogg"),
            asset_server.load("sounds/gunshot_02.ogg"),
            asset_server.load("sounds/gunshot_03.ogg"),
        ],
    );
    library.insert_pool(SfxCue::Draw, vec![asset_server.load("sounds/weapon_draw.ogg")]);
    library.insert_pool(
        SfxCue::Holster,
        vec![asset_server.load("sounds/weapon_holster.ogg")],
    );
    library.ambient = Some(asset_server.load("sounds/ambient_hum.ogg"));

    commands.insert_resource(library);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pool_yields_no_clip() {
        let library = SfxLibrary::default();
        assert!(library.random_clip(SfxCue::Gunshot).is_none());
        assert!(library.pool(SfxCue::Draw).is_empty());
    }

    #[test]
    fn random_clip_comes_from_the_pool() {
        let mut library = SfxLibrary::default();
        let clip = Handle::default();
        library.insert_pool(SfxCue::Gunshot, vec![clip.clone()]);

        assert_eq!(library.random_clip(SfxCue::Gunshot), Some(clip));
    }
}
