//! Sound dispatch
//!
//! The game only ever fires sounds and forgets about them. A `SoundTrigger`
//! backend does the actual playback; `AudioManager` applies the volume
//! settings and keeps a failing backend from ever reaching gameplay.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a brick, whether or not the hit destroys it
    BrickHit,
}

impl SoundEffect {
    /// Asset name handed to the backend
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::BrickHit => "hit_sound.mp3",
        }
    }

    fn base_volume(self) -> f32 {
        1.0
    }
}

/// Background music tracks. Only one plays at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    /// Loops from the first launch
    Soundtrack,
    /// Played once on a win
    Victory,
    /// Played once on a loss
    GameOver,
}

impl MusicTrack {
    pub fn name(self) -> &'static str {
        match self {
            MusicTrack::Soundtrack => "soundtrack.mp3",
            MusicTrack::Victory => "win_soundtrack.wav",
            MusicTrack::GameOver => "game_over.mp3",
        }
    }

    fn base_volume(self) -> f32 {
        match self {
            MusicTrack::Soundtrack => 0.75,
            MusicTrack::Victory | MusicTrack::GameOver => 1.0,
        }
    }

    pub fn looped(self) -> bool {
        self == MusicTrack::Soundtrack
    }
}

/// Playback failure reported by a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The named asset could not be found
    MissingAsset(String),
    /// No output device or the backend was shut down
    Unavailable,
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::MissingAsset(name) => write!(f, "sound asset '{name}' not found"),
            AudioError::Unavailable => write!(f, "audio output unavailable"),
        }
    }
}

impl std::error::Error for AudioError {}

/// Fire-and-forget playback backend
pub trait SoundTrigger {
    fn play_effect(&mut self, name: &str, volume: f32) -> Result<(), AudioError>;
    /// Replaces whatever music is playing
    fn play_music(&mut self, name: &str, volume: f32, looped: bool) -> Result<(), AudioError>;
    fn stop_music(&mut self);
}

/// Audio manager for the game
pub struct AudioManager<B> {
    backend: B,
    sfx_volume: f32,
    music_volume: f32,
    /// Assets that already failed once; later failures stay quiet
    warned: BTreeSet<String>,
}

impl<B: SoundTrigger> AudioManager<B> {
    pub fn new(backend: B, settings: &Settings) -> Self {
        Self {
            backend,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            warned: BTreeSet::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn report(&mut self, name: &str, result: Result<(), AudioError>) {
        if let Err(e) = result {
            if self.warned.insert(name.to_string()) {
                log::warn!("Skipping sound: {e}");
            } else {
                log::trace!("Skipping sound '{name}' again");
            }
        }
    }

    /// Play a sound effect
    pub fn play_effect(&mut self, effect: SoundEffect) {
        let vol = effect.base_volume() * self.sfx_volume;
        if vol <= 0.0 {
            return;
        }
        let result = self.backend.play_effect(effect.name(), vol);
        self.report(effect.name(), result);
    }

    /// Start a music track, replacing the current one
    pub fn play_music(&mut self, track: MusicTrack) {
        let vol = track.base_volume() * self.music_volume;
        if vol <= 0.0 {
            return;
        }
        let result = self.backend.play_music(track.name(), vol, track.looped());
        self.report(track.name(), result);
    }

    pub fn stop_music(&mut self) {
        self.backend.stop_music();
    }
}

/// Backend for hosts without audio output: logs every request. With an
/// asset directory set, requests for files that are not there fail like a
/// real backend would.
#[derive(Debug, Clone, Default)]
pub struct LogAudio {
    asset_dir: Option<PathBuf>,
    played: usize,
}

impl LogAudio {
    pub fn new(asset_dir: Option<PathBuf>) -> Self {
        Self {
            asset_dir,
            played: 0,
        }
    }

    /// Requests that would have produced sound
    pub fn played(&self) -> usize {
        self.played
    }

    fn check(&self, name: &str) -> Result<(), AudioError> {
        match &self.asset_dir {
            Some(dir) if !dir.join(name).is_file() => {
                Err(AudioError::MissingAsset(name.to_string()))
            }
            _ => Ok(()),
        }
    }
}

impl SoundTrigger for LogAudio {
    fn play_effect(&mut self, name: &str, volume: f32) -> Result<(), AudioError> {
        self.check(name)?;
        self.played += 1;
        log::debug!("sfx {name} @ {volume:.2}");
        Ok(())
    }

    fn play_music(&mut self, name: &str, volume: f32, looped: bool) -> Result<(), AudioError> {
        self.check(name)?;
        self.played += 1;
        log::info!("music {name} @ {volume:.2}{}", if looped { " (loop)" } else { "" });
        Ok(())
    }

    fn stop_music(&mut self) {
        log::debug!("music stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        fail: bool,
    }

    impl SoundTrigger for Recorder {
        fn play_effect(&mut self, name: &str, volume: f32) -> Result<(), AudioError> {
            if self.fail {
                return Err(AudioError::Unavailable);
            }
            self.calls.push(format!("sfx {name} {volume:.2}"));
            Ok(())
        }

        fn play_music(&mut self, name: &str, volume: f32, looped: bool) -> Result<(), AudioError> {
            self.calls.push(format!("music {name} {volume:.2} {looped}"));
            Ok(())
        }

        fn stop_music(&mut self) {
            self.calls.push("stop".to_string());
        }
    }

    fn full_volume() -> Settings {
        Settings {
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            ..Settings::default()
        }
    }

    #[test]
    fn test_volumes_scale_with_settings() {
        let mut audio = AudioManager::new(Recorder::default(), &full_volume());
        audio.play_effect(SoundEffect::BrickHit);
        audio.play_music(MusicTrack::Soundtrack);
        audio.stop_music();
        audio.play_music(MusicTrack::Victory);
        assert_eq!(
            audio.backend().calls,
            vec![
                "sfx hit_sound.mp3 1.00",
                "music soundtrack.mp3 0.75 true",
                "stop",
                "music win_soundtrack.wav 1.00 false",
            ]
        );
    }

    #[test]
    fn test_muted_plays_nothing() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let mut audio = AudioManager::new(Recorder::default(), &settings);
        audio.play_effect(SoundEffect::BrickHit);
        audio.play_music(MusicTrack::GameOver);
        assert!(audio.backend().calls.is_empty());
    }

    #[test]
    fn test_backend_failure_is_absorbed() {
        let failing = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut audio = AudioManager::new(failing, &full_volume());
        audio.play_effect(SoundEffect::BrickHit);
        audio.play_effect(SoundEffect::BrickHit);
        assert_eq!(audio.warned.len(), 1);
    }

    #[test]
    fn test_log_audio_missing_asset() {
        let mut backend = LogAudio::new(Some(std::env::temp_dir().join("brick-breaker-no-assets")));
        assert_eq!(
            backend.play_effect("hit_sound.mp3", 1.0),
            Err(AudioError::MissingAsset("hit_sound.mp3".to_string()))
        );
        let mut backend = LogAudio::new(None);
        assert!(backend.play_music("soundtrack.mp3", 0.5, true).is_ok());
        assert_eq!(backend.played(), 1);
    }
}
