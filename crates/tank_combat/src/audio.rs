//! Sound cues
//!
//! Gameplay code only announces that something audible happened. Playback
//! is fire-and-forget: a sink never reports back.

use log::debug;

use crate::config::SoundConfig;

/// Played cues kept by [`SoundManager`] before the oldest are dropped
pub const HISTORY_LIMIT: usize = 256;

/// Every sound the game can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Engine loop while the player drives
    Drive,
    /// Cannon fired
    Shot,
    /// Trigger pulled with an empty magazine
    ShotEmpty,
    /// Health powerup collected
    Health,
    /// Ammo powerup collected
    Ammo,
    /// Tank destroyed
    Boom,
    /// Shell struck a tank
    Bounce,
}

impl SoundCue {
    /// All cues in declaration order
    pub const ALL: [SoundCue; 7] = [
        SoundCue::Drive,
        SoundCue::Shot,
        SoundCue::ShotEmpty,
        SoundCue::Health,
        SoundCue::Ammo,
        SoundCue::Boom,
        SoundCue::Bounce,
    ];
}

/// Receiver of sound cues
pub trait SoundSink {
    /// Request playback of a cue
    fn play(&mut self, cue: SoundCue);
}

/// Sink that drops every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSound;

impl SoundSink for NullSound {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Volume-aware sink that records what it was asked to play
///
/// Audio output itself lives outside the simulation; this manager tracks
/// which cues were requested and at what volume, and honours pause state.
/// Only the last [`HISTORY_LIMIT`] cues are kept.
#[derive(Debug, Clone, Default)]
pub struct SoundManager {
    volumes: SoundConfig,
    paused: bool,
    played: Vec<(SoundCue, f32)>,
}

impl SoundManager {
    /// Create a new sound manager
    pub fn new(volumes: SoundConfig) -> Self {
        Self {
            volumes,
            paused: false,
            played: Vec::new(),
        }
    }

    /// Configured volume for a cue
    pub fn volume(&self, cue: SoundCue) -> f32 {
        match cue {
            SoundCue::Drive => self.volumes.drive,
            SoundCue::Shot => self.volumes.shot,
            SoundCue::ShotEmpty => self.volumes.shot_empty,
            SoundCue::Health => self.volumes.health,
            SoundCue::Ammo => self.volumes.ammo,
            SoundCue::Boom => self.volumes.boom,
            SoundCue::Bounce => self.volumes.bounce,
        }
    }

    /// Mute all cues until [`unpause`](Self::unpause)
    pub fn pause(&mut self) {
        debug!("Sound paused");
        self.paused = true;
    }

    /// Resume playback
    pub fn unpause(&mut self) {
        debug!("Sound resumed");
        self.paused = false;
    }

    /// Whether cues are currently muted
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Recent cues played since the last drain, oldest first, with their volumes
    pub fn played(&self) -> &[(SoundCue, f32)] {
        &self.played
    }

    /// Take and clear the played-cue history
    pub fn drain(&mut self) -> Vec<(SoundCue, f32)> {
        std::mem::take(&mut self.played)
    }

    /// Number of times a cue was played since the last drain
    pub fn count(&self, cue: SoundCue) -> usize {
        self.played.iter().filter(|(played, _)| *played == cue).count()
    }
}

impl SoundSink for SoundManager {
    fn play(&mut self, cue: SoundCue) {
        if self.paused {
            return;
        }
        let volume = self.volume(cue);
        debug!("Sound cue {:?} at volume {:.2}", cue, volume);
        if self.played.len() >= HISTORY_LIMIT {
            self.played.remove(0);
        }
        self.played.push((cue, volume));
    }
}
