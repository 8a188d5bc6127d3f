//! SDL2 audio device hosting the [`Synth`].

use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};
use sdl2::AudioSubsystem;
use tracing::{info, warn};

use crate::audio::{AudioSink, Cue, NullAudio, Track};
use crate::error::PlatformError;
use crate::synth::{SharedSynth, Synth, SAMPLE_RATE};

pub struct SynthCallback {
    synth: SharedSynth,
}

impl AudioCallback for SynthCallback {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        self.synth.fill(out);
    }
}

/// Audio output. Falls back to silence when no device can be opened.
pub enum Mixer {
    Enabled {
        synth: SharedSynth,
        _device: AudioDevice<SynthCallback>,
    },
    Disabled(NullAudio),
}

impl Mixer {
    pub fn new(subsystem: &AudioSubsystem) -> Self {
        match Self::try_new(subsystem) {
            Ok(mixer) => mixer,
            Err(error) => {
                warn!(%error, "Failed to initialize audio, continuing without sound");
                Mixer::Disabled(NullAudio)
            }
        }
    }

    fn try_new(subsystem: &AudioSubsystem) -> Result<Self, PlatformError> {
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE as i32),
            channels: Some(1),
            samples: Some(512),
        };
        let synth = SharedSynth::new(Synth::new(SAMPLE_RATE));
        let callback_synth = synth.clone();
        let device = subsystem
            .open_playback(None, &desired, |spec| {
                info!(freq = spec.freq, samples = spec.samples, "Audio device opened");
                SynthCallback { synth: callback_synth }
            })
            .map_err(PlatformError::Audio)?;
        device.resume();

        Ok(Mixer::Enabled { synth, _device: device })
    }
}

impl AudioSink for Mixer {
    fn play(&mut self, cue: Cue) {
        match self {
            Mixer::Enabled { synth, .. } => synth.play(cue),
            Mixer::Disabled(null) => null.play(cue),
        }
    }

    fn set_track(&mut self, track: Track) {
        match self {
            Mixer::Enabled { synth, .. } => synth.set_track(track),
            Mixer::Disabled(null) => null.set_track(track),
        }
    }

    fn set_muted(&mut self, muted: bool) {
        match self {
            Mixer::Enabled { synth, .. } => synth.set_muted(muted),
            Mixer::Disabled(null) => null.set_muted(muted),
        }
    }
}
