//! A small procedural synthesizer for every cue and background track.
//!
//! Nothing is loaded from disk: cues are short envelopes over simple
//! oscillators, tracks are looping note sequences. The host pulls mono `f32`
//! samples through [`Synth::fill`].

use std::f32::consts::TAU;
use std::sync::Arc;

use parking_lot::Mutex;
use smallvec::{smallvec, SmallVec};
use tracing::trace;

use crate::audio::{AudioSink, Cue, Track};

pub const SAMPLE_RATE: u32 = 22_050;
const DEFAULT_VOLUME: f32 = 0.35;
/// Voices beyond this are dropped, oldest first.
const MAX_VOICES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Square,
    Triangle,
    Sine,
    Noise,
}

/// A single enveloped tone with a linear pitch sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub wave: Wave,
    pub from_hz: f32,
    pub to_hz: f32,
    /// Delay before the note sounds, in seconds.
    pub delay: f32,
    pub duration: f32,
    pub gain: f32,
}

const fn note(wave: Wave, from_hz: f32, to_hz: f32, delay: f32, duration: f32, gain: f32) -> Note {
    Note {
        wave,
        from_hz,
        to_hz,
        delay,
        duration,
        gain,
    }
}

/// The notes a cue is made of.
pub fn cue_notes(cue: Cue) -> SmallVec<[Note; 4]> {
    use Wave::*;
    match cue {
        Cue::Jump => smallvec![note(Square, 300.0, 600.0, 0.0, 0.12, 0.5)],
        Cue::Land => smallvec![note(Noise, 120.0, 60.0, 0.0, 0.08, 0.4)],
        Cue::Boost => smallvec![note(Square, 200.0, 900.0, 0.0, 0.18, 0.45), note(Noise, 400.0, 200.0, 0.0, 0.15, 0.2)],
        Cue::Hit => smallvec![note(Noise, 200.0, 50.0, 0.0, 0.25, 0.7), note(Square, 150.0, 80.0, 0.0, 0.2, 0.4)],
        Cue::Collect => smallvec![note(Sine, 880.0, 880.0, 0.0, 0.06, 0.5), note(Sine, 1320.0, 1320.0, 0.05, 0.08, 0.5)],
        Cue::Milestone => smallvec![
            note(Triangle, 523.0, 523.0, 0.0, 0.1, 0.5),
            note(Triangle, 659.0, 659.0, 0.1, 0.1, 0.5),
            note(Triangle, 784.0, 784.0, 0.2, 0.2, 0.5),
        ],
        Cue::Perfect => smallvec![note(Sine, 660.0, 990.0, 0.0, 0.15, 0.5)],
        Cue::Combo(count) => {
            // Each link in the chain raises the pitch a semitone, up to an octave
            let step = 2f32.powf(count.min(12) as f32 / 12.0);
            smallvec![note(Square, 440.0 * step, 660.0 * step, 0.0, 0.12, 0.35)]
        }
        Cue::Death => smallvec![
            note(Square, 400.0, 300.0, 0.0, 0.2, 0.5),
            note(Square, 300.0, 200.0, 0.2, 0.2, 0.5),
            note(Square, 200.0, 80.0, 0.4, 0.5, 0.5),
        ],
    }
}

/// A looping melody: semitone offsets from A4 per step, `None` for a rest.
#[derive(Debug, Clone, Copy)]
pub struct Sequence {
    pub steps: &'static [Option<i8>],
    pub step_seconds: f32,
    pub wave: Wave,
    pub gain: f32,
}

pub fn track_sequence(track: Track) -> Sequence {
    match track {
        Track::Title => Sequence {
            steps: &[Some(0), None, Some(3), None, Some(7), None, Some(3), None, Some(-2), None, Some(2), None],
            step_seconds: 0.25,
            wave: Wave::Triangle,
            gain: 0.25,
        },
        Track::Gameplay => Sequence {
            steps: &[Some(0), Some(0), Some(7), Some(0), Some(5), Some(0), Some(3), Some(2)],
            step_seconds: 0.16,
            wave: Wave::Square,
            gain: 0.12,
        },
        Track::Clear => Sequence {
            steps: &[Some(0), Some(4), Some(7), Some(12), None, Some(7), Some(12), None],
            step_seconds: 0.18,
            wave: Wave::Triangle,
            gain: 0.25,
        },
        Track::GameOver => Sequence {
            steps: &[Some(0), None, Some(-2), None, Some(-5), None, Some(-7), None, None, None],
            step_seconds: 0.35,
            wave: Wave::Sine,
            gain: 0.25,
        },
    }
}

fn semitone_hz(offset: i8) -> f32 {
    440.0 * 2f32.powf(f32::from(offset) / 12.0)
}

#[derive(Debug, Clone, Copy)]
struct Voice {
    note: Note,
    /// Seconds since the voice was triggered; negative while delayed.
    elapsed: f32,
    phase: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SynthState {
    Enabled { volume: f32 },
    Muted { previous_volume: f32 },
}

#[derive(Debug, Clone)]
pub struct Synth {
    sample_rate: f32,
    voices: Vec<Voice>,
    track: Option<Track>,
    track_time: f32,
    state: SynthState,
    noise: u32,
}

impl Synth {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate as f32,
            voices: Vec::with_capacity(MAX_VOICES),
            track: None,
            track_time: 0.0,
            state: SynthState::Enabled { volume: DEFAULT_VOLUME },
            noise: 0x1234_5678,
        }
    }

    pub fn trigger(&mut self, cue: Cue) {
        for note in cue_notes(cue) {
            if self.voices.len() >= MAX_VOICES {
                self.voices.remove(0);
            }
            self.voices.push(Voice {
                note,
                elapsed: -note.delay,
                phase: 0.0,
            });
        }
    }

    pub fn set_track(&mut self, track: Track) {
        if self.track != Some(track) {
            trace!(%track, "Switching track");
            self.track = Some(track);
            self.track_time = 0.0;
        }
    }

    pub fn track(&self) -> Option<Track> {
        self.track
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.state = match (self.state, muted) {
            (SynthState::Enabled { volume }, true) => SynthState::Muted { previous_volume: volume },
            (SynthState::Muted { previous_volume }, false) => SynthState::Enabled { volume: previous_volume },
            (state, _) => state,
        };
    }

    pub fn is_muted(&self) -> bool {
        matches!(self.state, SynthState::Muted { .. })
    }

    /// Renders the next `out.len()` mono samples. Time advances even while muted.
    pub fn fill(&mut self, out: &mut [f32]) {
        let step = 1.0 / self.sample_rate;
        let volume = match self.state {
            SynthState::Enabled { volume } => volume,
            SynthState::Muted { .. } => 0.0,
        };

        for sample in out.iter_mut() {
            let mut mix = self.track_sample();
            for i in 0..self.voices.len() {
                mix += self.voice_sample(i, step);
            }
            *sample = (mix * volume).clamp(-1.0, 1.0);
            self.track_time += step;
        }

        self.voices.retain(|v| v.elapsed < v.note.duration);
    }

    fn track_sample(&mut self) -> f32 {
        let Some(track) = self.track else {
            return 0.0;
        };
        let sequence = track_sequence(track);
        let position = self.track_time / sequence.step_seconds;
        let index = position as usize % sequence.steps.len();
        let Some(offset) = sequence.steps[index] else {
            return 0.0;
        };

        let within = position.fract();
        let envelope = (1.0 - within).powi(2);
        let phase = (self.track_time * semitone_hz(offset)).fract();
        self.oscillate(sequence.wave, phase) * envelope * sequence.gain
    }

    fn voice_sample(&mut self, index: usize, step: f32) -> f32 {
        let voice = self.voices[index];
        let mut next = voice;
        next.elapsed += step;
        if voice.elapsed < 0.0 || voice.elapsed >= voice.note.duration {
            self.voices[index] = next;
            return 0.0;
        }

        let progress = voice.elapsed / voice.note.duration;
        let hz = voice.note.from_hz + (voice.note.to_hz - voice.note.from_hz) * progress;
        next.phase = (voice.phase + hz * step).fract();
        self.voices[index] = next;

        let envelope = (1.0 - progress) * voice.note.gain;
        self.oscillate(voice.note.wave, voice.phase) * envelope
    }

    fn oscillate(&mut self, wave: Wave, phase: f32) -> f32 {
        match wave {
            Wave::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Wave::Triangle => 4.0 * (phase - 0.5).abs() - 1.0,
            Wave::Sine => (phase * TAU).sin(),
            Wave::Noise => {
                // xorshift32
                self.noise ^= self.noise << 13;
                self.noise ^= self.noise >> 17;
                self.noise ^= self.noise << 5;
                (self.noise as f32 / u32::MAX as f32) * 2.0 - 1.0
            }
        }
    }
}

/// A synthesizer shared between the game thread and an audio callback.
#[derive(Debug, Clone)]
pub struct SharedSynth(Arc<Mutex<Synth>>);

impl SharedSynth {
    pub fn new(synth: Synth) -> Self {
        Self(Arc::new(Mutex::new(synth)))
    }

    pub fn fill(&self, out: &mut [f32]) {
        self.0.lock().fill(out);
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Synth) -> R) -> R {
        f(&mut self.0.lock())
    }
}

impl AudioSink for SharedSynth {
    fn play(&mut self, cue: Cue) {
        self.0.lock().trigger(cue);
    }

    fn set_track(&mut self, track: Track) {
        self.0.lock().set_track(track);
    }

    fn set_muted(&mut self, muted: bool) {
        self.0.lock().set_muted(muted);
    }
}
