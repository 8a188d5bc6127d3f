//! Audio cues and the sink interface the core plays them through.
//!
//! The core never waits on audio. Cues are queued as [`AudioEvent`]s during a tick
//! and flushed to an [`AudioSink`] afterwards; a sink that failed to initialize
//! simply ignores everything.

use smallvec::SmallVec;
use strum_macros::{Display, EnumIter};
use tracing::trace;

/// One-shot sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Jump,
    Land,
    Boost,
    Hit,
    Collect,
    Milestone,
    Perfect,
    /// A combo chain reached the given length.
    Combo(u32),
    Death,
}

/// Looping background tracks, one per screen family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Track {
    Title,
    Gameplay,
    Clear,
    GameOver,
}

/// Events for triggering audio playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// Play a one-shot cue
    Play(Cue),
    /// Switch the looping background track
    Track(Track),
    /// Mute or unmute everything
    Mute(bool),
}

/// Events queued during a single tick.
pub type AudioQueue = SmallVec<[AudioEvent; 8]>;

/// Anything that can play the game's audio.
///
/// Implementations must not block and must swallow their own failures.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
    fn set_track(&mut self, track: Track);
    fn set_muted(&mut self, muted: bool);

    /// Applies a batch of queued events in order.
    fn dispatch(&mut self, events: &[AudioEvent]) {
        for event in events {
            trace!(?event, "Dispatching audio event");
            match *event {
                AudioEvent::Play(cue) => self.play(cue),
                AudioEvent::Track(track) => self.set_track(track),
                AudioEvent::Mute(muted) => self.set_muted(muted),
            }
        }
    }
}

/// A sink that discards everything; used when no audio device is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}
    fn set_track(&mut self, _track: Track) {}
    fn set_muted(&mut self, _muted: bool) {}
}

/// A sink that remembers what it was asked to do.
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    pub cues: Vec<Cue>,
    pub tracks: Vec<Track>,
    pub muted: bool,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    fn set_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}
