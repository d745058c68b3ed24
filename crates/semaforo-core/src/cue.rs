//! Audio cues for phase transitions.
//!
//! The timer never produces sound itself. It reports transitions as events and
//! the host hands the matching [`Tone`] to a [`CueSink`]. Playback is best
//! effort: a failing sink is logged and otherwise ignored.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::CueError;

/// Which cue to sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    /// Short beep on every phase change.
    Change,
    /// Longer tone when the run finishes.
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// Parameters for a synthesized tone with an exponential gain ramp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency_hz: f32,
    pub waveform: Waveform,
    pub duration_ms: u32,
    /// Gain at the start of the tone.
    pub start_gain: f32,
    /// Gain the ramp decays to by the end of the tone.
    pub end_gain: f32,
}

impl Tone {
    pub fn change() -> Self {
        Self {
            frequency_hz: 800.0,
            waveform: Waveform::Sine,
            duration_ms: 500,
            start_gain: 0.3,
            end_gain: 0.01,
        }
    }

    pub fn finish() -> Self {
        Self {
            frequency_hz: 600.0,
            waveform: Waveform::Sine,
            duration_ms: 1500,
            start_gain: 0.3,
            end_gain: 0.01,
        }
    }
}

/// The pair of tones used by a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CueTones {
    pub change: Tone,
    pub finish: Tone,
}

impl CueTones {
    pub fn tone(&self, cue: Cue) -> &Tone {
        match cue {
            Cue::Change => &self.change,
            Cue::Finish => &self.finish,
        }
    }
}

impl Default for CueTones {
    fn default() -> Self {
        Self {
            change: Tone::change(),
            finish: Tone::finish(),
        }
    }
}

/// Host capability that turns a tone into sound.
pub trait CueSink {
    fn play(&mut self, cue: Cue, tone: &Tone) -> Result<(), CueError>;
}

/// Sink for hosts without audio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl CueSink for SilentSink {
    fn play(&mut self, _cue: Cue, _tone: &Tone) -> Result<(), CueError> {
        Ok(())
    }
}

impl<S: CueSink + ?Sized> CueSink for Box<S> {
    fn play(&mut self, cue: Cue, tone: &Tone) -> Result<(), CueError> {
        (**self).play(cue, tone)
    }
}

/// Play `cue` on `sink`, swallowing any failure.
pub fn dispatch_cue<S: CueSink + ?Sized>(sink: &mut S, tones: &CueTones, cue: Cue) {
    let tone = tones.tone(cue);
    trace!(?cue, frequency_hz = tone.frequency_hz, "playing cue");
    if let Err(e) = sink.play(cue, tone) {
        warn!(?cue, error = %e, "audio cue failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenSink;

    impl CueSink for BrokenSink {
        fn play(&mut self, _cue: Cue, _tone: &Tone) -> Result<(), CueError> {
            Err(CueError::Unavailable("no device".into()))
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<(Cue, u32)>);

    impl CueSink for Recorder {
        fn play(&mut self, cue: Cue, tone: &Tone) -> Result<(), CueError> {
            self.0.push((cue, tone.duration_ms));
            Ok(())
        }
    }

    #[test]
    fn finish_tone_is_longer_and_distinct() {
        let tones = CueTones::default();
        assert!(tones.finish.duration_ms > tones.change.duration_ms);
        assert_ne!(tones.finish, tones.change);
        assert_eq!(tones.change.frequency_hz, 800.0);
    }

    #[test]
    fn dispatch_passes_the_matching_tone() {
        let mut sink = Recorder::default();
        let tones = CueTones::default();
        dispatch_cue(&mut sink, &tones, Cue::Change);
        dispatch_cue(&mut sink, &tones, Cue::Finish);
        assert_eq!(sink.0, vec![(Cue::Change, 500), (Cue::Finish, 1500)]);
    }

    #[test]
    fn failures_are_swallowed() {
        dispatch_cue(&mut BrokenSink, &CueTones::default(), Cue::Finish);
        let mut boxed: Box<dyn CueSink> = Box::new(BrokenSink);
        dispatch_cue(&mut boxed, &CueTones::default(), Cue::Change);
    }
}
