use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cue::Cue;
use crate::timer::Phase;

/// Every state change of the timer produces an Event.
/// Hosts render from them; cue sinks react to transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A counting phase ran out and the next one was loaded.
    ///
    /// The last one has `to: Finished` and is followed by [`Event::Finished`].
    PhaseChanged {
        from: Phase,
        to: Phase,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// The handoff phase ran out; the timer stopped.
    Finished {
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Audio cue announcing this event, if it deserves one.
    ///
    /// Entering `Finished` is announced by the finish cue alone.
    pub fn cue(&self) -> Option<Cue> {
        match self {
            Event::PhaseChanged { to: Phase::Finished, .. } => None,
            Event::PhaseChanged { .. } => Some(Cue::Change),
            Event::Finished { .. } => Some(Cue::Finish),
            _ => None,
        }
    }

    /// Phase the timer is in after this event.
    pub fn phase(&self) -> Phase {
        match self {
            Event::TimerStarted { phase, .. }
            | Event::TimerPaused { phase, .. }
            | Event::TimerResumed { phase, .. } => *phase,
            Event::PhaseChanged { to, .. } => *to,
            Event::TimerReset { .. } => Phase::Idle,
            Event::Finished { .. } => Phase::Finished,
        }
    }
}
