mod engine;
mod phase;
mod schedule;

pub use engine::{format_time, TimerEngine, TimerSnapshot};
pub use phase::{LightColor, Phase};
pub use schedule::{Modality, PhaseConfig, PlannedPhase, SessionSetup, POST_ANSWER_GAP_SECS};
