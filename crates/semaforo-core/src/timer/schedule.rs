use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::phase::Phase;
use crate::error::ValidationError;

/// Fixed gap between the red light and the start of questions, in seconds.
pub const POST_ANSWER_GAP_SECS: u32 = 10;

/// Per-run phase durations. All values are whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseConfig {
    pub green: u32,
    pub yellow: u32,
    pub red: u32,
    /// Q&A / deliberation.
    pub qa: u32,
    /// Cleanup and team change.
    pub handoff: u32,
}

impl PhaseConfig {
    pub const fn new(green: u32, yellow: u32, red: u32, qa: u32, handoff: u32) -> Self {
        Self {
            green,
            yellow,
            red,
            qa,
            handoff,
        }
    }

    /// Build from raw user input, clamping negative values to zero.
    pub fn from_signed(green: i64, yellow: i64, red: i64, qa: i64, handoff: i64) -> Self {
        fn clamp(v: i64) -> u32 {
            v.clamp(0, u32::MAX as i64) as u32
        }
        Self::new(clamp(green), clamp(yellow), clamp(red), clamp(qa), clamp(handoff))
    }

    /// Preset used by both the protocol and report modalities.
    pub const fn standard() -> Self {
        Self::new(7, 2, 1, 6, 4)
    }

    /// Initial values offered for a custom run.
    pub const fn custom_defaults() -> Self {
        Self::new(5, 2, 1, 5, 3)
    }

    /// Seconds loaded into the countdown when `phase` is entered.
    ///
    /// Uses saturating arithmetic so oversized minute counts cannot overflow.
    pub fn seconds_for(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Idle | Phase::Finished => 0,
            Phase::Green => minutes(self.green),
            Phase::Yellow => minutes(self.yellow),
            Phase::Red => minutes(self.red),
            Phase::Warning => POST_ANSWER_GAP_SECS,
            Phase::Qa => minutes(self.qa),
            // The warning gap is taken out of the handoff allowance.
            Phase::Handoff => minutes(self.handoff).saturating_sub(POST_ANSWER_GAP_SECS),
        }
    }

    /// Ordered list of counting phases and the seconds each one loads.
    pub fn plan(&self) -> Vec<PlannedPhase> {
        Phase::COUNTING
            .iter()
            .map(|&phase| PlannedPhase {
                phase,
                seconds: self.seconds_for(phase),
            })
            .collect()
    }

    /// Total countdown time of a full run, in seconds.
    pub fn total_seconds(&self) -> u64 {
        self.plan().iter().map(|p| p.seconds as u64).sum()
    }

    /// Number of ticks a full run takes from `start()` to `Finished`.
    ///
    /// One tick per second of countdown; empty phases are passed through.
    pub fn ticks_to_finish(&self) -> u64 {
        self.total_seconds()
    }
}

fn minutes(m: u32) -> u32 {
    m.saturating_mul(60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedPhase {
    pub phase: Phase,
    pub seconds: u32,
}

/// Presentation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Protocolo,
    Informe,
    Custom,
}

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Protocolo, Modality::Informe, Modality::Custom];

    pub fn as_str(self) -> &'static str {
        match self {
            Modality::Protocolo => "protocolo",
            Modality::Informe => "informe",
            Modality::Custom => "custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Modality::Protocolo => "Protocol",
            Modality::Informe => "Report",
            Modality::Custom => "Custom",
        }
    }
}

impl FromStr for Modality {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "protocolo" | "protocol" => Ok(Modality::Protocolo),
            "informe" | "report" => Ok(Modality::Informe),
            "custom" => Ok(Modality::Custom),
            other => Err(ValidationError::UnknownModality(other.to_string())),
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a run obtains its durations.
///
/// Whether custom values are being entered is decided by the caller and passed
/// in here, never read from shared UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSetup {
    Preset(Modality),
    Custom(PhaseConfig),
}

impl SessionSetup {
    /// Resolve to concrete durations using `lookup` for preset values.
    ///
    /// `Preset(Modality::Custom)` means "custom, nothing entered" and resolves
    /// through the lookup like the other presets.
    pub fn resolve(&self, lookup: impl Fn(Modality) -> PhaseConfig) -> PhaseConfig {
        match *self {
            SessionSetup::Preset(modality) => lookup(modality),
            SessionSetup::Custom(config) => config,
        }
    }

    pub fn modality(&self) -> Modality {
        match *self {
            SessionSetup::Preset(modality) => modality,
            SessionSetup::Custom(_) => Modality::Custom,
        }
    }
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self::standard()
    }
}
