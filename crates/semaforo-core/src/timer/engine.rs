//! Presentation timer engine.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads or read the clock - the caller is responsible for calling `tick()`
//! once per elapsed second while the timer is running.
//!
//! ## Phase Chain
//!
//! ```text
//! Idle -> Green -> Yellow -> Red -> Warning -> Qa -> Handoff -> Finished
//!                                                                  |
//!                    (start restarts at Green) <-------------------+
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(PhaseConfig::standard());
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns the events of any phase change
//! ```
//!
//! A phase that loads zero seconds is passed through by the same `start()` or
//! `tick()` that enters it, so it costs no ticks.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::phase::Phase;
use super::schedule::PhaseConfig;
use crate::error::ValidationError;
use crate::events::Event;

/// Observable timer state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub remaining_secs: u32,
    pub running: bool,
    /// `remaining_secs` rendered as `m:ss`.
    pub display: String,
}

/// Core timer engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    config: PhaseConfig,
    phase: Phase,
    remaining_secs: u32,
    running: bool,
}

impl TimerEngine {
    /// Create an idle engine for the given durations.
    pub fn new(config: PhaseConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            remaining_secs: 0,
            running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &PhaseConfig {
        &self.config
    }

    /// Seconds the current phase started with.
    pub fn phase_total_secs(&self) -> u32 {
        self.config.seconds_for(self.phase)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn phase_progress(&self) -> f64 {
        let total = self.phase_total_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / total as f64).min(1.0)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            running: self.running,
            display: format_time(self.remaining_secs),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a fresh run, or resume a paused one.
    ///
    /// Returns no events when the timer is already running.
    pub fn start(&mut self) -> Vec<Event> {
        if self.running {
            return Vec::new();
        }
        self.running = true;
        if self.phase.is_counting() {
            // Paused mid-phase: keep the remaining time.
            return vec![Event::TimerResumed {
                phase: self.phase,
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            }];
        }
        self.enter(Phase::Green);
        let mut events = vec![Event::TimerStarted {
            phase: self.phase,
            duration_secs: self.remaining_secs,
            at: Utc::now(),
        }];
        if self.remaining_secs == 0 {
            self.advance(&mut events);
        }
        events
    }

    /// Stop counting, keeping phase and remaining time.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Return to `Idle` unconditionally.
    pub fn reset(&mut self) -> Option<Event> {
        self.running = false;
        self.phase = Phase::Idle;
        self.remaining_secs = 0;
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Advance the countdown by one second.
    ///
    /// When the current phase runs out this returns one `PhaseChanged` per
    /// phase entered. Entering `Finished` stops the timer and is followed by
    /// `Event::Finished`.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.running {
            return Vec::new();
        }
        if self.remaining_secs > 1 {
            self.remaining_secs -= 1;
            return Vec::new();
        }
        let mut events = Vec::new();
        self.advance(&mut events);
        events
    }

    /// Replace the durations. Only allowed while no run is in progress.
    pub fn set_config(&mut self, config: PhaseConfig) -> Result<(), ValidationError> {
        if self.phase.is_counting() {
            return Err(ValidationError::RunInProgress { phase: self.phase });
        }
        self.config = config;
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Move to the next phase, skipping over any that load zero seconds.
    fn advance(&mut self, events: &mut Vec<Event>) {
        loop {
            let from = self.phase;
            let to = from.next();
            self.enter(to);
            debug!(%from, %to, remaining_secs = self.remaining_secs, "phase transition");
            let at = Utc::now();
            events.push(Event::PhaseChanged {
                from,
                to,
                duration_secs: self.remaining_secs,
                at,
            });

            if to == Phase::Finished {
                self.running = false;
                events.push(Event::Finished { at });
                return;
            }
            if self.remaining_secs > 0 {
                return;
            }
        }
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.remaining_secs = self.config.seconds_for(phase);
    }
}

/// Render seconds as `m:ss`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
