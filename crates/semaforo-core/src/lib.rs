//! # Semáforo Core Library
//!
//! Core logic for the Semáforo presentation timer: a traffic-light countdown
//! that walks an oral presentation through its green, yellow and red time,
//! a short warning, questions and the team handoff.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven state machine; the caller invokes
//!   `tick()` once per second
//! - **Session**: async tick source and command loop around the engine
//! - **Cues**: best-effort audio cues for phase changes and the finish
//! - **Storage**: TOML-based configuration of presets and sound
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`Session`]: Owns an engine and a cue sink, drives it in real time
//! - [`Config`]: Application configuration management
//! - [`CueSink`]: Trait for host audio output

pub mod cue;
pub mod error;
pub mod events;
pub mod session;
pub mod storage;
pub mod timer;

pub use cue::{Cue, CueSink, CueTones, SilentSink, Tone};
pub use error::{ConfigError, CoreError, CueError, ValidationError};
pub use events::Event;
pub use session::{Command, Session};
pub use storage::Config;
pub use timer::{
    format_time, Modality, Phase, PhaseConfig, SessionSetup, TimerEngine, TimerSnapshot,
};
