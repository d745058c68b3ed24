//! Tick source and command loop around a [`TimerEngine`].
//!
//! A session owns the engine and a cue sink. The async [`Session::run`] loop
//! feeds it one tick per second while the timer runs and applies transport
//! commands in between. Everything happens on a single task, so a tick
//! always completes before the next command or tick is looked at.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cue::{dispatch_cue, CueSink, CueTones};
use crate::events::Event;
use crate::timer::{PhaseConfig, TimerEngine, TimerSnapshot};

const TICK: Duration = Duration::from_secs(1);

/// Transport commands issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Reset,
    /// Stop the run loop.
    Shutdown,
}

pub struct Session<S> {
    engine: TimerEngine,
    sink: S,
    tones: CueTones,
    sound_enabled: bool,
}

impl<S: CueSink> Session<S> {
    pub fn new(config: PhaseConfig, sink: S) -> Self {
        Self {
            engine: TimerEngine::new(config),
            sink,
            tones: CueTones::default(),
            sound_enabled: true,
        }
    }

    pub fn with_tones(mut self, tones: CueTones) -> Self {
        self.tones = tones;
        self
    }

    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.engine.snapshot()
    }

    /// Apply a transport command. `Shutdown` is a no-op here.
    pub fn apply(&mut self, command: Command) -> Vec<Event> {
        let events = match command {
            Command::Start => self.engine.start(),
            Command::Pause => self.engine.pause().into_iter().collect(),
            Command::Reset => self.engine.reset().into_iter().collect(),
            Command::Shutdown => Vec::new(),
        };
        self.emit(events)
    }

    /// Advance one second and sound the cue for any transition.
    pub fn tick(&mut self) -> Vec<Event> {
        let events = self.engine.tick();
        self.emit(events)
    }

    fn emit(&mut self, events: Vec<Event>) -> Vec<Event> {
        for event in &events {
            if let Some(cue) = event.cue() {
                if self.sound_enabled {
                    dispatch_cue(&mut self.sink, &self.tones, cue);
                }
            }
            if let Event::Finished { .. } = event {
                info!("presentation finished");
            }
        }
        events
    }

    /// Drive the session until `Shutdown` arrives or the channel closes.
    ///
    /// `observe` is called with the initial state and after every command or
    /// tick, together with the events it produced. The session is handed back
    /// when the loop ends.
    pub async fn run<F>(mut self, mut commands: mpsc::Receiver<Command>, mut observe: F) -> Self
    where
        F: FnMut(&TimerEngine, &[Event]),
    {
        let mut ticker = time::interval_at(Instant::now() + TICK, TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        observe(&self.engine, &[]);

        loop {
            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else {
                        debug!("command channel closed");
                        break;
                    };
                    if command == Command::Shutdown {
                        break;
                    }
                    let was_running = self.engine.is_running();
                    let events = self.apply(command);
                    if !was_running && self.engine.is_running() {
                        // A full second must pass before the first decrement.
                        ticker.reset();
                    }
                    observe(&self.engine, &events);
                }
                _ = ticker.tick(), if self.engine.is_running() => {
                    let events = self.tick();
                    observe(&self.engine, &events);
                }
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::{Cue, SilentSink, Tone};
    use crate::error::CueError;
    use crate::timer::Phase;

    #[derive(Default)]
    struct Recorder(Vec<Cue>);

    impl CueSink for Recorder {
        fn play(&mut self, cue: Cue, _tone: &Tone) -> Result<(), CueError> {
            self.0.push(cue);
            Ok(())
        }
    }

    struct Failing;

    impl CueSink for Failing {
        fn play(&mut self, _cue: Cue, _tone: &Tone) -> Result<(), CueError> {
            Err(CueError::Unavailable("muted host".into()))
        }
    }

    fn one_minute() -> PhaseConfig {
        PhaseConfig::new(1, 1, 1, 1, 1)
    }

    #[test]
    fn cues_follow_transitions() {
        let mut session = Session::new(one_minute(), Recorder::default());
        session.apply(Command::Start);
        for _ in 0..one_minute().ticks_to_finish() {
            session.tick();
        }
        assert_eq!(session.engine().phase(), Phase::Finished);
        assert_eq!(
            session.sink().0,
            vec![Cue::Change, Cue::Change, Cue::Change, Cue::Change, Cue::Change, Cue::Finish]
        );
    }

    #[test]
    fn muted_session_plays_nothing() {
        let mut session = Session::new(PhaseConfig::new(0, 0, 0, 0, 0), Recorder::default())
            .with_sound(false);
        session.apply(Command::Start);
        assert_eq!(session.engine().phase(), Phase::Warning);
        assert!(session.sink().0.is_empty());
    }

    #[test]
    fn skipped_phases_each_sound_a_change() {
        let mut session = Session::new(PhaseConfig::new(0, 0, 0, 0, 0), Recorder::default());
        let events = session.apply(Command::Start);
        assert_eq!(events.len(), 4);
        assert_eq!(session.sink().0, vec![Cue::Change; 3]);

        for _ in 0..10 {
            session.tick();
        }
        assert_eq!(session.engine().phase(), Phase::Finished);
        assert_eq!(
            session.sink().0,
            vec![Cue::Change, Cue::Change, Cue::Change, Cue::Change, Cue::Change, Cue::Finish]
        );
    }

    #[test]
    fn failing_sink_does_not_disturb_the_timer() {
        let mut session = Session::new(one_minute(), Failing);
        session.apply(Command::Start);
        for _ in 0..60 {
            session.tick();
        }
        assert_eq!(session.engine().phase(), Phase::Yellow);
        assert_eq!(session.engine().remaining_secs(), 60);
    }

    #[tokio::test(start_paused = true)]
    async fn run_loop_reaches_finished_in_virtual_time() {
        let cfg = one_minute();
        let (tx, rx) = mpsc::channel(8);
        let mut events = Vec::new();

        let driver = async {
            tx.send(Command::Start).await.unwrap();
            time::sleep(Duration::from_secs(cfg.ticks_to_finish()) + Duration::from_millis(500)).await;
            tx.send(Command::Shutdown).await.unwrap();
        };
        let run = Session::new(cfg, Recorder::default()).run(rx, |_, batch| {
            events.extend_from_slice(batch);
        });
        let (session, ()) = tokio::join!(run, driver);

        assert_eq!(session.engine().phase(), Phase::Finished);
        assert!(!session.engine().is_running());
        assert!(matches!(events.first(), Some(Event::TimerStarted { .. })));
        assert!(matches!(
            &events[events.len() - 2..],
            [Event::PhaseChanged { to: Phase::Finished, .. }, Event::Finished { .. }]
        ));
        assert_eq!(session.sink().0.last(), Some(&Cue::Finish));
    }

    #[tokio::test(start_paused = true)]
    async fn paused_run_loop_stops_counting() {
        let (tx, rx) = mpsc::channel(8);
        let driver = async {
            tx.send(Command::Start).await.unwrap();
            time::sleep(Duration::from_millis(30_500)).await;
            tx.send(Command::Pause).await.unwrap();
            time::sleep(Duration::from_secs(120)).await;
            tx.send(Command::Shutdown).await.unwrap();
        };
        let run = Session::new(one_minute(), SilentSink).run(rx, |_, _| {});
        let (session, ()) = tokio::join!(run, driver);

        assert_eq!(session.engine().phase(), Phase::Green);
        assert_eq!(session.engine().remaining_secs(), 30);
        assert!(!session.engine().is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn closed_channel_ends_the_loop() {
        let (tx, rx) = mpsc::channel::<Command>(1);
        drop(tx);
        let session = Session::new(one_minute(), Recorder::default())
            .run(rx, |_, _| {})
            .await;
        assert_eq!(session.engine().phase(), Phase::Idle);
    }
}
