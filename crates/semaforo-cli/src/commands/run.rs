//! Live countdown in the terminal.
//!
//! Reads one command per line from stdin: `s` start/resume, `p` pause,
//! `r` reset, `q` quit.

use std::io::Write;
use std::time::Duration;

use clap::Args;
use semaforo_core::{Command, Config, Cue, CueError, CueSink, Event, Session, TimerEngine, Tone};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::setup::SetupArgs;

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub setup: SetupArgs,
    /// Disable sound cues
    #[arg(long)]
    pub silent: bool,
    /// Wait for `s` instead of starting right away
    #[arg(long)]
    pub wait: bool,
}

/// Rings the terminal bell; once for a change, three times for the finish.
struct TerminalBell;

impl CueSink for TerminalBell {
    fn play(&mut self, cue: Cue, tone: &Tone) -> Result<(), CueError> {
        let rings = match cue {
            Cue::Change => 1,
            Cue::Finish => 3,
        };
        debug!(?cue, duration_ms = tone.duration_ms, "ringing terminal bell");
        let mut err = std::io::stderr().lock();
        for _ in 0..rings {
            err.write_all(b"\x07")?;
        }
        err.flush()?;
        Ok(())
    }
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "s" | "start" | "resume" => Some(Command::Start),
        "p" | "pause" => Some(Command::Pause),
        "r" | "reset" => Some(Command::Reset),
        "q" | "quit" | "exit" => Some(Command::Shutdown),
        _ => None,
    }
}

const BAR_WIDTH: usize = 20;

fn progress_bar(progress: f64) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn render(out: &mut impl Write, engine: &TimerEngine, events: &[Event]) -> std::io::Result<()> {
    let snapshot = engine.snapshot();
    if let Some(banner) = events.last().and_then(|e| e.phase().banner()) {
        writeln!(out, "\r{banner:<48}")?;
    }
    let state = if !snapshot.running && snapshot.phase.is_counting() {
        " (paused)"
    } else {
        ""
    };
    write!(
        out,
        "\r{:<13} {:>6}  [{}] {} {:<10}",
        snapshot.phase.title(),
        snapshot.display,
        snapshot.phase.light().as_str(),
        progress_bar(engine.phase_progress()),
        state
    )?;
    out.flush()
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (modality, durations) = args.setup.resolve(&config);
    let sound = config.sound.enabled && !args.silent;
    info!(%modality, ?durations, sound, "starting session");

    let session = Session::new(durations, TerminalBell)
        .with_tones(config.sound.tones())
        .with_sound(sound);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let (tx, rx) = mpsc::channel(16);

        let input_tx = tx.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let Some(command) = parse_command(&line) else {
                    continue;
                };
                if input_tx.send(command).await.is_err() {
                    break;
                }
            }
            debug!("stdin closed");
        });

        println!(
            "{} presentation - s: start/resume, p: pause, r: reset, q: quit",
            modality.label()
        );
        if !args.wait {
            let _ = tx.send(Command::Start).await;
        }

        let done_tx = tx.clone();
        session
            .run(rx, move |engine, events| {
                if let Err(e) = render(&mut std::io::stdout().lock(), engine, events) {
                    debug!(error = %e, "failed to draw status line");
                }
                if events.iter().any(|e| matches!(e, Event::Finished { .. })) {
                    let _ = done_tx.try_send(Command::Shutdown);
                }
            })
            .await
    });
    println!();

    // The stdin reader may still be parked on a blocking read.
    runtime.shutdown_timeout(Duration::from_millis(100));
    Ok(())
}
