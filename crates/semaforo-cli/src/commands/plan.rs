use clap::Args;
use semaforo_core::timer::PlannedPhase;
use semaforo_core::{format_time, Command, Config, Modality, SilentSink, Session};
use serde::Serialize;

use super::setup::SetupArgs;

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub setup: SetupArgs,
    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub setup: SetupArgs,
}

#[derive(Serialize)]
struct PlanOutput {
    modality: Modality,
    phases: Vec<PlannedPhase>,
    total_secs: u64,
    total: String,
}

pub fn plan(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (modality, durations) = args.setup.resolve(&config);
    let total_secs = durations.total_seconds();
    let output = PlanOutput {
        modality,
        phases: durations.plan(),
        total_secs,
        total: format_time(u32::try_from(total_secs).unwrap_or(u32::MAX)),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} presentation", modality.label());
    for planned in &output.phases {
        println!(
            "  {:<8} {:<13} {:>7}",
            planned.phase.to_string(),
            planned.phase.title(),
            format_time(planned.seconds)
        );
    }
    println!("  {:<22} {:>7}", "total", output.total);
    Ok(())
}

/// Prints one JSON line per event. Sound is off: nothing is waited for.
pub fn simulate(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (_, durations) = args.setup.resolve(&config);
    let mut session = Session::new(durations, SilentSink).with_sound(false);

    let mut events = session.apply(Command::Start);
    for _ in 0..durations.ticks_to_finish() {
        events.extend(session.tick());
    }
    for event in &events {
        println!("{}", serde_json::to_string(event)?);
    }
    println!("{}", serde_json::to_string(&session.snapshot())?);
    Ok(())
}

pub fn presets() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let presets: serde_json::Map<String, serde_json::Value> = Modality::ALL
        .iter()
        .map(|m| {
            serde_json::to_value(config.phase_config(*m)).map(|v| (m.as_str().to_string(), v))
        })
        .collect::<Result<_, _>>()?;
    println!("{}", serde_json::to_string_pretty(&presets)?);
    Ok(())
}
