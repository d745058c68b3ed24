//! Shared arguments that pick the durations for a run.

use clap::Args;
use semaforo_core::{Config, Modality, PhaseConfig, SessionSetup};

#[derive(Args, Debug, Clone, Default)]
pub struct SetupArgs {
    /// Presentation modality: protocolo, informe or custom
    #[arg(short, long)]
    pub modality: Option<Modality>,
    /// Green phase, minutes (implies a custom run)
    #[arg(long, allow_negative_numbers = true)]
    pub green: Option<i64>,
    /// Yellow phase, minutes (implies a custom run)
    #[arg(long, allow_negative_numbers = true)]
    pub yellow: Option<i64>,
    /// Red phase, minutes (implies a custom run)
    #[arg(long, allow_negative_numbers = true)]
    pub red: Option<i64>,
    /// Q&A / deliberation phase, minutes (implies a custom run)
    #[arg(long, allow_negative_numbers = true)]
    pub qa: Option<i64>,
    /// Cleanup and team change phase, minutes (implies a custom run)
    #[arg(long, allow_negative_numbers = true)]
    pub handoff: Option<i64>,
}

impl SetupArgs {
    fn has_custom_values(&self) -> bool {
        self.green.is_some()
            || self.yellow.is_some()
            || self.red.is_some()
            || self.qa.is_some()
            || self.handoff.is_some()
    }

    /// Turn the flags into an explicit setup. Missing custom values come from
    /// the configured custom defaults.
    pub fn setup(&self, config: &Config) -> SessionSetup {
        if !self.has_custom_values() {
            return SessionSetup::Preset(self.modality.unwrap_or(config.default_modality));
        }
        let base = config.custom_defaults;
        SessionSetup::Custom(PhaseConfig::from_signed(
            self.green.unwrap_or(base.green as i64),
            self.yellow.unwrap_or(base.yellow as i64),
            self.red.unwrap_or(base.red as i64),
            self.qa.unwrap_or(base.qa as i64),
            self.handoff.unwrap_or(base.handoff as i64),
        ))
    }

    pub fn resolve(&self, config: &Config) -> (Modality, PhaseConfig) {
        let setup = self.setup(config);
        (setup.modality(), setup.resolve(|m| config.phase_config(m)))
    }
}
