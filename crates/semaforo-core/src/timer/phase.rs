use serde::{Deserialize, Serialize};

/// One discrete segment of a timed presentation.
///
/// Variants are declared in run order; `Idle` and `Finished` never count down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Green,
    Yellow,
    Red,
    /// Short fixed gap announcing that questions are about to start.
    Warning,
    /// Questions and jury deliberation.
    Qa,
    /// Area cleanup and change of presenting team.
    Handoff,
    Finished,
}

/// Color of the light shown for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightColor {
    Gray,
    Green,
    Yellow,
    Red,
    Cyan,
    Purple,
    Blue,
}

impl LightColor {
    pub fn as_str(self) -> &'static str {
        match self {
            LightColor::Gray => "gray",
            LightColor::Green => "green",
            LightColor::Yellow => "yellow",
            LightColor::Red => "red",
            LightColor::Cyan => "cyan",
            LightColor::Purple => "purple",
            LightColor::Blue => "blue",
        }
    }
}

impl Phase {
    /// Phases that load a duration and count down, in run order.
    pub const COUNTING: [Phase; 6] = [
        Phase::Green,
        Phase::Yellow,
        Phase::Red,
        Phase::Warning,
        Phase::Qa,
        Phase::Handoff,
    ];

    /// The phase entered when this one runs out.
    ///
    /// `Idle` and `Finished` both lead to `Green`: that is the start/restart edge.
    pub fn next(self) -> Phase {
        match self {
            Phase::Idle | Phase::Finished => Phase::Green,
            Phase::Green => Phase::Yellow,
            Phase::Yellow => Phase::Red,
            Phase::Red => Phase::Warning,
            Phase::Warning => Phase::Qa,
            Phase::Qa => Phase::Handoff,
            Phase::Handoff => Phase::Finished,
        }
    }

    pub fn is_counting(self) -> bool {
        !matches!(self, Phase::Idle | Phase::Finished)
    }

    pub fn light(self) -> LightColor {
        match self {
            Phase::Green => LightColor::Green,
            Phase::Yellow => LightColor::Yellow,
            Phase::Red => LightColor::Red,
            Phase::Warning => LightColor::Cyan,
            Phase::Qa => LightColor::Purple,
            Phase::Handoff => LightColor::Blue,
            Phase::Idle | Phase::Finished => LightColor::Gray,
        }
    }

    /// Section heading shown above the countdown.
    pub fn title(self) -> &'static str {
        match self {
            Phase::Green | Phase::Yellow | Phase::Red => "Presentation",
            Phase::Warning => "Questions",
            Phase::Qa => "Deliberation",
            Phase::Handoff => "Team change",
            Phase::Idle | Phase::Finished => "Semáforo",
        }
    }

    /// Banner line for the current phase, if any.
    pub fn banner(self) -> Option<&'static str> {
        match self {
            Phase::Idle => None,
            Phase::Green => Some("Green phase - full time"),
            Phase::Yellow => Some("Yellow phase - speed up"),
            Phase::Red => Some("Red phase - wrap up now"),
            Phase::Warning => Some("Questions start in 10 seconds..."),
            Phase::Qa => Some("Jury deliberation"),
            Phase::Handoff => Some("Area cleanup and team change"),
            Phase::Finished => Some("Presentation finished!"),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Green => "green",
            Phase::Yellow => "yellow",
            Phase::Red => "red",
            Phase::Warning => "warning",
            Phase::Qa => "qa",
            Phase::Handoff => "handoff",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_visits_every_counting_phase_in_order() {
        let mut visited = Vec::new();
        let mut phase = Phase::Idle.next();
        while phase != Phase::Finished {
            visited.push(phase);
            phase = phase.next();
        }
        assert_eq!(visited, Phase::COUNTING);
    }

    #[test]
    fn finished_restarts_at_green() {
        assert_eq!(Phase::Finished.next(), Phase::Green);
    }

    #[test]
    fn phases_are_totally_ordered_by_the_chain() {
        for pair in Phase::COUNTING.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].next(), pair[1]);
        }
        assert!(Phase::Idle < Phase::Green);
        assert!(Phase::Handoff < Phase::Finished);
    }

    #[test]
    fn non_counting_phases_are_gray() {
        assert_eq!(Phase::Idle.light(), LightColor::Gray);
        assert_eq!(Phase::Finished.light(), LightColor::Gray);
        assert!(!Phase::Idle.is_counting());
        assert!(Phase::Warning.is_counting());
        assert_eq!(Phase::Warning.light(), LightColor::Cyan);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Phase::Qa).unwrap(), "\"qa\"");
        assert_eq!(Phase::Handoff.to_string(), "handoff");
    }
}
