use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of checklist steps shown while a site is being created.
pub const STEP_COUNT: usize = 5;

/// A milestone reported by the background site creation operation.
///
/// The declaration order is the order in which the operation moves through
/// the phases. `Success` and `Failure` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Idle,
    NewSite,
    FetchingNewSite,
    SetTagline,
    SetTheme,
    Success,
    Failure,
}

impl Phase {
    /// Every phase, in declaration order.
    pub const ALL: [Phase; 7] = [
        Phase::Idle,
        Phase::NewSite,
        Phase::FetchingNewSite,
        Phase::SetTagline,
        Phase::SetTheme,
        Phase::Success,
        Phase::Failure,
    ];

    /// Phases during which the operation performs actual work, in order.
    pub const WORK: [Phase; 4] = [
        Phase::NewSite,
        Phase::FetchingNewSite,
        Phase::SetTagline,
        Phase::SetTheme,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Success | Phase::Failure)
    }

    /// Wire name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::NewSite => "NEW_SITE",
            Phase::FetchingNewSite => "FETCHING_NEW_SITE",
            Phase::SetTagline => "SET_TAGLINE",
            Phase::SetTheme => "SET_THEME",
            Phase::Success => "SUCCESS",
            Phase::Failure => "FAILURE",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A checklist item on the progress screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    LayingFoundation,
    FetchingInfo,
    ConfiguringContent,
    ConfiguringTheme,
    PreparingFrontend,
}

impl Step {
    pub fn label(self) -> &'static str {
        match self {
            Step::LayingFoundation => "Laying site foundation",
            Step::FetchingInfo => "Fetching site information",
            Step::ConfiguringContent => "Configuring site content",
            Step::ConfiguringTheme => "Configuring theme",
            Step::PreparingFrontend => "Preparing frontend",
        }
    }
}

/// Lookup from a phase to the furthest step it marks as reached.
///
/// Steps are held last-performed-first. A frontier is an index into that
/// ordering: every step at or after the frontier index has been reached.
/// `Failure` has no frontier; it replaces the checklist with an error view.
#[derive(Debug, Clone)]
pub struct StepTable {
    order: [Step; STEP_COUNT],
    frontier: IndexMap<Phase, Option<usize>>,
}

impl StepTable {
    pub fn new() -> Self {
        let order = [
            Step::PreparingFrontend,
            Step::ConfiguringTheme,
            Step::ConfiguringContent,
            Step::FetchingInfo,
            Step::LayingFoundation,
        ];

        let reached = [
            (Phase::Idle, None),
            (Phase::NewSite, Some(Step::LayingFoundation)),
            (Phase::FetchingNewSite, Some(Step::FetchingInfo)),
            (Phase::SetTagline, Some(Step::ConfiguringContent)),
            (Phase::SetTheme, Some(Step::ConfiguringTheme)),
            (Phase::Success, Some(Step::PreparingFrontend)),
        ];

        let frontier = reached
            .into_iter()
            .map(|(phase, step)| {
                let index = step.and_then(|step| order.iter().position(|s| *s == step));
                (phase, index)
            })
            .collect();

        Self { order, frontier }
    }

    /// Index of the furthest reached step for `phase`, if any step is reached.
    pub fn frontier(&self, phase: Phase) -> Option<usize> {
        self.frontier.get(&phase).copied().flatten()
    }

    /// Enabled flag for every step given a frontier.
    ///
    /// Steps before the frontier (performed later) are disabled, the rest enabled.
    pub fn sweep(&self, frontier: Option<usize>) -> [(Step, bool); STEP_COUNT] {
        std::array::from_fn(|i| (self.order[i], frontier.is_some_and(|f| i >= f)))
    }

    /// Frontier that marks every step reached.
    pub fn all_reached(&self) -> Option<usize> {
        Some(0)
    }
}

impl Default for StepTable {
    fn default() -> Self {
        Self::new()
    }
}
