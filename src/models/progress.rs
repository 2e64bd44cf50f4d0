use crate::models::phase::{STEP_COUNT, Step, StepTable};
use serde::{Deserialize, Serialize};

/// Whether the progress screen hides (modal) or shows (embedded) host navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayMode {
    Modal,
    Embedded,
}

impl DisplayMode {
    pub fn shows_navigation(self) -> bool {
        self == DisplayMode::Embedded
    }
}

/// Which container is visible on the progress screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Progress,
    Error,
}

/// View model rendered by the host.
///
/// Steps are kept in the same last-performed-first order as [`StepTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressDisplay {
    pub steps: [(Step, bool); STEP_COUNT],
    pub panel: Panel,
    pub home_button_visible: bool,
}

impl ProgressDisplay {
    pub fn new(table: &StepTable, mode: DisplayMode) -> Self {
        Self {
            steps: table.sweep(None),
            panel: Panel::Progress,
            home_button_visible: mode.shows_navigation(),
        }
    }

    pub fn is_enabled(&self, step: Step) -> bool {
        self.steps
            .iter()
            .any(|(candidate, enabled)| *candidate == step && *enabled)
    }

    pub fn enabled_count(&self) -> usize {
        self.steps.iter().filter(|(_, enabled)| *enabled).count()
    }

    pub fn shows_error(&self) -> bool {
        self.panel == Panel::Error
    }
}

/// The part of the controller state that survives teardown and recreation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    pub display_mode: DisplayMode,
    pub finished: bool,
}

impl Default for ControllerSnapshot {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::Modal,
            finished: false,
        }
    }
}

/// Parameters handed verbatim to the background creation operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationParams {
    pub title: String,
    pub tagline: String,
    pub slug: String,
    pub theme_id: String,
}
