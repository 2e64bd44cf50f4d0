// Progress Controller - Maps creation phases onto the progress checklist
//
// This module contains the ProgressController which owns:
// - The display mode (modal/embedded)
// - The finished flag
// - The ProgressDisplay view model the host renders
//
// It handles:
// - Issuing the start command on first creation
// - Sweeping the checklist for each phase notification
// - Terminal success/failure handling
// - Snapshot persistence and restore

use crate::models::{
    ControllerSnapshot, CreationParams, DisplayMode, Panel, Phase, ProgressDisplay, StepTable,
};
use crate::services::SiteCreator;
use crate::ui::listener::CreationListener;
use std::sync::Arc;

/// Controller for the site creation progress screen
///
/// Each phase notification is authoritative: the checklist is recomputed from
/// the phase alone, so duplicate deliveries are harmless. Once `SUCCESS` or
/// `FAILURE` has been handled the controller is finished and ignores every
/// further notification.
///
/// All methods run on the consumer (UI) thread; no locking is involved.
///
/// # Example
/// ```ignore
/// let mut controller = ProgressController::start(&service, params);
/// controller.attach_listener(listener);
/// controller.on_phase_notification(Phase::NewSite);
/// ```
pub struct ProgressController {
    table: StepTable,
    display_mode: DisplayMode,
    finished: bool,
    display: ProgressDisplay,
    listener: Option<Arc<dyn CreationListener>>,
}

impl ProgressController {
    /// Create a controller for a fresh session and kick off the creation
    ///
    /// The parameters are handed to `creator` untouched. Never use this when a
    /// saved snapshot exists; use [`restore`](Self::restore) instead.
    pub fn start(creator: &dyn SiteCreator, params: CreationParams) -> Self {
        let controller = Self::with_state(ControllerSnapshot::default());

        tracing::info!("First appearance, starting site creation");
        creator.create_site(params);

        controller
    }

    /// Recreate a controller from persisted state without starting anything
    ///
    /// A finished snapshot immediately renders the completed checklist.
    pub fn restore(snapshot: ControllerSnapshot) -> Self {
        let mut controller = Self::with_state(snapshot);
        if controller.finished {
            controller.show_finished();
        }

        tracing::debug!("Restored controller: {:?}", snapshot);
        controller
    }

    fn with_state(snapshot: ControllerSnapshot) -> Self {
        let table = StepTable::new();
        let display = ProgressDisplay::new(&table, snapshot.display_mode);
        Self {
            table,
            display_mode: snapshot.display_mode,
            finished: snapshot.finished,
            display,
            listener: None,
        }
    }

    /// State to persist across teardown
    pub fn persist(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            display_mode: self.display_mode,
            finished: self.finished,
        }
    }

    /// Handle a phase notification from the bus
    ///
    /// # Returns
    /// `false` if the notification was ignored because the controller had finished
    pub fn on_phase_notification(&mut self, phase: Phase) -> bool {
        if self.finished {
            tracing::debug!("Ignoring {}: creation already finished", phase);
            return false;
        }

        tracing::info!("Received state: {}", phase);

        match phase {
            Phase::Failure => {
                self.finished = true;
                self.set_display_mode(DisplayMode::Embedded);
                self.display.panel = Panel::Error;
            }
            _ => {
                self.display.panel = Panel::Progress;
                self.display.steps = self.table.sweep(self.table.frontier(phase));

                if phase == Phase::Success {
                    self.finished = true;
                    self.notify_success();
                }
            }
        }

        true
    }

    /// Render the fully completed checklist for an already finished session
    pub fn show_finished(&mut self) {
        self.display.steps = self.table.sweep(self.table.all_reached());
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
        self.display.home_button_visible = mode.shows_navigation();
    }

    pub fn attach_listener(&mut self, listener: Arc<dyn CreationListener>) {
        self.listener = Some(listener);
    }

    pub fn detach_listener(&mut self) {
        self.listener = None;
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Forward a help request to the host
    pub fn on_help(&self) {
        match &self.listener {
            Some(listener) => listener.help_requested(),
            None => tracing::debug!("Help requested with no listener attached"),
        }
    }

    fn notify_success(&self) {
        match &self.listener {
            Some(listener) => listener.creation_success(),
            None => tracing::warn!("Site created but no listener is attached"),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn display(&self) -> &ProgressDisplay {
        &self.display
    }

    pub fn table(&self) -> &StepTable {
        &self.table
    }
}
