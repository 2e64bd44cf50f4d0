use crate::bus::PhaseBus;
use crate::metrics::Metrics;
use crate::models::{ControllerSnapshot, CreationParams, Phase};
use crate::services::SiteCreator;
use crate::ui::controller::ProgressController;
use crate::ui::lifecycle::{BindingState, SubscriptionLifecycle};
use crate::ui::listener::CreationListener;
use std::sync::Arc;

/// One appearance of the progress screen, from creation to teardown
///
/// A session created without saved state starts the background operation.
/// A session recreated from a [`ControllerSnapshot`] never does; it catches
/// up through the bus's sticky replay once resumed, or, if creation had
/// already finished, renders the terminal state directly.
pub struct CreationSession {
    controller: ProgressController,
    lifecycle: SubscriptionLifecycle,
    listener: Arc<dyn CreationListener>,
}

impl CreationSession {
    pub fn create(
        params: CreationParams,
        saved: Option<ControllerSnapshot>,
        creator: &dyn SiteCreator,
        bus: PhaseBus,
        listener: Arc<dyn CreationListener>,
        metrics: Arc<Metrics>,
    ) -> Self {
        let controller = match saved {
            None => ProgressController::start(creator, params),
            Some(snapshot) => ProgressController::restore(snapshot),
        };

        Self {
            controller,
            lifecycle: SubscriptionLifecycle::new(bus, metrics),
            listener,
        }
    }

    /// The session came to the foreground
    pub fn resume(&mut self) -> BindingState {
        self.controller.attach_listener(Arc::clone(&self.listener));
        self.lifecycle.enter_foreground(&mut self.controller)
    }

    /// The session left the foreground
    pub fn pause(&mut self) {
        self.lifecycle.leave_foreground();
        self.controller.detach_listener();
    }

    /// Forward pending notifications; returns how many were forwarded
    pub fn pump(&mut self) -> usize {
        self.lifecycle.dispatch(&mut self.controller)
    }

    /// Wait for and forward the next notification
    pub async fn pump_next(&mut self) -> Option<Phase> {
        self.lifecycle.dispatch_next(&mut self.controller).await
    }

    pub fn save_state(&self) -> ControllerSnapshot {
        self.controller.persist()
    }

    pub fn help(&self) {
        self.controller.on_help();
    }

    pub fn controller(&self) -> &ProgressController {
        &self.controller
    }

    pub fn binding(&self) -> BindingState {
        self.lifecycle.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DisplayMode;
    use crate::services::creation::MockSiteCreator;
    use crate::ui::listener::MockCreationListener;

    fn session(
        saved: Option<ControllerSnapshot>,
        creator: &MockSiteCreator,
        listener: MockCreationListener,
    ) -> (PhaseBus, CreationSession) {
        let bus = PhaseBus::new(16);
        let session = CreationSession::create(
            CreationParams::default(),
            saved,
            creator,
            bus.clone(),
            Arc::new(listener),
            Arc::new(Metrics::new()),
        );
        (bus, session)
    }

    #[test]
    fn test_fresh_session_starts_once() {
        let mut creator = MockSiteCreator::new();
        creator.expect_create_site().times(1).return_const(());

        let (_bus, mut session) = session(None, &creator, MockCreationListener::new());
        session.resume();
        session.pause();
        session.resume();
    }

    #[test]
    fn test_restored_session_never_starts() {
        let mut creator = MockSiteCreator::new();
        creator.expect_create_site().times(0);

        let (_bus, session) = session(
            Some(ControllerSnapshot::default()),
            &creator,
            MockCreationListener::new(),
        );
        assert_eq!(session.binding(), BindingState::Unbound);
    }

    #[test]
    fn test_pause_detaches_listener() {
        let mut creator = MockSiteCreator::new();
        creator.expect_create_site().return_const(());

        let (_bus, mut session) = session(None, &creator, MockCreationListener::new());

        session.resume();
        assert!(session.controller().has_listener());

        session.pause();
        assert!(!session.controller().has_listener());
        assert_eq!(session.binding(), BindingState::Unbound);
    }

    #[test]
    fn test_help_while_resumed() {
        let mut creator = MockSiteCreator::new();
        creator.expect_create_site().return_const(());
        let mut listener = MockCreationListener::new();
        listener.expect_help_requested().times(1).return_const(());

        let (_bus, mut session) = session(None, &creator, listener);
        session.resume();
        session.help();
        session.pause();
        session.help();
    }

    #[test]
    fn test_success_reaches_listener() {
        let mut creator = MockSiteCreator::new();
        creator.expect_create_site().return_const(());
        let mut listener = MockCreationListener::new();
        listener.expect_creation_success().times(1).return_const(());

        let (bus, mut session) = session(None, &creator, listener);
        session.resume();

        bus.publish(Phase::SetTheme);
        bus.publish(Phase::Success);
        session.pump();

        assert!(session.save_state().finished);
        assert_eq!(session.save_state().display_mode, DisplayMode::Modal);
    }
}
