//! End-to-end session scenarios
//!
//! These tests drive a CreationSession the way a host screen does: create,
//! resume, pump notifications, pause, persist, recreate. Notifications are
//! published straight onto the bus so every interleaving is deterministic.

use mockall::mock;
use sitecraft::models::{Panel, STEP_COUNT};
use sitecraft::services::SiteCreator;
use sitecraft::ui::BindingState;
use sitecraft::{
    ControllerSnapshot, CreationListener, CreationParams, CreationSession, DisplayMode, Metrics,
    Phase, PhaseBus,
};
use std::sync::Arc;
use std::sync::atomic::Ordering;

mock! {
    pub Creator {}

    impl SiteCreator for Creator {
        fn create_site(&self, params: CreationParams);
    }
}

mock! {
    pub Listener {}

    impl CreationListener for Listener {
        fn creation_success(&self);
        fn help_requested(&self);
    }
}

struct Harness {
    bus: PhaseBus,
    metrics: Arc<Metrics>,
    creator: MockCreator,
    listener: Arc<dyn CreationListener>,
}

impl Harness {
    fn new(starts: usize, successes: usize) -> Self {
        let mut creator = MockCreator::new();
        creator
            .expect_create_site()
            .times(starts)
            .return_const(());

        let mut listener = MockListener::new();
        listener
            .expect_creation_success()
            .times(successes)
            .return_const(());

        Self {
            bus: PhaseBus::new(32),
            metrics: Arc::new(Metrics::new()),
            creator,
            listener: Arc::new(listener),
        }
    }

    fn session(&self, saved: Option<ControllerSnapshot>) -> CreationSession {
        CreationSession::create(
            params(),
            saved,
            &self.creator,
            self.bus.clone(),
            Arc::clone(&self.listener),
            Arc::clone(&self.metrics),
        )
    }

    fn publish(&self, phases: &[Phase]) {
        for phase in phases {
            self.bus.publish(*phase);
        }
    }
}

fn params() -> CreationParams {
    CreationParams {
        title: "Recipes".to_string(),
        tagline: "Things I cook".to_string(),
        slug: "recipes".to_string(),
        theme_id: "twentyseventeen".to_string(),
    }
}

#[test]
fn test_fresh_session_runs_to_success() {
    let harness = Harness::new(1, 1);
    let mut session = harness.session(None);
    session.resume();

    harness.publish(&[
        Phase::Idle,
        Phase::NewSite,
        Phase::FetchingNewSite,
        Phase::SetTagline,
        Phase::SetTheme,
        Phase::Success,
    ]);
    assert_eq!(session.pump(), 6);

    let controller = session.controller();
    assert!(controller.is_finished());
    assert_eq!(controller.display().enabled_count(), STEP_COUNT);
    assert_eq!(controller.display().panel, Panel::Progress);
}

#[test]
fn test_failure_after_new_site() {
    let harness = Harness::new(1, 0);
    let mut session = harness.session(None);
    session.resume();

    harness.publish(&[Phase::Idle, Phase::NewSite, Phase::Failure]);
    session.pump();

    let controller = session.controller();
    assert!(controller.is_finished());
    assert_eq!(controller.display_mode(), DisplayMode::Embedded);
    assert!(controller.display().shows_error());
    assert!(controller.display().home_button_visible);
}

#[test]
fn test_recreated_mid_creation_catches_up_from_replay() {
    let harness = Harness::new(1, 0);

    let mut session = harness.session(None);
    session.resume();
    harness.publish(&[
        Phase::Idle,
        Phase::NewSite,
        Phase::FetchingNewSite,
        Phase::SetTagline,
    ]);
    session.pump();
    let before = session.controller().display().clone();

    session.pause();
    let saved = session.save_state();
    drop(session);
    assert_eq!(harness.bus.subscriber_count(), 0);

    let mut recreated = harness.session(Some(saved));
    assert_eq!(recreated.controller().display().enabled_count(), 0);

    assert_eq!(recreated.resume(), BindingState::Bound);
    assert_eq!(recreated.controller().display(), &before);
    assert_eq!(recreated.controller().display().enabled_count(), 3);
    assert_eq!(harness.metrics.replays_delivered.load(Ordering::Relaxed), 1);
}

#[test]
fn test_recreated_after_success_does_not_rebind() {
    let harness = Harness::new(1, 1);

    let mut session = harness.session(None);
    session.resume();
    harness.publish(&[Phase::SetTheme, Phase::Success]);
    session.pump();
    session.pause();

    let saved = session.save_state();
    assert!(saved.finished);
    drop(session);

    let mut recreated = harness.session(Some(saved));
    assert_eq!(recreated.resume(), BindingState::Unbound);
    assert_eq!(harness.bus.subscriber_count(), 0);
    assert_eq!(recreated.controller().display().enabled_count(), STEP_COUNT);
    assert_eq!(harness.metrics.binds_skipped.load(Ordering::Relaxed), 1);
}

#[test]
fn test_backgrounded_session_misses_nothing_that_matters() {
    let harness = Harness::new(1, 1);

    let mut session = harness.session(None);
    session.resume();
    harness.publish(&[Phase::NewSite]);
    session.pump();

    session.pause();
    harness.publish(&[Phase::FetchingNewSite, Phase::SetTagline, Phase::SetTheme]);
    assert_eq!(session.pump(), 0);
    assert_eq!(session.controller().display().enabled_count(), 1);

    // Only the latest phase is replayed on return
    session.resume();
    assert_eq!(session.controller().display().enabled_count(), 4);

    harness.publish(&[Phase::Success]);
    session.pump();
    assert!(session.controller().is_finished());
}

#[test]
fn test_duplicate_terminal_delivery_fires_once() {
    let harness = Harness::new(1, 1);
    let mut session = harness.session(None);
    session.resume();

    harness.publish(&[Phase::Success, Phase::Success, Phase::Failure]);
    assert_eq!(session.pump(), 3);

    assert_eq!(
        harness.metrics.notifications_ignored.load(Ordering::Relaxed),
        2
    );
    assert!(!session.controller().display().shows_error());
}

#[test]
fn test_earlier_phase_redelivered_rewinds_checklist() {
    let harness = Harness::new(1, 0);
    let mut session = harness.session(None);
    session.resume();

    harness.publish(&[Phase::SetTheme, Phase::NewSite]);
    session.pump();

    assert_eq!(session.controller().display().enabled_count(), 1);
}
