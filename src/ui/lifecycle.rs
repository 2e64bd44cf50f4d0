// Subscription Lifecycle - Binds the progress controller to the phase bus
//
// The binding follows the host's foreground/background transitions:
// - Foreground entry subscribes (unless creation already finished)
// - Foreground exit releases the subscription unconditionally
// - While bound, pending notifications are forwarded in publish order

use crate::bus::{PhaseBus, SubscriptionHandle};
use crate::metrics::Metrics;
use crate::models::Phase;
use crate::ui::controller::ProgressController;
use std::sync::Arc;

/// Whether the controller is currently registered on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Unbound,
    Bound,
}

/// Owns the controller's bus subscription
///
/// There is never more than one live [`SubscriptionHandle`] per manager, and
/// the handle is released on every exit path, including drop.
pub struct SubscriptionLifecycle {
    bus: PhaseBus,
    handle: Option<SubscriptionHandle<Phase>>,
    metrics: Arc<Metrics>,
}

impl SubscriptionLifecycle {
    pub fn new(bus: PhaseBus, metrics: Arc<Metrics>) -> Self {
        Self {
            bus,
            handle: None,
            metrics,
        }
    }

    pub fn state(&self) -> BindingState {
        if self.handle.is_some() {
            BindingState::Bound
        } else {
            BindingState::Unbound
        }
    }

    /// The owning session came to the foreground
    ///
    /// A finished controller is not bound; its terminal visuals are rendered
    /// from its own state instead. Otherwise the controller is bound and the
    /// bus's sticky replay, if any, is forwarded before this returns.
    pub fn enter_foreground(&mut self, controller: &mut ProgressController) -> BindingState {
        if controller.is_finished() {
            tracing::debug!("Creation already finished, not subscribing");
            self.metrics.record_bind_skipped();
            controller.show_finished();
            return self.state();
        }

        if self.handle.is_some() {
            tracing::warn!("Foreground entry while already subscribed, keeping existing binding");
            return BindingState::Bound;
        }

        let handle = self.bus.subscribe();
        tracing::debug!("Bound to phase bus (subscription {})", handle.id());
        if handle.has_pending_replay() {
            self.metrics.record_replay();
        }

        self.handle = Some(handle);
        self.metrics.record_bind();

        self.dispatch(controller);
        BindingState::Bound
    }

    /// The owning session left the foreground
    ///
    /// Delivery stops; the background operation keeps running.
    pub fn leave_foreground(&mut self) {
        if let Some(handle) = self.handle.take() {
            tracing::debug!("Unbinding from phase bus (subscription {})", handle.id());
            self.metrics.record_unbind();
        }
    }

    /// Forward every pending notification to `controller`
    ///
    /// # Returns
    /// The number of notifications forwarded; zero when unbound
    pub fn dispatch(&mut self, controller: &mut ProgressController) -> usize {
        let Some(handle) = self.handle.as_mut() else {
            return 0;
        };

        let mut forwarded = 0;
        while let Some(phase) = handle.try_next() {
            let applied = controller.on_phase_notification(phase);
            self.metrics.record_notification(applied);
            forwarded += 1;
        }

        forwarded
    }

    /// Wait for the next notification and forward it
    ///
    /// # Returns
    /// The forwarded phase, or `None` when unbound or the bus is gone
    pub async fn dispatch_next(&mut self, controller: &mut ProgressController) -> Option<Phase> {
        let handle = self.handle.as_mut()?;
        let phase = handle.next().await?;

        let applied = controller.on_phase_notification(phase);
        self.metrics.record_notification(applied);
        Some(phase)
    }
}

impl Drop for SubscriptionLifecycle {
    fn drop(&mut self) {
        self.leave_foreground();
    }
}
