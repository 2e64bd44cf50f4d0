use crate::bus::PhaseBus;
use crate::models::{CreationParams, Phase};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

/// Errors reported by a creation backend
///
/// None of these cross the bus: subscribers only ever see [`Phase::Failure`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CreationError {
    #[error("Site creation rejected during {phase}: {reason}")]
    Rejected { phase: Phase, reason: String },

    #[error("{phase} timed out after {after:?}")]
    Timeout { phase: Phase, after: Duration },
}

/// The "start" command seam between the UI and the background operation
///
/// Implementations must return immediately; progress is reported on the bus.
#[cfg_attr(test, mockall::automock)]
pub trait SiteCreator: Send + Sync {
    fn create_site(&self, params: CreationParams);
}

/// Performs the work behind a single phase
pub trait CreationBackend: Send + Sync + 'static {
    fn perform(
        &self,
        phase: Phase,
        params: &CreationParams,
    ) -> impl Future<Output = Result<(), CreationError>> + Send;
}

/// Background site creation operation
///
/// Runs the backend on the tokio runtime and publishes each phase on the
/// [`PhaseBus`] before performing it:
/// `IDLE`, `NEW_SITE`, `FETCHING_NEW_SITE`, `SET_TAGLINE`, `SET_THEME`, then
/// `SUCCESS`, or `FAILURE` as soon as any phase errors. Failures are not retried.
pub struct SiteCreationService<B> {
    bus: PhaseBus,
    backend: Arc<B>,
    runtime: tokio::runtime::Handle,
    step_timeout: Duration,
}

impl<B: CreationBackend> SiteCreationService<B> {
    /// Default upper bound for a single phase
    pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(bus: PhaseBus, backend: B, runtime: tokio::runtime::Handle) -> Self {
        Self {
            bus,
            backend: Arc::new(backend),
            runtime,
            step_timeout: Self::DEFAULT_STEP_TIMEOUT,
        }
    }

    pub fn with_step_timeout(mut self, step_timeout: Duration) -> Self {
        self.step_timeout = step_timeout;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run every phase to completion, publishing progress on `bus`
    ///
    /// # Errors
    /// Returns the first backend error; `FAILURE` has already been published by then.
    pub async fn run(
        bus: PhaseBus,
        backend: Arc<B>,
        params: CreationParams,
        step_timeout: Duration,
    ) -> Result<(), CreationError> {
        bus.publish(Phase::Idle);

        for phase in Phase::WORK {
            bus.publish(phase);
            tracing::debug!("Performing {} for '{}'", phase, params.slug);

            let outcome = match timeout(step_timeout, backend.perform(phase, &params)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(CreationError::Timeout {
                    phase,
                    after: step_timeout,
                }),
            };

            if let Err(e) = outcome {
                tracing::error!("Site creation failed: {}", e);
                bus.publish(Phase::Failure);
                return Err(e);
            }
        }

        bus.publish(Phase::Success);
        tracing::info!("Site '{}' created", params.slug);
        Ok(())
    }
}

impl<B: CreationBackend> SiteCreator for SiteCreationService<B> {
    fn create_site(&self, params: CreationParams) {
        tracing::info!(
            "Starting site creation: title='{}', slug='{}', theme='{}'",
            params.title,
            params.slug,
            params.theme_id
        );

        let bus = self.bus.clone();
        let backend = Arc::clone(&self.backend);
        let step_timeout = self.step_timeout;

        // Fire and forget; the outcome is reported on the bus
        self.runtime.spawn(async move {
            if let Err(e) = Self::run(bus, backend, params, step_timeout).await {
                tracing::debug!("Background creation ended with: {}", e);
            }
        });
    }
}
