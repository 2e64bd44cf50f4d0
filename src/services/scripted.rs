use crate::models::{CreationParams, DemoSettings, Phase};
use crate::services::creation::{CreationBackend, CreationError};
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Deterministic in-process backend
///
/// Sleeps for a fixed delay per phase and optionally rejects one phase.
/// Used by the demo host and by tests.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    step_delay: Duration,
    fail_at: Option<Phase>,
    performed: Mutex<Vec<Phase>>,
}

impl ScriptedBackend {
    pub fn new(step_delay: Duration) -> Self {
        Self {
            step_delay,
            fail_at: None,
            performed: Mutex::new(Vec::new()),
        }
    }

    pub fn from_settings(settings: &DemoSettings) -> Self {
        let backend = Self::new(settings.step_delay());
        match settings.fail_at {
            Some(phase) => backend.failing_at(phase),
            None => backend,
        }
    }

    pub fn failing_at(mut self, phase: Phase) -> Self {
        self.fail_at = Some(phase);
        self
    }

    /// Phases performed so far, in order
    pub fn performed(&self) -> Vec<Phase> {
        self.performed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CreationBackend for ScriptedBackend {
    fn perform(
        &self,
        phase: Phase,
        params: &CreationParams,
    ) -> impl Future<Output = Result<(), CreationError>> + Send {
        let slug = params.slug.clone();

        async move {
            if !self.step_delay.is_zero() {
                tokio::time::sleep(self.step_delay).await;
            }

            self.performed
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(phase);

            if self.fail_at == Some(phase) {
                return Err(CreationError::Rejected {
                    phase,
                    reason: format!("scripted failure for '{}'", slug),
                });
            }

            Ok(())
        }
    }
}
