// Session metrics module
//
// Provides lightweight counters for notification delivery and subscription churn

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counters for a progress session
///
/// Uses atomic operations so a single instance can be shared between the
/// session and the host without locks.
#[derive(Debug)]
pub struct Metrics {
    /// Notifications forwarded to the controller
    pub notifications_forwarded: AtomicU64,

    /// Notifications that arrived after the controller had finished
    pub notifications_ignored: AtomicU64,

    /// Sticky replays delivered on binding
    pub replays_delivered: AtomicU64,

    /// Bus bindings created
    pub binds: AtomicU64,

    /// Bus bindings released
    pub unbinds: AtomicU64,

    /// Foreground entries that skipped binding because creation had finished
    pub binds_skipped: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            notifications_forwarded: AtomicU64::new(0),
            notifications_ignored: AtomicU64::new(0),
            replays_delivered: AtomicU64::new(0),
            binds: AtomicU64::new(0),
            unbinds: AtomicU64::new(0),
            binds_skipped: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a notification handed to the controller
    ///
    /// `applied` is false when the controller had already finished.
    pub fn record_notification(&self, applied: bool) {
        self.notifications_forwarded.fetch_add(1, Ordering::Relaxed);
        if !applied {
            self.notifications_ignored.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_replay(&self) {
        self.replays_delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_bind(&self) {
        self.binds.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unbind(&self) {
        self.unbinds.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_bind_skipped(&self) {
        self.binds_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Bindings currently outstanding
    pub fn live_bindings(&self) -> u64 {
        self.binds
            .load(Ordering::Relaxed)
            .saturating_sub(self.unbinds.load(Ordering::Relaxed))
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Session Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Notifications: {} forwarded, {} ignored after finish, {} replays",
            self.notifications_forwarded.load(Ordering::Relaxed),
            self.notifications_ignored.load(Ordering::Relaxed),
            self.replays_delivered.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Bindings: {} bound, {} released, {} skipped",
            self.binds.load(Ordering::Relaxed),
            self.unbinds.load(Ordering::Relaxed),
            self.binds_skipped.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
