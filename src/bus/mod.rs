// Notification bus module
//
// This module provides the StickyBus, a broadcast channel paired with a
// last-value cache so that late subscribers catch up on the most recent
// notification before receiving live ones.

use crate::models::Phase;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

/// Bus carrying site creation phase notifications.
pub type PhaseBus = StickyBus<Phase>;

/// Publish/subscribe bus with sticky replay of the last published value
///
/// This is the transport between the background creation operation and the UI:
/// - [`publish()`](Self::publish) caches the value and broadcasts it to every live subscriber
/// - [`subscribe()`](Self::subscribe) returns a [`SubscriptionHandle`] that first yields
///   the cached value (if any), then live values in publish order
///
/// Registration and publishing both happen under the cache lock, so a new
/// subscriber sees every value exactly once: either as the replay or live.
/// Replay is a single value, never a backlog.
pub struct StickyBus<T> {
    /// Most recently published value
    last: Arc<Mutex<Option<T>>>,

    /// Live delivery channel
    tx: broadcast::Sender<T>,

    /// Source of subscription ids, for logging
    next_id: Arc<AtomicU64>,
}

/// Largest per-subscriber buffer a bus accepts
pub const MAX_CAPACITY: usize = 1 << 16;

impl<T: Clone + Debug + Send + 'static> StickyBus<T> {
    /// Create a new bus
    ///
    /// # Arguments
    /// * `capacity` - Notifications buffered per subscriber before it lags,
    ///   clamped to `1..=MAX_CAPACITY`
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.clamp(1, MAX_CAPACITY));
        Self {
            last: Arc::new(Mutex::new(None)),
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Cache `value` as the sticky value and deliver it to live subscribers
    pub fn publish(&self, value: T) {
        let mut last = lock(&self.last);
        *last = Some(value.clone());

        // No live subscribers is fine, the value stays cached for replay
        let delivered = self.tx.send(value).unwrap_or(0);
        tracing::trace!("Published {:?} to {} subscriber(s)", last, delivered);
    }

    /// Register a new subscriber
    ///
    /// The returned handle yields the cached value first, if one exists.
    pub fn subscribe(&self) -> SubscriptionHandle<T> {
        let last = lock(&self.last);
        let rx = self.tx.subscribe();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        tracing::debug!("Subscription {} registered (replay: {:?})", id, *last);

        SubscriptionHandle {
            id,
            replay: last.clone(),
            rx,
            last: Arc::clone(&self.last),
        }
    }

    /// The sticky value, if anything was published yet
    pub fn last(&self) -> Option<T> {
        lock(&self.last).clone()
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T> Clone for StickyBus<T> {
    fn clone(&self) -> Self {
        Self {
            last: Arc::clone(&self.last),
            tx: self.tx.clone(),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

/// An active registration on a [`StickyBus`]
///
/// Dropping the handle unregisters it; nothing is delivered afterwards.
pub struct SubscriptionHandle<T> {
    id: u64,
    replay: Option<T>,
    rx: broadcast::Receiver<T>,
    last: Arc<Mutex<Option<T>>>,
}

impl<T: Clone + Debug + Send + 'static> SubscriptionHandle<T> {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether the sticky replay has not been taken yet
    pub fn has_pending_replay(&self) -> bool {
        self.replay.is_some()
    }

    /// Next notification without waiting, or `None` if nothing is pending
    pub fn try_next(&mut self) -> Option<T> {
        if let Some(value) = self.replay.take() {
            return Some(value);
        }

        match self.rx.try_recv() {
            Ok(value) => Some(value),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => None,
            Err(TryRecvError::Lagged(skipped)) => self.catch_up(skipped),
        }
    }

    /// Wait for the next notification
    ///
    /// Returns `None` once every publisher is gone.
    pub async fn next(&mut self) -> Option<T> {
        if let Some(value) = self.replay.take() {
            return Some(value);
        }

        match self.rx.recv().await {
            Ok(value) => Some(value),
            Err(RecvError::Closed) => None,
            Err(RecvError::Lagged(skipped)) => self.catch_up(skipped),
        }
    }

    /// Skip the lagged backlog and continue from the sticky value
    fn catch_up(&mut self, skipped: u64) -> Option<T> {
        tracing::warn!(
            "Subscription {} lagged by {} notification(s), resuming from latest",
            self.id,
            skipped
        );

        let last = lock(&self.last);
        self.rx = self.rx.resubscribe();
        last.clone()
    }
}

impl<T> Drop for SubscriptionHandle<T> {
    fn drop(&mut self) {
        tracing::debug!("Subscription {} released", self.id);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
