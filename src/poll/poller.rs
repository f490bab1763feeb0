//! Polling tasks and refetch coalescing.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use super::ResourceKey;

/// How a subscribed resource is refreshed.
#[derive(Debug, Clone, Copy)]
pub enum PollSchedule {
    /// Fetch immediately, then after every period. A period during which the
    /// previous fetch is still outstanding is skipped, never stacked.
    Every(Duration),
    /// Fetch only when explicitly refetched.
    OnDemand,
}

/// Messages the poller emits into the application's action channel.
///
/// Implemented by the store's `Action` type; tests use their own message
/// enum, which keeps the shell independent of the UI layer.
pub trait PollMessage: Send + 'static {
    fn fetch_started(key: &ResourceKey) -> Self;
    fn fetch_failed(key: &ResourceKey, reason: String) -> Self;
}

struct Subscription {
    cmd_tx: mpsc::UnboundedSender<()>,
    released: Arc<AtomicBool>,
}

/// The dashboard shell's scheduler.
///
/// One cooperative task per subscribed resource; per resource, execution is
/// serialized (the task awaits its fetch inline), so at most one fetch is in
/// flight for any key at any time.
pub struct Poller<M> {
    outbox: mpsc::UnboundedSender<M>,
    subscriptions: HashMap<ResourceKey, Subscription>,
}

impl<M: PollMessage> Poller<M> {
    /// Create a poller that delivers fetch outcomes to `outbox`.
    pub fn new(outbox: mpsc::UnboundedSender<M>) -> Self {
        Self {
            outbox,
            subscriptions: HashMap::new(),
        }
    }

    /// Register a resource and start its polling task.
    ///
    /// Re-subscribing an already-known key releases the previous
    /// subscription first (used when the technical-analysis ticker changes).
    pub fn subscribe<F, Fut>(&mut self, key: ResourceKey, schedule: PollSchedule, fetcher: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = crate::Result<M>> + Send + 'static,
    {
        self.release(&key);

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let released = Arc::new(AtomicBool::new(false));

        tracing::debug!(resource = %key, ?schedule, "subscribing");
        tokio::spawn(poll_loop(
            key.clone(),
            schedule,
            fetcher,
            self.outbox.clone(),
            cmd_rx,
            released.clone(),
        ));

        self.subscriptions
            .insert(key, Subscription { cmd_tx, released });
    }

    /// Whether a resource is currently subscribed.
    pub fn is_subscribed(&self, key: &ResourceKey) -> bool {
        self.subscriptions.contains_key(key)
    }

    /// Force an immediate out-of-band fetch.
    ///
    /// If a fetch for the key is already outstanding the request is absorbed
    /// by it; no second call is issued. Returns false for unknown keys.
    pub fn refetch(&self, key: &ResourceKey) -> bool {
        match self.subscriptions.get(key) {
            Some(subscription) => subscription.cmd_tx.send(()).is_ok(),
            None => false,
        }
    }

    /// Stop a resource's timer.
    ///
    /// An in-flight network call is not aborted; its late result is
    /// discarded by the task instead of being delivered.
    pub fn release(&mut self, key: &ResourceKey) {
        if let Some(subscription) = self.subscriptions.remove(key) {
            tracing::debug!(resource = %key, "releasing subscription");
            subscription.released.store(true, Ordering::Release);
            // Dropping cmd_tx wakes the task so it can exit.
        }
    }

    /// Release every subscription (application exit).
    pub fn shutdown(&mut self) {
        let keys: Vec<ResourceKey> = self.subscriptions.keys().cloned().collect();
        for key in keys {
            self.release(&key);
        }
    }
}

async fn poll_loop<M, F, Fut>(
    key: ResourceKey,
    schedule: PollSchedule,
    fetcher: F,
    outbox: mpsc::UnboundedSender<M>,
    mut cmd_rx: mpsc::UnboundedReceiver<()>,
    released: Arc<AtomicBool>,
) where
    M: PollMessage,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = crate::Result<M>> + Send + 'static,
{
    let mut timer = match schedule {
        PollSchedule::Every(period) => {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            Some(interval)
        }
        PollSchedule::OnDemand => None,
    };

    loop {
        match timer.as_mut() {
            Some(interval) => {
                tokio::select! {
                    _ = interval.tick() => {}
                    cmd = cmd_rx.recv() => {
                        if cmd.is_none() {
                            break;
                        }
                    }
                }
            }
            None => {
                if cmd_rx.recv().await.is_none() {
                    break;
                }
            }
        }

        if released.load(Ordering::Acquire) {
            break;
        }

        // Refetches queued in the same turn collapse into this run.
        while cmd_rx.try_recv().is_ok() {}

        if outbox.send(M::fetch_started(&key)).is_err() {
            break;
        }

        let result = fetcher().await;

        if released.load(Ordering::Acquire) {
            tracing::debug!(resource = %key, "discarding result for released subscription");
            break;
        }

        let message = match result {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!(resource = %key, error = %err, "fetch failed");
                M::fetch_failed(&key, err.to_string())
            }
        };
        if outbox.send(message).is_err() {
            break;
        }

        // Refetch requests that arrived while the call was outstanding were
        // satisfied by it.
        while cmd_rx.try_recv().is_ok() {}

        // The next scheduled fetch is a full period after this completion.
        if let Some(interval) = timer.as_mut() {
            interval.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::AtomicUsize;

    #[derive(Debug, PartialEq)]
    enum TestMessage {
        Started(ResourceKey),
        Loaded(u32),
        Failed(ResourceKey, String),
    }

    impl PollMessage for TestMessage {
        fn fetch_started(key: &ResourceKey) -> Self {
            Self::Started(key.clone())
        }

        fn fetch_failed(key: &ResourceKey, reason: String) -> Self {
            Self::Failed(key.clone(), reason)
        }
    }

    fn counting_fetcher(
        calls: Arc<AtomicUsize>,
        latency: Duration,
    ) -> impl Fn() -> std::pin::Pin<Box<dyn Future<Output = crate::Result<TestMessage>> + Send>>
    {
        move || {
            let calls = calls.clone();
            Box::pin(async move {
                let call = calls.fetch_add(1, Ordering::SeqCst) as u32 + 1;
                tokio::time::sleep(latency).await;
                Ok(TestMessage::Loaded(call))
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn on_demand_resource_stays_idle_without_refetch() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut poller = Poller::new(tx);

        poller.subscribe(
            ResourceKey::Candidates,
            PollSchedule::OnDemand,
            counting_fetcher(calls.clone(), Duration::from_millis(10)),
        );

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn refetch_burst_issues_exactly_one_call() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut poller = Poller::new(tx);

        poller.subscribe(
            ResourceKey::Candidates,
            PollSchedule::OnDemand,
            counting_fetcher(calls.clone(), Duration::from_millis(100)),
        );

        // Two refetches in the same turn, before the first resolves.
        assert!(poller.refetch(&ResourceKey::Candidates));
        assert!(poller.refetch(&ResourceKey::Candidates));

        assert_eq!(
            rx.recv().await,
            Some(TestMessage::Started(ResourceKey::Candidates))
        );
        assert_eq!(rx.recv().await, Some(TestMessage::Loaded(1)));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn refetch_while_in_flight_does_not_duplicate() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut poller = Poller::new(tx);

        poller.subscribe(
            ResourceKey::Portfolio,
            PollSchedule::OnDemand,
            counting_fetcher(calls.clone(), Duration::from_millis(100)),
        );

        poller.refetch(&ResourceKey::Portfolio);
        assert_eq!(
            rx.recv().await,
            Some(TestMessage::Started(ResourceKey::Portfolio))
        );

        // Arrives while the fetch is outstanding; satisfied by it.
        poller.refetch(&ResourceKey::Portfolio);

        assert_eq!(rx.recv().await, Some(TestMessage::Loaded(1)));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn scheduled_fetches_never_overlap() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut poller = Poller::new(tx);

        // Fetch latency exceeds the period; ticks must be skipped, not stacked.
        poller.subscribe(
            ResourceKey::AgentsHealth,
            PollSchedule::Every(Duration::from_millis(50)),
            counting_fetcher(calls.clone(), Duration::from_millis(120)),
        );

        for expected_call in 1..=3u32 {
            assert_eq!(
                rx.recv().await,
                Some(TestMessage::Started(ResourceKey::AgentsHealth))
            );
            assert_eq!(rx.recv().await, Some(TestMessage::Loaded(expected_call)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn failure_is_reported_per_resource() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut poller = Poller::new(tx);

        poller.subscribe(ResourceKey::TokenStatus, PollSchedule::OnDemand, || async {
            let result: crate::Result<TestMessage> =
                Err(crate::Error::application("auth agent unreachable"));
            result
        });
        poller.refetch(&ResourceKey::TokenStatus);

        assert_eq!(
            rx.recv().await,
            Some(TestMessage::Started(ResourceKey::TokenStatus))
        );
        assert_eq!(
            rx.recv().await,
            Some(TestMessage::Failed(
                ResourceKey::TokenStatus,
                "auth agent unreachable".to_string()
            ))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn release_stops_timer_and_discards_late_result() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut poller = Poller::new(tx);

        poller.subscribe(
            ResourceKey::MacroReport,
            PollSchedule::Every(Duration::from_millis(50)),
            counting_fetcher(calls.clone(), Duration::from_millis(100)),
        );

        // First fetch has started and is in flight.
        assert_eq!(
            rx.recv().await,
            Some(TestMessage::Started(ResourceKey::MacroReport))
        );
        poller.release(&ResourceKey::MacroReport);

        // The in-flight result is discarded and no further fetch is scheduled.
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(rx.try_recv().is_err());
        assert!(!poller.is_subscribed(&ResourceKey::MacroReport));
        assert!(!poller.refetch(&ResourceKey::MacroReport));
    }

    #[tokio::test(start_paused = true)]
    async fn resubscribe_replaces_previous_subscription() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let old_calls = Arc::new(AtomicUsize::new(0));
        let new_calls = Arc::new(AtomicUsize::new(0));
        let mut poller = Poller::new(tx);

        poller.subscribe(
            ResourceKey::Candidates,
            PollSchedule::OnDemand,
            counting_fetcher(old_calls.clone(), Duration::from_millis(10)),
        );
        poller.subscribe(
            ResourceKey::Candidates,
            PollSchedule::OnDemand,
            counting_fetcher(new_calls.clone(), Duration::from_millis(10)),
        );

        poller.refetch(&ResourceKey::Candidates);
        assert_eq!(
            rx.recv().await,
            Some(TestMessage::Started(ResourceKey::Candidates))
        );
        assert_eq!(rx.recv().await, Some(TestMessage::Loaded(1)));

        assert_eq!(old_calls.load(Ordering::SeqCst), 0);
        assert_eq!(new_calls.load(Ordering::SeqCst), 1);
    }
}
