//! Observable state holder
//!
//! A [`StateStore`] owns one value and replaces it wholesale on every
//! update. Updates are serialized under a single lock, so concurrent
//! read-modify-write callers never lose each other's changes. Each
//! subscriber gets its own unbounded queue: it starts with the snapshot
//! current at subscription time and then receives every later snapshot in
//! publication order.

use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// A published value with its position in the publication sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub version: u64,
    pub value: T,
}

struct Inner<T> {
    current: Snapshot<T>,
    subscribers: Vec<UnboundedSender<Snapshot<T>>>,
}

/// Shared, observable state. Cloning yields another handle to the same state.
pub struct StateStore<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for StateStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> StateStore<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                current: Snapshot {
                    version: 0,
                    value: initial,
                },
                subscribers: Vec::new(),
            })),
        }
    }

    // Poison is ignored: the value is only replaced after the updater returns
    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Latest value
    pub fn current(&self) -> T {
        self.lock().current.value.clone()
    }

    /// Latest value with its version
    pub fn snapshot(&self) -> Snapshot<T> {
        self.lock().current.clone()
    }

    /// Number of updates published so far
    pub fn version(&self) -> u64 {
        self.lock().current.version
    }

    /// Replace the value with `f(current)` and publish it.
    ///
    /// `f` runs under the store lock and must not touch the store.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> Snapshot<T> {
        let mut inner = self.lock();
        let next = Snapshot {
            version: inner.current.version + 1,
            value: f(&inner.current.value),
        };
        inner.current = next.clone();

        // Fan out while still holding the lock so every queue sees the same order
        inner
            .subscribers
            .retain(|tx| tx.send(next.clone()).is_ok());

        tracing::debug!(
            version = next.version,
            subscribers = inner.subscribers.len(),
            "Published state"
        );
        next
    }

    /// Start observing; the first item is the current snapshot
    pub fn subscribe(&self) -> StateSubscription<T> {
        let (tx, rx) = unbounded_channel();
        let mut inner = self.lock();
        // Cannot fail: the receiver is still in scope
        let _ = tx.send(inner.current.clone());
        inner.subscribers.push(tx);
        StateSubscription { rx }
    }

    /// Live subscriptions, pruning ones that were dropped
    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.lock();
        inner.subscribers.retain(|tx| !tx.is_closed());
        inner.subscribers.len()
    }
}

/// A subscriber's ordered view of a [`StateStore`]
pub struct StateSubscription<T> {
    rx: UnboundedReceiver<Snapshot<T>>,
}

impl<T> StateSubscription<T> {
    /// Next pending snapshot without waiting
    pub fn try_next(&mut self) -> Option<Snapshot<T>> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next snapshot; `None` once the store is gone
    pub async fn recv(&mut self) -> Option<Snapshot<T>> {
        self.rx.recv().await
    }

    /// Drain everything pending, returning only the newest snapshot
    pub fn latest(&mut self) -> Option<Snapshot<T>> {
        let mut latest = None;
        while let Some(snapshot) = self.try_next() {
            latest = Some(snapshot);
        }
        latest
    }
}

impl<T> Stream for StateSubscription<T> {
    type Item = Snapshot<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::thread;

    #[test]
    fn test_subscription_starts_with_current() {
        let store = StateStore::new(10u32);
        store.update(|v| v + 1);

        let mut sub = store.subscribe();
        let first = sub.try_next().unwrap();
        assert_eq!(first, Snapshot { version: 1, value: 11 });
        assert!(sub.try_next().is_none());
    }

    #[test]
    fn test_every_update_is_delivered_in_order() {
        let store = StateStore::new(0u32);
        let mut sub = store.subscribe();
        for _ in 0..5 {
            store.update(|v| v + 1);
        }

        let values: Vec<u32> = std::iter::from_fn(|| sub.try_next()).map(|s| s.value).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let store = StateStore::new(0u64);
        let mut sub = store.subscribe();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..250 {
                        store.update(|v| v + 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.current(), 2000);
        assert_eq!(store.version(), 2000);

        let versions: Vec<u64> = std::iter::from_fn(|| sub.try_next()).map(|s| s.version).collect();
        assert_eq!(versions.len(), 2001);
        assert!(versions.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let store = StateStore::new(());
        let sub = store.subscribe();
        let _kept = store.subscribe();
        assert_eq!(store.subscriber_count(), 2);

        drop(sub);
        store.update(|_| ());
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn test_latest_skips_to_newest() {
        let store = StateStore::new(0u8);
        let mut sub = store.subscribe();
        store.update(|_| 7);
        store.update(|_| 9);
        assert_eq!(sub.latest().map(|s| s.value), Some(9));
        assert_eq!(sub.latest(), None);
    }

    #[tokio::test]
    async fn test_stream_yields_updates() {
        let store = StateStore::new(String::from("a"));
        let sub = store.subscribe();

        let writer = store.clone();
        tokio::spawn(async move {
            writer.update(|s| format!("{s}b"));
            writer.update(|s| format!("{s}c"));
        })
        .await
        .unwrap();

        let seen: Vec<String> = sub.take(3).map(|s| s.value).collect().await;
        assert_eq!(seen, vec!["a", "ab", "abc"]);
    }
}
