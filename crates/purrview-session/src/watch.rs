// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Replay-latest broadcast of the `authenticated` flag.
//!
//! Every subscriber owns an unbounded queue. `subscribe` enqueues the current
//! value before registering the queue, and `publish` enqueues the new value on
//! every registered queue before returning. A caller that publishes and then
//! returns therefore cannot race ahead of any subscriber's view.

use std::pin::Pin;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::mpsc;

#[derive(Debug)]
struct WatchState {
    current: bool,
    subscribers: Vec<mpsc::UnboundedSender<bool>>,
}

/// Single-producer, multi-consumer observable over a boolean.
#[derive(Debug)]
pub struct SessionWatch {
    state: Mutex<WatchState>,
}

impl SessionWatch {
    pub fn new(initial: bool) -> Self {
        Self {
            state: Mutex::new(WatchState {
                current: initial,
                subscribers: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, WatchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Last published value.
    pub fn current(&self) -> bool {
        self.lock().current
    }

    /// Registers a subscriber whose first item is the current value.
    pub fn subscribe(&self) -> SessionSubscription {
        let mut state = self.lock();
        let (tx, rx) = mpsc::unbounded_channel();
        // The receiver is alive, so this cannot fail.
        let _ = tx.send(state.current);
        state.subscribers.push(tx);
        SessionSubscription { rx }
    }

    /// Records `value` and enqueues it for every live subscriber.
    ///
    /// Subscribers whose receiving half was dropped are pruned here.
    pub fn publish(&self, value: bool) {
        let mut state = self.lock();
        state.current = value;
        state.subscribers.retain(|tx| tx.send(value).is_ok());
    }

    /// Number of subscribers still registered.
    pub fn subscriber_count(&self) -> usize {
        let mut state = self.lock();
        state.subscribers.retain(|tx| !tx.is_closed());
        state.subscribers.len()
    }
}

impl Default for SessionWatch {
    fn default() -> Self {
        Self::new(false)
    }
}

/// One subscriber's view of a [`SessionWatch`].
///
/// Yields every published value in order, starting with the value current at
/// subscription time. Ends when the watch is dropped.
#[derive(Debug)]
pub struct SessionSubscription {
    rx: mpsc::UnboundedReceiver<bool>,
}

impl SessionSubscription {
    /// Waits for the next value.
    pub async fn recv(&mut self) -> Option<bool> {
        self.rx.recv().await
    }

    /// Next already-delivered value, without waiting.
    pub fn try_recv(&mut self) -> Option<bool> {
        self.rx.try_recv().ok()
    }

    /// Takes every already-delivered value, oldest first.
    pub fn drain(&mut self) -> Vec<bool> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    /// Most recent already-delivered value, discarding older ones.
    pub fn latest(&mut self) -> Option<bool> {
        self.drain().pop()
    }
}

impl Stream for SessionSubscription {
    type Item = bool;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<bool>> {
        self.rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[test]
    fn subscriber_gets_current_value_first() {
        let watch = SessionWatch::new(true);
        let mut sub = watch.subscribe();
        assert_eq!(sub.try_recv(), Some(true));
        assert_eq!(sub.try_recv(), None);
    }

    #[test]
    fn each_subscriber_sees_every_transition_once() {
        let watch = SessionWatch::default();
        let mut early = watch.subscribe();
        watch.publish(true);
        let mut late = watch.subscribe();
        watch.publish(false);

        assert_eq!(early.drain(), vec![false, true, false]);
        assert_eq!(late.drain(), vec![true, false]);
        assert!(early.drain().is_empty());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let watch = SessionWatch::default();
        let kept = watch.subscribe();
        let dropped = watch.subscribe();
        assert_eq!(watch.subscriber_count(), 2);
        drop(dropped);
        watch.publish(true);
        assert_eq!(watch.subscriber_count(), 1);
        drop(kept);
        assert_eq!(watch.subscriber_count(), 0);
    }

    #[test]
    fn latest_skips_intermediate_values() {
        let watch = SessionWatch::default();
        let mut sub = watch.subscribe();
        watch.publish(true);
        watch.publish(false);
        watch.publish(true);
        assert_eq!(sub.latest(), Some(true));
        assert!(watch.current());
    }

    #[tokio::test]
    async fn stream_ends_when_watch_is_dropped() {
        let watch = SessionWatch::new(false);
        let sub = watch.subscribe();
        watch.publish(true);
        drop(watch);
        let seen: Vec<bool> = sub.collect().await;
        assert_eq!(seen, vec![false, true]);
    }

    #[tokio::test]
    async fn recv_waits_for_publish_from_another_task() {
        let watch = std::sync::Arc::new(SessionWatch::new(false));
        let mut sub = watch.subscribe();
        assert_eq!(sub.recv().await, Some(false));

        let publisher = std::sync::Arc::clone(&watch);
        tokio::spawn(async move { publisher.publish(true) });

        let next = tokio::time::timeout(std::time::Duration::from_secs(1), sub.recv())
            .await
            .unwrap();
        assert_eq!(next, Some(true));
    }
}
