//! Waiting for a specific participant's next message.
//!
//! A [`PendingReply`] is a filtered subscription on inbound messages, keyed by
//! author and channel. The event loop offers every message to
//! [`ReplyWaiters::dispatch`] before routing it; the message is delivered to
//! every matching waiter and still routed normally afterwards.

use crate::transport::{ChannelId, IncomingMessage, ParticipantId};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;

struct Waiter {
    id: u64,
    author: ParticipantId,
    channel: ChannelId,
    tx: oneshot::Sender<IncomingMessage>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    waiters: Vec<Waiter>,
}

/// Registry of outstanding reply waits. Clones share the registry.
#[derive(Clone, Default)]
pub struct ReplyWaiters {
    registry: Arc<Mutex<Registry>>,
}

impl ReplyWaiters {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Start listening for the next message from `author` in `channel`.
    ///
    /// Messages dispatched before this call are never seen.
    pub fn register(&self, author: ParticipantId, channel: ChannelId) -> PendingReply {
        let (tx, rx) = oneshot::channel();
        let mut registry = self.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.waiters.push(Waiter {
            id,
            author,
            channel,
            tx,
        });

        PendingReply {
            id,
            rx,
            waiters: self.clone(),
        }
    }

    /// Deliver `message` to every waiter it satisfies. Returns how many.
    pub fn dispatch(&self, message: &IncomingMessage) -> usize {
        let matched: Vec<Waiter> = {
            let mut registry = self.lock();
            let (matched, rest): (Vec<Waiter>, Vec<Waiter>) = std::mem::take(&mut registry.waiters)
                .into_iter()
                .partition(|w| w.author == message.author && w.channel == message.channel);
            registry.waiters = rest;
            matched
        };

        let count = matched.len();
        for waiter in matched {
            // The session may have just timed out; nothing to deliver then.
            let _ = waiter.tx.send(message.clone());
        }
        count
    }

    /// Number of waits currently outstanding.
    pub fn pending(&self) -> usize {
        self.lock().waiters.len()
    }

    fn deregister(&self, id: u64) {
        self.lock().waiters.retain(|w| w.id != id);
    }
}

/// One outstanding wait. Dropping it removes the listener.
pub struct PendingReply {
    id: u64,
    rx: oneshot::Receiver<IncomingMessage>,
    waiters: ReplyWaiters,
}

impl PendingReply {
    /// Suspend until the matching message arrives or `window` elapses.
    pub async fn wait(self, window: Duration) -> Option<IncomingMessage> {
        self.wait_until(Instant::now() + window).await
    }

    /// Suspend until the matching message arrives or `deadline` passes.
    pub async fn wait_until(mut self, deadline: Instant) -> Option<IncomingMessage> {
        match tokio::time::timeout_at(deadline, &mut self.rx).await {
            Ok(Ok(message)) => Some(message),
            Ok(Err(_)) | Err(_) => None,
        }
    }
}

impl Drop for PendingReply {
    fn drop(&mut self) {
        self.waiters.deregister(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: ParticipantId = ParticipantId(1);
    const BOB: ParticipantId = ParticipantId(2);
    const TAVERN: ChannelId = ChannelId(10);
    const STABLE: ChannelId = ChannelId(11);

    fn msg(author: ParticipantId, channel: ChannelId, content: &str) -> IncomingMessage {
        IncomingMessage::new(author, "someone", channel, content)
    }

    #[tokio::test]
    async fn test_only_matching_message_resolves() {
        let waiters = ReplyWaiters::new();
        let pending = waiters.register(ALICE, TAVERN);

        assert_eq!(waiters.dispatch(&msg(BOB, TAVERN, "bob")), 0);
        assert_eq!(waiters.dispatch(&msg(ALICE, STABLE, "wrong room")), 0);
        assert_eq!(waiters.dispatch(&msg(ALICE, TAVERN, "mine")), 1);
        assert_eq!(waiters.pending(), 0);

        let reply = pending.wait(Duration::from_secs(1)).await;
        assert_eq!(reply.map(|m| m.content), Some("mine".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_deregisters() {
        let waiters = ReplyWaiters::new();
        let pending = waiters.register(ALICE, TAVERN);
        assert_eq!(waiters.pending(), 1);

        assert!(pending.wait(Duration::from_secs(90)).await.is_none());
        assert_eq!(waiters.pending(), 0);
        assert_eq!(waiters.dispatch(&msg(ALICE, TAVERN, "too late")), 0);
    }

    #[tokio::test]
    async fn test_independent_waiters() {
        let waiters = ReplyWaiters::new();
        let alice = waiters.register(ALICE, TAVERN);
        let bob = waiters.register(BOB, TAVERN);

        waiters.dispatch(&msg(BOB, TAVERN, "b"));
        assert_eq!(waiters.pending(), 1);
        waiters.dispatch(&msg(ALICE, TAVERN, "a"));

        let window = Duration::from_secs(1);
        assert_eq!(bob.wait(window).await.map(|m| m.content).as_deref(), Some("b"));
        assert_eq!(alice.wait(window).await.map(|m| m.content).as_deref(), Some("a"));
    }

    #[test]
    fn test_drop_without_waiting() {
        let waiters = ReplyWaiters::new();
        {
            let _pending = waiters.register(ALICE, TAVERN);
            assert_eq!(waiters.pending(), 1);
        }
        assert_eq!(waiters.pending(), 0);
    }
}
