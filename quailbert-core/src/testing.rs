//! Testing utilities for the chat companion.
//!
//! This module provides tools for deterministic tests without a chat service:
//! - `MockTransport` records everything the bot says
//! - `TestHarness` wires a bot context over the mock, in-memory content and
//!   seeded dice

use crate::bot::Bot;
use crate::config::BotConfig;
use crate::content::{ContentKind, ContentStore, MemoryContent, TriviaItem};
use crate::context::BotContext;
use crate::error::TransportError;
use crate::random::Dice;
use crate::transport::{ChannelId, IncomingMessage, ParticipantId, Transport};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// The bot's own identity on the mock transport.
pub const BOT_ID: ParticipantId = ParticipantId(1);

/// A channel where players talk.
pub const TAVERN: ChannelId = ChannelId(10);

/// The channel registered as `quail-general-chat`.
pub const GENERAL: ChannelId = ChannelId(20);

/// A transport that records sent messages instead of delivering them.
pub struct MockTransport {
    bot_id: ParticipantId,
    sent: Mutex<Vec<(ChannelId, String)>>,
    names: Mutex<HashMap<ParticipantId, String>>,
    channels: Mutex<HashMap<String, ChannelId>>,
    fail_sends: AtomicBool,
    sent_notify: Notify,
}

impl MockTransport {
    /// Create a mock with `quail-general-chat` mapped to [`GENERAL`].
    pub fn new() -> Self {
        let mut channels = HashMap::new();
        channels.insert("quail-general-chat".to_string(), GENERAL);
        Self {
            bot_id: BOT_ID,
            sent: Mutex::new(Vec::new()),
            names: Mutex::new(HashMap::new()),
            channels: Mutex::new(channels),
            fail_sends: AtomicBool::new(false),
            sent_notify: Notify::new(),
        }
    }

    /// Register a display name for a participant.
    pub fn set_name(&self, participant: ParticipantId, name: impl Into<String>) {
        lock(&self.names).insert(participant, name.into());
    }

    /// Make a channel name unresolvable.
    pub fn remove_channel(&self, name: &str) {
        lock(&self.channels).remove(name);
    }

    /// Make every subsequent send fail (or succeed again).
    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<(ChannelId, String)> {
        lock(&self.sent).clone()
    }

    /// Just the text of everything sent so far.
    pub fn texts(&self) -> Vec<String> {
        lock(&self.sent).iter().map(|(_, text)| text.clone()).collect()
    }

    /// Texts sent to one channel.
    pub fn sent_to(&self, channel: ChannelId) -> Vec<String> {
        lock(&self.sent)
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// Wait until at least `count` messages have been sent.
    pub async fn wait_for_sent(&self, count: usize) {
        loop {
            let notified = self.sent_notify.notified();
            if lock(&self.sent).len() >= count {
                return;
            }
            notified.await;
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[async_trait]
impl Transport for MockTransport {
    fn bot_id(&self) -> ParticipantId {
        self.bot_id
    }

    async fn send(&self, channel: ChannelId, text: &str) -> Result<(), TransportError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::Send {
                channel: channel.to_string(),
                reason: "mock failure".to_string(),
            });
        }
        lock(&self.sent).push((channel, text.to_string()));
        self.sent_notify.notify_waiters();
        Ok(())
    }

    async fn fetch_display_name(
        &self,
        participant: ParticipantId,
    ) -> Result<String, TransportError> {
        lock(&self.names)
            .get(&participant)
            .cloned()
            .ok_or_else(|| TransportError::Lookup {
                participant: participant.to_string(),
                reason: "unknown participant".to_string(),
            })
    }

    async fn find_channel(&self, name: &str) -> Option<ChannelId> {
        lock(&self.channels).get(name).copied()
    }
}

/// A bot context over a mock transport and in-memory content.
pub struct TestHarness {
    pub ctx: BotContext,
    pub transport: Arc<MockTransport>,
    pub content: Arc<MemoryContent>,
}

impl TestHarness {
    /// Empty content, default config.
    pub async fn new() -> Self {
        Self::with_content(MemoryContent::new()).await
    }

    /// Default config with the given `(question, answer, fun_fact)` trivia.
    pub async fn with_trivia(items: &[(&str, &str, &str)]) -> Self {
        let items: Vec<TriviaItem> = items
            .iter()
            .map(|(q, a, f)| TriviaItem::new(*q, *a, *f))
            .collect();
        let json = serde_json::to_string(&items).unwrap_or_else(|_| "[]".to_string());
        Self::with_content(MemoryContent::new().with(ContentKind::Trivia, json)).await
    }

    /// Default config over the given content.
    pub async fn with_content(content: MemoryContent) -> Self {
        Self::with_config(BotConfig::default(), content).await
    }

    /// Full control over config and content. Dice are seeded with 42.
    pub async fn with_config(config: BotConfig, content: MemoryContent) -> Self {
        let transport = Arc::new(MockTransport::new());
        let content = Arc::new(content);
        let store = ContentStore::open(content.clone()).await;
        let ctx = BotContext::new(config, transport.clone(), store, Dice::seeded(42));

        Self {
            ctx,
            transport,
            content,
        }
    }

    /// A bot sharing this harness's context.
    pub fn bot(&self) -> Bot {
        Bot::from_context(self.ctx.clone())
    }

    /// A message from `author` in [`TAVERN`], registering `name` with the mock.
    pub fn message(&self, author: ParticipantId, name: &str, content: &str) -> IncomingMessage {
        self.transport.set_name(author, name);
        IncomingMessage::new(author, name, TAVERN, content)
    }
}
