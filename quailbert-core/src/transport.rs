//! The chat transport seam.
//!
//! The core never owns a connection. It receives [`IncomingMessage`] values
//! from whoever drives it and talks back through a [`Transport`].

use crate::error::TransportError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a chat participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a chat channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An inbound text message event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Who wrote the message.
    pub author: ParticipantId,
    /// The author's display name at the time of sending.
    pub author_name: String,
    /// Where the message was posted.
    pub channel: ChannelId,
    /// Raw message text.
    pub content: String,
}

impl IncomingMessage {
    /// Create a new inbound message.
    pub fn new(
        author: ParticipantId,
        author_name: impl Into<String>,
        channel: ChannelId,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author,
            author_name: author_name.into(),
            channel,
            content: content.into(),
        }
    }
}

/// Outbound side of the chat service.
///
/// Failures are reported, never retried by the core.
#[async_trait]
pub trait Transport: Send + Sync {
    /// The bot's own participant identity, used to ignore its own messages.
    fn bot_id(&self) -> ParticipantId;

    /// Post `text` to `channel`.
    async fn send(&self, channel: ChannelId, text: &str) -> Result<(), TransportError>;

    /// Resolve the current display name of a participant.
    async fn fetch_display_name(&self, participant: ParticipantId)
        -> Result<String, TransportError>;

    /// Look up a channel by its name. `None` if no such channel is visible.
    async fn find_channel(&self, name: &str) -> Option<ChannelId>;
}
