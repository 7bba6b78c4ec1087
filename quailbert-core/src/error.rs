//! Error types for the chat companion.
//!
//! Uses thiserror for ergonomic error definition. Trivia outcomes such as a
//! wrong answer or a timeout are ordinary values, see
//! [`TriviaOutcome`](crate::trivia::TriviaOutcome).

/// Main error type returned by message handling.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// The chat service rejected or failed a request
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A content collection could not be written
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    /// A command was malformed
    #[error("Command error: {0}")]
    Command(#[from] CommandError),
}

/// Failures reported by a [`Transport`](crate::transport::Transport).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Sending a message failed
    #[error("Failed to send to {channel}: {reason}")]
    Send { channel: String, reason: String },

    /// Looking up a participant failed
    #[error("Failed to look up participant {participant}: {reason}")]
    Lookup { participant: String, reason: String },

    /// The connection is gone
    #[error("Transport closed")]
    Closed,
}

/// Failures reading or writing a content collection.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Malformed command invocations. These are logged, never shown to users.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// A required argument was not supplied
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    /// A quoted argument was never closed
    #[error("Unclosed quote in arguments")]
    UnclosedQuote,
}
