//! Sir Quailbert, an event-driven chat companion.
//!
//! This crate provides:
//! - Prefixed commands: `introduce`, `trivia`, `addtrivia`, `leaderboard`
//! - Timed trivia sessions that wait for one reply without blocking others
//! - Greeting and keyword-question auto-replies
//! - A shared points ledger with a periodic reward sweep
//!
//! The chat service itself stays outside: drive the bot with a stream of
//! [`IncomingMessage`]s and give it a [`Transport`] to talk back through.
//!
//! # Quick Start
//!
//! ```ignore
//! use quailbert_core::{Bot, BotConfig, ContentPaths, Dice, JsonFiles};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = Arc::new(MyChatService::connect().await);
//!     let content = Arc::new(JsonFiles::new(ContentPaths::new("content")));
//!     let bot = Bot::new(BotConfig::default(), transport, content, Dice::from_entropy()).await;
//!
//!     bot.spawn_reward_sweeps();
//!     bot.run(inbound_messages()).await;
//! }
//! ```

pub mod bot;
pub mod commands;
pub mod config;
pub mod content;
pub mod context;
pub mod error;
pub mod ledger;
pub mod persona;
pub mod random;
pub mod replies;
pub mod router;
pub mod scheduler;
pub mod testing;
pub mod transport;
pub mod trivia;

// Primary public API
pub use bot::Bot;
pub use commands::{Command, CommandDispatcher};
pub use config::BotConfig;
pub use content::{
    Answer, ContentKind, ContentPaths, ContentProvider, ContentStore, JsonFiles, KeywordRule,
    MemoryContent, ResponseTemplate, TriviaItem,
};
pub use context::BotContext;
pub use error::{BotError, CommandError, ContentError, TransportError};
pub use ledger::Ledger;
pub use random::Dice;
pub use replies::{PendingReply, ReplyWaiters};
pub use router::Router;
pub use scheduler::{RewardScheduler, SweepAward};
pub use testing::{MockTransport, TestHarness};
pub use transport::{ChannelId, IncomingMessage, ParticipantId, Transport};
pub use trivia::{TriviaEngine, TriviaOutcome, TriviaSession};
