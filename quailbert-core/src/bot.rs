//! The assembled bot and its event loop.

use crate::config::BotConfig;
use crate::content::{ContentProvider, ContentStore};
use crate::context::BotContext;
use crate::error::BotError;
use crate::ledger::Ledger;
use crate::random::Dice;
use crate::router::Router;
use crate::scheduler::RewardScheduler;
use crate::transport::{IncomingMessage, Transport};
use futures::{Stream, StreamExt};
use std::sync::Arc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

/// Sir Quailbert, wired up and ready to listen.
pub struct Bot {
    ctx: BotContext,
    router: Router,
}

impl Bot {
    /// Load content from `provider` and assemble a bot.
    pub async fn new(
        config: BotConfig,
        transport: Arc<dyn Transport>,
        provider: Arc<dyn ContentProvider>,
        dice: Dice,
    ) -> Self {
        let content = ContentStore::open(provider).await;
        Self::from_context(BotContext::new(config, transport, content, dice))
    }

    /// Assemble a bot over an existing context.
    pub fn from_context(ctx: BotContext) -> Self {
        let router = Router::new(ctx.clone());
        Self { ctx, router }
    }

    pub fn context(&self) -> &BotContext {
        &self.ctx
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ctx.ledger
    }

    /// Handle one message to completion, including any trivia it starts.
    ///
    /// The event loop uses [`Bot::run`] instead, which never waits on a
    /// single message.
    pub async fn handle(&self, message: &IncomingMessage) -> Result<(), BotError> {
        self.ctx.replies.dispatch(message);
        self.router.route(message).await
    }

    /// Start the periodic reward sweep.
    pub fn spawn_reward_sweeps(&self) -> JoinHandle<()> {
        info!(period = ?self.ctx.config.sweep_period, "starting reward sweeps");
        RewardScheduler::new(self.ctx.clone()).spawn()
    }

    /// Process inbound messages until the stream ends.
    ///
    /// Each message is first offered to waiting trivia sessions, then routed
    /// on its own task. When the stream ends, in-flight handlers are allowed
    /// to finish.
    pub async fn run<S>(&self, inbound: S)
    where
        S: Stream<Item = IncomingMessage> + Unpin,
    {
        let mut inbound = inbound;
        let mut handlers = JoinSet::new();

        loop {
            tokio::select! {
                next = inbound.next() => {
                    let Some(message) = next else { break; };
                    let resumed = self.ctx.replies.dispatch(&message);
                    if resumed > 0 {
                        debug!(participant = %message.author, resumed, "reply delivered to trivia");
                    }

                    let router = self.router.clone();
                    handlers.spawn(async move {
                        if let Err(e) = router.route(&message).await {
                            warn!(participant = %message.author, channel = %message.channel, error = %e, "message handling failed");
                        }
                    });
                }
                Some(joined) = handlers.join_next(), if !handlers.is_empty() => {
                    if let Err(e) = joined {
                        warn!(error = %e, "message handler panicked");
                    }
                }
            }
        }

        info!(in_flight = handlers.len(), "inbound stream closed");
        while let Some(joined) = handlers.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "message handler panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona;
    use crate::testing::TestHarness;
    use crate::transport::ParticipantId;

    const ALICE: ParticipantId = ParticipantId(100);

    #[tokio::test]
    async fn test_handle_runs_command() {
        let harness = TestHarness::new().await;
        let bot = harness.bot();

        bot.handle(&harness.message(ALICE, "Alice", "!introduce"))
            .await
            .unwrap();
        assert_eq!(harness.transport.texts(), vec![persona::INTRO_MESSAGE]);
        assert_eq!(bot.ledger().active_count(), 1);
    }

    #[tokio::test]
    async fn test_run_drains_handlers_on_close() {
        let harness = TestHarness::new().await;
        let bot = harness.bot();

        let messages = vec![
            harness.message(ALICE, "Alice", "!introduce"),
            harness.message(ALICE, "Alice", "!leaderboard"),
        ];
        bot.run(futures::stream::iter(messages)).await;

        let texts = harness.transport.texts();
        assert_eq!(texts.len(), 2);
        assert!(texts.contains(&persona::LEADERBOARD_EMPTY.to_string()));
    }
}
