//! Shared handles every component works against.

use crate::config::BotConfig;
use crate::content::ContentStore;
use crate::ledger::Ledger;
use crate::random::Dice;
use crate::replies::ReplyWaiters;
use crate::transport::Transport;
use std::sync::Arc;

/// Cheap-to-clone bundle of the bot's shared state.
///
/// The ledger and reply registry are the only mutable state shared between
/// message handling and the reward sweep.
#[derive(Clone)]
pub struct BotContext {
    pub config: Arc<BotConfig>,
    pub transport: Arc<dyn Transport>,
    pub content: Arc<ContentStore>,
    pub ledger: Ledger,
    pub dice: Dice,
    pub replies: ReplyWaiters,
}

impl BotContext {
    pub fn new(
        config: BotConfig,
        transport: Arc<dyn Transport>,
        content: ContentStore,
        dice: Dice,
    ) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            content: Arc::new(content),
            ledger: Ledger::new(),
            dice,
            replies: ReplyWaiters::new(),
        }
    }
}
