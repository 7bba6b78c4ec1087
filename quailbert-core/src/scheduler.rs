//! Periodic reward sweep over recently active participants.

use crate::context::BotContext;
use crate::error::TransportError;
use crate::persona;
use crate::transport::ParticipantId;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Result of a sweep that found someone to reward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepAward {
    pub winner: ParticipantId,
    pub bonus: u64,
    /// Whether the announcement channel was found and the message sent.
    pub announced: bool,
}

/// Grants a bonus to one random active participant every period.
#[derive(Clone)]
pub struct RewardScheduler {
    ctx: BotContext,
}

impl RewardScheduler {
    pub fn new(ctx: BotContext) -> Self {
        Self { ctx }
    }

    /// Run a single sweep. `Ok(None)` when nobody was active.
    ///
    /// The ledger is updated before anything is sent, so a transport failure
    /// never loses the award.
    pub async fn sweep(&self) -> Result<Option<SweepAward>, TransportError> {
        let mut active: Vec<ParticipantId> = self.ctx.ledger.drain_active().into_iter().collect();
        // HashSet order is not stable across runs; keep seeded dice meaningful.
        active.sort();

        let Some(&winner) = self.ctx.dice.choose(active.as_slice()) else {
            return Ok(None);
        };
        let bonus = self.ctx.config.sweep_bonus;
        let total = self.ctx.ledger.award(winner, bonus);
        info!(participant = %winner, bonus, total, candidates = active.len(), "reward sweep");

        let name = self.ctx.transport.fetch_display_name(winner).await?;
        let announced = match self
            .ctx
            .transport
            .find_channel(&self.ctx.config.announce_channel)
            .await
        {
            Some(channel) => {
                self.ctx
                    .transport
                    .send(channel, &persona::sweep_announcement(&name, bonus))
                    .await?;
                true
            }
            None => {
                debug!(channel = %self.ctx.config.announce_channel, "announcement channel not found");
                false
            }
        };

        Ok(Some(SweepAward {
            winner,
            bonus,
            announced,
        }))
    }

    /// Sweep now and then once per configured period, forever.
    pub fn spawn(self) -> JoinHandle<()> {
        let period = self.ctx.config.sweep_period.max(Duration::from_millis(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match self.sweep().await {
                    Ok(Some(_)) => {}
                    Ok(None) => debug!("reward sweep skipped, nobody active"),
                    Err(e) => warn!(error = %e, "reward sweep announcement failed"),
                }
            }
        })
    }
}
