//! Bot configuration.

use std::ops::RangeInclusive;
use std::time::Duration;

/// Tunable behaviour of the bot.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Marker that starts a command, e.g. `!trivia`.
    pub command_prefix: char,

    /// How long a trivia session waits for the requester's answer.
    pub answer_window: Duration,

    /// Range of points granted for a correct trivia answer.
    pub trivia_reward: RangeInclusive<u64>,

    /// Time between reward sweeps over active participants.
    pub sweep_period: Duration,

    /// Points granted to the sweep winner.
    pub sweep_bonus: u64,

    /// Name of the channel where sweep results are announced.
    pub announce_channel: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            command_prefix: '!',
            answer_window: Duration::from_secs(90),
            trivia_reward: 1..=5,
            sweep_period: Duration::from_secs(168 * 60 * 60),
            sweep_bonus: 5,
            announce_channel: "quail-general-chat".to_string(),
        }
    }
}

impl BotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the command prefix.
    pub fn with_prefix(mut self, prefix: char) -> Self {
        self.command_prefix = prefix;
        self
    }

    /// Set how long trivia waits for an answer.
    pub fn with_answer_window(mut self, window: Duration) -> Self {
        self.answer_window = window;
        self
    }

    /// Set the trivia reward range. An empty range is clamped to its start.
    pub fn with_trivia_reward(mut self, reward: RangeInclusive<u64>) -> Self {
        let (lo, hi) = reward.into_inner();
        self.trivia_reward = lo..=hi.max(lo);
        self
    }

    /// Set the reward sweep period.
    pub fn with_sweep_period(mut self, period: Duration) -> Self {
        self.sweep_period = period;
        self
    }

    /// Set the sweep bonus.
    pub fn with_sweep_bonus(mut self, bonus: u64) -> Self {
        self.sweep_bonus = bonus;
        self
    }

    /// Set the announcement channel name.
    pub fn with_announce_channel(mut self, name: impl Into<String>) -> Self {
        self.announce_channel = name.into();
        self
    }
}
