//! Startup settings read from the environment.

use anyhow::{Context, Result};
use quailbert_core::{BotConfig, ContentPaths};
use std::time::Duration;

/// Everything the console front end needs to start a bot.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bot: BotConfig,
    pub content: ContentPaths,
}

impl Settings {
    /// Read settings from `QUAILBERT_*` variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut bot = BotConfig::default();

        if let Some(prefix) = lookup("QUAILBERT_PREFIX") {
            let mut chars = prefix.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => bot = bot.with_prefix(c),
                _ => anyhow::bail!("QUAILBERT_PREFIX must be a single character, got {prefix:?}"),
            }
        }
        if let Some(secs) = lookup("QUAILBERT_TRIVIA_SECS") {
            bot = bot.with_answer_window(parse_secs("QUAILBERT_TRIVIA_SECS", &secs)?);
        }
        if let Some(secs) = lookup("QUAILBERT_SWEEP_SECS") {
            bot = bot.with_sweep_period(parse_secs("QUAILBERT_SWEEP_SECS", &secs)?);
        }
        if let Some(channel) = lookup("QUAILBERT_CHANNEL") {
            bot = bot.with_announce_channel(channel);
        }

        let content_dir = lookup("QUAILBERT_CONTENT_DIR").unwrap_or_else(|| ".".to_string());

        Ok(Self {
            bot,
            content: ContentPaths::new(content_dir),
        })
    }
}

fn parse_secs(key: &str, value: &str) -> Result<Duration> {
    let secs: u64 = value
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a whole number of seconds, got {value:?}"))?;
    anyhow::ensure!(secs > 0, "{key} must be greater than zero");
    Ok(Duration::from_secs(secs))
}
