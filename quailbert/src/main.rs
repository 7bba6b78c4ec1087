//! Sir Quailbert console front end.
//!
//! Runs the bot against stdin/stdout as a single chat room, for local play
//! and manual testing:
//!
//! ```bash
//! QUAILBERT_CONTENT_DIR=content cargo run -p quailbert
//! robin: hello there
//! !trivia
//! ```
//!
//! Type `/quit` or close stdin to exit.

mod console;
mod settings;

use anyhow::Result;
use console::ConsoleTransport;
use quailbert_core::{Bot, Dice, JsonFiles};
use settings::Settings;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_env()?;
    info!(content_dir = %settings.content.base_dir.display(), "starting Sir Quailbert");

    let transport = Arc::new(ConsoleTransport::new(settings.bot.announce_channel.clone()));
    let content = Arc::new(JsonFiles::new(settings.content.clone()));
    let bot = Bot::new(settings.bot, transport.clone(), content, Dice::from_entropy()).await;

    let (inbound, rx) = mpsc::channel(64);
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim() == "/quit" => break,
                Ok(Some(line)) => {
                    let Some(message) = transport.parse_line(&line) else {
                        continue;
                    };
                    if inbound.send(message).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "failed to read stdin");
                    break;
                }
            }
        }
    });

    let sweeps = bot.spawn_reward_sweeps();
    bot.run(ReceiverStream::new(rx)).await;

    sweeps.abort();
    reader.await?;
    println!("Sir Quailbert wanders off into the hedgerow. Farewell!");
    Ok(())
}
