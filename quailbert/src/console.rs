//! A single-channel chat room on stdin/stdout.
//!
//! Each input line is one message. `name: text` speaks as `name`; a bare
//! line speaks as the last speaker (initially `traveler`).

use async_trait::async_trait;
use quailbert_core::persona::NPC_NAME;
use quailbert_core::{ChannelId, IncomingMessage, ParticipantId, Transport, TransportError};
use std::collections::HashMap;
use std::sync::Mutex;

/// The console's only channel.
pub const ROOM: ChannelId = ChannelId(1);

const BOT_ID: ParticipantId = ParticipantId(0);

#[derive(Default)]
struct Roster {
    ids: HashMap<String, ParticipantId>,
    names: HashMap<ParticipantId, String>,
}

/// Prints what the bot says and assigns identities to console speakers.
pub struct ConsoleTransport {
    room_name: String,
    roster: Mutex<Roster>,
    last_speaker: Mutex<String>,
}

impl ConsoleTransport {
    pub fn new(room_name: impl Into<String>) -> Self {
        Self {
            room_name: room_name.into(),
            roster: Mutex::new(Roster::default()),
            last_speaker: Mutex::new("traveler".to_string()),
        }
    }

    /// Turn an input line into a message. `None` for blank lines.
    pub fn parse_line(&self, line: &str) -> Option<IncomingMessage> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return None;
        }

        let mut last = self.last_speaker.lock().unwrap_or_else(|e| e.into_inner());
        let content = match line.split_once(": ") {
            Some((name, text)) if is_speaker_name(name) => {
                *last = name.to_string();
                text
            }
            _ => line,
        };

        let name = last.clone();
        let author = self.participant(&name);
        Some(IncomingMessage::new(author, name, ROOM, content))
    }

    fn participant(&self, name: &str) -> ParticipantId {
        let mut roster = self.roster.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(&id) = roster.ids.get(name) {
            return id;
        }
        let id = ParticipantId(roster.ids.len() as u64 + 1);
        roster.ids.insert(name.to_string(), id);
        roster.names.insert(id, name.to_string());
        id
    }
}

/// Short single-word names only, so `note: remember this` style text with
/// spaces before the colon stays a plain message.
fn is_speaker_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 32
        && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

#[async_trait]
impl Transport for ConsoleTransport {
    fn bot_id(&self) -> ParticipantId {
        BOT_ID
    }

    async fn send(&self, channel: ChannelId, text: &str) -> Result<(), TransportError> {
        if channel != ROOM {
            return Err(TransportError::Send {
                channel: channel.to_string(),
                reason: "no such channel".to_string(),
            });
        }
        for line in text.lines() {
            println!("[{}] {NPC_NAME}: {line}", self.room_name);
        }
        Ok(())
    }

    async fn fetch_display_name(
        &self,
        participant: ParticipantId,
    ) -> Result<String, TransportError> {
        let roster = self.roster.lock().unwrap_or_else(|e| e.into_inner());
        roster
            .names
            .get(&participant)
            .cloned()
            .ok_or_else(|| TransportError::Lookup {
                participant: participant.to_string(),
                reason: "never spoke in this console".to_string(),
            })
    }

    async fn find_channel(&self, name: &str) -> Option<ChannelId> {
        (name == self.room_name).then_some(ROOM)
    }
}
