//! Trivia, greeting and keyword content.
//!
//! The [`ContentStore`] loads the three collections once at startup. Only
//! trivia grows at runtime; every addition rewrites the whole trivia
//! collection through the provider. A crash mid-write can leave that
//! collection corrupt.

mod provider;
mod records;

pub use provider::{ContentKind, ContentPaths, ContentProvider, JsonFiles, MemoryContent};
pub use records::{fill_placeholder, Answer, KeywordRule, ResponseTemplate, TriviaItem, USER_PLACEHOLDER};

use crate::error::ContentError;
use crate::random::Dice;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Owner of the loaded content collections.
pub struct ContentStore {
    provider: Arc<dyn ContentProvider>,
    trivia: RwLock<Vec<TriviaItem>>,
    responses: Vec<ResponseTemplate>,
    keyword_rules: Vec<KeywordRule>,
}

impl ContentStore {
    /// Load every collection from `provider`.
    ///
    /// Missing, unreadable or malformed collections come back empty.
    pub async fn open(provider: Arc<dyn ContentProvider>) -> Self {
        let trivia = load_collection(provider.as_ref(), ContentKind::Trivia).await;
        let responses = load_collection(provider.as_ref(), ContentKind::Responses).await;
        let keyword_rules = load_collection(provider.as_ref(), ContentKind::Keywords).await;

        info!(
            trivia = trivia.len(),
            responses = responses.len(),
            keyword_rules = keyword_rules.len(),
            "content loaded"
        );

        Self {
            provider,
            trivia: RwLock::new(trivia),
            responses,
            keyword_rules,
        }
    }

    /// A uniformly random trivia item, or `None` if there are none.
    pub fn random_trivia(&self, dice: &Dice) -> Option<TriviaItem> {
        let trivia = self.trivia.read().unwrap_or_else(|e| e.into_inner());
        dice.choose(trivia.as_slice()).cloned()
    }

    /// Snapshot of all trivia items in stored order.
    pub fn trivia(&self) -> Vec<TriviaItem> {
        self.trivia.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn trivia_count(&self) -> usize {
        self.trivia.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn responses(&self) -> &[ResponseTemplate] {
        &self.responses
    }

    /// Keyword rules in stored order.
    pub fn keyword_rules(&self) -> &[KeywordRule] {
        &self.keyword_rules
    }

    /// Append a trivia item and rewrite the trivia collection.
    ///
    /// The item stays in memory even if the write fails.
    pub async fn add_trivia(&self, item: TriviaItem) -> Result<(), ContentError> {
        let text = {
            let mut trivia = self.trivia.write().unwrap_or_else(|e| e.into_inner());
            trivia.push(item);
            to_pretty_json(&*trivia)?
        };
        self.provider.store(ContentKind::Trivia, &text).await
    }
}

async fn load_collection<T: DeserializeOwned>(
    provider: &dyn ContentProvider,
    kind: ContentKind,
) -> Vec<T> {
    let text = match provider.load(kind).await {
        Ok(Some(text)) => text,
        Ok(None) => {
            debug!(collection = kind.name(), "no stored content");
            return Vec::new();
        }
        Err(e) => {
            warn!(collection = kind.name(), error = %e, "content unavailable, using empty collection");
            return Vec::new();
        }
    };

    match serde_json::from_str(&text) {
        Ok(records) => records,
        Err(e) => {
            warn!(collection = kind.name(), error = %e, "content malformed, using empty collection");
            Vec::new()
        }
    }
}

/// Pretty JSON with four-space indentation.
fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
