//! Content record types.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the speaker's display name.
pub const USER_PLACEHOLDER: &str = "{user}";

/// Substitute every placeholder in `text` with `name`.
pub fn fill_placeholder(text: &str, name: &str) -> String {
    text.replace(USER_PLACEHOLDER, name)
}

/// A trivia question with its answer and a fact revealed on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaItem {
    pub question: String,
    pub answer: String,
    pub fun_fact: String,
}

impl TriviaItem {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        fun_fact: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            fun_fact: fun_fact.into(),
        }
    }

    /// Case-insensitive exact comparison. No trimming.
    pub fn is_correct(&self, reply: &str) -> bool {
        reply.to_lowercase() == self.answer.to_lowercase()
    }
}

/// A canned greeting reply, possibly containing [`USER_PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseTemplate(pub String);

impl ResponseTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn render(&self, name: &str) -> String {
        fill_placeholder(&self.0, name)
    }
}

/// The reply attached to a keyword rule: one message or several in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Lines(Vec<String>),
}

impl Answer {
    /// The messages to send, in order.
    pub fn segments(&self) -> &[String] {
        match self {
            Answer::Text(text) => std::slice::from_ref(text),
            Answer::Lines(lines) => lines,
        }
    }
}

/// Answers a question when any of its keywords appears in the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    pub answer: Answer,
}

impl KeywordRule {
    pub fn new(keywords: impl IntoIterator<Item = impl Into<String>>, answer: Answer) -> Self {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            answer,
        }
    }

    /// Whether `token` is one of this rule's keywords.
    pub fn has_keyword(&self, token: &str) -> bool {
        self.keywords.iter().any(|k| k == token)
    }

    /// The answer messages with the placeholder filled in.
    pub fn render(&self, name: &str) -> Vec<String> {
        self.answer
            .segments()
            .iter()
            .map(|segment| fill_placeholder(segment, name))
            .collect()
    }
}
