//! Per-message routing.
//!
//! Every message not written by the bot goes through, in order: greeting
//! check, keyword-question check, activity tracking, command dispatch. The
//! first two are independent and may both reply to the same message.

use crate::commands::CommandDispatcher;
use crate::content::KeywordRule;
use crate::context::BotContext;
use crate::error::BotError;
use crate::persona::{self, GREETINGS};
use crate::transport::IncomingMessage;
use tracing::debug;

/// Whether `content` contains any greeting phrase, ignoring case.
pub fn is_greeting(content: &str) -> bool {
    let lowered = content.to_lowercase();
    GREETINGS.iter().any(|greeting| lowered.contains(greeting.as_str()))
}

/// Lower-cased whitespace-separated tokens.
pub fn tokenize(content: &str) -> Vec<String> {
    content.to_lowercase().split_whitespace().map(str::to_string).collect()
}

/// The first rule sharing a keyword with a question.
///
/// Only messages containing `?` are questions. A token also matches with
/// surrounding punctuation removed, so `shrubbery?` hits `shrubbery`.
pub fn find_keyword_rule<'a>(rules: &'a [KeywordRule], content: &str) -> Option<&'a KeywordRule> {
    if !content.contains('?') {
        return None;
    }
    let tokens = tokenize(content);
    rules.iter().find(|rule| {
        tokens.iter().any(|token| {
            let bare = token.trim_matches(|c: char| c.is_ascii_punctuation());
            rule.has_keyword(token) || (!bare.is_empty() && rule.has_keyword(bare))
        })
    })
}

/// Routes inbound messages to replies, the ledger and commands.
#[derive(Clone)]
pub struct Router {
    ctx: BotContext,
    commands: CommandDispatcher,
}

impl Router {
    pub fn new(ctx: BotContext) -> Self {
        let commands = CommandDispatcher::new(ctx.clone());
        Self { ctx, commands }
    }

    /// Handle one inbound message.
    ///
    /// A failed greeting or keyword reply does not stop activity tracking or
    /// command dispatch; the first error is returned at the end.
    pub async fn route(&self, message: &IncomingMessage) -> Result<(), BotError> {
        if message.author == self.ctx.transport.bot_id() {
            return Ok(());
        }

        let greeted = self.greet(message).await;
        let answered = self.answer_question(message).await;

        self.ctx.ledger.mark_active(message.author);

        let dispatched = self.commands.dispatch(message).await;
        greeted.and(answered).and(dispatched)
    }

    async fn greet(&self, message: &IncomingMessage) -> Result<(), BotError> {
        if !is_greeting(&message.content) {
            return Ok(());
        }

        let reply = match self.ctx.dice.choose(self.ctx.content.responses()) {
            Some(template) => template.render(&message.author_name),
            None => persona::fallback_greeting(&message.author_name),
        };
        debug!(participant = %message.author, "greeting");
        self.ctx.transport.send(message.channel, &reply).await?;
        Ok(())
    }

    async fn answer_question(&self, message: &IncomingMessage) -> Result<(), BotError> {
        let Some(rule) = find_keyword_rule(self.ctx.content.keyword_rules(), &message.content)
        else {
            return Ok(());
        };

        debug!(participant = %message.author, keywords = ?rule.keywords, "keyword rule matched");
        for segment in rule.render(&message.author_name) {
            self.ctx.transport.send(message.channel, &segment).await?;
        }
        Ok(())
    }
}
