//! Prefixed chat commands.
//!
//! `introduce`, `trivia`, `addtrivia <question> <answer> <fun_fact...>` and
//! `leaderboard`. Anything else after the prefix is ignored without a reply.

use crate::content::TriviaItem;
use crate::context::BotContext;
use crate::error::{BotError, CommandError};
use crate::persona;
use crate::transport::IncomingMessage;
use crate::trivia::TriviaEngine;
use tracing::{debug, info};

/// A recognized command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Introduce,
    Trivia,
    AddTrivia {
        question: String,
        answer: String,
        fun_fact: String,
    },
    Leaderboard,
}

impl Command {
    /// Parse a message. `Ok(None)` if it is not a recognized command.
    pub fn parse(prefix: char, content: &str) -> Result<Option<Command>, CommandError> {
        let Some(body) = content.strip_prefix(prefix) else {
            return Ok(None);
        };
        let (name, args) = match body.find(char::is_whitespace) {
            Some(i) => (&body[..i], &body[i..]),
            None => (body, ""),
        };

        let command = match name {
            "introduce" => Command::Introduce,
            "trivia" => Command::Trivia,
            "leaderboard" => Command::Leaderboard,
            "addtrivia" => parse_add_trivia(args)?,
            _ => return Ok(None),
        };
        Ok(Some(command))
    }
}

fn parse_add_trivia(args: &str) -> Result<Command, CommandError> {
    let (question, rest) = next_arg(args)?.ok_or(CommandError::MissingArgument("question"))?;
    let (answer, rest) = next_arg(rest)?.ok_or(CommandError::MissingArgument("answer"))?;
    let fun_fact = rest.trim();
    if fun_fact.is_empty() {
        return Err(CommandError::MissingArgument("fun_fact"));
    }

    Ok(Command::AddTrivia {
        question,
        answer,
        fun_fact: fun_fact.to_string(),
    })
}

/// Split off one argument: a `"quoted phrase"` or a bare word.
fn next_arg(input: &str) -> Result<Option<(String, &str)>, CommandError> {
    let input = input.trim_start();
    if input.is_empty() {
        return Ok(None);
    }

    if let Some(quoted) = input.strip_prefix('"') {
        let end = quoted.find('"').ok_or(CommandError::UnclosedQuote)?;
        return Ok(Some((quoted[..end].to_string(), &quoted[end + 1..])));
    }

    let end = input.find(char::is_whitespace).unwrap_or(input.len());
    Ok(Some((input[..end].to_string(), &input[end..])))
}

/// Executes commands for the router.
#[derive(Clone)]
pub struct CommandDispatcher {
    ctx: BotContext,
    trivia: TriviaEngine,
}

impl CommandDispatcher {
    pub fn new(ctx: BotContext) -> Self {
        let trivia = TriviaEngine::new(ctx.clone());
        Self { ctx, trivia }
    }

    /// Run the command in `message`, if there is one.
    pub async fn dispatch(&self, message: &IncomingMessage) -> Result<(), BotError> {
        let Some(command) = Command::parse(self.ctx.config.command_prefix, &message.content)? else {
            return Ok(());
        };
        debug!(participant = %message.author, command = ?command, "dispatching command");

        match command {
            Command::Introduce => self.say(message, persona::INTRO_MESSAGE).await,
            Command::Trivia => {
                let outcome = self
                    .trivia
                    .run_session(message.author, message.channel)
                    .await?;
                let reply = outcome.message(&message.author_name, self.ctx.config.command_prefix);
                self.say(message, &reply).await
            }
            Command::AddTrivia {
                question,
                answer,
                fun_fact,
            } => {
                let reply = persona::trivia_added(&question, &answer, &message.author_name);
                self.ctx
                    .content
                    .add_trivia(TriviaItem::new(question, answer, fun_fact))
                    .await?;
                info!(participant = %message.author, total = self.ctx.content.trivia_count(), "trivia added");
                self.say(message, &reply).await
            }
            Command::Leaderboard => {
                let reply = self.render_leaderboard().await?;
                self.say(message, &reply).await
            }
        }
    }

    /// The ranked leaderboard, one line per participant.
    pub async fn render_leaderboard(&self) -> Result<String, BotError> {
        let ranked = self.ctx.ledger.rank();
        if ranked.is_empty() {
            return Ok(persona::LEADERBOARD_EMPTY.to_string());
        }

        let mut lines = vec![persona::LEADERBOARD_HEADER.to_string()];
        for (i, (participant, points)) in ranked.into_iter().enumerate() {
            let name = self.ctx.transport.fetch_display_name(participant).await?;
            lines.push(persona::leaderboard_line(i + 1, &name, points));
        }
        Ok(lines.join("\n"))
    }

    async fn say(&self, message: &IncomingMessage, text: &str) -> Result<(), BotError> {
        self.ctx.transport.send(message.channel, text).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentKind;
    use crate::testing::TestHarness;
    use crate::transport::ParticipantId;

    const ALICE: ParticipantId = ParticipantId(100);
    const BOB: ParticipantId = ParticipantId(200);

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse('!', "!introduce"), Ok(Some(Command::Introduce)));
        assert_eq!(Command::parse('!', "!trivia please"), Ok(Some(Command::Trivia)));
        assert_eq!(Command::parse('!', "!leaderboard"), Ok(Some(Command::Leaderboard)));
    }

    #[test]
    fn test_parse_ignores_non_commands() {
        assert_eq!(Command::parse('!', "trivia"), Ok(None));
        assert_eq!(Command::parse('!', "!dance"), Ok(None));
        assert_eq!(Command::parse('!', "! trivia"), Ok(None));
        assert_eq!(Command::parse('!', "!Trivia"), Ok(None));
        assert_eq!(Command::parse('?', "!trivia"), Ok(None));
    }

    #[test]
    fn test_parse_add_trivia() {
        let parsed = Command::parse(
            '!',
            r#"!addtrivia "What is the airspeed of a swallow?" "African or European" It depends on the swallow.  "#,
        );
        assert_eq!(
            parsed,
            Ok(Some(Command::AddTrivia {
                question: "What is the airspeed of a swallow?".to_string(),
                answer: "African or European".to_string(),
                fun_fact: "It depends on the swallow.".to_string(),
            }))
        );

        let bare = Command::parse('!', "!addtrivia 2+2? 4 basic math");
        assert_eq!(
            bare,
            Ok(Some(Command::AddTrivia {
                question: "2+2?".to_string(),
                answer: "4".to_string(),
                fun_fact: "basic math".to_string(),
            }))
        );
    }

    #[test]
    fn test_parse_add_trivia_missing_arguments() {
        assert_eq!(
            Command::parse('!', "!addtrivia"),
            Err(CommandError::MissingArgument("question"))
        );
        assert_eq!(
            Command::parse('!', "!addtrivia q"),
            Err(CommandError::MissingArgument("answer"))
        );
        assert_eq!(
            Command::parse('!', "!addtrivia q a   "),
            Err(CommandError::MissingArgument("fun_fact"))
        );
        assert_eq!(
            Command::parse('!', "!addtrivia \"never closed"),
            Err(CommandError::UnclosedQuote)
        );
    }

    #[tokio::test]
    async fn test_introduce() {
        let harness = TestHarness::new().await;
        let dispatcher = CommandDispatcher::new(harness.ctx.clone());

        let msg = harness.message(ALICE, "Alice", "!introduce");
        dispatcher.dispatch(&msg).await.unwrap();
        assert_eq!(harness.transport.texts(), vec![persona::INTRO_MESSAGE]);
    }

    #[tokio::test]
    async fn test_add_trivia_persists_and_acknowledges() {
        let harness = TestHarness::new().await;
        let dispatcher = CommandDispatcher::new(harness.ctx.clone());

        let msg = harness.message(ALICE, "Alice", r#"!addtrivia "Best bird?" quail Obviously."#);
        dispatcher.dispatch(&msg).await.unwrap();

        assert_eq!(harness.ctx.content.trivia_count(), 1);
        let stored = harness.content.get(ContentKind::Trivia).expect("trivia persisted");
        assert!(stored.contains("Best bird?"));
        assert_eq!(
            harness.transport.texts(),
            vec!["New trivia added: 'Best bird?' with answer 'quail'. Thank you, Alice!"]
        );
    }

    #[tokio::test]
    async fn test_malformed_command_is_silent() {
        let harness = TestHarness::new().await;
        let dispatcher = CommandDispatcher::new(harness.ctx.clone());

        let msg = harness.message(ALICE, "Alice", "!addtrivia only-a-question");
        let err = dispatcher.dispatch(&msg).await.unwrap_err();
        assert!(matches!(err, BotError::Command(CommandError::MissingArgument("answer"))));
        assert!(harness.transport.sent().is_empty());
        assert_eq!(harness.ctx.content.trivia_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_leaderboard() {
        let harness = TestHarness::new().await;
        let dispatcher = CommandDispatcher::new(harness.ctx.clone());

        let msg = harness.message(ALICE, "Alice", "!leaderboard");
        dispatcher.dispatch(&msg).await.unwrap();
        assert_eq!(harness.transport.texts(), vec![persona::LEADERBOARD_EMPTY]);
    }

    #[tokio::test]
    async fn test_leaderboard_ranks_and_resolves_names() {
        let harness = TestHarness::new().await;
        harness.transport.set_name(ALICE, "Alice");
        harness.transport.set_name(BOB, "Sir Robin");
        harness.ctx.ledger.award(ALICE, 1);
        harness.ctx.ledger.award(BOB, 7);

        let dispatcher = CommandDispatcher::new(harness.ctx.clone());
        assert_eq!(
            dispatcher.render_leaderboard().await.unwrap(),
            "**Legendary Quail Leaderboard**\n\
             1. Sir Robin - 7 Shrubbery Cents\n\
             2. Alice - 1 Shrubbery Cent"
        );
    }

    #[tokio::test]
    async fn test_leaderboard_lookup_failure_propagates() {
        let harness = TestHarness::new().await;
        harness.ctx.ledger.award(ParticipantId(999), 3);

        let dispatcher = CommandDispatcher::new(harness.ctx.clone());
        let err = dispatcher.render_leaderboard().await.unwrap_err();
        assert!(matches!(err, BotError::Transport(_)));
    }
}
