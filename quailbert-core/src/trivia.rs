//! Timed trivia sessions.
//!
//! A session picks a question, announces it, then suspends until the
//! requester answers in the same channel or the answer window closes. The
//! wait is a registered [`PendingReply`](crate::replies::PendingReply), so
//! other messages keep flowing while a session is open and any number of
//! sessions can be open at once.

use crate::content::TriviaItem;
use crate::context::BotContext;
use crate::error::TransportError;
use crate::persona;
use crate::transport::{ChannelId, ParticipantId};
use tokio::time::Instant;
use tracing::{debug, info};

/// How a trivia session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriviaOutcome {
    /// Right answer; `reward` points were granted.
    Correct { reward: u64, fun_fact: String },
    /// Wrong answer; no points.
    Incorrect { answer: String },
    /// Nobody answered in time; no points.
    TimedOut { answer: String },
    /// The trivia collection is empty.
    NoQuestionsAvailable,
}

impl TriviaOutcome {
    /// The message telling the requester how it went.
    pub fn message(&self, requester_name: &str, prefix: char) -> String {
        match self {
            TriviaOutcome::Correct { reward, fun_fact } => {
                persona::trivia_correct(requester_name, fun_fact, *reward)
            }
            TriviaOutcome::Incorrect { answer } => persona::trivia_incorrect(answer),
            TriviaOutcome::TimedOut { answer } => persona::trivia_timed_out(answer),
            TriviaOutcome::NoQuestionsAvailable => persona::no_trivia(prefix),
        }
    }
}

/// One live question awaiting a single reply.
#[derive(Debug, Clone)]
pub struct TriviaSession {
    pub question: TriviaItem,
    pub requester: ParticipantId,
    pub channel: ChannelId,
    pub deadline: Instant,
}

/// Runs trivia sessions against the shared ledger.
#[derive(Clone)]
pub struct TriviaEngine {
    ctx: BotContext,
}

impl TriviaEngine {
    pub fn new(ctx: BotContext) -> Self {
        Self { ctx }
    }

    /// Ask `requester` a random question in `channel` and grade the reply.
    ///
    /// Only a failure to announce the question is an error.
    pub async fn run_session(
        &self,
        requester: ParticipantId,
        channel: ChannelId,
    ) -> Result<TriviaOutcome, TransportError> {
        let Some(question) = self.ctx.content.random_trivia(&self.ctx.dice) else {
            debug!(participant = %requester, "trivia requested with no questions");
            return Ok(TriviaOutcome::NoQuestionsAvailable);
        };

        // Listen before announcing so a fast reply cannot slip past.
        let pending = self.ctx.replies.register(requester, channel);
        let session = TriviaSession {
            question,
            requester,
            channel,
            deadline: Instant::now() + self.ctx.config.answer_window,
        };

        self.ctx
            .transport
            .send(channel, &persona::trivia_question(&session.question.question))
            .await?;

        let outcome = match pending.wait_until(session.deadline).await {
            Some(reply) => self.grade(&session, &reply.content),
            None => TriviaOutcome::TimedOut {
                answer: session.question.answer.clone(),
            },
        };

        info!(participant = %requester, channel = %channel, outcome = ?outcome, "trivia session finished");
        Ok(outcome)
    }

    fn grade(&self, session: &TriviaSession, reply: &str) -> TriviaOutcome {
        if session.question.is_correct(reply) {
            let reward = self.ctx.dice.roll(self.ctx.config.trivia_reward.clone());
            self.ctx.ledger.award(session.requester, reward);
            TriviaOutcome::Correct {
                reward,
                fun_fact: session.question.fun_fact.clone(),
            }
        } else {
            TriviaOutcome::Incorrect {
                answer: session.question.answer.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestHarness, TAVERN};
    use crate::transport::IncomingMessage;
    use std::time::Duration;

    const ALICE: ParticipantId = ParticipantId(100);
    const BOB: ParticipantId = ParticipantId(200);

    fn answer(author: ParticipantId, content: &str) -> IncomingMessage {
        IncomingMessage::new(author, "player", TAVERN, content)
    }

    /// Yield until `count` sessions are listening.
    async fn until_listening(harness: &TestHarness, count: usize) {
        while harness.ctx.replies.pending() < count {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let harness = TestHarness::new().await;
        let engine = TriviaEngine::new(harness.ctx.clone());

        let outcome = engine.run_session(ALICE, TAVERN).await.unwrap();
        assert_eq!(outcome, TriviaOutcome::NoQuestionsAvailable);
        assert!(harness.transport.sent().is_empty());
        assert!(harness.ctx.ledger.is_empty());
    }

    #[tokio::test]
    async fn test_correct_answer_awards_points() {
        let harness = TestHarness::with_trivia(&[("2+2?", "4", "math")]).await;
        let engine = TriviaEngine::new(harness.ctx.clone());

        let session = tokio::spawn({
            let engine = engine.clone();
            async move { engine.run_session(ALICE, TAVERN).await }
        });
        until_listening(&harness, 1).await;
        harness.ctx.replies.dispatch(&answer(ALICE, "4"));

        let outcome = session.await.unwrap().unwrap();
        let TriviaOutcome::Correct { reward, fun_fact } = outcome else {
            panic!("expected a correct outcome, got {outcome:?}");
        };
        assert!((1..=5).contains(&reward));
        assert_eq!(fun_fact, "math");
        assert_eq!(harness.ctx.ledger.points(ALICE), Some(reward));
        assert_eq!(harness.transport.texts(), vec!["Trivia from Sir Quailbert: 2+2?"]);
    }

    #[tokio::test]
    async fn test_answer_is_case_insensitive() {
        let harness = TestHarness::with_trivia(&[("Bird?", "Quail", "They run.")]).await;
        let engine = TriviaEngine::new(harness.ctx.clone());

        let session = tokio::spawn({
            let engine = engine.clone();
            async move { engine.run_session(ALICE, TAVERN).await }
        });
        until_listening(&harness, 1).await;
        harness.ctx.replies.dispatch(&answer(ALICE, "qUAIL"));

        let outcome = session.await.unwrap().unwrap();
        assert!(matches!(outcome, TriviaOutcome::Correct { .. }));
    }

    #[tokio::test]
    async fn test_wrong_answer_reveals() {
        let harness = TestHarness::with_trivia(&[("2+2?", "4", "math")]).await;
        let engine = TriviaEngine::new(harness.ctx.clone());

        let session = tokio::spawn({
            let engine = engine.clone();
            async move { engine.run_session(ALICE, TAVERN).await }
        });
        until_listening(&harness, 1).await;
        // Someone else answering does not end Alice's session.
        harness.ctx.replies.dispatch(&answer(BOB, "4"));
        harness.ctx.replies.dispatch(&answer(ALICE, "5"));

        let outcome = session.await.unwrap().unwrap();
        assert_eq!(
            outcome,
            TriviaOutcome::Incorrect {
                answer: "4".to_string()
            }
        );
        assert!(harness.ctx.ledger.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_reveals() {
        let harness = TestHarness::with_trivia(&[("2+2?", "4", "math")]).await;
        let engine = TriviaEngine::new(harness.ctx.clone());

        let started = Instant::now();
        let outcome = engine.run_session(ALICE, TAVERN).await.unwrap();

        assert_eq!(
            outcome,
            TriviaOutcome::TimedOut {
                answer: "4".to_string()
            }
        );
        assert!(started.elapsed() >= Duration::from_secs(90));
        assert!(started.elapsed() < Duration::from_secs(91));
        assert!(harness.ctx.ledger.is_empty());
        assert_eq!(harness.ctx.replies.pending(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_sessions_are_independent() {
        let harness = TestHarness::with_trivia(&[("2+2?", "4", "math")]).await;
        let engine = TriviaEngine::new(harness.ctx.clone());

        let alice = tokio::spawn({
            let engine = engine.clone();
            async move { engine.run_session(ALICE, TAVERN).await }
        });
        let bob = tokio::spawn({
            let engine = engine.clone();
            async move { engine.run_session(BOB, TAVERN).await }
        });
        until_listening(&harness, 2).await;

        harness.ctx.replies.dispatch(&answer(BOB, "nope"));
        harness.ctx.replies.dispatch(&answer(ALICE, "4"));

        assert!(matches!(
            alice.await.unwrap().unwrap(),
            TriviaOutcome::Correct { .. }
        ));
        assert!(matches!(
            bob.await.unwrap().unwrap(),
            TriviaOutcome::Incorrect { .. }
        ));
        assert!(harness.ctx.ledger.points(ALICE).is_some());
        assert_eq!(harness.ctx.ledger.points(BOB), None);
    }

    #[test]
    fn test_outcome_messages() {
        let correct = TriviaOutcome::Correct {
            reward: 1,
            fun_fact: "Quails lay speckled eggs.".to_string(),
        };
        assert_eq!(
            correct.message("Robin", '!'),
            "All right Quail! You are correct, Robin! Quails lay speckled eggs. \
             Sir Quailbert grants you 1 Shrubbery Cent as a reward!"
        );
        assert!(TriviaOutcome::TimedOut {
            answer: "4".to_string()
        }
        .message("Robin", '!')
        .contains("'4'"));
    }
}
