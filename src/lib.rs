mod error;

pub use engine::{
    poll::PollState,
    quiz::{Band, Report, View},
};
pub use error::{Error, Result};

use std::sync::Arc;

use dashmap::DashMap;
use engine::quiz::Attempt;
use model::{
    poll::Poll,
    quiz::{AttemptRecord, Quiz},
    OptionId, PollId, QuizId, VoterId,
};
use store::{Cast, Catalog, Identity, VoteLedger};

type AttemptRegistry = DashMap<(VoterId, QuizId), Attempt>;

/// Coordinates the quiz and poll engines with their collaborators.
///
/// The store and identity collaborators are injected at construction; the
/// platform itself holds only the registry of in-flight quiz attempts, which
/// live from [`open_quiz`](Self::open_quiz) until submission is abandoned.
/// Every operation resolves the caller's session before touching state.
pub struct Platform<S, I> {
    store: S,
    identity: I,
    /// Container for all in-flight attempts, keyed by voter and quiz.
    attempts: AttemptRegistry,
}

impl<S, I> Platform<S, I>
where
    S: Catalog + VoteLedger,
    I: Identity,
{
    pub fn new(store: S, identity: I) -> Self {
        Self { store, identity, attempts: DashMap::new() }
    }

    async fn voter(&self, session: &str) -> Result<VoterId> {
        let voter = self.identity.resolve(session).await?;
        Ok(voter.ok_or(engine::Error::UnauthenticatedVoter)?)
    }

    /// Creates an attempt for the session's voter, or resumes the one
    /// already in flight for this quiz.
    pub async fn open_quiz(&self, session: &str, quiz: QuizId) -> Result<View> {
        let voter = self.voter(session).await?;
        let quiz = self.store.quiz(quiz).await?;
        let attempt = self
            .attempts
            .entry((voter, quiz.id))
            .or_insert_with(|| Attempt::new(Arc::clone(&quiz)));
        Ok(View::from(&*attempt))
    }

    pub async fn select_answer(
        &self,
        session: &str,
        quiz: QuizId,
        question: usize,
        choice: usize,
    ) -> Result<View> {
        let voter = self.voter(session).await?;
        let mut attempt = self.attempts.get_mut(&(voter, quiz)).ok_or(Error::NoAttempt)?;
        attempt.select_answer(question, choice)?;
        Ok(View::from(&*attempt))
    }

    pub async fn advance(&self, session: &str, quiz: QuizId) -> Result<View> {
        let voter = self.voter(session).await?;
        let mut attempt = self.attempts.get_mut(&(voter, quiz)).ok_or(Error::NoAttempt)?;
        attempt.advance();
        Ok(View::from(&*attempt))
    }

    pub async fn retreat(&self, session: &str, quiz: QuizId) -> Result<View> {
        let voter = self.voter(session).await?;
        let mut attempt = self.attempts.get_mut(&(voter, quiz)).ok_or(Error::NoAttempt)?;
        attempt.retreat();
        Ok(View::from(&*attempt))
    }

    /// Scores the attempt. The first successful submission also records a
    /// durable [`AttemptRecord`]; repeat submissions only return the report.
    pub async fn submit_quiz(&self, session: &str, quiz: QuizId) -> Result<Report> {
        let voter = self.voter(session).await?;
        let (report, fresh) = {
            let mut attempt = self.attempts.get_mut(&(voter, quiz)).ok_or(Error::NoAttempt)?;
            let fresh = !attempt.is_submitted();
            (attempt.submit()?, fresh)
        };

        if fresh {
            let record = AttemptRecord { quiz, voter, score: report.score, total: report.total };
            self.store.record_attempt(record).await?;
            log::info!("Voter {voter} scored {}/{} on quiz {quiz}.", report.score, report.total);
        }
        Ok(report)
    }

    pub async fn retake_quiz(&self, session: &str, quiz: QuizId) -> Result<View> {
        let voter = self.voter(session).await?;
        let mut attempt = self.attempts.get_mut(&(voter, quiz)).ok_or(Error::NoAttempt)?;
        attempt.retake();
        Ok(View::from(&*attempt))
    }

    /// Discards the session's attempt, if any. Submitted scores already
    /// recorded are unaffected.
    pub async fn abandon_quiz(&self, session: &str, quiz: QuizId) -> Result<()> {
        let voter = self.voter(session).await?;
        self.attempts.remove(&(voter, quiz));
        Ok(())
    }

    /// Side-effect-free poll snapshot. Anonymous reads are allowed; the
    /// voter's prior choice is only populated for a resolved session.
    pub async fn poll_state(&self, session: Option<&str>, poll: PollId) -> Result<PollState> {
        let poll = self.store.poll(poll).await?;
        let choice = match session {
            Some(session) => match self.identity.resolve(session).await? {
                Some(voter) => self.store.voter_choice(poll.id, voter).await?,
                None => None,
            },
            None => None,
        };
        Ok(engine::poll::state(&poll, choice))
    }

    /// Casts the session's vote and returns the updated snapshot. A repeat
    /// vote changes nothing and reports the previously recorded choice.
    pub async fn cast_vote(&self, session: &str, poll: PollId, option: OptionId) -> Result<PollState> {
        let voter = self.voter(session).await?;
        let current = self.store.poll(poll).await?;
        engine::poll::ensure_option(&current, option)?;
        drop(current);

        let choice = match self.store.commit_vote(poll, voter, option).await? {
            Cast::Counted => {
                log::info!("Counted vote for option {option} on poll {poll}.");
                option
            }
            Cast::Duplicate(prior) => {
                log::warn!("Voter {voter} has already voted on poll {poll}.");
                prior
            }
        };

        let current = self.store.poll(poll).await?;
        Ok(engine::poll::state(&current, Some(choice)))
    }

    /// Publishes a quiz. The author is forced to the resolved voter.
    pub async fn author_quiz(&self, session: &str, mut quiz: Quiz) -> Result<QuizId> {
        let voter = self.voter(session).await?;
        quiz.author = voter;
        let id = quiz.id;
        self.store.insert_quiz(quiz).await?;
        Ok(id)
    }

    /// Publishes a poll. The author is forced to the resolved voter.
    pub async fn author_poll(&self, session: &str, mut poll: Poll) -> Result<PollId> {
        let voter = self.voter(session).await?;
        poll.author = voter;
        let id = poll.id;
        self.store.insert_poll(poll).await?;
        Ok(id)
    }

    pub async fn quizzes(&self) -> Result<Vec<Arc<Quiz>>> {
        Ok(self.store.quizzes().await?)
    }

    pub async fn polls(&self) -> Result<Vec<Poll>> {
        Ok(self.store.polls().await?)
    }

    /// Recorded submissions for a quiz, in recording order.
    pub async fn quiz_attempts(&self, quiz: QuizId) -> Result<Vec<AttemptRecord>> {
        Ok(self.store.attempts(quiz).await?)
    }
}
