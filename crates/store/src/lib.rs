pub mod error;
pub mod memory;
pub mod session;

use std::sync::Arc;

use model::{
    poll::Poll,
    quiz::{AttemptRecord, Quiz},
    OptionId, PollId, QuizId, VoterId,
};

pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use session::SessionTable;

/// Outcome of committing a vote to the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cast {
    /// First vote from this voter on this poll; exactly one counter moved.
    Counted,
    /// A record already existed; nothing changed.
    Duplicate(OptionId),
}

/// Source of published quizzes and polls, plus the authoring sink.
///
/// Entities are validated on insertion and read-only afterwards. Submitted
/// quiz attempts are recorded here as well.
pub trait Catalog {
    async fn quiz(&self, id: QuizId) -> Result<Arc<Quiz>>;
    async fn quizzes(&self) -> Result<Vec<Arc<Quiz>>>;
    async fn insert_quiz(&self, quiz: Quiz) -> Result<()>;
    async fn poll(&self, id: PollId) -> Result<Poll>;
    async fn polls(&self) -> Result<Vec<Poll>>;
    async fn insert_poll(&self, poll: Poll) -> Result<()>;
    async fn record_attempt(&self, record: AttemptRecord) -> Result<()>;
    async fn attempts(&self, quiz: QuizId) -> Result<Vec<AttemptRecord>>;
}

/// Durable one-vote-per-voter ledger.
pub trait VoteLedger {
    /// The option previously recorded for `(poll, voter)`, if any.
    async fn voter_choice(&self, poll: PollId, voter: VoterId) -> Result<Option<OptionId>>;

    /// Records the vote and increments the option's tally.
    ///
    /// Atomic with respect to the `(poll, voter)` key: the duplicate check,
    /// the increment, and the record write happen as one unit, so a voter can
    /// never be counted twice and a failed call changes nothing.
    async fn commit_vote(&self, poll: PollId, voter: VoterId, option: OptionId) -> Result<Cast>;
}

/// Resolves a session token to a stable voter identity.
pub trait Identity {
    async fn resolve(&self, session: &str) -> Result<Option<VoterId>>;
}
