use std::{collections::BTreeSet, sync::Arc};

use dashmap::{mapref::entry::Entry, DashMap};
use model::{
    poll::Poll,
    quiz::{AttemptRecord, Quiz},
    OptionId, PollId, QuizId, VoterId,
};

use crate::{
    error::{Error, Result},
    Cast, Catalog, VoteLedger,
};

/// The most options or choices a single entity may carry.
const MAX_CHOICES: usize = 25;

/// In-memory store backing both the catalog and the vote ledger.
///
/// Vote commits serialize through the vote-record entry lock, so the
/// duplicate check, the counter increment, and the record write are a single
/// unit per `(poll, voter)` key.
pub struct MemoryStore {
    quizzes: DashMap<QuizId, Arc<Quiz>>,
    polls: DashMap<PollId, Poll>,
    votes: DashMap<(PollId, VoterId), OptionId>,
    attempts: DashMap<QuizId, Vec<AttemptRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            quizzes: DashMap::new(),
            polls: DashMap::new(),
            votes: DashMap::new(),
            attempts: DashMap::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_quiz(quiz: &Quiz) -> Result<()> {
    if quiz.questions.is_empty() {
        return Err(Error::BadInput);
    }

    let mut ids = BTreeSet::new();
    for question in &quiz.questions {
        let count = question.choices.len();
        if !(2..=MAX_CHOICES).contains(&count) || usize::from(question.answer) >= count {
            return Err(Error::BadInput);
        }
        if !ids.insert(question.id) {
            return Err(Error::BadInput);
        }
    }
    Ok(())
}

fn validate_poll(poll: &Poll) -> Result<()> {
    if !(2..=MAX_CHOICES).contains(&poll.options.len()) {
        return Err(Error::BadInput);
    }

    let mut ids = BTreeSet::new();
    for option in &poll.options {
        if !ids.insert(option.id) {
            return Err(Error::BadInput);
        }
    }
    Ok(())
}

impl Catalog for MemoryStore {
    async fn quiz(&self, id: QuizId) -> Result<Arc<Quiz>> {
        self.quizzes.get(&id).map(|quiz| Arc::clone(quiz.value())).ok_or(Error::NotFound)
    }

    async fn quizzes(&self) -> Result<Vec<Arc<Quiz>>> {
        Ok(self.quizzes.iter().map(|entry| Arc::clone(entry.value())).collect())
    }

    async fn insert_quiz(&self, quiz: Quiz) -> Result<()> {
        validate_quiz(&quiz)?;
        match self.quizzes.entry(quiz.id) {
            Entry::Occupied(_) => Err(Error::AlreadyExists),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(quiz));
                Ok(())
            }
        }
    }

    async fn poll(&self, id: PollId) -> Result<Poll> {
        self.polls.get(&id).map(|poll| poll.value().clone()).ok_or(Error::NotFound)
    }

    async fn polls(&self) -> Result<Vec<Poll>> {
        Ok(self.polls.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn insert_poll(&self, poll: Poll) -> Result<()> {
        validate_poll(&poll)?;
        match self.polls.entry(poll.id) {
            Entry::Occupied(_) => Err(Error::AlreadyExists),
            Entry::Vacant(entry) => {
                entry.insert(poll);
                Ok(())
            }
        }
    }

    async fn record_attempt(&self, record: AttemptRecord) -> Result<()> {
        self.attempts.entry(record.quiz).or_default().push(record);
        Ok(())
    }

    async fn attempts(&self, quiz: QuizId) -> Result<Vec<AttemptRecord>> {
        Ok(self.attempts.get(&quiz).map(|records| records.value().clone()).unwrap_or_default())
    }
}

impl VoteLedger for MemoryStore {
    async fn voter_choice(&self, poll: PollId, voter: VoterId) -> Result<Option<OptionId>> {
        Ok(self.votes.get(&(poll, voter)).map(|choice| *choice))
    }

    async fn commit_vote(&self, poll: PollId, voter: VoterId, option: OptionId) -> Result<Cast> {
        match self.votes.entry((poll, voter)) {
            Entry::Occupied(existing) => Ok(Cast::Duplicate(*existing.get())),
            Entry::Vacant(record) => {
                let mut target = self.polls.get_mut(&poll).ok_or(Error::NotFound)?;
                let tally = target
                    .options
                    .iter_mut()
                    .find(|candidate| candidate.id == option)
                    .ok_or(Error::BadInput)?;
                tally.votes += 1;
                drop(target);
                record.insert(option);
                Ok(Cast::Counted)
            }
        }
    }
}
