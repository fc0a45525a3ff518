use alloc::{string::String, vec::Vec};
use serde::Serialize;

use crate::error::{Error, Result};
use model::{
    poll::{Poll, PollOption},
    OptionId, PollId,
};

/// One option with its derived share of the total.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OptionTally {
    pub id: OptionId,
    pub text: String,
    pub votes: u64,
    /// `votes / total`, or `0` when nobody has voted yet.
    pub share: f64,
}

/// Side-effect-free snapshot of a poll as one voter sees it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PollState {
    pub id: PollId,
    pub question: String,
    pub options: Vec<OptionTally>,
    pub total: u64,
    /// The voter's prior choice, if the caller resolved one.
    pub voter_choice: Option<OptionId>,
    /// Strictly greatest tally; first in declaration order on ties.
    pub leading: Option<OptionId>,
}

/// Fails with [`UnknownOption`](Error::UnknownOption) unless `option` exists
/// on the poll. Checked before any mutation is attempted.
pub fn ensure_option(poll: &Poll, option: OptionId) -> Result<()> {
    if poll.options.iter().any(|candidate| candidate.id == option) {
        Ok(())
    } else {
        Err(Error::UnknownOption)
    }
}

/// The option with the strictly greatest tally. Ties resolve to the first
/// such option in declaration order.
pub fn leading(poll: &Poll) -> Option<&PollOption> {
    poll.options.iter().reduce(|best, candidate| if candidate.votes > best.votes { candidate } else { best })
}

pub fn share(votes: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        votes as f64 / total as f64
    }
}

pub fn state(poll: &Poll, voter_choice: Option<OptionId>) -> PollState {
    let total = poll.options.iter().map(|option| option.votes).sum();
    let options = poll
        .options
        .iter()
        .map(|option| OptionTally {
            id: option.id,
            text: option.text.clone(),
            votes: option.votes,
            share: share(option.votes, total),
        })
        .collect();
    PollState {
        id: poll.id,
        question: poll.question.clone(),
        options,
        total,
        voter_choice,
        leading: leading(poll).map(|option| option.id),
    }
}
