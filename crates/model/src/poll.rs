use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

use crate::{OptionId, PollId, VoterId};

/// One selectable option and its running tally.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PollOption {
    /// Unique within the poll. Not tied to the option's position.
    pub id: OptionId,
    /// Option text to be displayed to voters.
    pub text: String,
    /// How many voters have selected this option so far.
    #[serde(default)]
    pub votes: u64,
}

/// A published poll: a question over at least two options.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Poll {
    pub id: PollId,
    pub question: String,
    /// Who authored the poll.
    pub author: VoterId,
    pub options: Vec<PollOption>,
}

/// The durable fact that a voter has voted an option on a poll.
/// At most one record may exist per `(poll, voter)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct VoteRecord {
    pub poll: PollId,
    pub voter: VoterId,
    pub option: OptionId,
}
