#![no_std]

extern crate alloc;

pub mod poll;
pub mod quiz;

use core::num::{NonZeroU16, NonZeroU64};

/// Stable identifier of a published quiz.
pub type QuizId = NonZeroU64;
/// Stable identifier of a published poll.
pub type PollId = NonZeroU64;
/// Stable identifier of a resolved voter or quiz-taker.
pub type VoterId = NonZeroU64;

/// Identifier of a question within its quiz. Independent of declaration order.
pub type QuestionId = NonZeroU16;
/// Identifier of an option within its poll. Independent of declaration order.
pub type OptionId = NonZeroU16;
