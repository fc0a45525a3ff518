use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

use crate::{QuestionId, QuizId, VoterId};

/// A single multiple-choice question. Immutable once its quiz is published.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    /// Unique within the quiz. Not tied to the question's position.
    pub id: QuestionId,
    /// Prompt to be displayed to the quiz-taker.
    pub prompt: String,
    /// Possible answers to select from.
    pub choices: Vec<String>,
    /// Index of the selection with the correct answer.
    pub answer: u8,
}

/// A published quiz: an ordered sequence of questions.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: QuizId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Who authored the quiz.
    pub author: VoterId,
    pub questions: Vec<Question>,
}

/// Durable record of one submitted attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttemptRecord {
    pub quiz: QuizId,
    pub voter: VoterId,
    /// How many questions were answered correctly.
    pub score: u16,
    /// How many questions the quiz had at submission time.
    pub total: u16,
}
