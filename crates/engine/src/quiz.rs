use alloc::{collections::BTreeMap, string::String, sync::Arc, vec::Vec};
use serde::Serialize;

use crate::error::{Error, Result};
use model::{quiz::Quiz, QuestionId, QuizId};

/// Qualitative classification of a submitted score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Strong,
    Moderate,
    Weak,
}

impl Band {
    /// Classifies a rounded percentage. Lower bounds are inclusive.
    pub fn of(percentage: u8) -> Self {
        if percentage >= 70 {
            Self::Strong
        } else if percentage >= 50 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }
}

impl core::fmt::Display for Band {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
        })
    }
}

/// Final result of a submitted attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Report {
    pub score: u16,
    pub total: u16,
    /// `100 * score / total`, rounded half-up.
    pub percentage: u8,
    pub band: Band,
}

impl Report {
    fn new(score: u16, total: u16) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            ((u32::from(score) * 100 + u32::from(total) / 2) / u32::from(total)) as u8
        };
        Self { score, total, percentage, band: Band::of(percentage) }
    }
}

enum Stage {
    InProgress,
    Submitted { score: u16 },
}

/// One quiz-taking session: drives the taker through the question sequence,
/// collects at most one answer per question, and scores on submission.
///
/// Selections are keyed by question id rather than position; an absent key
/// means the question is unanswered. Once submitted, the attempt is frozen
/// until [`retake`](Self::retake).
pub struct Attempt {
    quiz: Arc<Quiz>,
    selections: BTreeMap<QuestionId, u8>,
    current: usize,
    stage: Stage,
}

impl Attempt {
    pub fn new(quiz: Arc<Quiz>) -> Self {
        Self { quiz, selections: BTreeMap::new(), current: 0, stage: Stage::InProgress }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The stored selection for the question at `index`, if any.
    pub fn selection(&self, index: usize) -> Option<u8> {
        let question = self.quiz.questions.get(index)?;
        self.selections.get(&question.id).copied()
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.stage, Stage::Submitted { .. })
    }

    /// Records `choice` as the answer to the question at `question`. Does not
    /// move the cursor. Ignored once the attempt has been submitted.
    pub fn select_answer(&mut self, question: usize, choice: usize) -> Result<()> {
        if self.is_submitted() {
            return Ok(());
        }

        let target = self.quiz.questions.get(question).ok_or(Error::InvalidChoice)?;
        if choice >= target.choices.len() {
            return Err(Error::InvalidChoice);
        }

        let choice = u8::try_from(choice).map_err(|_| Error::InvalidChoice)?;
        self.selections.insert(target.id, choice);
        Ok(())
    }

    /// Moves the cursor to the next question. No-op at the last question;
    /// the caller is expected to submit instead.
    pub fn advance(&mut self) {
        if self.is_submitted() {
            return;
        }
        if self.current + 1 < self.quiz.questions.len() {
            self.current += 1;
        }
    }

    /// Moves the cursor to the previous question. No-op at the first.
    pub fn retreat(&mut self) {
        if self.is_submitted() {
            return;
        }
        if self.current > 0 {
            self.current -= 1;
        }
    }

    /// Scores the attempt and freezes it. Fails with
    /// [`IncompleteAttempt`](Error::IncompleteAttempt) unless every question
    /// has a selection, in which case nothing changes. Repeat calls return
    /// the same report.
    pub fn submit(&mut self) -> Result<Report> {
        let total = self.quiz.questions.len() as u16;
        if let Stage::Submitted { score } = self.stage {
            return Ok(Report::new(score, total));
        }

        if self.selections.len() != self.quiz.questions.len() {
            return Err(Error::IncompleteAttempt);
        }

        let score = self
            .quiz
            .questions
            .iter()
            .filter(|question| self.selections.get(&question.id).copied() == Some(question.answer))
            .count() as u16;
        self.stage = Stage::Submitted { score };
        Ok(Report::new(score, total))
    }

    /// Full reset back to the first question with all selections cleared.
    /// Only meaningful once submitted; no-op while in progress.
    pub fn retake(&mut self) {
        if !self.is_submitted() {
            return;
        }
        self.selections.clear();
        self.current = 0;
        self.stage = Stage::InProgress;
    }

    pub fn report(&self) -> Option<Report> {
        match self.stage {
            Stage::Submitted { score } => Some(Report::new(score, self.quiz.questions.len() as u16)),
            Stage::InProgress => None,
        }
    }
}

/// Rendering snapshot of an attempt: the current question and its choices.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct View {
    pub quiz: QuizId,
    pub title: String,
    pub prompt: String,
    pub choices: Vec<String>,
    pub index: usize,
    pub total: usize,
    pub selection: Option<u8>,
    pub report: Option<Report>,
}

impl From<&Attempt> for View {
    fn from(attempt: &Attempt) -> Self {
        let quiz = attempt.quiz();
        let question = &quiz.questions[attempt.current_index()];
        Self {
            quiz: quiz.id,
            title: quiz.title.clone(),
            prompt: question.prompt.clone(),
            choices: question.choices.clone(),
            index: attempt.current_index(),
            total: quiz.questions.len(),
            selection: attempt.selection(attempt.current_index()),
            report: attempt.report(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::quiz::Question;
    use std::num::{NonZeroU16, NonZeroU64};

    fn quiz() -> Arc<Quiz> {
        let question = |id: u16, answer: u8| Question {
            id: NonZeroU16::new(id).unwrap(),
            prompt: format!("Question {id}"),
            choices: vec![String::from("first"), String::from("second"), String::from("third")],
            answer,
        };
        Arc::new(Quiz {
            id: NonZeroU64::new(1).unwrap(),
            title: String::from("Sample"),
            description: None,
            author: NonZeroU64::new(7).unwrap(),
            questions: vec![question(1, 0), question(2, 1), question(3, 0)],
        })
    }

    #[test]
    fn partially_correct_submission_is_moderate() {
        let mut attempt = Attempt::new(quiz());
        attempt.select_answer(0, 0).unwrap();
        attempt.select_answer(1, 1).unwrap();
        attempt.select_answer(2, 1).unwrap();

        let report = attempt.submit().unwrap();
        assert_eq!(report.score, 2);
        assert_eq!(report.percentage, 67);
        assert_eq!(report.band, Band::Moderate);
    }

    #[test]
    fn fully_correct_submission_is_strong() {
        let mut attempt = Attempt::new(quiz());
        attempt.select_answer(0, 0).unwrap();
        attempt.select_answer(1, 1).unwrap();
        attempt.select_answer(2, 0).unwrap();

        let report = attempt.submit().unwrap();
        assert_eq!(report.score, 3);
        assert_eq!(report.percentage, 100);
        assert_eq!(report.band, Band::Strong);
    }

    #[test]
    fn submit_requires_every_answer() {
        let mut attempt = Attempt::new(quiz());
        attempt.select_answer(0, 0).unwrap();

        assert_eq!(attempt.submit(), Err(Error::IncompleteAttempt));
        assert!(!attempt.is_submitted());
    }

    #[test]
    fn repeat_submission_returns_the_same_report() {
        let mut attempt = Attempt::new(quiz());
        for index in 0..3 {
            attempt.select_answer(index, 0).unwrap();
        }

        let first = attempt.submit().unwrap();
        let second = attempt.submit().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn selections_are_frozen_after_submission() {
        let mut attempt = Attempt::new(quiz());
        for index in 0..3 {
            attempt.select_answer(index, 0).unwrap();
        }
        attempt.submit().unwrap();

        attempt.select_answer(1, 1).unwrap();
        assert_eq!(attempt.selection(1), Some(0));
        assert_eq!(attempt.report().unwrap().score, 2);
    }

    #[test]
    fn out_of_range_selections_are_rejected() {
        let mut attempt = Attempt::new(quiz());
        assert_eq!(attempt.select_answer(0, 3), Err(Error::InvalidChoice));
        assert_eq!(attempt.select_answer(9, 0), Err(Error::InvalidChoice));
        assert_eq!(attempt.selection(0), None);
    }

    #[test]
    fn cursor_stops_at_both_ends() {
        let mut attempt = Attempt::new(quiz());
        attempt.retreat();
        assert_eq!(attempt.current_index(), 0);

        attempt.advance();
        attempt.advance();
        attempt.advance();
        assert_eq!(attempt.current_index(), 2);
    }

    #[test]
    fn retake_resets_everything() {
        let mut attempt = Attempt::new(quiz());
        for index in 0..3 {
            attempt.select_answer(index, 0).unwrap();
        }
        attempt.advance();
        attempt.submit().unwrap();

        attempt.retake();
        assert_eq!(attempt.current_index(), 0);
        assert!(!attempt.is_submitted());
        assert_eq!(attempt.submit(), Err(Error::IncompleteAttempt));
    }

    #[test]
    fn retake_before_submission_is_ignored() {
        let mut attempt = Attempt::new(quiz());
        attempt.select_answer(0, 1).unwrap();
        attempt.advance();

        attempt.retake();
        assert_eq!(attempt.current_index(), 1);
        assert_eq!(attempt.selection(0), Some(1));
    }

    #[test]
    fn band_boundaries_are_inclusive() {
        assert_eq!(Band::of(70), Band::Strong);
        assert_eq!(Band::of(69), Band::Moderate);
        assert_eq!(Band::of(50), Band::Moderate);
        assert_eq!(Band::of(49), Band::Weak);
        assert_eq!(Band::of(0), Band::Weak);
    }
}
