//! The quiz sequencing engine.
//!
//! An explicit `Ready -> AwaitingAnswer -> Done` state machine driven by
//! [`QuizEngine::start`] and [`QuizEngine::submit`]. Each round adjusts the
//! difficulty from the previous answer, pulls the next question from the
//! bank (falling back across tiers) and hands it to the caller.

use tracing::instrument;
use uuid::Uuid;

use crate::bank::QuestionBank;
use crate::difficulty::DifficultyController;
use crate::error::QuizError;
use crate::model::{Completion, Difficulty, DifficultyState, Feedback, QuizSession, Step, Turn};

/// Default number of questions in one quiz.
pub const DEFAULT_MAX_QUESTIONS: u32 = 10;

/// Configuration for the quiz engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Questions asked before the quiz ends.
    pub max_questions: u32,
    /// Tier the first question is drawn from.
    pub start_tier: Difficulty,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_questions: DEFAULT_MAX_QUESTIONS,
            start_tier: Difficulty::Easy,
        }
    }
}

/// Where the engine is in its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Ready,
    AwaitingAnswer,
    Done,
}

/// One quiz over one bank of questions.
pub struct QuizEngine {
    session_id: Uuid,
    bank: QuestionBank,
    controller: DifficultyController,
    session: QuizSession,
    state: EngineState,
    max_questions: u32,
}

impl QuizEngine {
    pub fn new(bank: QuestionBank, config: EngineConfig) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            bank,
            controller: DifficultyController::new(config.start_tier),
            session: QuizSession::default(),
            state: EngineState::Ready,
            max_questions: config.max_questions,
        }
    }

    /// Begin the quiz and return the first step.
    ///
    /// Calling this again before any answer is submitted returns the same
    /// pending question; after the quiz is over it returns the final tally.
    pub fn start(&mut self) -> Step {
        match self.state {
            EngineState::Ready => {
                tracing::debug!(session = %self.session_id, questions = self.bank.len(), "starting quiz");
                self.advance()
            }
            EngineState::AwaitingAnswer => match self.session.current_question.clone() {
                Some(question) => Step::Question(question),
                None => self.finish(),
            },
            EngineState::Done => Step::Done(self.completion()),
        }
    }

    /// Score `answer` against the pending question and move on.
    ///
    /// Returns [`QuizError::CallerMisuse`] if no question is pending, i.e.
    /// before `start` or after the quiz is done.
    #[instrument(skip(self, answer), fields(session = %self.session_id))]
    pub fn submit(&mut self, answer: &str) -> Result<Turn, QuizError> {
        match self.state {
            EngineState::Ready => return Err(QuizError::CallerMisuse("quiz has not started")),
            EngineState::Done => return Err(QuizError::CallerMisuse("quiz is already over")),
            EngineState::AwaitingAnswer => {}
        }
        let question = self
            .session
            .current_question
            .take()
            .ok_or(QuizError::CallerMisuse("no question is pending"))?;

        let correct = question.is_correct(answer);
        if correct {
            self.session.score += 1;
        }
        self.session.questions_asked += 1;
        tracing::debug!(
            correct,
            tier = %question.difficulty(),
            score = self.session.score,
            asked = self.session.questions_asked,
            "answer scored"
        );

        self.controller.adjust(correct, &self.bank);

        let feedback = Feedback {
            correct,
            correct_answer: question.correct_answer().to_string(),
        };
        Ok(Turn {
            feedback,
            next: self.advance(),
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn difficulty(&self) -> DifficultyState {
        self.controller.state()
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn max_questions(&self) -> u32 {
        self.max_questions
    }

    pub fn completion(&self) -> Completion {
        Completion {
            score: self.session.score,
            total: self.session.questions_asked,
        }
    }

    fn advance(&mut self) -> Step {
        if self.session.questions_asked >= self.max_questions {
            return self.finish();
        }
        match self.bank.dequeue(self.controller.current_tier()) {
            Some((question, tier)) => {
                self.controller.switch_to(tier);
                self.session.current_question = Some(question.clone());
                self.state = EngineState::AwaitingAnswer;
                Step::Question(question)
            }
            None => self.finish(),
        }
    }

    fn finish(&mut self) -> Step {
        self.state = EngineState::Done;
        self.session.terminal = true;
        self.session.current_question = None;
        let completion = self.completion();
        tracing::info!(
            session = %self.session_id,
            score = completion.score,
            total = completion.total,
            "quiz complete"
        );
        Step::Done(completion)
    }
}
