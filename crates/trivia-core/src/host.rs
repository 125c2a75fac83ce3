//! Wiring between input events, the engine and a presentation.
//!
//! A [`QuizHost`] owns the presentation, the current engine and the score
//! ledger. Front ends feed it `answer_selected` / `submit_requested` events
//! and it calls back into the [`Presentation`] for everything shown.

use crate::engine::{EngineConfig, EngineState, QuizEngine};
use crate::error::QuizError;
use crate::fetch::{load_bank, RetryPolicy};
use crate::ledger::ScoreLedger;
use crate::model::Step;
use crate::traits::{Presentation, QuestionSource};

/// How a host loads and runs a quiz.
#[derive(Debug, Clone)]
pub struct HostSettings {
    /// Questions requested per difficulty tier.
    pub amount_per_tier: u32,
    pub retry: RetryPolicy,
    pub engine: EngineConfig,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            amount_per_tier: 10,
            retry: RetryPolicy::default(),
            engine: EngineConfig::default(),
        }
    }
}

/// Drives quizzes for one user against one presentation.
pub struct QuizHost<P: Presentation> {
    presentation: P,
    username: String,
    ledger: ScoreLedger,
    engine: Option<QuizEngine>,
    selected: Option<String>,
}

impl<P: Presentation> QuizHost<P> {
    pub fn new(presentation: P, username: impl Into<String>) -> Self {
        Self {
            presentation,
            username: username.into(),
            ledger: ScoreLedger::new(),
            engine: None,
            selected: None,
        }
    }

    /// Fetch a fresh bank and start a new quiz.
    ///
    /// On failure the error is shown and no quiz is running; calling `load`
    /// again is the retry path.
    pub async fn load(
        &mut self,
        source: &dyn QuestionSource,
        settings: &HostSettings,
    ) -> Result<(), QuizError> {
        self.engine = None;
        self.selected = None;

        self.presentation.show_loading(true);
        let loaded = load_bank(source, settings.amount_per_tier, &settings.retry).await;
        self.presentation.show_loading(false);

        let bank = match loaded {
            Ok(bank) => bank,
            Err(e) => {
                tracing::error!("failed to load questions: {e}");
                self.presentation.show_error(&e.to_string());
                return Err(e);
            }
        };

        let mut engine = QuizEngine::new(bank, settings.engine.clone());
        let step = engine.start();
        self.engine = Some(engine);
        self.display(step);
        Ok(())
    }

    /// Remember the answer the user picked. The latest selection wins.
    pub fn answer_selected(&mut self, answer: impl Into<String>) {
        self.selected = Some(answer.into());
    }

    /// Submit the selected answer.
    ///
    /// Does nothing when no answer is selected. Fails with
    /// [`QuizError::CallerMisuse`] when no quiz is running.
    pub fn submit_requested(&mut self) -> Result<(), QuizError> {
        let engine = self
            .engine
            .as_mut()
            .ok_or(QuizError::CallerMisuse("no quiz is loaded"))?;
        if engine.state() != EngineState::AwaitingAnswer {
            return Err(QuizError::CallerMisuse("quiz is not awaiting an answer"));
        }
        let Some(answer) = self.selected.take() else {
            tracing::debug!("submit requested with no answer selected");
            return Ok(());
        };

        let turn = engine.submit(&answer)?;
        self.presentation
            .show_feedback(turn.feedback.correct, &turn.feedback.correct_answer);
        self.display(turn.next);
        Ok(())
    }

    /// Whether a quiz is loaded and still has a question pending.
    pub fn is_running(&self) -> bool {
        self.engine
            .as_ref()
            .is_some_and(|e| e.state() == EngineState::AwaitingAnswer)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn engine(&self) -> Option<&QuizEngine> {
        self.engine.as_ref()
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    fn display(&mut self, step: Step) {
        match step {
            Step::Question(question) => self.presentation.show_question(&question),
            Step::Done(done) => {
                self.ledger.record(&self.username, done.score, done.total);
                self.presentation.show_completion(done.score, done.total);
            }
        }
    }
}
