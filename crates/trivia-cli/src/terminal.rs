//! Line-oriented terminal presentation.

use trivia_core::model::Question;
use trivia_core::traits::Presentation;

/// Prints quiz events to stdout and remembers the choices on screen so
/// numbered input can be mapped back to answer text.
#[derive(Default)]
pub struct TerminalPresentation {
    choices: Vec<String>,
}

impl TerminalPresentation {
    /// The answer text for a 1-based menu number.
    pub fn choice(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.choices.get(i))
            .map(String::as_str)
    }

    pub fn choice_count(&self) -> usize {
        self.choices.len()
    }
}

impl Presentation for TerminalPresentation {
    fn show_question(&mut self, question: &Question) {
        println!();
        match question.category() {
            Some(category) => println!("[{}] {category}", question.difficulty()),
            None => println!("[{}]", question.difficulty()),
        }
        println!("{}", question.prompt());
        for (i, choice) in question.choices().iter().enumerate() {
            println!("  {}) {choice}", i + 1);
        }
        self.choices = question.choices().to_vec();
    }

    fn show_feedback(&mut self, correct: bool, correct_answer: &str) {
        if correct {
            println!("Correct!");
        } else {
            println!("Wrong! The correct answer was: {correct_answer}");
        }
    }

    fn show_completion(&mut self, score: u32, total: u32) {
        self.choices.clear();
        println!("\nQuiz complete! Your score: {score}/{total}");
    }

    fn show_error(&mut self, message: &str) {
        self.choices.clear();
        println!("Error: {message}");
    }

    fn show_loading(&mut self, loading: bool) {
        if loading {
            println!("Loading questions...");
        }
    }
}
