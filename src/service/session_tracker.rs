use serde::{Deserialize, Serialize};

use crate::models::guessing_game::{
    GameOptions, GameSummary, Question, SessionScore, difficulty_label,
};

/// Score and answered-question history for one session.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SessionTracker {
    score: SessionScore,
    history: Vec<Question>,
}

impl SessionTracker {
    pub fn score(&self) -> SessionScore {
        self.score
    }

    pub fn history(&self) -> &[Question] {
        &self.history
    }

    pub fn record_answer(&mut self, is_correct: bool) {
        if is_correct {
            self.score.correct += 1;
        } else {
            self.score.incorrect += 1;
        }
    }

    /// A revealed answer is scored as correct.
    pub fn record_show_answer(&mut self) {
        self.score.correct += 1;
        self.score.show_answers_used += 1;
    }

    pub fn archive(&mut self, question: Question) {
        self.history.push(question);
    }

    pub fn summary(&self, options: Option<&GameOptions>) -> GameSummary {
        let total = self.history.len();
        let accuracy = if total > 0 {
            (self.score.correct as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };

        let hint_buttons_used = self.history.iter().filter(|q| q.hint_button_used).count() as u32;

        GameSummary {
            questions: self.history.clone(),
            score: self.score,
            accuracy,
            hint_buttons_used,
            options: options.copied(),
            category_label: options.map(|o| o.category.label().to_string()),
            difficulty_label: options.map(|o| difficulty_label(o.difficulty).to_string()),
        }
    }
}
