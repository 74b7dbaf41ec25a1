use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    models::guessing_game::{GameOptions, GamePhase, GameSummary, Question, SessionScore},
    service::session_tracker::SessionTracker,
};

/// A guessing game session. Walks a pre-built question list one question at
/// a time. Every mutator returns whether it changed anything; redundant or
/// out-of-order calls are ignored.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct GuessingGame {
    phase: GamePhase,
    options: Option<GameOptions>,
    questions: Vec<Question>,
    current_index: usize,
    tracker: SessionTracker,
}

impl GuessingGame {
    pub fn start(options: GameOptions, questions: Vec<Question>) -> Self {
        let phase = if questions.is_empty() {
            GamePhase::Complete
        } else {
            GamePhase::InProgress
        };

        Self {
            phase,
            options: Some(options),
            questions,
            current_index: 0,
            tracker: SessionTracker::default(),
        }
    }

    /// Drops the options, questions, score and history.
    pub fn restart(&mut self) {
        *self = Self::default();
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn options(&self) -> Option<&GameOptions> {
        self.options.as_ref()
    }

    pub fn score(&self) -> SessionScore {
        self.tracker.score()
    }

    pub fn history(&self) -> &[Question] {
        self.tracker.history()
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// 1-based; stays at the last question once the game is complete.
    pub fn current_question_number(&self) -> usize {
        match self.phase {
            GamePhase::NotStarted => 0,
            GamePhase::InProgress => self.current_index + 1,
            GamePhase::Complete => self.questions.len(),
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.phase != GamePhase::InProgress {
            return None;
        }
        self.questions.get(self.current_index)
    }

    /// The elimination button is hidden on hard games.
    pub fn hint_button_available(&self) -> bool {
        let hard = self.options.is_some_and(|o| o.difficulty == 3);
        !hard
            && self
                .current_question()
                .is_some_and(|q| !q.is_answered && !q.hint_button_used)
    }

    fn open_question(&mut self) -> Option<&mut Question> {
        if self.phase != GamePhase::InProgress {
            return None;
        }
        self.questions
            .get_mut(self.current_index)
            .filter(|q| !q.is_answered)
    }

    pub fn select(&mut self, answer_id: i64) -> bool {
        let Some(question) = self.open_question() else {
            return false;
        };

        let Some(answer) = question.answer(answer_id) else {
            debug!("Ignoring selection of unknown answer {}", answer_id);
            return false;
        };

        if answer.is_eliminated {
            debug!("Ignoring selection of eliminated answer {}", answer_id);
            return false;
        }

        question.selected_answer = Some(answer.clone());
        true
    }

    /// Eliminates one random wrong answer that is still in play. Usable once
    /// per question.
    pub fn use_hint_button<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let Some(question) = self.open_question() else {
            return false;
        };

        if question.hint_button_used {
            return false;
        }

        let candidates: Vec<usize> = question
            .all_answers
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.is_correct && !a.is_eliminated)
            .map(|(idx, _)| idx)
            .collect();

        if candidates.is_empty() {
            return false;
        }

        let idx = candidates[rng.random_range(0..candidates.len())];
        let eliminated_id = question.all_answers[idx].id;
        question.all_answers[idx].is_eliminated = true;

        if let Some(wrong) = question
            .wrong_answers
            .iter_mut()
            .find(|a| a.id == eliminated_id)
        {
            wrong.is_eliminated = true;
        }

        if question
            .selected_answer
            .as_ref()
            .is_some_and(|a| a.id == eliminated_id)
        {
            question.selected_answer = None;
        }

        question.hint_button_used = true;
        debug!(
            "Eliminated answer {} on question {}",
            eliminated_id, question.question_number
        );
        true
    }

    pub fn submit(&mut self) -> bool {
        let Some(question) = self.open_question() else {
            return false;
        };

        let Some(selected) = question.selected_answer.as_ref() else {
            return false;
        };

        let is_correct = selected.id == question.correct_answer.id;
        question.is_answered = true;
        question.is_correct = Some(is_correct);

        self.tracker.record_answer(is_correct);
        true
    }

    /// Reveals the correct answer. Counts as a correct answer.
    pub fn use_show_answer(&mut self) -> bool {
        let Some(question) = self.open_question() else {
            return false;
        };

        if question.show_answer_used {
            return false;
        }

        question.selected_answer = Some(question.correct_answer.clone());
        question.is_answered = true;
        question.is_correct = Some(true);
        question.show_answer_used = true;

        self.tracker.record_show_answer();
        true
    }

    /// Archives the answered question and moves on, completing the game after
    /// the last one.
    pub fn advance(&mut self) -> bool {
        if self.phase != GamePhase::InProgress {
            return false;
        }

        let Some(question) = self.questions.get(self.current_index) else {
            return false;
        };

        if !question.is_answered {
            return false;
        }

        self.tracker.archive(question.clone());
        self.current_index += 1;

        if self.current_index >= self.questions.len() {
            debug!("Game complete after {} questions", self.questions.len());
            self.phase = GamePhase::Complete;
        }

        true
    }

    pub fn summary(&self) -> Option<GameSummary> {
        if self.phase != GamePhase::Complete {
            return None;
        }
        Some(self.tracker.summary(self.options.as_ref()))
    }
}
