use core::fmt;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::content::{CharacterSummary, Hint, MovieSummary};

pub const QUESTION_COUNTS: [u16; 3] = [10, 20, 50];

/// Number of answer choices shown per question, including the correct one.
pub fn answer_count(difficulty: u8) -> usize {
    match difficulty {
        1 => 4,
        2 => 6,
        3 => 8,
        _ => 4,
    }
}

/// Number of content hints revealed when a question is built.
pub fn initial_hint_count(difficulty: u8) -> usize {
    match difficulty {
        1 => 3,
        2 => 2,
        3 => 1,
        _ => 2,
    }
}

pub fn difficulty_label(difficulty: u8) -> &'static str {
    match difficulty {
        1 => "Easy",
        2 => "Medium",
        3 => "Hard",
        _ => "Unknown",
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GameCategory {
    Movies,
    Characters,
    Mixed,
}

impl GameCategory {
    pub fn label(&self) -> &'static str {
        match self {
            GameCategory::Movies => "Movies",
            GameCategory::Characters => "Characters",
            GameCategory::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for GameCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameCategory::Movies => write!(f, "movies"),
            GameCategory::Characters => write!(f, "characters"),
            GameCategory::Mixed => write!(f, "mixed"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    Movie,
    Character,
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionCategory::Movie => write!(f, "movie"),
            QuestionCategory::Character => write!(f, "character"),
        }
    }
}

fn validate_question_count(count: u16) -> Result<(), ValidationError> {
    if QUESTION_COUNTS.contains(&count) {
        return Ok(());
    }

    Err(ValidationError::new("question_count_invalid")
        .with_message("Question count must be 10, 20 or 50".into()))
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Validate)]
pub struct GameOptions {
    pub category: GameCategory,
    #[validate(range(min = 1, max = 3, message = "Difficulty must be 1, 2 or 3"))]
    pub difficulty: u8,
    #[validate(custom(function = "validate_question_count"))]
    pub question_count: u16,
}

impl GameOptions {
    pub fn new(category: GameCategory, difficulty: u8, question_count: u16) -> Self {
        Self {
            category,
            difficulty,
            question_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnswerChoice {
    pub id: i64,
    pub url_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_1: Option<String>,
    pub is_correct: bool,
    pub is_eliminated: bool,
}

impl AnswerChoice {
    pub fn from_movie(movie: MovieSummary, is_correct: bool) -> Self {
        Self {
            id: movie.id,
            url_id: movie.url_id,
            name: movie.title.clone(),
            title: Some(movie.title),
            image_1: movie.image_1,
            profile_image_1: None,
            is_correct,
            is_eliminated: false,
        }
    }

    pub fn from_character(character: CharacterSummary, is_correct: bool) -> Self {
        Self {
            id: character.id,
            url_id: character.url_id,
            name: character.name,
            title: None,
            image_1: None,
            profile_image_1: character.profile_image_1,
            is_correct,
            is_eliminated: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Question {
    pub question_number: u16,
    pub category: QuestionCategory,
    pub correct_answer: AnswerChoice,
    pub wrong_answers: Vec<AnswerChoice>,
    pub all_answers: Vec<AnswerChoice>,
    pub revealed_hints: Vec<Hint>,
    pub hint_button_used: bool,
    pub show_answer_used: bool,
    pub is_answered: bool,
    pub selected_answer: Option<AnswerChoice>,
    pub is_correct: Option<bool>,
}

impl Question {
    pub fn answer(&self, answer_id: i64) -> Option<&AnswerChoice> {
        self.all_answers.iter().find(|a| a.id == answer_id)
    }

    /// Exactly one correct choice, unique ids, and every wrong answer
    /// accounted for in `all_answers`.
    pub fn is_well_formed(&self) -> bool {
        let correct = self.all_answers.iter().filter(|a| a.is_correct).count();
        let unique: HashSet<i64> = self.all_answers.iter().map(|a| a.id).collect();

        correct == 1
            && unique.len() == self.all_answers.len()
            && self.wrong_answers.len() + 1 == self.all_answers.len()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionScore {
    pub correct: u32,
    pub incorrect: u32,
    pub show_answers_used: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    NotStarted,
    InProgress,
    Complete,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GameSummary {
    pub questions: Vec<Question>,
    pub score: SessionScore,
    pub accuracy: u32,
    pub hint_buttons_used: u32,
    pub options: Option<GameOptions>,
    pub category_label: Option<String>,
    pub difficulty_label: Option<String>,
}
