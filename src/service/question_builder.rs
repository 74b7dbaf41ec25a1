use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, info, warn};

use crate::{
    models::{
        content::{CharacterSummary, MovieSummary},
        guessing_game::{
            AnswerChoice, GameCategory, GameOptions, Question, QuestionCategory, answer_count,
            initial_hint_count,
        },
    },
    service::content_source::{ContentError, ContentSource, HintMap},
};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Content source failed: {0}")]
    Content(#[from] ContentError),

    #[error("Content source returned too few items to build a question")]
    NoQuestions,
}

#[derive(Debug)]
pub struct BuiltQuestions {
    pub requested: u16,
    pub questions: Vec<Question>,
}

impl BuiltQuestions {
    pub fn is_truncated(&self) -> bool {
        self.questions.len() < self.requested as usize
    }
}

pub struct QuestionBuilder<'a, C: ContentSource + ?Sized> {
    source: &'a C,
}

impl<'a, C: ContentSource + ?Sized> QuestionBuilder<'a, C> {
    pub fn new(source: &'a C) -> Self {
        Self { source }
    }

    /// Builds the full question list for a session. Pools are fetched in one
    /// round (movies and characters concurrently), hints in a second round.
    /// Any content failure discards the whole build.
    pub async fn build<R: Rng + ?Sized>(
        &self,
        options: &GameOptions,
        rng: &mut R,
    ) -> Result<BuiltQuestions, BuildError> {
        let answers_per_question = answer_count(options.difficulty);
        let hints_per_question = initial_hint_count(options.difficulty);

        let slots = plan_slots(options, rng);
        let movie_slots = slots
            .iter()
            .filter(|c| **c == QuestionCategory::Movie)
            .count();
        let character_slots = slots.len() - movie_slots;

        info!(
            "Building {} questions ({} movie, {} character) at difficulty {}",
            slots.len(),
            movie_slots,
            character_slots,
            options.difficulty
        );

        let (movies, characters) = futures::try_join!(
            self.fetch_movie_pool(movie_slots * answers_per_question),
            self.fetch_character_pool(character_slots * answers_per_question),
        )?;

        let mut movies = dedup_by_id(movies, |m| m.id).into_iter();
        let mut characters = dedup_by_id(characters, |c| c.id).into_iter();

        let mut questions: Vec<Question> = Vec::with_capacity(slots.len());
        for category in slots {
            let answers = match category {
                QuestionCategory::Movie => {
                    take_answer_set(&mut movies, answers_per_question, AnswerChoice::from_movie)
                }
                QuestionCategory::Character => take_answer_set(
                    &mut characters,
                    answers_per_question,
                    AnswerChoice::from_character,
                ),
            };

            let Some((correct_answer, wrong_answers)) = answers else {
                continue;
            };

            let mut all_answers = wrong_answers.clone();
            all_answers.push(correct_answer.clone());
            all_answers.shuffle(rng);

            let question = Question {
                question_number: questions.len() as u16 + 1,
                category,
                correct_answer,
                wrong_answers,
                all_answers,
                revealed_hints: Vec::new(),
                hint_button_used: false,
                show_answer_used: false,
                is_answered: false,
                selected_answer: None,
                is_correct: None,
            };

            debug_assert!(question.is_well_formed());
            questions.push(question);
        }

        if questions.is_empty() {
            warn!("Content source returned too few items for a single question");
            return Err(BuildError::NoQuestions);
        }

        let movie_url_ids = correct_url_ids(&questions, QuestionCategory::Movie);
        let character_url_ids = correct_url_ids(&questions, QuestionCategory::Character);

        let (movie_hints, character_hints) = futures::try_join!(
            self.fetch_movie_hints(&movie_url_ids),
            self.fetch_character_hints(&character_url_ids),
        )?;

        for question in questions.iter_mut() {
            let hints = match question.category {
                QuestionCategory::Movie => &movie_hints,
                QuestionCategory::Character => &character_hints,
            };

            match hints.get(&question.correct_answer.url_id) {
                Some(hints) => {
                    question.revealed_hints =
                        hints.iter().take(hints_per_question).cloned().collect();
                }
                None => warn!(
                    "No hints found for {} {}",
                    question.category, question.correct_answer.url_id
                ),
            }
        }

        if questions.len() < options.question_count as usize {
            warn!(
                "Built {} of {} requested questions",
                questions.len(),
                options.question_count
            );
        }

        Ok(BuiltQuestions {
            requested: options.question_count,
            questions,
        })
    }

    async fn fetch_movie_pool(&self, count: usize) -> Result<Vec<MovieSummary>, ContentError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        debug!("Fetching {} random movies", count);
        self.source.random_movies_except(&[], count).await
    }

    async fn fetch_character_pool(
        &self,
        count: usize,
    ) -> Result<Vec<CharacterSummary>, ContentError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        debug!("Fetching {} random characters", count);
        self.source.random_characters_except(&[], count).await
    }

    async fn fetch_movie_hints(&self, url_ids: &[String]) -> Result<HintMap, ContentError> {
        if url_ids.is_empty() {
            return Ok(HintMap::new());
        }

        debug!("Fetching hints for {} movies", url_ids.len());
        self.source.batch_hints_for_movies(url_ids).await
    }

    async fn fetch_character_hints(&self, url_ids: &[String]) -> Result<HintMap, ContentError> {
        if url_ids.is_empty() {
            return Ok(HintMap::new());
        }

        debug!("Fetching hints for {} characters", url_ids.len());
        self.source.batch_hints_for_characters(url_ids).await
    }
}

/// Category of every question slot, in play order. Mixed games flip a fair
/// coin per slot, so the split is not balanced.
pub fn plan_slots<R: Rng + ?Sized>(options: &GameOptions, rng: &mut R) -> Vec<QuestionCategory> {
    let count = options.question_count as usize;
    match options.category {
        GameCategory::Movies => vec![QuestionCategory::Movie; count],
        GameCategory::Characters => vec![QuestionCategory::Character; count],
        GameCategory::Mixed => (0..count)
            .map(|_| {
                if rng.random_bool(0.5) {
                    QuestionCategory::Movie
                } else {
                    QuestionCategory::Character
                }
            })
            .collect(),
    }
}

/// Takes one correct answer and `answers_per_question - 1` wrong answers from
/// the front of the pool, or nothing if the pool cannot fill a whole set.
fn take_answer_set<T, I, F>(
    pool: &mut I,
    answers_per_question: usize,
    to_choice: F,
) -> Option<(AnswerChoice, Vec<AnswerChoice>)>
where
    I: ExactSizeIterator<Item = T>,
    F: Fn(T, bool) -> AnswerChoice,
{
    if answers_per_question == 0 || pool.len() < answers_per_question {
        return None;
    }

    let correct = to_choice(pool.next()?, true);
    let wrong = pool
        .by_ref()
        .take(answers_per_question - 1)
        .map(|item| to_choice(item, false))
        .collect();

    Some((correct, wrong))
}

fn dedup_by_id<T, F>(pool: Vec<T>, id: F) -> Vec<T>
where
    F: Fn(&T) -> i64,
{
    let before = pool.len();
    let mut seen = HashSet::new();
    let unique: Vec<T> = pool.into_iter().filter(|item| seen.insert(id(item))).collect();

    if unique.len() < before {
        warn!("Dropped {} duplicate items from pool", before - unique.len());
    }

    unique
}

fn correct_url_ids(questions: &[Question], category: QuestionCategory) -> Vec<String> {
    let mut seen = HashSet::new();
    questions
        .iter()
        .filter(|q| q.category == category)
        .map(|q| q.correct_answer.url_id.clone())
        .filter(|url_id| seen.insert(url_id.clone()))
        .collect()
}
