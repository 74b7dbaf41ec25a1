use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::validation::ValidatedJson,
    models::{
        app_state::AppState,
        content::Hint,
        error::ServerError,
        guessing_game::{
            AnswerChoice, GameOptions, GamePhase, Question, QuestionCategory, SessionScore,
        },
    },
    service::{question_builder::QuestionBuilder, question_runtime::GuessingGame},
};

pub fn game_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(start_game))
        .route("/{session_id}", get(get_game).delete(quit_game))
        .route("/{session_id}/select", post(select_answer))
        .route("/{session_id}/hint", post(use_hint_button))
        .route("/{session_id}/submit", post(submit_answer))
        .route("/{session_id}/show-answer", post(show_answer))
        .route("/{session_id}/advance", post(advance))
        .route("/{session_id}/summary", get(get_summary))
        .route("/{session_id}/restart", post(restart_game))
        .with_state(state)
}

/// Answer as shown to the player. Correctness stays hidden until the
/// question is answered.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerView {
    pub id: i64,
    pub url_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_1: Option<String>,
    pub is_eliminated: bool,
    pub is_correct: Option<bool>,
}

impl AnswerView {
    fn from_choice(choice: &AnswerChoice, reveal: bool) -> Self {
        Self {
            id: choice.id,
            url_id: choice.url_id.clone(),
            name: choice.name.clone(),
            title: choice.title.clone(),
            image_1: choice.image_1.clone(),
            profile_image_1: choice.profile_image_1.clone(),
            is_eliminated: choice.is_eliminated,
            is_correct: reveal.then_some(choice.is_correct),
        }
    }
}

/// Content hint as shown to the player. The owner reference names the
/// correct answer, so it is only sent once the question is answered.
#[derive(Debug, Serialize, Deserialize)]
pub struct HintView {
    pub id: i64,
    pub content: String,
    pub difficulty: u8,
    pub hint_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_url_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_url_id: Option<String>,
}

impl HintView {
    fn from_hint(hint: &Hint, reveal: bool) -> Self {
        Self {
            id: hint.id,
            content: hint.content.clone(),
            difficulty: hint.difficulty,
            hint_type: hint.hint_type.clone(),
            movie_url_id: hint.movie_url_id.clone().filter(|_| reveal),
            character_url_id: hint.character_url_id.clone().filter(|_| reveal),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionView {
    pub question_number: u16,
    pub category: QuestionCategory,
    pub answers: Vec<AnswerView>,
    pub revealed_hints: Vec<HintView>,
    pub hint_button_used: bool,
    pub show_answer_used: bool,
    pub is_answered: bool,
    pub selected_answer_id: Option<i64>,
    pub correct_answer_id: Option<i64>,
    pub is_correct: Option<bool>,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        let reveal = question.is_answered;
        Self {
            question_number: question.question_number,
            category: question.category,
            answers: question
                .all_answers
                .iter()
                .map(|a| AnswerView::from_choice(a, reveal))
                .collect(),
            revealed_hints: question
                .revealed_hints
                .iter()
                .map(|h| HintView::from_hint(h, reveal))
                .collect(),
            hint_button_used: question.hint_button_used,
            show_answer_used: question.show_answer_used,
            is_answered: question.is_answered,
            selected_answer_id: question.selected_answer.as_ref().map(|a| a.id),
            correct_answer_id: reveal.then_some(question.correct_answer.id),
            is_correct: question.is_correct,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GameView {
    pub session_id: Uuid,
    pub phase: GamePhase,
    pub options: Option<GameOptions>,
    pub question_number: usize,
    pub total_questions: usize,
    pub score: SessionScore,
    pub hint_button_available: bool,
    pub current_question: Option<QuestionView>,
}

impl GameView {
    fn new(session_id: Uuid, game: &GuessingGame) -> Self {
        Self {
            session_id,
            phase: game.phase(),
            options: game.options().copied(),
            question_number: game.current_question_number(),
            total_questions: game.total_questions(),
            score: game.score(),
            hint_button_available: game.hint_button_available(),
            current_question: game.current_question().map(QuestionView::from),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartGameResponse {
    pub requested: u16,
    pub built: usize,
    pub game: GameView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransitionResponse {
    pub applied: bool,
    pub game: GameView,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SelectAnswerRequest {
    #[validate(range(min = 1, message = "Answer id must be positive"))]
    pub answer_id: i64,
}

fn load_game(state: &AppState, session_id: Uuid) -> Result<GuessingGame, ServerError> {
    state.get_sessions().load(session_id)?.ok_or_else(|| {
        ServerError::NotFound(format!("Game session {} does not exist", session_id))
    })
}

/// Loads the game, applies one player action and stores the result.
fn apply_action<F>(
    state: &AppState,
    session_id: Uuid,
    action: F,
) -> Result<Json<TransitionResponse>, ServerError>
where
    F: FnOnce(&mut GuessingGame) -> bool,
{
    let mut game = load_game(state, session_id)?;
    let applied = action(&mut game);

    if applied {
        state.get_sessions().save(session_id, &game)?;
    } else {
        debug!("Action on session {} was not applied", session_id);
    }

    Ok(Json(TransitionResponse {
        applied,
        game: GameView::new(session_id, &game),
    }))
}

/// Builds a fresh question list and stores a new game under `session_id`.
async fn build_and_save(
    state: &AppState,
    session_id: Uuid,
    options: GameOptions,
) -> Result<StartGameResponse, ServerError> {
    let mut rng = ChaCha8Rng::from_os_rng();
    let built = QuestionBuilder::new(state.get_content().as_ref())
        .build(&options, &mut rng)
        .await?;

    let requested = built.requested;
    let built_count = built.questions.len();
    let game = GuessingGame::start(options, built.questions);
    state.get_sessions().save(session_id, &game)?;

    Ok(StartGameResponse {
        requested,
        built: built_count,
        game: GameView::new(session_id, &game),
    })
}

async fn start_game(
    State(state): State<Arc<AppState>>,
    ValidatedJson(options): ValidatedJson<GameOptions>,
) -> Result<impl IntoResponse, ServerError> {
    let session_id = Uuid::new_v4();
    let response = build_and_save(&state, session_id, options).await?;
    info!(
        "Started {} game {} with {} questions",
        options.category, session_id, response.built
    );

    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
    let game = load_game(&state, session_id)?;
    Ok((StatusCode::OK, Json(GameView::new(session_id, &game))))
}

async fn select_answer(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<SelectAnswerRequest>,
) -> Result<impl IntoResponse, ServerError> {
    apply_action(&state, session_id, |game| game.select(request.answer_id))
}

async fn use_hint_button(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
    let mut rng = ChaCha8Rng::from_os_rng();
    apply_action(&state, session_id, |game| game.use_hint_button(&mut rng))
}

async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
    apply_action(&state, session_id, GuessingGame::submit)
}

async fn show_answer(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
    apply_action(&state, session_id, GuessingGame::use_show_answer)
}

async fn advance(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
    apply_action(&state, session_id, GuessingGame::advance)
}

async fn get_summary(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
    let game = load_game(&state, session_id)?;
    let Some(summary) = game.summary() else {
        return Err(ServerError::Api(
            StatusCode::CONFLICT,
            "Game is not complete".into(),
        ));
    };

    Ok((StatusCode::OK, Json(summary)))
}

/// Replaces the session's game with a newly built one. The old game is only
/// overwritten once the new build succeeded.
async fn restart_game(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    ValidatedJson(options): ValidatedJson<GameOptions>,
) -> Result<impl IntoResponse, ServerError> {
    let previous = load_game(&state, session_id)?;
    let answered = previous.history().len();

    let response = build_and_save(&state, session_id, options).await?;
    info!(
        "Restarted game {} as {} after {} answered questions",
        session_id, options.category, answered
    );

    Ok((StatusCode::OK, Json(response)))
}

async fn quit_game(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
    if !state.get_sessions().remove(session_id) {
        return Err(ServerError::NotFound(format!(
            "Game session {} does not exist",
            session_id
        )));
    }

    info!("Game session {} was quit", session_id);
    Ok(StatusCode::NO_CONTENT)
}
