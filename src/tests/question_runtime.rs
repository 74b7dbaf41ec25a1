#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::{
        models::guessing_game::{GameCategory, GameOptions, GamePhase, SessionScore},
        service::{question_builder::QuestionBuilder, question_runtime::GuessingGame},
        tests::fixtures::{ScriptedContentSource, questions},
    };

    fn options(difficulty: u8) -> GameOptions {
        GameOptions::new(GameCategory::Movies, difficulty, 10)
    }

    fn game(count: u16, answer_count: i64) -> GuessingGame {
        GuessingGame::start(options(1), questions(count, answer_count))
    }

    fn eliminated_ids(game: &GuessingGame) -> Vec<i64> {
        game.current_question()
            .unwrap()
            .all_answers
            .iter()
            .filter(|a| a.is_eliminated)
            .map(|a| a.id)
            .collect()
    }

    #[test]
    fn new_game_starts_at_first_question() {
        let game = game(3, 4);

        assert_eq!(game.phase(), GamePhase::InProgress);
        assert_eq!(game.current_question_number(), 1);
        assert_eq!(game.total_questions(), 3);
        assert_eq!(game.score(), SessionScore::default());
        assert!(game.history().is_empty());
        assert!(game.summary().is_none());
    }

    #[test]
    fn select_can_change_until_answered() {
        let mut game = game(1, 4);

        assert!(game.select(2));
        assert!(game.select(3));
        assert_eq!(
            game.current_question().unwrap().selected_answer.as_ref().unwrap().id,
            3
        );

        assert!(game.submit());
        assert!(!game.select(1));
        assert_eq!(
            game.current_question().unwrap().selected_answer.as_ref().unwrap().id,
            3
        );
    }

    #[test]
    fn select_rejects_unknown_answer() {
        let mut game = game(1, 4);

        assert!(!game.select(99));
        assert!(game.current_question().unwrap().selected_answer.is_none());
    }

    #[test]
    fn submit_without_selection_is_ignored() {
        let mut game = game(1, 4);

        assert!(!game.submit());
        assert!(!game.current_question().unwrap().is_answered);
        assert_eq!(game.score(), SessionScore::default());
    }

    #[test]
    fn submit_scores_correct_and_incorrect() {
        let mut game = game(2, 4);

        game.select(1);
        assert!(game.submit());
        assert_eq!(game.current_question().unwrap().is_correct, Some(true));
        assert_eq!(game.score().correct, 1);

        assert!(!game.submit());
        assert_eq!(game.score().correct, 1);

        game.advance();
        game.select(4);
        assert!(game.submit());
        assert_eq!(game.current_question().unwrap().is_correct, Some(false));
        assert_eq!(game.score().incorrect, 1);
    }

    #[test]
    fn hint_button_eliminates_one_wrong_answer_once() {
        let mut game = game(1, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        assert!(game.use_hint_button(&mut rng));
        let eliminated = eliminated_ids(&game);
        assert_eq!(eliminated.len(), 1);
        assert_ne!(eliminated[0], 1);

        assert!(!game.use_hint_button(&mut rng));
        assert_eq!(eliminated_ids(&game), eliminated);

        let question = game.current_question().unwrap();
        assert!(question.hint_button_used);
        assert!(question.revealed_hints.len() == 2);
        assert!(
            question
                .wrong_answers
                .iter()
                .any(|a| a.id == eliminated[0] && a.is_eliminated)
        );
    }

    #[test]
    fn hint_button_takes_the_last_wrong_answer() {
        let mut game = game(1, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(12);

        assert!(game.use_hint_button(&mut rng));
        assert_eq!(eliminated_ids(&game), vec![2]);

        assert!(!game.use_hint_button(&mut rng));
        assert!(!game.use_hint_button(&mut rng));
        assert_eq!(eliminated_ids(&game), vec![2]);
    }

    #[test]
    fn hint_button_without_wrong_answers_is_ignored() {
        let mut game = game(1, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(13);

        assert!(!game.use_hint_button(&mut rng));
        assert!(!game.current_question().unwrap().hint_button_used);
    }

    #[test]
    fn eliminated_answer_cannot_be_selected() {
        let mut game = game(1, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(14);

        game.select(2);
        game.use_hint_button(&mut rng);

        assert!(game.current_question().unwrap().selected_answer.is_none());
        assert!(!game.select(2));
        assert!(!game.submit());
    }

    #[test]
    fn hint_button_is_ignored_after_answering() {
        let mut game = game(1, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(15);

        game.select(2);
        game.submit();

        assert!(!game.use_hint_button(&mut rng));
        assert!(eliminated_ids(&game).is_empty());
        assert!(!game.hint_button_available());
    }

    #[test]
    fn hint_button_is_hidden_on_hard_games() {
        let easy = game(1, 4);
        let hard = GuessingGame::start(options(3), questions(1, 8));

        assert!(easy.hint_button_available());
        assert!(!hard.hint_button_available());
    }

    #[test]
    fn show_answer_scores_as_correct() {
        let mut game = game(1, 4);

        assert!(game.use_show_answer());

        let question = game.current_question().unwrap();
        assert!(question.is_answered);
        assert!(question.show_answer_used);
        assert_eq!(question.is_correct, Some(true));
        assert_eq!(question.selected_answer.as_ref().unwrap().id, 1);
        assert_eq!(
            game.score(),
            SessionScore {
                correct: 1,
                incorrect: 0,
                show_answers_used: 1,
            }
        );

        assert!(!game.use_show_answer());
        assert_eq!(game.score().show_answers_used, 1);
    }

    #[test]
    fn show_answer_is_ignored_after_submit() {
        let mut game = game(1, 4);

        game.select(3);
        game.submit();

        assert!(!game.use_show_answer());
        assert_eq!(game.score().incorrect, 1);
        assert_eq!(game.score().show_answers_used, 0);
        assert_eq!(game.current_question().unwrap().is_correct, Some(false));
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut game = game(2, 4);

        assert!(!game.advance());
        assert_eq!(game.current_question_number(), 1);
        assert!(game.history().is_empty());
    }

    #[test]
    fn advancing_past_last_question_completes_the_game() {
        let mut game = game(3, 4);

        for (idx, answer) in [1, 2, 1].into_iter().enumerate() {
            assert_eq!(game.current_question_number(), idx + 1);
            game.select(answer);
            game.submit();
            assert!(game.advance());
            assert_eq!(game.history().len(), idx + 1);
        }

        assert_eq!(game.phase(), GamePhase::Complete);
        assert!(game.current_question().is_none());
        assert!(!game.advance());
        assert!(!game.select(1));

        let score = game.score();
        assert_eq!(score.correct + score.incorrect, 3);
        assert_eq!(score.correct, 2);

        let summary = game.summary().unwrap();
        assert_eq!(summary.questions.len(), 3);
        assert!(summary.questions.iter().all(|q| q.is_answered));
        assert_eq!(summary.score, score);
    }

    #[test]
    fn restart_discards_everything() {
        let mut game = game(3, 4);
        game.select(1);
        game.submit();
        game.advance();

        game.restart();

        assert_eq!(game, GuessingGame::default());
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert!(game.options().is_none());
        assert_eq!(game.total_questions(), 0);
        assert_eq!(game.current_question_number(), 0);
        assert_eq!(game.score(), SessionScore::default());
        assert!(game.history().is_empty());
        assert!(!game.select(1));
    }

    #[test]
    fn starting_again_after_restart_has_no_old_questions() {
        let mut game = game(3, 4);
        game.use_show_answer();
        game.advance();
        game.restart();

        let game = GuessingGame::start(options(2), questions(2, 6));

        assert_eq!(game.total_questions(), 2);
        assert_eq!(game.current_question_number(), 1);
        assert!(game.history().is_empty());
        assert_eq!(game.current_question().unwrap().all_answers.len(), 6);
    }

    #[tokio::test]
    async fn easy_movie_session_end_to_end() {
        let source = ScriptedContentSource::with_pools(40, 0);
        let options = GameOptions::new(GameCategory::Movies, 1, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let built = QuestionBuilder::new(&source)
            .build(&options, &mut rng)
            .await
            .unwrap();
        assert_eq!(built.questions.len(), 10);
        assert!(
            built
                .questions
                .iter()
                .all(|q| q.all_answers.len() == 4 && q.revealed_hints.len() == 3)
        );

        let mut game = GuessingGame::start(options, built.questions);
        let mut expected_correct = 0;

        for round in 0..10 {
            let question = game.current_question().unwrap();
            let answer_id = if round % 3 == 0 {
                question
                    .all_answers
                    .iter()
                    .find(|a| !a.is_correct)
                    .unwrap()
                    .id
            } else {
                expected_correct += 1;
                question.correct_answer.id
            };

            assert!(game.select(answer_id));
            assert!(game.submit());
            assert!(game.advance());
        }

        let summary = game.summary().unwrap();
        assert_eq!(summary.score.correct + summary.score.incorrect, 10);
        assert_eq!(summary.score.correct, expected_correct);
        assert_eq!(summary.score.show_answers_used, 0);
        assert_eq!(summary.questions.len(), 10);
    }
}
