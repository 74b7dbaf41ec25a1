#[cfg(test)]
mod tests {
    use crate::{
        models::guessing_game::{GameCategory, GameOptions, SessionScore},
        service::session_tracker::SessionTracker,
        tests::fixtures::question,
    };

    #[test]
    fn empty_summary_has_zero_accuracy() {
        let summary = SessionTracker::default().summary(None);

        assert!(summary.questions.is_empty());
        assert_eq!(summary.score, SessionScore::default());
        assert_eq!(summary.accuracy, 0);
        assert!(summary.category_label.is_none());
    }

    #[test]
    fn summary_rounds_accuracy_and_counts_hint_buttons() {
        let mut tracker = SessionTracker::default();

        let mut first = question(1, 4);
        first.hint_button_used = true;
        tracker.record_answer(true);
        tracker.archive(first);

        tracker.record_show_answer();
        tracker.archive(question(2, 4));

        tracker.record_answer(false);
        tracker.archive(question(3, 4));

        let options = GameOptions::new(GameCategory::Mixed, 2, 10);
        let summary = tracker.summary(Some(&options));

        assert_eq!(
            summary.score,
            SessionScore {
                correct: 2,
                incorrect: 1,
                show_answers_used: 1,
            }
        );
        assert_eq!(summary.accuracy, 67);
        assert_eq!(summary.hint_buttons_used, 1);
        assert_eq!(summary.questions.len(), 3);
        assert_eq!(summary.category_label.as_deref(), Some("Mixed"));
        assert_eq!(summary.difficulty_label.as_deref(), Some("Medium"));
        assert_eq!(summary.options, Some(options));
    }

    #[test]
    fn history_keeps_archive_order() {
        let mut tracker = SessionTracker::default();
        for n in 1..=4 {
            tracker.archive(question(n, 4));
        }

        let numbers: Vec<u16> = tracker
            .history()
            .iter()
            .map(|q| q.question_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }
}
