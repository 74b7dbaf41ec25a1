#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use uuid::Uuid;

    use crate::{
        models::guessing_game::{GameCategory, GameOptions},
        service::{
            question_runtime::GuessingGame,
            session_store::{MemorySessionStore, SessionStore},
        },
        tests::fixtures::questions,
    };

    fn started_game() -> GuessingGame {
        let mut game = GuessingGame::start(
            GameOptions::new(GameCategory::Movies, 1, 10),
            questions(3, 4),
        );
        game.select(2);
        game.submit();
        game
    }

    #[test]
    fn saved_game_restores_mid_question_state() {
        let store = MemorySessionStore::from_retention(TimeDelta::days(7));
        let session_id = Uuid::new_v4();
        let game = started_game();

        store.save(session_id, &game).unwrap();
        let loaded = store.load(session_id).unwrap().unwrap();

        assert_eq!(loaded, game);
        assert_eq!(loaded.score().incorrect, 1);
        assert!(loaded.current_question().unwrap().is_answered);
    }

    #[test]
    fn unknown_session_loads_nothing() {
        let store = MemorySessionStore::from_retention(TimeDelta::days(7));

        assert!(store.load(Uuid::new_v4()).unwrap().is_none());
        assert!(!store.remove(Uuid::new_v4()));
    }

    #[test]
    fn expired_game_is_dropped_on_load() {
        let store = MemorySessionStore::from_retention(TimeDelta::days(7));
        let session_id = Uuid::new_v4();
        let saved_at = Utc::now() - TimeDelta::days(8);

        store.save_at(session_id, &started_game(), saved_at).unwrap();

        assert!(store.load(session_id).unwrap().is_none());
        assert!(!store.remove(session_id));
    }

    #[test]
    fn purge_keeps_recent_games() {
        let store = MemorySessionStore::from_retention(TimeDelta::days(7));
        let now = Utc::now();
        let fresh = Uuid::new_v4();
        let stale = Uuid::new_v4();

        store
            .save_at(fresh, &started_game(), now - TimeDelta::days(1))
            .unwrap();
        store
            .save_at(stale, &started_game(), now - TimeDelta::days(10))
            .unwrap();

        assert_eq!(store.purge_expired(now), 1);
        assert!(store.load_at(fresh, now).unwrap().is_some());
        assert!(store.load_at(stale, now).unwrap().is_none());
    }

    #[test]
    fn remove_discards_the_game() {
        let store = MemorySessionStore::from_retention(TimeDelta::days(7));
        let session_id = Uuid::new_v4();

        store.save(session_id, &started_game()).unwrap();

        assert!(store.remove(session_id));
        assert!(store.load(session_id).unwrap().is_none());
    }
}
