pub mod app_state;
pub mod content;
pub mod error;
pub mod guessing_game;
