pub mod content_source;
pub mod question_builder;
pub mod question_runtime;
pub mod session_store;
pub mod session_tracker;
