
mod question_runtime;
mod session_store;
mod session_tracker;
