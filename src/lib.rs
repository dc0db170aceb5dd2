// The binary in main.rs and the integration tests in tests/ both consume the
// crate through this module tree; tests drive `quizdr::app::App` directly
// without a terminal attached.

pub mod app;
pub mod catalog;
pub mod config;
pub mod event;
pub mod generator;
pub mod rank;
pub mod session;
pub mod stats;
pub mod store;
pub mod sync;
pub mod ui;
