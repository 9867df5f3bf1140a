pub mod app;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod navigator;
pub mod page;
pub mod state;
pub mod storage;
pub mod ui;
pub mod validation;

pub use app::router;
pub use navigator::{NavError, NavState, Navigator, SubmitOutcome};
pub use state::AppState;
pub use storage::{load_log, resolve_data_path};
