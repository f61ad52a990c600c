pub mod api;
pub mod config;
pub mod email;
pub mod error;
pub mod jobs;
mod main_lib;
pub mod scheduler;

pub use main_lib::{build_state, init_tracing, AppState};
