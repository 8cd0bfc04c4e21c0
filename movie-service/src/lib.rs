pub mod models;
pub mod service;
pub mod settings;
pub mod telemetry;

pub use service::{AppState, build_router, create_app};
