pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod page;
pub mod state;
pub mod ui;

pub use app::router;
pub use client::{HabitApi, HabitSubmission, HttpHabitApi};
pub use config::ServerConfig;
pub use page::{Document, MemoryDocument, Page, PageConfig};
pub use state::AppState;
