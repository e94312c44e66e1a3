//! DraftMap Application
//!
//! A command-line host for the draft store: it plays the part of the map
//! renderer by printing every render notification as a JSON line.

mod app;
mod sink;

pub use app::{AppConfig, AppError, AppResult, DELETED_KEY, load_collection, run};
pub use sink::JsonLineSink;
