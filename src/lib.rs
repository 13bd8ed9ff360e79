//! Registration and notification engine for postal-area pings, plus the
//! Discord glue that hosts it. Library entry so the integration tests and
//! the offline tools can reference the same modules as the bot binary.

pub mod batcher;
pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod fsa;
pub mod handler;
pub mod identity;
pub mod import;
pub mod logging;
pub mod model;
pub mod reconciler;

pub use model::AppState;
