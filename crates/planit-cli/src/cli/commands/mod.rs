//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod events;
pub mod tasks;

mod output;
mod prompt;
