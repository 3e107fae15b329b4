//! Core PlanIt client library (config, API, storage, session, handlers).

pub mod api;
pub mod config;
pub mod context;
pub mod embedded;
pub mod handlers;
pub mod logging;
pub mod outcome;
pub mod posture;
pub mod session;
pub mod storage;
pub mod validation;
