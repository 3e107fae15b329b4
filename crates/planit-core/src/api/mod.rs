//! PlanIt REST API: client, wire types, errors.

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, Identity, QueryEncoding, USER_AGENT};
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use types::{Event, LoginResponse, Task};
