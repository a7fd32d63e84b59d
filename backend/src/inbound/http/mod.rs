//! HTTP inbound adapter exposing the REST endpoints under `/api/v1`.

pub mod dashboard;
pub mod error;
pub mod health;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod translations;
pub mod users;

pub use crate::domain::ApiResult;
pub use error::json_config;
