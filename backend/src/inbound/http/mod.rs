//! HTTP inbound adapter exposing REST endpoints.

pub mod cache_control;
pub mod error;
pub mod health;
pub mod recipes;
pub mod schemas;
pub mod session;
pub mod state;
pub mod tags;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
