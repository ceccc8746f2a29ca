//! roomshare-core
//!
//! Balance computation, settlement planning and session services.
//! Depends on roomshare-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod balance_engine;
pub mod error;
pub mod public_api;
pub mod session_service;
pub mod settlement_planner;
pub mod storage;
pub mod summary_service;

pub use balance_engine::*;
pub use error::CoreError;
pub use session_service::*;
pub use settlement_planner::*;
pub use summary_service::*;

#[cfg(test)]
mod tests;
