//! roomshare-domain
//!
//! Pure domain models (Roster, Expense, BalanceSheet, Settlement, Session).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod balance;
pub mod common;
pub mod expense;
pub mod roster;
pub mod session;
pub mod settlement;

pub use balance::*;
pub use common::*;
pub use expense::*;
pub use roster::*;
pub use session::*;
pub use settlement::*;
