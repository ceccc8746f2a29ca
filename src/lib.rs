#![doc(test(attr(deny(warnings))))]

//! Roomshare tracks shared flat expenses, computes who owes whom and plans
//! the transfers that clear every balance. The library hosts the interactive
//! shell; the balance and settlement logic lives in `roomshare-core`.

pub mod cli;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Roomshare tracing initialized.");
    });
}
