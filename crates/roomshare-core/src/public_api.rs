//! Stable, public-facing helpers that wrap the internal service layer.
//!
//! Frontends (CLI, GUI) can rely on these without depending on the entire
//! service surface area.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use roomshare_domain::{
    BalanceSheet, Expense, Roster, Session, SettlementInstruction, SettlementRecord,
};

use crate::{
    session_service::{ExpenseDraft, SessionService},
    BalanceEngine, CoreError, SettlementPlanner,
};

/// Net balance per roommate for the given collections.
pub fn compute_balances(
    expenses: &[Expense],
    roster: &Roster,
    history: &[SettlementRecord],
) -> BalanceSheet {
    BalanceEngine::compute(expenses, roster, history)
}

/// Ordered transfers that clear `balances`.
pub fn plan_settlements(balances: &BalanceSheet) -> Vec<SettlementInstruction> {
    SettlementPlanner::plan(balances)
}

/// Adds an expense split across the current roster and returns its identifier.
pub fn api_add_expense(
    session: &mut Session,
    description: impl Into<String>,
    amount: f64,
    paid_by: impl Into<String>,
) -> Result<Uuid, CoreError> {
    SessionService::add_expense(
        session,
        ExpenseDraft::new(description, amount, paid_by),
        Utc::now(),
    )
}

/// Records a settlement instruction as paid at `at`.
pub fn api_mark_settled(
    session: &mut Session,
    instruction: SettlementInstruction,
    at: DateTime<Utc>,
) -> SettlementRecord {
    SessionService::mark_settled(session, instruction, at)
}

/// Pending transfers for the session's current state.
pub fn api_pending_settlements(session: &Session) -> Vec<SettlementInstruction> {
    SessionService::pending_settlements(session)
}
