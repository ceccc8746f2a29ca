//! Validated mutations of a caller-owned [`Session`].

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use roomshare_domain::{Displayable, Expense, Session, SettlementInstruction, SettlementRecord};

use crate::{BalanceEngine, BalanceReport, CoreError, SettlementPlanner};

/// User-entered fields of an expense before it is added or edited.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub paid_by: String,
}

impl ExpenseDraft {
    pub fn new(description: impl Into<String>, amount: f64, paid_by: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            amount,
            paid_by: paid_by.into(),
        }
    }
}

/// Provides roster, expense and settlement helpers for a [`Session`].
pub struct SessionService;

impl SessionService {
    /// Appends a roster slot, which may be blank, and returns its index.
    pub fn add_roommate(session: &mut Session, name: impl Into<String>) -> usize {
        let name = name.into();
        let index = session.roster.push_slot(name.trim());
        info!(index, "roster slot added");
        Self::warn_duplicates(session);
        index
    }

    /// Renames the roster slot at `index`.
    pub fn set_roommate(
        session: &mut Session,
        index: usize,
        name: impl Into<String>,
    ) -> Result<(), CoreError> {
        let name = name.into();
        session
            .roster
            .set_slot(index, name.trim())
            .ok_or(CoreError::RosterSlotNotFound(index))?;
        info!(index, "roster slot updated");
        Self::warn_duplicates(session);
        Ok(())
    }

    /// Removes the roster slot at `index`, returning the name it held.
    pub fn remove_roommate(session: &mut Session, index: usize) -> Result<String, CoreError> {
        let removed = session
            .roster
            .remove_slot(index)
            .ok_or(CoreError::RosterSlotNotFound(index))?;
        info!(index, "roster slot removed");
        Ok(removed)
    }

    /// Adds an expense split across everyone currently on the roster.
    pub fn add_expense(
        session: &mut Session,
        draft: ExpenseDraft,
        at: DateTime<Utc>,
    ) -> Result<Uuid, CoreError> {
        Self::validate_draft(session, &draft)?;
        let participant_count = session.roster.active_len() as u32;
        let expense = Expense::new(
            draft.description.trim(),
            draft.amount,
            draft.paid_by.trim(),
            participant_count,
        )
        .with_created_at(at);
        let id = expense.id;
        session.expenses.push(expense);
        info!(%id, participant_count, "expense added");
        Ok(id)
    }

    /// Replaces the editable fields of the expense identified by `id`.
    ///
    /// The split size and creation time stay as originally recorded.
    pub fn edit_expense(
        session: &mut Session,
        id: Uuid,
        draft: ExpenseDraft,
    ) -> Result<(), CoreError> {
        Self::validate_draft(session, &draft)?;
        let expense = session
            .expense_mut(id)
            .ok_or(CoreError::ExpenseNotFound(id))?;
        expense.description = draft.description.trim().to_string();
        expense.amount = draft.amount;
        expense.paid_by = draft.paid_by.trim().to_string();
        info!(%id, "expense updated");
        Ok(())
    }

    /// Removes the expense identified by `id`, returning the removed instance.
    pub fn remove_expense(session: &mut Session, id: Uuid) -> Result<Expense, CoreError> {
        let position = session
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(CoreError::ExpenseNotFound(id))?;
        info!(%id, "expense removed");
        Ok(session.expenses.remove(position))
    }

    pub fn balances(session: &Session) -> BalanceReport {
        BalanceEngine::compute_report(&session.expenses, &session.roster, &session.settlements)
    }

    /// Transfers still needed to clear every balance.
    pub fn pending_settlements(session: &Session) -> Vec<SettlementInstruction> {
        SettlementPlanner::plan(&Self::balances(session).balances)
    }

    /// Records `instruction` as paid at `at`.
    pub fn mark_settled(
        session: &mut Session,
        instruction: SettlementInstruction,
        at: DateTime<Utc>,
    ) -> SettlementRecord {
        info!(settlement = %instruction.display_label(), "settlement recorded");
        let record = instruction.into_record(at);
        session.settlements.push(record.clone());
        record
    }

    /// Records the pending settlement at `index` of the current plan as paid.
    pub fn settle_pending(
        session: &mut Session,
        index: usize,
        at: DateTime<Utc>,
    ) -> Result<SettlementRecord, CoreError> {
        let instruction = Self::pending_settlements(session)
            .into_iter()
            .nth(index)
            .ok_or(CoreError::SettlementNotFound(index))?;
        Ok(Self::mark_settled(session, instruction, at))
    }

    /// Records every pending settlement as paid.
    pub fn settle_all(session: &mut Session, at: DateTime<Utc>) -> Vec<SettlementRecord> {
        Self::pending_settlements(session)
            .into_iter()
            .map(|instruction| Self::mark_settled(session, instruction, at))
            .collect()
    }

    fn validate_draft(session: &Session, draft: &ExpenseDraft) -> Result<(), CoreError> {
        if draft.description.trim().is_empty() {
            return Err(CoreError::Validation("description is required".into()));
        }
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(CoreError::Validation(
                "amount must be a positive number".into(),
            ));
        }
        if session.roster.active_len() == 0 {
            return Err(CoreError::Validation(
                "add at least one roommate before recording expenses".into(),
            ));
        }
        let payer = draft.paid_by.trim();
        if payer.is_empty() {
            return Err(CoreError::Validation("payer is required".into()));
        }
        if !session.roster.contains(payer) {
            return Err(CoreError::Validation(format!(
                "`{payer}` is not on the roster"
            )));
        }
        Ok(())
    }

    fn warn_duplicates(session: &Session) {
        for name in session.roster.duplicate_names() {
            warn!(name, "roommate name appears in more than one slot; balances will merge");
        }
    }
}
