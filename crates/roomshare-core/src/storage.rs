use std::path::PathBuf;

use roomshare_domain::{Expense, Roster, Session, SettlementRecord};

use crate::CoreError;

/// Describes a persisted backup artifact for a session.
#[derive(Debug, Clone)]
pub struct SessionBackupInfo {
    pub id: String,
    pub created_at: String,
    pub path: PathBuf,
}

/// Abstraction over persistence backends for the three session collections.
///
/// Each collection is loaded and saved independently. Missing collections
/// load as their defaults: no expenses, one blank roster slot, no settlements.
pub trait SessionStorage: Send + Sync {
    fn load_expenses(&self) -> Result<Vec<Expense>, CoreError>;
    fn save_expenses(&self, expenses: &[Expense]) -> Result<(), CoreError>;
    fn load_roster(&self) -> Result<Roster, CoreError>;
    fn save_roster(&self, roster: &Roster) -> Result<(), CoreError>;
    fn load_settlements(&self) -> Result<Vec<SettlementRecord>, CoreError>;
    fn save_settlements(&self, settlements: &[SettlementRecord]) -> Result<(), CoreError>;
    fn backup_session(
        &self,
        session: &Session,
        note: Option<&str>,
    ) -> Result<SessionBackupInfo, CoreError>;
    fn list_backups(&self) -> Result<Vec<SessionBackupInfo>, CoreError>;
    fn restore_backup(&self, backup: &SessionBackupInfo) -> Result<Session, CoreError>;

    fn load_session(&self) -> Result<Session, CoreError> {
        Ok(Session {
            roster: self.load_roster()?,
            expenses: self.load_expenses()?,
            settlements: self.load_settlements()?,
        })
    }

    fn save_session(&self, session: &Session) -> Result<(), CoreError> {
        self.save_roster(&session.roster)?;
        self.save_expenses(&session.expenses)?;
        self.save_settlements(&session.settlements)
    }
}

/// Detects session anomalies worth surfacing after a load.
pub fn session_warnings(session: &Session) -> Vec<String> {
    let mut warnings = Vec::new();
    let active_len = session.roster.active_len();

    for name in session.roster.duplicate_names() {
        warnings.push(format!(
            "roommate `{}` occupies more than one roster slot; their balances merge",
            name
        ));
    }
    for (index, expense) in session.expenses.iter().enumerate() {
        if let Err(issue) = expense.check() {
            warnings.push(format!(
                "expense #{} `{}` is ignored: {}",
                index + 1,
                expense.description,
                issue
            ));
            continue;
        }
        if !session.roster.contains(&expense.paid_by) {
            warnings.push(format!(
                "expense #{} was paid by `{}`, who is no longer on the roster",
                index + 1,
                expense.paid_by
            ));
        }
        if active_len > 0 && expense.covered(active_len) < expense.participant_count as usize {
            warnings.push(format!(
                "expense #{} was split {} ways but only {} roommate(s) remain to share it",
                index + 1,
                expense.participant_count,
                active_len
            ));
        }
    }
    for record in &session.settlements {
        for name in [&record.from, &record.to] {
            if !session.roster.contains(name) {
                warnings.push(format!(
                    "settlement {} -> {} references `{}`, who is not on the roster",
                    record.from, record.to, name
                ));
            }
        }
    }
    warnings
}
