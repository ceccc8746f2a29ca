//! The three collections that make up a household's shared-expense state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{expense::Expense, roster::Roster, settlement::SettlementRecord};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Caller-owned session state handed to the balance and settlement services.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    #[serde(default)]
    pub roster: Roster,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub settlements: Vec<SettlementRecord>,
}

impl Session {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn expense_mut(&mut self, id: Uuid) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|expense| expense.id == id)
    }
}

/// Point-in-time copy of a session, written by backups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub session: Session,
}

impl SessionSnapshot {
    pub fn capture(session: &Session, note: Option<&str>) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            created_at: Utc::now(),
            note: note.map(str::to_string),
            session: session.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_matches_fresh_household() {
        let session = Session::default();
        assert_eq!(session.roster, Roster::default());
        assert!(session.expenses.is_empty());
        assert!(session.settlements.is_empty());
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut session = Session::new(Roster::new(["Asha", "Ben"]));
        session.expenses.push(Expense::new("Rent", 1200.0, "Asha", 2));
        let snapshot = SessionSnapshot::capture(&session, Some("before move"));
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.session, session);
        assert_eq!(restored.note.as_deref(), Some("before move"));
    }
}
