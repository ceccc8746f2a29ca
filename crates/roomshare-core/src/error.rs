use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Roster slot not found: {0}")]
    RosterSlotNotFound(usize),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("Pending settlement not found: {0}")]
    SettlementNotFound(usize),
    #[error("Backup not found: {0}")]
    BackupNotFound(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}
