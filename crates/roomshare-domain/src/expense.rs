//! Shared expense records and their validity rules.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A single purchase paid by one roommate and shared evenly.
///
/// The expense is split across the first `participant_count` active roster
/// names at computation time, not across a stored list of people.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub paid_by: String,
    #[serde(default)]
    pub participant_count: u32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        paid_by: impl Into<String>,
        participant_count: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            paid_by: paid_by.into(),
            participant_count,
            created_at: Utc::now(),
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Checks the fields the balance computation relies on.
    pub fn check(&self) -> Result<(), ExpenseIssue> {
        if self.paid_by.trim().is_empty() {
            return Err(ExpenseIssue::MissingPayer);
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ExpenseIssue::InvalidAmount(self.amount));
        }
        if self.participant_count == 0 {
            return Err(ExpenseIssue::MissingParticipantCount);
        }
        Ok(())
    }

    /// How many of `active_roster_len` roommates actually bear this expense.
    ///
    /// Falls below `participant_count` once roommates leave after the expense
    /// was recorded; the amount is then spread over whoever remains.
    pub fn covered(&self, active_roster_len: usize) -> usize {
        (self.participant_count as usize).min(active_roster_len)
    }

    /// Amount each covered participant bears.
    pub fn share(&self, active_roster_len: usize) -> f64 {
        match self.covered(active_roster_len) {
            0 => 0.0,
            covered => self.amount / covered as f64,
        }
    }
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!(
            "{} ({:.2} paid by {}, split {} ways)",
            self.description, self.amount, self.paid_by, self.participant_count
        )
    }
}

/// Why an expense was left out of a balance computation.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseIssue {
    MissingPayer,
    InvalidAmount(f64),
    MissingParticipantCount,
}

impl fmt::Display for ExpenseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseIssue::MissingPayer => f.write_str("missing payer"),
            ExpenseIssue::InvalidAmount(amount) => write!(f, "invalid amount {amount}"),
            ExpenseIssue::MissingParticipantCount => f.write_str("missing participant count"),
        }
    }
}
