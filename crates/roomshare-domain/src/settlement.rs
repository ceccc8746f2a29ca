//! Proposed and recorded payments between roommates.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::*;

/// A proposed one-way payment from a debtor to a creditor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettlementInstruction {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

impl SettlementInstruction {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }

    /// Stamps the instruction as paid at `timestamp`.
    pub fn into_record(self, timestamp: DateTime<Utc>) -> SettlementRecord {
        SettlementRecord {
            from: self.from,
            to: self.to,
            amount: self.amount,
            timestamp,
            status: SettlementStatus::Settled,
        }
    }
}

impl Amounted for SettlementInstruction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for SettlementInstruction {
    fn display_label(&self) -> String {
        format!("{} pays {} {:.2}", self.from, self.to, self.amount)
    }
}

/// A settlement that has been paid and now offsets future balances.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettlementRecord {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub status: SettlementStatus,
}

impl SettlementRecord {
    pub fn instruction(&self) -> SettlementInstruction {
        SettlementInstruction::new(self.from.clone(), self.to.clone(), self.amount)
    }
}

impl Amounted for SettlementRecord {
    fn amount(&self) -> f64 {
        self.amount
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    #[default]
    Settled,
}

impl fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettlementStatus::Settled => f.write_str("settled"),
        }
    }
}
