//! Net balances per roommate.

use serde::{Deserialize, Serialize};

/// One roommate's net position: positive is owed money, negative owes money.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceEntry {
    pub name: String,
    pub balance: f64,
}

/// Insertion-ordered mapping from roommate name to net balance.
///
/// Iteration follows insertion order, which keeps settlement plans
/// reproducible: the planner breaks ties in favour of the earliest entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BalanceSheet {
    entries: Vec<BalanceEntry>,
}

impl BalanceSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sheet with a zero entry for every name, merging repeats.
    pub fn zeroed<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut sheet = Self::new();
        for name in names {
            sheet.entry_mut(name);
        }
        sheet
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.balance)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Returns the balance slot for `name`, appending a zero entry if absent.
    pub fn entry_mut(&mut self, name: &str) -> &mut f64 {
        let position = match self.entries.iter().position(|entry| entry.name == name) {
            Some(position) => position,
            None => {
                self.entries.push(BalanceEntry {
                    name: name.to_string(),
                    balance: 0.0,
                });
                self.entries.len() - 1
            }
        };
        &mut self.entries[position].balance
    }

    pub fn credit(&mut self, name: &str, amount: f64) {
        *self.entry_mut(name) += amount;
    }

    pub fn debit(&mut self, name: &str, amount: f64) {
        *self.entry_mut(name) -= amount;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.balance))
    }

    pub fn entries(&self) -> &[BalanceEntry] {
        &self.entries
    }

    /// Sum of every balance; zero for any consistent sheet.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.balance).sum()
    }

    /// True when every balance lies within `tolerance` of zero.
    pub fn is_settled(&self, tolerance: f64) -> bool {
        self.entries
            .iter()
            .all(|entry| entry.balance.abs() <= tolerance)
    }
}

impl<'a> FromIterator<(&'a str, f64)> for BalanceSheet {
    fn from_iter<T: IntoIterator<Item = (&'a str, f64)>>(iter: T) -> Self {
        let mut sheet = Self::new();
        for (name, balance) in iter {
            *sheet.entry_mut(name) += balance;
        }
        sheet
    }
}
