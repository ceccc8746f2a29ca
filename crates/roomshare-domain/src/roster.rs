//! Ordered roommate slots, including blank placeholders awaiting a name.

use serde::{Deserialize, Serialize};

/// Ordered list of roommate name slots.
///
/// Slot order is significant: an expense covering `k` participants is split
/// across the first `k` active names in this order. Reordering or renaming
/// slots therefore changes who bears the shares of past expenses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Roster {
    slots: Vec<String>,
}

impl Default for Roster {
    /// A fresh roster holds a single blank slot ready for input.
    fn default() -> Self {
        Self {
            slots: vec![String::new()],
        }
    }
}

impl Roster {
    pub fn new<I, S>(slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            slots: slots.into_iter().map(Into::into).collect(),
        }
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(String::as_str)
    }

    /// Appends a slot and returns its index. Blank names are allowed.
    pub fn push_slot(&mut self, name: impl Into<String>) -> usize {
        self.slots.push(name.into());
        self.slots.len() - 1
    }

    /// Overwrites the slot at `index`, returning the previous value.
    pub fn set_slot(&mut self, index: usize, name: impl Into<String>) -> Option<String> {
        let slot = self.slots.get_mut(index)?;
        Some(std::mem::replace(slot, name.into()))
    }

    pub fn remove_slot(&mut self, index: usize) -> Option<String> {
        if index < self.slots.len() {
            Some(self.slots.remove(index))
        } else {
            None
        }
    }

    /// Non-blank names in slot order.
    pub fn active(&self) -> Vec<&str> {
        self.slots
            .iter()
            .map(|slot| slot.trim())
            .filter(|name| !name.is_empty())
            .collect()
    }

    pub fn active_len(&self) -> usize {
        self.active().len()
    }

    pub fn contains(&self, name: &str) -> bool {
        let needle = name.trim();
        !needle.is_empty() && self.active().contains(&needle)
    }

    /// Names that occupy more than one active slot, in first-seen order.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let active = self.active();
        let mut duplicates: Vec<&str> = Vec::new();
        for (idx, name) in active.iter().enumerate() {
            if active[..idx].contains(name) && !duplicates.contains(name) {
                duplicates.push(*name);
            }
        }
        duplicates
    }
}
